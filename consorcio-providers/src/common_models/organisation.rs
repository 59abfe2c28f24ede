use super::macros::uuid_newtype;

uuid_newtype!(
    /// The building (consortium) a claim is filed against.
    ConsortiumId
);

uuid_newtype!(
    /// A functional unit (apartment) inside a consortium.
    UnitId
);
