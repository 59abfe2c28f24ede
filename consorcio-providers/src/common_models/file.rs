/// A file picked by the user, ready to be uploaded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Location of an uploaded object inside the object storage.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
}
