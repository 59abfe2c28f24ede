use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use super::macros::uuid_newtype;
use super::organisation::ConsortiumId;
use super::session::UserId;

uuid_newtype!(ClaimId);

#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClaimStatus {
    #[default]
    Open,
    Resolved,
}

#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClaimPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A maintenance ticket as stored by the backend.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub title: String,
    pub status: ClaimStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: ClaimPriority,
    pub consortium_id: ConsortiumId,
    pub user_id: UserId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Nullable columns decode to the default instead of failing the row.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Insert payload for the `claims` table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NewClaim {
    pub title: String,
    pub status: ClaimStatus,
    pub priority: ClaimPriority,
    pub consortium_id: ConsortiumId,
    pub user_id: UserId,
}

impl NewClaim {
    /// Local stand-in used when the backend accepts the insert without
    /// returning the stored row.
    pub fn into_local_claim(self) -> Claim {
        Claim {
            id: uuid::Uuid::new_v4().into(),
            title: self.title,
            status: self.status,
            priority: self.priority,
            consortium_id: self.consortium_id,
            user_id: self.user_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
