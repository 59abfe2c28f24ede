use serde::{Deserialize, Serialize};

use super::organisation::{ConsortiumId, UnitId};
use super::session::UserId;

/// Owner profile row linking a user to their building and unit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub consortium_id: Option<ConsortiumId>,
    #[serde(default)]
    pub unit_id: Option<UnitId>,
}
