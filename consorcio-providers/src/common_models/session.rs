use serde::{Deserialize, Serialize};

use super::macros::uuid_newtype;

uuid_newtype!(UserId);

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// Authenticated identity issued by the backend's auth service.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: SessionUser,
}

impl Session {
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}
