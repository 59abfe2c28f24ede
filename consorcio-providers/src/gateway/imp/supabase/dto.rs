use serde::{Deserialize, Serialize};

use crate::common_models::session::UserId;

#[derive(Serialize)]
pub(super) struct PasswordCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(super) struct UserDTO {
    pub id: UserId,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct TokenResponseDTO {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: UserDTO,
}

/// Sign-up answers with a full token response when accounts are confirmed
/// automatically, and with the bare user otherwise.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum SignUpResponseDTO {
    Session(TokenResponseDTO),
    PendingConfirmation(UserDTO),
}

#[derive(Default, Deserialize)]
pub(super) struct ErrorBodyDTO {
    pub message: Option<String>,
    pub msg: Option<String>,
    pub error_description: Option<String>,
    pub error: Option<String>,
}
