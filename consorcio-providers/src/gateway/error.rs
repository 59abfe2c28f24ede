//! Enumerates errors related to the remote data gateway.

use thiserror::Error;

use crate::http_client;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Transport error: `{0}`")]
    Http(#[from] http_client::Error),
    #[error("Backend responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Could not decode response: `{0}`")]
    Decode(String),
    #[error("Invalid url: `{0}`")]
    Url(#[from] url::ParseError),
}

impl GatewayError {
    /// Message suitable for showing to the user as-is.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.to_owned(),
            other => other.to_string(),
        }
    }
}
