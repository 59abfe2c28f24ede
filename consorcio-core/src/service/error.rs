use consorcio_providers::gateway::error::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionServiceError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Gateway error: `{0}`")]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Error)]
pub enum ClaimServiceError {
    #[error("Claim title is empty")]
    EmptyTitle,
    #[error("Gateway error: `{0}`")]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Error)]
pub enum PaymentServiceError {
    #[error("No proof file selected")]
    NoFileSelected,
    #[error("Gateway error: `{0}`")]
    Gateway(#[from] GatewayError),
}
