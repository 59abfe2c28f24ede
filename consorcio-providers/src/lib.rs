//! Providers for the ConsorcioTrust client: domain models, the HTTP client
//! abstraction and the remote data gateway to the hosted backend.

pub mod common_models;
pub mod gateway;
pub mod http_client;
