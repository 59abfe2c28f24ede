//! Remote data gateway: the backend's auth, table and object-storage APIs.
//!
//! The three concerns are separate traits so that services only depend on
//! what they call. A single backend implementation usually provides all of
//! them, see [`imp::supabase::SupabaseGateway`].

use tokio::sync::watch;
use url::Url;

use crate::common_models::{
    claim::{Claim, NewClaim},
    expense::ExpenseItem,
    file::{StoredObject, UploadFile},
    payment::{NewPayment, Payment},
    profile::Profile,
    session::{Session, UserId},
};
use error::GatewayError;

pub mod error;
pub mod imp;
pub mod model;

pub const CLAIMS_TABLE: &str = "claims";
pub const EXPENSE_ITEMS_TABLE: &str = "expense_items";
pub const PAYMENTS_TABLE: &str = "payments";
pub const PROFILES_TABLE: &str = "profiles";

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, GatewayError>;

    /// Returns `None` when the account was created but still needs to be
    /// confirmed before a session is issued.
    async fn sign_up(&self, email: &str, password: &str)
        -> Result<Option<Session>, GatewayError>;

    /// Drops the local session even when the backend rejects the logout.
    async fn sign_out(&self) -> Result<(), GatewayError>;

    fn get_session(&self) -> Option<Session>;

    /// Notified on every later change of the current session.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait DataGateway: Send + Sync {
    /// All visible claims, newest first.
    async fn fetch_claims(&self) -> Result<Vec<Claim>, GatewayError>;

    async fn fetch_expense_items(&self) -> Result<Vec<ExpenseItem>, GatewayError>;

    async fn fetch_profile(&self, user_id: UserId) -> Result<Option<Profile>, GatewayError>;

    /// Returns the stored row when the backend sends it back.
    async fn insert_claim(&self, claim: NewClaim) -> Result<Option<Claim>, GatewayError>;

    async fn insert_payment(&self, payment: NewPayment)
        -> Result<Option<Payment>, GatewayError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait StorageGateway: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        file: UploadFile,
    ) -> Result<StoredObject, GatewayError>;

    fn public_url(&self, bucket: &str, key: &str) -> Result<Url, GatewayError>;
}
