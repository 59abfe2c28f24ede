//! Gateway implementation for a Supabase-style hosted backend.
//!
//! Tables are reached through the PostgREST dialect under `/rest/v1`, the
//! password flow of the auth service under `/auth/v1` and object storage
//! under `/storage/v1`. The current session is held in a watch channel so
//! that any number of listeners can follow sign-in and sign-out.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::watch;
use url::Url;

use crate::{
    common_models::{
        claim::{Claim, NewClaim},
        expense::ExpenseItem,
        file::{StoredObject, UploadFile},
        payment::{NewPayment, Payment},
        profile::Profile,
        session::{Session, UserId},
    },
    gateway::{
        error::GatewayError,
        model::{Direction, Query},
        AuthGateway, DataGateway, StorageGateway, CLAIMS_TABLE, EXPENSE_ITEMS_TABLE,
        PAYMENTS_TABLE, PROFILES_TABLE,
    },
    http_client::{HttpClient, RequestBuilder},
};

mod dto;
mod mapper;

use dto::{PasswordCredentials, SignUpResponseDTO, TokenResponseDTO};
use mapper::{check_status, decode_error, query_params};

#[derive(Clone, Debug)]
pub struct Params {
    /// Project base url, e.g. `https://<project>.supabase.co`.
    pub url: Url,
    /// Public ("anon") api key of the project.
    pub anon_key: String,
}

pub struct SupabaseGateway {
    params: Params,
    client: Arc<dyn HttpClient>,
    session: watch::Sender<Option<Session>>,
}

impl SupabaseGateway {
    pub fn new(params: Params, client: Arc<dyn HttpClient>) -> Self {
        let (session, _) = watch::channel(None);

        Self {
            params,
            client,
            session,
        }
    }

    /// `select` against any table, following [`Query`].
    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, GatewayError> {
        let url = self.endpoint(&["rest", "v1", query.table.as_str()])?;

        let response = self
            .authorized(self.client.get(url.as_str()))
            .query(query_params(query))?
            .send()
            .await?;

        check_status(response)?.json().map_err(decode_error)
    }

    /// Inserts a single record and returns the stored row, if sent back.
    pub async fn insert<T, R>(&self, table: &str, record: &T) -> Result<Option<R>, GatewayError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(&["rest", "v1", table])?;

        let response = self
            .authorized(self.client.post(url.as_str()))
            .header("Prefer", "return=representation")
            .json(std::slice::from_ref(record))?
            .send()
            .await?;
        let response = check_status(response)?;

        if response.is_empty() {
            return Ok(None);
        }

        let rows: Vec<R> = response.json().map_err(decode_error)?;
        Ok(rows.into_iter().next())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.params.url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
            path.pop_if_empty().extend(segments);
        }

        Ok(url)
    }

    /// Adds the api key plus the user's token, or the api key again as
    /// bearer while signed out.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self
            .session
            .borrow()
            .as_ref()
            .map(|session| session.access_token.to_owned())
            .unwrap_or_else(|| self.params.anon_key.to_owned());

        builder
            .header("apikey", &self.params.anon_key)
            .bearer_auth(&token)
    }
}

#[async_trait]
impl AuthGateway for SupabaseGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        let url = self.endpoint(&["auth", "v1", "token"])?;

        let response = self
            .client
            .post(url.as_str())
            .query(&[("grant_type", "password")])?
            .header("apikey", &self.params.anon_key)
            .json(PasswordCredentials { email, password })?
            .send()
            .await?;

        let session: Session = check_status(response)?
            .json::<TokenResponseDTO>()
            .map_err(decode_error)?
            .into();

        tracing::info!(user_id = %session.user_id(), "signed in");
        self.session.send_replace(Some(session.to_owned()));

        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Session>, GatewayError> {
        let url = self.endpoint(&["auth", "v1", "signup"])?;

        let response = self
            .client
            .post(url.as_str())
            .header("apikey", &self.params.anon_key)
            .json(PasswordCredentials { email, password })?
            .send()
            .await?;

        match check_status(response)?
            .json::<SignUpResponseDTO>()
            .map_err(decode_error)?
        {
            SignUpResponseDTO::Session(token) => {
                let session: Session = token.into();
                tracing::info!(user_id = %session.user_id(), "signed up");
                self.session.send_replace(Some(session.to_owned()));
                Ok(Some(session))
            }
            SignUpResponseDTO::PendingConfirmation(user) => {
                tracing::info!(user_id = %user.id, "signed up, confirmation pending");
                Ok(None)
            }
        }
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        let Some(session) = self.session.send_replace(None) else {
            return Ok(());
        };
        tracing::info!(user_id = %session.user_id(), "signed out");

        let url = self.endpoint(&["auth", "v1", "logout"])?;
        let response = self
            .client
            .post(url.as_str())
            .header("apikey", &self.params.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        check_status(response)?;

        Ok(())
    }

    fn get_session(&self) -> Option<Session> {
        self.session.borrow().to_owned()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }
}

#[async_trait]
impl DataGateway for SupabaseGateway {
    async fn fetch_claims(&self) -> Result<Vec<Claim>, GatewayError> {
        self.select(&Query::table(CLAIMS_TABLE).order("created_at", Direction::Descending))
            .await
    }

    async fn fetch_expense_items(&self) -> Result<Vec<ExpenseItem>, GatewayError> {
        self.select(&Query::table(EXPENSE_ITEMS_TABLE).select("category,amount"))
            .await
    }

    async fn fetch_profile(&self, user_id: UserId) -> Result<Option<Profile>, GatewayError> {
        let profiles: Vec<Profile> = self
            .select(&Query::table(PROFILES_TABLE).eq("id", user_id))
            .await?;

        Ok(profiles.into_iter().next())
    }

    async fn insert_claim(&self, claim: NewClaim) -> Result<Option<Claim>, GatewayError> {
        self.insert(CLAIMS_TABLE, &claim).await
    }

    async fn insert_payment(&self, payment: NewPayment) -> Result<Option<Payment>, GatewayError> {
        self.insert(PAYMENTS_TABLE, &payment).await
    }
}

#[async_trait]
impl StorageGateway for SupabaseGateway {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        file: UploadFile,
    ) -> Result<StoredObject, GatewayError> {
        let url = self.endpoint(&["storage", "v1", "object", bucket, key])?;

        let response = self
            .authorized(self.client.post(url.as_str()))
            .header("x-upsert", "false")
            .body(&file.content_type, file.content)
            .send()
            .await?;
        check_status(response)?;

        tracing::debug!(bucket, key, "uploaded object");

        Ok(StoredObject {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        })
    }

    fn public_url(&self, bucket: &str, key: &str) -> Result<Url, GatewayError> {
        self.endpoint(&["storage", "v1", "object", "public", bucket, key])
    }
}

#[cfg(test)]
mod test;
