//! Session controller: follows the backend's session and keeps the cached
//! data in step with who is signed in.

use std::sync::Arc;

use consorcio_providers::{
    common_models::session::{Session, UserId},
    gateway::{error::GatewayError, AuthGateway, DataGateway},
};
use tokio::sync::Mutex;

use super::{dashboard_service::DashboardService, error::SessionServiceError};
use crate::{
    model::{Notice, SessionMode},
    state::{Action, Store},
};

pub struct SessionService {
    auth: Arc<dyn AuthGateway>,
    data: Arc<dyn DataGateway>,
    dashboard: Arc<DashboardService>,
    store: Store,
    mode: SessionMode,
    // a sign-in result and the change subscription may report the same session
    transition: Mutex<()>,
}

impl SessionService {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        data: Arc<dyn DataGateway>,
        dashboard: Arc<DashboardService>,
        store: Store,
        mode: SessionMode,
    ) -> Self {
        Self {
            auth,
            data,
            dashboard,
            store,
            mode,
            transition: Mutex::new(()),
        }
    }

    /// Picks up the session the gateway already holds. Without one the
    /// login screen stays up; in anonymous mode data is loaded right away.
    pub async fn start(&self) {
        match self.mode {
            SessionMode::Anonymous => self.dashboard.refresh().await,
            SessionMode::Required => self.handle_session_change(self.auth.get_session()).await,
        }
    }

    /// Follows session changes published by the gateway until it goes away.
    pub async fn run(&self) {
        let mut changes = self.auth.subscribe();

        while changes.changed().await.is_ok() {
            let session = changes.borrow_and_update().to_owned();
            self.handle_session_change(session).await;
        }

        tracing::debug!("session notifications closed");
    }

    /// Applies a session change. Only the state transition is serialized;
    /// data for a new session is loaded afterwards and tagged with its
    /// epoch, so a later logout never waits for it.
    pub async fn handle_session_change(&self, next: Option<Session>) {
        let established = {
            let _transition = self.transition.lock().await;
            self.transition_to(next)
        };

        if let Some((user_id, epoch)) = established {
            self.load_session_data(user_id, epoch).await;
        }
    }

    /// Returns the owner and epoch of a newly established session.
    fn transition_to(&self, next: Option<Session>) -> Option<(UserId, u64)> {
        let current = self.store.read(|state| state.session.to_owned());

        match (current, next) {
            (None, None) => None,
            (Some(current), None) => {
                tracing::info!(user_id = %current.user_id(), "session lost");
                self.store.dispatch(Action::SessionLost);
                None
            }
            (Some(current), Some(next)) if current.user_id() == next.user_id() => {
                if current != next {
                    self.store.dispatch(Action::SessionRefreshed(next));
                }
                None
            }
            (current, Some(next)) => {
                if let Some(current) = current {
                    tracing::info!(user_id = %current.user_id(), "session replaced");
                    self.store.dispatch(Action::SessionLost);
                }

                let user_id = next.user_id();
                tracing::info!(%user_id, "session established");
                self.store.dispatch(Action::SessionEstablished(next));

                Some((user_id, self.store.read(|state| state.epoch)))
            }
        }
    }

    async fn load_session_data(&self, user_id: UserId, epoch: u64) {
        let profile = self.data.fetch_profile(user_id).await.unwrap_or_else(|error| {
            tracing::warn!(%error, "could not load profile, using configured ids");
            None
        });
        self.store.dispatch(Action::ProfileLoaded { epoch, profile });

        self.dashboard.refresh_epoch(epoch).await;
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), SessionServiceError> {
        self.check_credentials(email, password)?;

        match self.auth.sign_in(email.trim(), password).await {
            Ok(session) => {
                self.handle_session_change(Some(session)).await;
                Ok(())
            }
            Err(error) => Err(self.report("sign in", error)),
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), SessionServiceError> {
        self.check_credentials(email, password)?;

        match self.auth.sign_up(email.trim(), password).await {
            Ok(Some(session)) => {
                self.handle_session_change(Some(session)).await;
                Ok(())
            }
            Ok(None) => {
                self.store.dispatch(Action::Notify(Notice::info(
                    "Account created, check your inbox to confirm it",
                )));
                Ok(())
            }
            Err(error) => Err(self.report("sign up", error)),
        }
    }

    /// The local session is dropped even when the backend call fails.
    pub async fn sign_out(&self) -> Result<(), SessionServiceError> {
        let result = self.auth.sign_out().await;
        self.handle_session_change(None).await;

        result.map_err(|error| self.report("sign out", error))
    }

    fn check_credentials(&self, email: &str, password: &str) -> Result<(), SessionServiceError> {
        if email.trim().is_empty() || password.is_empty() {
            let error = SessionServiceError::MissingCredentials;
            self.store
                .dispatch(Action::Notify(Notice::error(error.to_string())));
            return Err(error);
        }

        Ok(())
    }

    fn report(&self, operation: &str, error: GatewayError) -> SessionServiceError {
        tracing::error!(%error, "{operation} failed");
        self.store
            .dispatch(Action::Notify(Notice::error(error.user_message())));
        error.into()
    }
}
