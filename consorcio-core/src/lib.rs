//! The **Consorcio Core** is the client-side engine of the ConsorcioTrust
//! condominium portal.
//!
//! Owners sign in, see the claims filed in their consortium and the
//! consortium's expenses broken down by category, file new claims and send
//! proofs of payment for administrator review.
//!
//! ## Repository structure
//!
//! The library consists of two crates:
//!
//! * **Providers**
//!   * HTTP client
//!   * Backend gateway (auth, tables and object storage)
//!   * Common models
//! * **Core**
//!   * Application state and its reducer
//!   * Services
//!
//! The **Providers** talk to the hosted backend. The **Core** orchestrates
//! them and keeps everything the portal renders in one [`state::Store`];
//! a UI layer subscribes to it and calls the services on user input.
//!
//! ## Getting started
//!
//! ```ignore rust
//! let config = CoreConfig::from_env()?;
//! let core = ConsorcioCore::new(Some(config), Arc::new(ReqwestClient::default()))?;
//!
//! core.session_service.start().await;
//! core.session_service.sign_in("owner@example.com", "secret").await?;
//!
//! let summary = core.dashboard_service.summary();
//! ```
//!
//! See `demos/portal_demo` in the repository for a runnable walkthrough.

use std::error::Error;
use std::sync::Arc;

use config::CoreConfig;
use consorcio_providers::{
    gateway::{
        imp::supabase::{Params as SupabaseParams, SupabaseGateway},
        AuthGateway, DataGateway, StorageGateway,
    },
    http_client::HttpClient,
};
use service::{
    claim_service::ClaimService, dashboard_service::DashboardService,
    navigation_service::NavigationService, payment_service::PaymentService,
    session_service::SessionService,
};
use state::{AppState, Store};
use url::Url;

pub mod config;
pub mod model;
pub mod service;
pub mod state;

pub struct ConsorcioCore {
    pub store: Store,
    pub session_service: SessionService,
    pub dashboard_service: Arc<DashboardService>,
    pub claim_service: ClaimService,
    pub payment_service: PaymentService,
    pub navigation_service: NavigationService,
}

impl ConsorcioCore {
    /// `None` initializes the core with the default configuration.
    pub fn new(
        config: Option<CoreConfig>,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self, Box<dyn Error>> {
        let config = config.unwrap_or_default();

        // one backend serves auth, tables and storage
        let gateway = Arc::new(SupabaseGateway::new(
            SupabaseParams {
                url: Url::parse(&config.backend.url)?,
                anon_key: config.backend.anon_key.to_owned(),
            },
            client,
        ));

        Ok(Self::with_gateways(
            config,
            gateway.clone(),
            gateway.clone(),
            gateway,
        ))
    }

    /// Wires the services on top of arbitrary gateway implementations.
    pub fn with_gateways(
        config: CoreConfig,
        auth: Arc<dyn AuthGateway>,
        data: Arc<dyn DataGateway>,
        storage: Arc<dyn StorageGateway>,
    ) -> Self {
        let store = Store::new(AppState::new(
            config.session_mode,
            config.billing.balance_due,
        ));

        let dashboard_service = Arc::new(DashboardService::new(data.clone(), store.clone()));

        let session_service = SessionService::new(
            auth,
            data.clone(),
            dashboard_service.clone(),
            store.clone(),
            config.session_mode,
        );

        let claim_service =
            ClaimService::new(data.clone(), store.clone(), config.organisation.clone());

        let payment_service = PaymentService::new(
            data,
            storage,
            store.clone(),
            config.organisation,
            config.storage.payment_bucket,
        );

        let navigation_service = NavigationService::new(store.clone());

        Self {
            store,
            session_service,
            dashboard_service,
            claim_service,
            payment_service,
            navigation_service,
        }
    }
}
