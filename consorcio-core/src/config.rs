use std::env;
use std::fmt::Display;
use std::str::FromStr;

use consorcio_providers::common_models::organisation::{ConsortiumId, UnitId};
use thiserror::Error;
use tracing::{info, warn};

use crate::model::SessionMode;

#[derive(Clone, Debug)]
pub struct CoreConfig {
    pub backend: BackendConfig,
    pub session_mode: SessionMode,
    pub organisation: OrganisationConfig,
    pub storage: StorageConfig,
    pub billing: BillingConfig,
}

#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

/// Ids used when the signed-in owner has no profile row naming them.
#[derive(Clone, Debug)]
pub struct OrganisationConfig {
    pub consortium_id: ConsortiumId,
    pub unit_id: UnitId,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub payment_bucket: String,
}

#[derive(Clone, Debug)]
pub struct BillingConfig {
    /// Balance shown to the owner; prefills the payment amount.
    pub balance_due: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for `{key}`: {message}")]
    InvalidValue { key: &'static str, message: String },
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                url: "http://localhost:54321".to_string(),
                anon_key: String::new(),
            },
            session_mode: SessionMode::Required,
            organisation: OrganisationConfig {
                consortium_id: ConsortiumId::nil(),
                unit_id: UnitId::nil(),
            },
            storage: StorageConfig {
                payment_bucket: "payment_proofs".to_string(),
            },
            billing: BillingConfig { balance_due: 0.0 },
        }
    }
}

impl CoreConfig {
    /// Reads `CONSORCIO_*` environment variables, keeping the default for
    /// every variable that is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            backend: BackendConfig {
                url: load("CONSORCIO_BACKEND_URL", defaults.backend.url)?,
                anon_key: load_secret("CONSORCIO_ANON_KEY"),
            },
            session_mode: load("CONSORCIO_SESSION_MODE", defaults.session_mode)?,
            organisation: OrganisationConfig {
                consortium_id: load(
                    "CONSORCIO_CONSORTIUM_ID",
                    defaults.organisation.consortium_id,
                )?,
                unit_id: load("CONSORCIO_UNIT_ID", defaults.organisation.unit_id)?,
            },
            storage: StorageConfig {
                payment_bucket: load(
                    "CONSORCIO_PAYMENT_BUCKET",
                    defaults.storage.payment_bucket,
                )?,
            },
            billing: BillingConfig {
                balance_due: load("CONSORCIO_BALANCE_DUE", defaults.billing.balance_due)?,
            },
        })
    }
}

fn load<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::InvalidValue {
                key,
                message: e.to_string(),
            }
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn load_secret(key: &'static str) -> String {
    env::var(key).unwrap_or_else(|_| {
        warn!("{key} not set, requests will be sent without an api key");
        String::new()
    })
}
