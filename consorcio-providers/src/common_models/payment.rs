use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use super::macros::uuid_newtype;
use super::organisation::UnitId;
use super::session::UserId;

uuid_newtype!(PaymentId);

#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
}

/// Insert payload for the `payments` table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewPayment {
    pub amount: f64,
    pub status: PaymentStatus,
    pub proof_url: Url,
    pub user_id: UserId,
    pub unit_id: UnitId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub amount: f64,
    pub status: PaymentStatus,
    pub proof_url: Url,
    pub user_id: UserId,
    pub unit_id: UnitId,
}
