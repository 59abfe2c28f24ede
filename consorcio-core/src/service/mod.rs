//! Services driving the portal: each one calls the gateway and feeds the
//! outcome into the shared [`Store`](crate::state::Store).

pub mod claim_service;
pub mod dashboard_service;
pub mod error;
pub mod navigation_service;
pub mod payment_service;
pub mod session_service;
