use consorcio_providers::common_models::file::UploadFile;
use strum_macros::{Display, EnumString};

/// Whether the portal requires a signed-in owner.
#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq)]
pub enum SessionMode {
    /// Nothing but the login screen is shown without a session.
    #[strum(serialize = "required")]
    Required,
    /// No session model: data loads on startup and claims are filed under
    /// the placeholder author.
    #[strum(serialize = "anonymous")]
    Anonymous,
}

#[derive(Debug, Copy, Clone, Default, Display, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Screen {
    Login,
    #[default]
    Dashboard,
    Claims,
    Amenities,
    Documents,
}

/// Colours cycled through by the expense chart, one per slice.
pub const CHART_PALETTE: [&str; 5] = ["#3B82F6", "#10B981", "#F59E0B", "#6366F1", "#EC4899"];

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Single blocking message shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentDraft {
    pub file: Option<UploadFile>,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardSummary {
    pub claim_count: usize,
    pub open_claims: usize,
    pub total_expenses: f64,
}
