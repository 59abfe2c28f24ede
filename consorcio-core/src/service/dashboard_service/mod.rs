//! Loads the claims and expense items the dashboard renders from.

use std::sync::Arc;

use consorcio_providers::{
    common_models::expense::ExpenseItem, gateway::DataGateway,
};
use serde_json::Value;

use crate::{
    model::{ChartSlice, DashboardSummary, CHART_PALETTE},
    state::{Action, Store},
};

pub struct DashboardService {
    data: Arc<dyn DataGateway>,
    store: Store,
}

impl DashboardService {
    pub fn new(data: Arc<dyn DataGateway>, store: Store) -> Self {
        Self { data, store }
    }

    /// Replaces the cached claims and expense items.
    ///
    /// Both reads run concurrently and fail independently: a failed read is
    /// logged and leaves its list empty. Results are dropped if the session
    /// changed while they were in flight.
    pub async fn refresh(&self) {
        let epoch = self.store.read(|state| state.epoch);
        self.refresh_epoch(epoch).await;
    }

    /// Refresh on behalf of the session `epoch`; nothing is fetched once
    /// that session is gone.
    pub(crate) async fn refresh_epoch(&self, epoch: u64) {
        if self.store.read(|state| state.epoch) != epoch {
            tracing::debug!(epoch, "session changed, skipping refresh");
            return;
        }
        self.store.dispatch(Action::LoadingStarted { epoch });

        let (claims, expenses) =
            tokio::join!(self.data.fetch_claims(), self.data.fetch_expense_items());

        let claims = claims.unwrap_or_else(|error| {
            tracing::warn!(%error, "could not load claims");
            vec![]
        });
        let expenses = expenses.unwrap_or_else(|error| {
            tracing::warn!(%error, "could not load expense items");
            vec![]
        });
        let chart = project_chart(&expenses);

        tracing::debug!(
            epoch,
            claims = claims.len(),
            slices = chart.len(),
            "dashboard data loaded"
        );

        self.store.dispatch(Action::DataLoaded {
            epoch,
            claims,
            expenses,
            chart,
        });
    }

    pub fn summary(&self) -> DashboardSummary {
        self.store.read(|state| state.summary())
    }
}

/// One slice per expense row, in row order; rows sharing a category are
/// not merged. Rows whose amount does not coerce to a finite number are
/// left out.
pub fn project_chart(items: &[ExpenseItem]) -> Vec<ChartSlice> {
    items
        .iter()
        .filter_map(|item| match coerce_amount(&item.amount) {
            Some(value) => Some((item.category.to_owned(), value)),
            None => {
                tracing::debug!(category = %item.category, amount = %item.amount, "skipping non-numeric amount");
                None
            }
        })
        .enumerate()
        .map(|(index, (label, value))| ChartSlice {
            label,
            value,
            color: CHART_PALETTE[index % CHART_PALETTE.len()],
        })
        .collect()
}

/// Numbers pass through, strings are parsed after trimming (the empty
/// string counts as zero), anything else is rejected.
pub fn coerce_amount(amount: &Value) -> Option<f64> {
    let value = match amount {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => match text.trim() {
            "" => Some(0.0),
            trimmed => trimmed.parse::<f64>().ok(),
        },
        _ => None,
    };

    value.filter(|value| value.is_finite())
}
