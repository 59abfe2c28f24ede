use serde::{Deserialize, Serialize};

/// One categorised expenditure row.
///
/// `amount` is kept as the raw JSON value: numeric columns may arrive as
/// numbers or as strings depending on the column type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub category: String,
    #[serde(default)]
    pub amount: serde_json::Value,
}
