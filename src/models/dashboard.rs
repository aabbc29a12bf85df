use super::{budget::BudgetItem, transaction::Transaction};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate payload of `/api/dashboard/load`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    #[serde(default)]
    pub user_alias: String,
    #[serde(default)]
    pub user_latest_transactions: Vec<Transaction>,
    #[serde(default)]
    pub user_incomes_total: f64,
    #[serde(default)]
    pub user_expenses_total: f64,
    #[serde(default)]
    pub user_budget_summary: Vec<BudgetItem>,
}

impl DashboardSummary {
    #[must_use]
    pub fn net_total(&self) -> f64 {
        self.user_incomes_total - self.user_expenses_total
    }
}
