#![allow(clippy::needless_for_each)]

use super::handlers::{
    health::{self, Health},
    pages::{self, BudgetsView, DashboardView, FormPage, TransactionsView},
};
use crate::models::{
    BudgetItem, DashboardSummary, Frequency, Transaction, TransactionPage, TransactionType,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        pages::login,
        pages::register,
        pages::dashboard,
        pages::budgets,
        pages::transactions
    ),
    components(
        schemas(
            Health,
            FormPage,
            DashboardView,
            BudgetsView,
            TransactionsView,
            DashboardSummary,
            BudgetItem,
            Frequency,
            Transaction,
            TransactionType,
            TransactionPage
        )
    ),
    tags(
        (name = "fintrack", description = "Session-guarded pages of the finance tracker"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
