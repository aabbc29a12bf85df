//! Page handlers. Public pages describe their form; protected pages load their data from the
//! backend with the visitor's own token and fall back to `/login` on a `401`.

use crate::{
    client::{ApiClient, Credentials},
    edge::guard::{redirect_to_login, VerifiedSession},
    finance::{settle, Loaded, DEFAULT_PAGE_LIMIT},
    models::{BudgetItem, DashboardSummary, TransactionPage},
    APP_USER_AGENT,
};
use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

/// Description of a public form page.
#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct FormPage {
    pub page: String,
    pub fields: Vec<String>,
    pub submit_to: String,
}

impl FormPage {
    fn new(page: &str, fields: &[&str], submit_to: &str) -> Self {
        Self {
            page: page.to_string(),
            fields: fields.iter().map(ToString::to_string).collect(),
            submit_to: submit_to.to_string(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct BudgetsView {
    pub user_id: String,
    pub budgets: Vec<BudgetItem>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct DashboardView {
    pub user_id: String,
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TransactionsView {
    pub user_id: String,
    pub page: u32,
    pub limit: u32,
    #[serde(flatten)]
    pub transactions: TransactionPage,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-indexed page number.
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn root() -> impl IntoResponse {
    APP_USER_AGENT
}

#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", body = FormPage)),
    tag = "pages"
)]
pub async fn login() -> Json<FormPage> {
    Json(FormPage::new("login", &["email", "password"], "/api/auth/login"))
}

#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Registration form", body = FormPage)),
    tag = "pages"
)]
pub async fn register() -> Json<FormPage> {
    Json(FormPage::new(
        "register",
        &["alias", "email", "password", "confirm_password"],
        "/api/users/register",
    ))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardView),
        (status = 307, description = "No valid session, redirect to /login")
    ),
    tag = "pages"
)]
#[instrument(skip_all)]
pub async fn dashboard(
    Extension(client): Extension<Arc<ApiClient>>,
    Extension(session): Extension<VerifiedSession>,
) -> Response {
    let result = client
        .load_dashboard(Credentials::Cookie(&session.token))
        .await;
    match settle("dashboard", result) {
        Loaded::Ready(summary) => Json(DashboardView {
            user_id: session.user_id,
            summary,
        })
        .into_response(),
        Loaded::Redirect(_) => redirect_to_login(),
    }
}

#[utoipa::path(
    get,
    path = "/budgets",
    responses(
        (status = 200, description = "Budgets of the visitor", body = BudgetsView),
        (status = 307, description = "No valid session, redirect to /login")
    ),
    tag = "pages"
)]
#[instrument(skip_all)]
pub async fn budgets(
    Extension(client): Extension<Arc<ApiClient>>,
    Extension(session): Extension<VerifiedSession>,
) -> Response {
    let result = client
        .load_budgets(Credentials::Cookie(&session.token))
        .await;
    match settle("budgets", result) {
        Loaded::Ready(budgets) => Json(BudgetsView {
            user_id: session.user_id,
            budgets,
        })
        .into_response(),
        Loaded::Redirect(_) => redirect_to_login(),
    }
}

#[utoipa::path(
    get,
    path = "/transactions",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of transactions", body = TransactionsView),
        (status = 307, description = "No valid session, redirect to /login")
    ),
    tag = "pages"
)]
#[instrument(skip_all)]
pub async fn transactions(
    Extension(client): Extension<Arc<ApiClient>>,
    Extension(session): Extension<VerifiedSession>,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1);

    let result = client
        .list_transactions(Credentials::Cookie(&session.token), page, limit)
        .await;
    match settle("transactions", result) {
        Loaded::Ready(transactions) => Json(TransactionsView {
            user_id: session.user_id,
            page,
            limit,
            transactions,
        })
        .into_response(),
        Loaded::Redirect(_) => redirect_to_login(),
    }
}
