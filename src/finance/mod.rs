//! Data loaders for the protected pages. They share one policy: a `401` expires the session
//! and redirects to `/login`, while any other failure is logged and degrades to an empty value
//! so the page still renders.

pub mod book;

pub use self::book::BudgetBook;

use crate::{
    client::{AppError, Credentials},
    models::{budget::BudgetError, BudgetItem, DashboardSummary, NewBudget, TransactionPage},
    session::SessionManager,
    LOGIN_PATH,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Default page size for the transactions view.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Result of a protected load.
#[derive(Clone, Debug, PartialEq)]
pub enum Loaded<T> {
    Ready(T),
    Redirect(&'static str),
}

impl<T> Loaded<T> {
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    #[must_use]
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Redirect(_) => None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AddBudgetError {
    #[error(transparent)]
    Invalid(#[from] BudgetError),
    #[error("{0}")]
    Backend(String),
}

/// Applies the load policy to a finished request. `what` names the resource in logs.
pub fn settle<T: Default>(what: &str, result: Result<T, AppError>) -> Loaded<T> {
    match result {
        Ok(value) => Loaded::Ready(value),
        Err(err) if err.is_unauthorized() => {
            debug!("{what} load unauthorized: {err}");
            Loaded::Redirect(LOGIN_PATH)
        }
        Err(err) => {
            warn!("Failed to load {what}: {err}");
            Loaded::Ready(T::default())
        }
    }
}

fn expire_on_redirect<T>(session: &SessionManager, loaded: Loaded<T>) -> Loaded<T> {
    if loaded.is_redirect() {
        session.expire();
    }
    loaded
}

pub async fn load_dashboard(session: &SessionManager) -> Loaded<DashboardSummary> {
    let result = session.client().load_dashboard(Credentials::Jar).await;
    expire_on_redirect(session, settle("dashboard", result))
}

pub async fn load_budgets(session: &SessionManager) -> Loaded<Vec<BudgetItem>> {
    let result = session.client().load_budgets(Credentials::Jar).await;
    expire_on_redirect(session, settle("budgets", result))
}

/// Loads one page of transactions. `page` is 1-indexed; `0` is treated as the first page.
pub async fn load_transactions(
    session: &SessionManager,
    page: u32,
    limit: u32,
) -> Loaded<TransactionPage> {
    let result = session
        .client()
        .list_transactions(Credentials::Jar, page.max(1), limit.max(1))
        .await;
    expire_on_redirect(session, settle("transactions", result))
}

/// Validates and submits the add-budget form. Unlike page loads, a backend failure is
/// reported back to the form instead of degrading.
///
/// # Errors
/// Returns the broken form rule, or the backend message when the add is refused.
pub async fn add_budget(
    session: &SessionManager,
    budget: &NewBudget,
) -> Result<Loaded<BudgetItem>, AddBudgetError> {
    budget.validate()?;

    match session.client().add_budget(Credentials::Jar, budget).await {
        Ok(item) => Ok(Loaded::Ready(item)),
        Err(err) if err.is_unauthorized() => {
            session.expire();
            Ok(Loaded::Redirect(LOGIN_PATH))
        }
        Err(err) => {
            warn!("Failed to add budget: {err}");
            Err(AddBudgetError::Backend(err.user_message().to_string()))
        }
    }
}
