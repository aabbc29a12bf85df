use super::session::{close, open, ready};
use crate::{
    cli::globals::GlobalArgs,
    finance::{self, BudgetBook},
    models::{BudgetItem, NewBudget},
};
use anyhow::Result;
use secrecy::SecretString;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct BudgetsReport<'a> {
    budgets: &'a [BudgetItem],
    total_remaining: f64,
}

/// List the budgets, optionally adding one first.
///
/// # Errors
/// Returns an error if login fails, the new budget is refused, or the session is lost.
pub async fn execute(
    globals: &GlobalArgs,
    email: &str,
    password: SecretString,
    new_budget: Option<NewBudget>,
) -> Result<()> {
    let session = open(globals, email, password).await?;

    let mut book = BudgetBook::new(ready(finance::load_budgets(&session).await)?);

    if let Some(budget) = new_budget {
        let added = ready(finance::add_budget(&session, &budget).await?)?;
        info!(category = %added.category, "budget added");
        if !book.items().iter().any(|item| item.id == added.id) {
            book.add(added);
        }
    }

    let report = BudgetsReport {
        budgets: book.items(),
        total_remaining: book.total_remaining(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    close(&session).await;
    Ok(())
}
