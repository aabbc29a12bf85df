pub mod budgets;
pub mod email;
pub mod register;
pub mod server;
pub mod session;
pub mod transactions;

use crate::{cli::globals::GlobalArgs, models::NewBudget};
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Serve {
        globals: GlobalArgs,
        port: u16,
    },
    Login {
        globals: GlobalArgs,
        email: String,
        password: SecretString,
    },
    Budgets {
        globals: GlobalArgs,
        email: String,
        password: SecretString,
        new_budget: Option<NewBudget>,
    },
    Transactions {
        globals: GlobalArgs,
        email: String,
        password: SecretString,
        page: u32,
        limit: u32,
    },
    CheckEmail {
        globals: GlobalArgs,
        email: String,
    },
    Register {
        globals: GlobalArgs,
        alias: String,
        email: String,
        password: SecretString,
    },
}

impl Action {
    /// Execute the action.
    ///
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        match self {
            Self::Serve { globals, port } => server::execute(&globals, port).await,
            Self::Login {
                globals,
                email,
                password,
            } => session::execute(&globals, &email, password).await,
            Self::Budgets {
                globals,
                email,
                password,
                new_budget,
            } => budgets::execute(&globals, &email, password, new_budget).await,
            Self::Transactions {
                globals,
                email,
                password,
                page,
                limit,
            } => transactions::execute(&globals, &email, password, page, limit).await,
            Self::CheckEmail { globals, email } => email::execute(&globals, &email).await,
            Self::Register {
                globals,
                alias,
                email,
                password,
            } => register::execute(&globals, alias, email, password).await,
        }
    }
}
