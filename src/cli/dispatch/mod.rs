//! Maps validated CLI matches to the action the binary executes.

use crate::cli::{
    actions::Action,
    commands::{
        ARG_API_URL, ARG_REQUEST_TIMEOUT, CMD_BUDGETS, CMD_CHECK_EMAIL, CMD_LOGIN, CMD_REGISTER,
        CMD_SERVE, CMD_TRANSACTIONS,
    },
    globals::GlobalArgs,
};
use crate::{
    finance::DEFAULT_PAGE_LIMIT,
    models::{Frequency, NewBudget},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

/// The budget to add, when `--category` was given. Clap already enforces that frequency and
/// amount come with it; the amounts themselves are validated by the form.
fn new_budget(matches: &ArgMatches) -> Result<Option<NewBudget>> {
    let Some(category) = matches.get_one::<String>("category") else {
        return Ok(None);
    };
    let frequency = matches
        .get_one::<Frequency>("frequency")
        .copied()
        .context("missing required argument: --frequency")?;
    let amount = matches
        .get_one::<f64>("amount")
        .copied()
        .context("missing required argument: --amount")?;

    Ok(Some(NewBudget {
        category: category.clone(),
        frequency,
        amount,
        spent: matches.get_one::<f64>("spent").copied().unwrap_or(0.0),
    }))
}

fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let mut globals = GlobalArgs::new(required(matches, ARG_API_URL)?);
    globals.request_timeout_seconds = matches
        .get_one::<u64>(ARG_REQUEST_TIMEOUT)
        .copied()
        .unwrap_or(0);

    // Fail early on a malformed URL instead of at the first request.
    globals.app_config()?;

    Ok(globals)
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the API URL is invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("missing subcommand"))?;

    let globals = globals(sub)?;

    match name {
        CMD_SERVE => Ok(Action::Serve {
            globals,
            port: sub.get_one::<u16>("port").copied().unwrap_or(8080),
        }),
        CMD_LOGIN => Ok(Action::Login {
            globals,
            email: required(sub, "email")?,
            password: SecretString::from(required(sub, "password")?),
        }),
        CMD_BUDGETS => Ok(Action::Budgets {
            globals,
            email: required(sub, "email")?,
            password: SecretString::from(required(sub, "password")?),
            new_budget: new_budget(sub)?,
        }),
        CMD_TRANSACTIONS => Ok(Action::Transactions {
            globals,
            email: required(sub, "email")?,
            password: SecretString::from(required(sub, "password")?),
            page: sub.get_one::<u32>("page").copied().unwrap_or(1),
            limit: sub
                .get_one::<u32>("limit")
                .copied()
                .unwrap_or(DEFAULT_PAGE_LIMIT),
        }),
        CMD_CHECK_EMAIL => Ok(Action::CheckEmail {
            globals,
            email: required(sub, "email")?,
        }),
        CMD_REGISTER => Ok(Action::Register {
            globals,
            alias: required(sub, "alias")?,
            email: required(sub, "email")?,
            password: SecretString::from(required(sub, "password")?),
        }),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn serve_action_carries_port_and_globals() {
        temp_env::with_vars(
            [
                ("FINTRACK_API_URL", Some("http://localhost:3000")),
                ("FINTRACK_PORT", Some("9000")),
                ("FINTRACK_REQUEST_TIMEOUT_SECONDS", Some("7")),
            ],
            || {
                let matches = commands::new().get_matches_from(vec!["fintrack", "serve"]);
                match handler(&matches).unwrap() {
                    Action::Serve { globals, port } => {
                        assert_eq!(port, 9000);
                        assert_eq!(globals.api_url, "http://localhost:3000");
                        assert_eq!(globals.request_timeout_seconds, 7);
                    }
                    other => panic!("unexpected action: {other:?}"),
                }
            },
        );
    }

    #[test]
    fn api_url_is_required() {
        temp_env::with_vars([("FINTRACK_API_URL", None::<&str>)], || {
            let matches = commands::new().get_matches_from(vec!["fintrack", "serve"]);
            let err = handler(&matches).unwrap_err();
            assert!(err.to_string().contains("--api-url"));
        });
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        temp_env::with_vars([("FINTRACK_API_URL", Some("ftp://files.example.com"))], || {
            let matches = commands::new().get_matches_from(vec!["fintrack", "serve"]);
            assert!(handler(&matches).is_err());
        });
    }

    #[test]
    fn budgets_action_carries_new_budget() {
        temp_env::with_vars(
            [
                ("FINTRACK_API_URL", Some("http://localhost:3000")),
                ("FINTRACK_EMAIL", Some("ann@example.com")),
                ("FINTRACK_PASSWORD", Some("hunter2")),
            ],
            || {
                let matches = commands::new().get_matches_from(vec![
                    "fintrack",
                    "budgets",
                    "--category",
                    "Dining",
                    "--frequency",
                    "Weekly",
                    "--amount",
                    "50",
                    "--spent",
                    "12.5",
                ]);
                match handler(&matches).unwrap() {
                    Action::Budgets { new_budget, .. } => assert_eq!(
                        new_budget,
                        Some(NewBudget {
                            category: "Dining".to_string(),
                            frequency: Frequency::Weekly,
                            amount: 50.0,
                            spent: 12.5,
                        })
                    ),
                    other => panic!("unexpected action: {other:?}"),
                }

                let matches = commands::new().get_matches_from(vec!["fintrack", "budgets"]);
                match handler(&matches).unwrap() {
                    Action::Budgets { new_budget, .. } => assert_eq!(new_budget, None),
                    other => panic!("unexpected action: {other:?}"),
                }
            },
        );
    }

    #[test]
    fn transactions_action_uses_page_and_limit() {
        temp_env::with_vars(
            [
                ("FINTRACK_API_URL", Some("http://localhost:3000")),
                ("FINTRACK_EMAIL", Some("ann@example.com")),
                ("FINTRACK_PASSWORD", Some("hunter2")),
            ],
            || {
                let matches = commands::new().get_matches_from(vec![
                    "fintrack",
                    "transactions",
                    "--page",
                    "3",
                    "--limit",
                    "25",
                ]);
                match handler(&matches).unwrap() {
                    Action::Transactions { page, limit, .. } => {
                        assert_eq!((page, limit), (3, 25));
                    }
                    other => panic!("unexpected action: {other:?}"),
                }
            },
        );
    }

    #[test]
    fn register_action_keeps_password_secret() {
        temp_env::with_vars(
            [
                ("FINTRACK_API_URL", Some("http://localhost:3000")),
                ("FINTRACK_PASSWORD", None::<&str>),
            ],
            || {
                let matches = commands::new().get_matches_from(vec![
                    "fintrack",
                    "register",
                    "--alias",
                    "Ann",
                    "--email",
                    "ann@example.com",
                    "--password",
                    "hunter2",
                ]);
                let action = handler(&matches).unwrap();
                assert!(!format!("{action:?}").contains("hunter2"));
                match action {
                    Action::Register {
                        alias, password, ..
                    } => {
                        assert_eq!(alias, "Ann");
                        assert_eq!(password.expose_secret(), "hunter2");
                    }
                    other => panic!("unexpected action: {other:?}"),
                }
            },
        );
    }
}
