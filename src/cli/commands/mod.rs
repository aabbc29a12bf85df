pub mod logging;

use crate::{models::Frequency, GIT_COMMIT_HASH};
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_REQUEST_TIMEOUT: &str = "request-timeout-seconds";

pub const CMD_SERVE: &str = "serve";
pub const CMD_LOGIN: &str = "login";
pub const CMD_BUDGETS: &str = "budgets";
pub const CMD_TRANSACTIONS: &str = "transactions";
pub const CMD_CHECK_EMAIL: &str = "check-email";
pub const CMD_REGISTER: &str = "register";

/// `--email` and `--password` for the commands that log in first.
fn with_credentials(command: Command) -> Command {
    command
        .arg(
            Arg::new("email")
                .long("email")
                .help("Account email")
                .env("FINTRACK_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Account password")
                .env("FINTRACK_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

fn frequency_parser(value: &str) -> Result<Frequency, String> {
    Frequency::parse(value).ok_or_else(|| {
        let known: Vec<&str> = Frequency::ALL.iter().map(|f| f.as_str()).collect();
        format!("expected one of: {}", known.join(", "))
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("fintrack")
        .about("Personal finance tracker client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Backend base URL, example: https://api.fintrack.tld")
                .env("FINTRACK_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_REQUEST_TIMEOUT)
                .long("request-timeout-seconds")
                .help("Timeout for backend requests in seconds, 0 disables it")
                .default_value("0")
                .env("FINTRACK_REQUEST_TIMEOUT_SECONDS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .subcommand(
            Command::new(CMD_SERVE)
                .about("Run the edge server that guards the protected pages")
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .help("Port to listen on")
                        .default_value("8080")
                        .env("FINTRACK_PORT")
                        .value_parser(clap::value_parser!(u16)),
                ),
        )
        .subcommand(with_credentials(
            Command::new(CMD_LOGIN).about("Log in and print the dashboard summary"),
        ))
        .subcommand(with_credentials(
            Command::new(CMD_BUDGETS)
                .about("List budgets, optionally adding one first")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .help("Add a budget with this category")
                        .requires_all(["frequency", "amount"]),
                )
                .arg(
                    Arg::new("frequency")
                        .long("frequency")
                        .help("Daily, Weekly, Bi-Weekly, Four-Weekly, Monthly or Annually")
                        .requires("category")
                        .value_parser(frequency_parser),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .help("Budgeted amount")
                        .requires("category")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("spent")
                        .long("spent")
                        .help("Amount already spent")
                        .requires("category")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64)),
                ),
        ))
        .subcommand(with_credentials(
            Command::new(CMD_TRANSACTIONS)
                .about("Print one page of transactions")
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("1-indexed page number")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .help("Transactions per page")
                        .default_value("10")
                        .value_parser(clap::value_parser!(u32)),
                ),
        ))
        .subcommand(
            Command::new(CMD_CHECK_EMAIL)
                .about("Check whether an email is already registered")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Email to check")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Register a new account")
                .arg(
                    Arg::new("alias")
                        .long("alias")
                        .help("Display name")
                        .required(true),
                )
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Account email")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Account password")
                        .env("FINTRACK_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "fintrack");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Personal finance tracker client"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
        assert_eq!(
            command.get_long_version().unwrap().to_string(),
            format!("{} - {}", env!("CARGO_PKG_VERSION"), GIT_COMMIT_HASH)
        );
    }

    #[test]
    fn test_serve_port_and_api_url() {
        temp_env::with_vars(
            [
                ("FINTRACK_API_URL", None::<&str>),
                ("FINTRACK_PORT", None::<&str>),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "fintrack",
                    "--api-url",
                    "http://localhost:3000",
                    "serve",
                    "--port",
                    "9090",
                ]);

                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).cloned(),
                    Some("http://localhost:3000".to_string())
                );
                let (name, sub) = matches.subcommand().unwrap();
                assert_eq!(name, CMD_SERVE);
                assert_eq!(sub.get_one::<u16>("port").copied(), Some(9090));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("FINTRACK_API_URL", Some("https://api.fintrack.test")),
                ("FINTRACK_PORT", Some("443")),
                ("FINTRACK_REQUEST_TIMEOUT_SECONDS", Some("15")),
                ("FINTRACK_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["fintrack", "serve"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).cloned(),
                    Some("https://api.fintrack.test".to_string())
                );
                assert_eq!(matches.get_one::<u64>(ARG_REQUEST_TIMEOUT).copied(), Some(15));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                let sub = matches.subcommand_matches(CMD_SERVE).unwrap();
                assert_eq!(sub.get_one::<u16>("port").copied(), Some(443));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("FINTRACK_LOG_LEVEL", Some(level)),
                    ("FINTRACK_API_URL", Some("http://localhost:3000")),
                ],
                || {
                    let matches = new().get_matches_from(vec!["fintrack", "serve"]);
                    assert_eq!(
                        matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("FINTRACK_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "fintrack".to_string(),
                    "--api-url".to_string(),
                    "http://localhost:3000".to_string(),
                    "serve".to_string(),
                ];

                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_login_password_from_env() {
        temp_env::with_vars(
            [
                ("FINTRACK_EMAIL", Some("ann@example.com")),
                ("FINTRACK_PASSWORD", Some("hunter2")),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "fintrack",
                    "--api-url",
                    "http://localhost:3000",
                    "login",
                ]);
                let sub = matches.subcommand_matches(CMD_LOGIN).unwrap();
                assert_eq!(
                    sub.get_one::<String>("email").cloned(),
                    Some("ann@example.com".to_string())
                );
                assert_eq!(
                    sub.get_one::<String>("password").cloned(),
                    Some("hunter2".to_string())
                );
            },
        );
    }

    #[test]
    fn test_budgets_add_arguments() {
        temp_env::with_vars(
            [
                ("FINTRACK_EMAIL", Some("ann@example.com")),
                ("FINTRACK_PASSWORD", Some("hunter2")),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "fintrack",
                    "--api-url",
                    "http://localhost:3000",
                    "budgets",
                    "--category",
                    "Rent",
                    "--frequency",
                    "bi-weekly",
                    "--amount",
                    "900",
                ]);
                let sub = matches.subcommand_matches(CMD_BUDGETS).unwrap();
                assert_eq!(
                    sub.get_one::<Frequency>("frequency").copied(),
                    Some(Frequency::BiWeekly)
                );
                assert_eq!(sub.get_one::<f64>("amount").copied(), Some(900.0));
                assert_eq!(sub.get_one::<f64>("spent"), None);

                let err = new()
                    .try_get_matches_from(vec![
                        "fintrack",
                        "budgets",
                        "--category",
                        "Rent",
                        "--frequency",
                        "fortnightly",
                        "--amount",
                        "900",
                    ])
                    .unwrap_err();
                assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

                assert!(new()
                    .try_get_matches_from(vec!["fintrack", "budgets", "--category", "Rent"])
                    .is_err());
            },
        );
    }

    #[test]
    fn test_transactions_defaults() {
        temp_env::with_vars(
            [
                ("FINTRACK_EMAIL", Some("ann@example.com")),
                ("FINTRACK_PASSWORD", Some("hunter2")),
            ],
            || {
                let matches = new().get_matches_from(vec!["fintrack", "transactions"]);
                let sub = matches.subcommand_matches(CMD_TRANSACTIONS).unwrap();
                assert_eq!(sub.get_one::<u32>("page").copied(), Some(1));
                assert_eq!(
                    sub.get_one::<u32>("limit").copied(),
                    Some(crate::finance::DEFAULT_PAGE_LIMIT)
                );
            },
        );
    }

    #[test]
    fn test_subcommand_is_required() {
        temp_env::with_vars([("FINTRACK_API_URL", Some("http://localhost:3000"))], || {
            assert!(new().try_get_matches_from(vec!["fintrack"]).is_err());
        });
    }
}
