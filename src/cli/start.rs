use crate::cli::{
    actions::Action,
    commands::{self, logging::ARG_VERBOSITY, CMD_SERVE},
    dispatch, telemetry,
};
use anyhow::Result;
use clap::{parser::ValueSource, ArgMatches};

/// Map verbosity count to tracing level
const fn get_verbosity_level(verbosity: u8) -> Option<tracing::Level> {
    match verbosity {
        0 => None,
        1 => Some(tracing::Level::WARN),
        2 => Some(tracing::Level::INFO),
        3 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    }
}

/// One-shot commands stay quiet unless asked; the edge server logs at INFO unless the level
/// was set with `-v` or `FINTRACK_LOG_LEVEL`.
fn verbosity_for(matches: &ArgMatches) -> Option<tracing::Level> {
    let explicit = matches
        .value_source(ARG_VERBOSITY)
        .is_some_and(|source| source != ValueSource::DefaultValue);

    if !explicit && matches.subcommand_name() == Some(CMD_SERVE) {
        return Some(tracing::Level::INFO);
    }

    get_verbosity_level(matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0))
}

/// Main entry point for the CLI - builds and returns the Action
///
/// # Errors
///
/// Returns an error if argument parsing, telemetry initialization, or action dispatch fails
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(verbosity_for(&matches))?;

    dispatch::handler(&matches)
}
