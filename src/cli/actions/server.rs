use crate::{cli::globals::GlobalArgs, edge};
use anyhow::{Context, Result};
use tracing::debug;

/// Run the edge server until interrupted.
///
/// # Errors
/// Returns an error if the HTTP client cannot be built or the server fails to start.
pub async fn execute(globals: &GlobalArgs, port: u16) -> Result<()> {
    let client = globals.stateless_client()?;
    debug!(api_url = %client.config().api_base_url, "verifying sessions against backend");

    edge::serve(port, client)
        .await
        .context("Edge server failed")
}
