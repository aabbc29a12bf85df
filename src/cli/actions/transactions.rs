use super::session::{close, open, ready};
use crate::{cli::globals::GlobalArgs, finance};
use anyhow::Result;
use secrecy::SecretString;

/// Print one page of transactions as JSON.
///
/// # Errors
/// Returns an error if login fails or the session is lost while loading.
pub async fn execute(
    globals: &GlobalArgs,
    email: &str,
    password: SecretString,
    page: u32,
    limit: u32,
) -> Result<()> {
    let session = open(globals, email, password).await?;

    let transactions = ready(finance::load_transactions(&session, page, limit).await)?;
    println!("{}", serde_json::to_string_pretty(&transactions)?);

    close(&session).await;
    Ok(())
}
