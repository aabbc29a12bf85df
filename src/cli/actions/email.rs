use crate::{
    cli::globals::GlobalArgs,
    registration::{valid_email, EmailChecker, EmailStatus},
};
use anyhow::{anyhow, Context, Result};

/// Check whether `email` is registered, going through the same debounced checker the
/// registration form uses.
///
/// # Errors
/// Returns an error if the lookup fails or the email is already taken.
pub async fn execute(globals: &GlobalArgs, email: &str) -> Result<()> {
    if !valid_email(email.trim()) {
        return Err(anyhow!("Invalid email format"));
    }

    let mut checker = EmailChecker::new(globals.session_client()?);
    let mut status = checker.subscribe();
    checker.on_input(email);

    let settled = status
        .wait_for(|status| {
            matches!(
                status,
                EmailStatus::Available | EmailStatus::Taken | EmailStatus::Failed(_)
            )
        })
        .await
        .context("Email checker stopped unexpectedly")?
        .clone();

    match settled {
        EmailStatus::Available => {
            println!("{email} is available");
            Ok(())
        }
        other => Err(anyhow!(other
            .error()
            .unwrap_or("Email check failed")
            .to_string())),
    }
}
