use crate::{
    cli::globals::GlobalArgs,
    registration::{RegisterOutcome, RegistrationForm},
};
use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};

/// Register an account. The password is used as its own confirmation.
///
/// # Errors
/// Returns an error listing the invalid fields, or the backend's refusal.
pub async fn execute(
    globals: &GlobalArgs,
    alias: String,
    email: String,
    password: SecretString,
) -> Result<()> {
    let client = globals.session_client()?;
    let form = RegistrationForm {
        alias,
        email,
        confirm_password: SecretString::from(password.expose_secret().to_string()),
        password,
    };

    match form.submit(&client).await {
        RegisterOutcome::Navigate(path) => {
            println!("Account created, log in at {path}");
            Ok(())
        }
        RegisterOutcome::Invalid(errors) => {
            let messages: Vec<&str> = [
                errors.alias,
                errors.email,
                errors.password,
                errors.confirm_password,
            ]
            .into_iter()
            .flatten()
            .collect();
            Err(anyhow!(messages.join(", ")))
        }
        RegisterOutcome::Error(message) => Err(anyhow!(message)),
    }
}
