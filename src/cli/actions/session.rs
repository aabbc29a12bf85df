use crate::{
    cli::globals::GlobalArgs,
    finance::{self, Loaded},
    session::{
        login::{LoginForm, LoginOutcome},
        SessionManager,
    },
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use tracing::info;

/// Rehydrate from the cookie jar, logging in only when there is no live session.
///
/// # Errors
/// Returns the login form's message when the credentials are refused.
pub async fn open(
    globals: &GlobalArgs,
    email: &str,
    password: SecretString,
) -> Result<SessionManager> {
    let session = SessionManager::new(globals.session_client()?);

    let state = session.rehydrate().await;
    if state.is_authenticated() {
        info!("reusing an existing session");
    } else {
        match LoginForm::new(email, password).submit(&session).await {
            LoginOutcome::Navigate(path) => info!("login succeeded, continuing to {path}"),
            LoginOutcome::Error(message) => return Err(anyhow!(message)),
        }
    }

    Ok(session)
}

pub async fn close(session: &SessionManager) {
    if !session.logout().await {
        info!("backend did not acknowledge logout; local session cleared");
    }
}

/// Unwraps a protected load, turning a redirect into an error.
///
/// # Errors
/// Returns an error when the backend ended the session.
pub fn ready<T>(loaded: Loaded<T>) -> Result<T> {
    match loaded {
        Loaded::Ready(value) => Ok(value),
        Loaded::Redirect(path) => Err(anyhow!("Session expired, please log in again ({path})")),
    }
}

/// Log in, print the dashboard summary as JSON, then log out.
///
/// # Errors
/// Returns an error if login fails or the session is lost while loading.
pub async fn execute(globals: &GlobalArgs, email: &str, password: SecretString) -> Result<()> {
    let session = open(globals, email, password).await?;

    let summary = ready(finance::load_dashboard(&session).await)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    close(&session).await;
    Ok(())
}
