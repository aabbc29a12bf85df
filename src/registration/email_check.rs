//! Debounced "is this email taken?" check for the registration form.
//!
//! Every keystroke goes through [`EmailChecker::on_input`], which bumps a generation counter,
//! aborts the pending timer, and clears the previous result. Only a timer that survives the
//! full debounce window issues a lookup. Lookups already in flight are left to finish, but their
//! answer is dropped if the input changed meanwhile.

use crate::client::{ApiClient, AppError};
use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(750);

pub const EMAIL_TAKEN: &str = "Email is already taken";

/// Anything that can answer whether an email is already registered.
pub trait EmailLookup: Send + Sync + 'static {
    fn is_taken(&self, email: &str) -> impl Future<Output = Result<bool, AppError>> + Send;
}

impl EmailLookup for ApiClient {
    async fn is_taken(&self, email: &str) -> Result<bool, AppError> {
        self.check_email_taken(email).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmailStatus {
    Idle,
    Checking,
    Available,
    Taken,
    Failed(String),
}

impl EmailStatus {
    /// Validation error to show on the email field, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Taken => Some(EMAIL_TAKEN),
            Self::Failed(message) => Some(message),
            Self::Idle | Self::Checking | Self::Available => None,
        }
    }
}

pub struct EmailChecker<L> {
    lookup: Arc<L>,
    delay: Duration,
    status: Arc<watch::Sender<EmailStatus>>,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl<L: EmailLookup> EmailChecker<L> {
    #[must_use]
    pub fn new(lookup: L) -> Self {
        Self::with_delay(lookup, DEFAULT_DEBOUNCE)
    }

    #[must_use]
    pub fn with_delay(lookup: L, delay: Duration) -> Self {
        let (status, _) = watch::channel(EmailStatus::Idle);
        Self {
            lookup: Arc::new(lookup),
            delay,
            status: Arc::new(status),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> EmailStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<EmailStatus> {
        self.status.subscribe()
    }

    /// Feeds the current contents of the email field. Must be called from within a tokio
    /// runtime.
    pub fn on_input(&mut self, value: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.status.send_replace(EmailStatus::Idle);

        let email = value.trim().to_string();
        if !email.contains('@') {
            return;
        }

        let lookup = Arc::clone(&self.lookup);
        let status = Arc::clone(&self.status);
        let current = Arc::clone(&self.generation);
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !publish_if_current(&status, &current, generation, EmailStatus::Checking) {
                return;
            }
            debug!("checking email availability");

            // Detached so that aborting the timer on the next keystroke leaves the request alone.
            tokio::spawn(async move {
                let next = match lookup.is_taken(&email).await {
                    Ok(true) => EmailStatus::Taken,
                    Ok(false) => EmailStatus::Available,
                    Err(err) => {
                        warn!("Email availability check failed: {err}");
                        EmailStatus::Failed(err.user_message().to_string())
                    }
                };
                if !publish_if_current(&status, &current, generation, next) {
                    debug!("discarding superseded email check");
                }
            });
        }));
    }
}

/// Stores `next` only while `generation` is still the latest input. The check runs under the
/// channel's write lock, and `on_input` bumps the generation before taking that lock, so a
/// superseded task can never overwrite the reset that superseded it.
fn publish_if_current(
    status: &watch::Sender<EmailStatus>,
    current: &AtomicU64,
    generation: u64,
    next: EmailStatus,
) -> bool {
    status.send_if_modified(|value| {
        if current.load(Ordering::SeqCst) != generation {
            return false;
        }
        *value = next;
        true
    })
}

impl<L> Drop for EmailChecker<L> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
