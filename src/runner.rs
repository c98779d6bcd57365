//! One pass of the daily job: validate config, sign in, notify.

use anyhow::Result;

use crate::client::SignInClient;
use crate::config::{Config, ConfigError};
use crate::notify::Notifier;
use crate::types::{Notification, SignInResult};

/// What a run did, for callers that want more than the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Configuration was incomplete; sign-in was not attempted. A
    /// configuration-error notification is sent unless `NTFY_TOPIC` is among
    /// the missing variables, in which case there is no topic to post to and
    /// `notified` is always `false`.
    Misconfigured { missing: Vec<&'static str>, notified: bool },
    /// Sign-in was attempted and its result pushed.
    Completed { result: SignInResult, notified: bool },
}

/// Run the job once. Primary failures are reported through the notifier, so
/// the only errors returned here come from setting up the HTTP clients.
pub async fn run(config: Result<Config, ConfigError>) -> Result<RunOutcome> {
    let config = match config {
        Ok(config) => config,
        Err(err) => return Ok(report_config_error(err).await),
    };

    tracing::info!("=== Starting sign-in job ===");
    let notifier = Notifier::new(config.ntfy.clone())?;
    let client = SignInClient::new(config)?;

    let result = SignInResult::from(client.sign_in().await);
    if result.success {
        tracing::info!(message = %result.message, "Sign-in succeeded");
    } else {
        tracing::error!(message = %result.message, "Sign-in failed");
    }

    let notified = notifier.send(&Notification::from_result(&result)).await;
    tracing::info!("Sign-in job finished");

    Ok(RunOutcome::Completed { result, notified })
}

async fn report_config_error(err: ConfigError) -> RunOutcome {
    tracing::error!(error = %err, "Configuration incomplete, skipping sign-in");

    let ConfigError::MissingVars { names, ntfy } = err;
    let notified = match ntfy {
        Some(ntfy) => match Notifier::new(ntfy) {
            Ok(notifier) => notifier.send(&Notification::config_error(&names)).await,
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "Could not set up notifier");
                false
            }
        },
        None => {
            tracing::warn!("NTFY_TOPIC is not set, cannot report configuration error");
            false
        }
    };

    RunOutcome::Misconfigured {
        missing: names,
        notified,
    }
}
