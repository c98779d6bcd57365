//! ntfy push delivery.
//!
//! Notifications are best-effort: [`Notifier::send`] never fails, it logs and
//! reports `false` instead so a delivery problem cannot hide the sign-in
//! outcome.

use std::time::Duration;

use anyhow::{Context, Result};
use wreq::Client;
use wreq::header::HeaderValue;

use crate::config::NtfyConfig;
use crate::types::Notification;

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Notifier {
    http_client: Client,
    ntfy: NtfyConfig,
}

impl Notifier {
    pub fn new(ntfy: NtfyConfig) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .context("Failed to build notification HTTP client")?;
        Ok(Self { http_client, ntfy })
    }

    /// Deliver `notification`. Returns `true` when ntfy answered 200.
    pub async fn send(&self, notification: &Notification) -> bool {
        match self.post(notification).await {
            Ok(200) => {
                tracing::info!(title = %notification.title, "Notification sent");
                true
            }
            Ok(status) => {
                tracing::warn!(
                    title = %notification.title,
                    status,
                    "Notification rejected"
                );
                false
            }
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "Notification failed");
                false
            }
        }
    }

    async fn post(&self, notification: &Notification) -> Result<u16> {
        // ntfy reads the raw UTF-8 bytes of the Title header
        let title = HeaderValue::from_bytes(notification.title.as_bytes())
            .context("Title is not a valid header value")?;

        let response = self
            .http_client
            .post(self.ntfy.topic_url())
            .timeout(NOTIFY_TIMEOUT)
            .header("Title", title)
            .header("Priority", notification.priority.to_string())
            .header("Tags", notification.tags_header())
            .body(notification.message.as_bytes().to_vec())
            .send()
            .await
            .context("Failed to reach ntfy")?;

        Ok(response.status().as_u16())
    }
}
