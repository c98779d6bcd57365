use std::time::Duration;

use anyhow::{Context, Result};
use wreq::{Client, header};

use crate::config::Config;
use crate::headers;
use crate::types::{Reward, RewardEntry, SignInError, SignInRequest, SignInResponse};

const SIGN_IN_PATH: &str = "/user/newSignInfo";
const API_ACCEPT: &str = "application/vnd.sfacg.api+json;version=1";
const USER_AGENT: &str =
    "boluobao/5.0.32(iOS;14.2)/appStore/5B778D69-AE1B-44EF-A029-0721A394C9F8/appStore";
const ACCEPT_LANGUAGE: &str = "zh-Hans-CN;q=1, el-CN;q=0.9, ja-CN;q=0.8";
const SIGN_IN_TIMEOUT: Duration = Duration::from_secs(30);
const SUCCESS_CODE: i64 = 200;

/// Pick the reward out of a sign-in response body.
///
/// Requires `status.httpCode == 200` and a non-empty `data` list. The voucher
/// entry is preferred; otherwise the first entry is reported, which is a
/// heuristic rather than documented API behavior. Malformed entries are
/// skipped when searching; the chosen entry must carry both a name and a
/// numeric count, a missing count is never reported as zero.
pub fn parse_reward(body: &str) -> Option<Reward> {
    let response: SignInResponse = serde_json::from_str(body).ok()?;
    if response.status?.http_code? != SUCCESS_CODE {
        return None;
    }

    let entries: Vec<RewardEntry> = response
        .data?
        .iter()
        .map(RewardEntry::from_value)
        .collect();

    let entry = match entries.iter().find(|entry| entry.is_voucher()) {
        Some(voucher) => voucher,
        None => {
            let first = entries.first()?;
            tracing::warn!(
                reward = ?first.name,
                "No voucher in reward list, reporting first entry"
            );
            first
        }
    };

    let reward = entry.to_reward();
    if reward.is_none() {
        tracing::warn!(?entry, "Selected reward entry is incomplete");
    }
    reward
}

/// Today's date in the local time zone, as the API expects it.
pub fn local_sign_date() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub struct SignInClient {
    http_client: Client,
    config: Config,
    timeout: Duration,
}

impl SignInClient {
    pub fn new(config: Config) -> Result<Self> {
        let http_client = Client::builder()
            .gzip(true)
            .brotli(true)
            .zstd(true)
            .build()
            .context("Failed to build sign-in HTTP client")?;

        Ok(Self {
            http_client,
            config,
            timeout: SIGN_IN_TIMEOUT,
        })
    }

    /// Override the per-request timeout (30s by default).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn sign_in_url(&self) -> String {
        format!("{}{}", self.config.api_base, SIGN_IN_PATH)
    }

    /// Sign in for today using the current time.
    pub async fn sign_in(&self) -> Result<Reward, SignInError> {
        self.sign_in_at(&local_sign_date(), headers::timestamp_millis())
            .await
    }

    /// Sign in for `sign_date` with a fixed `SFSecurity` timestamp.
    pub async fn sign_in_at(&self, sign_date: &str, timestamp: u128) -> Result<Reward, SignInError> {
        let creds = &self.config.credentials;
        let request = SignInRequest {
            sign_date: sign_date.to_string(),
        };

        tracing::info!(date = %sign_date, "Starting sign-in");

        let response = self
            .http_client
            .put(self.sign_in_url())
            .timeout(self.timeout)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(header::ACCEPT, API_ACCEPT)
            .header(headers::SF_SECURITY, headers::sf_security(creds, timestamp))
            .header(header::AUTHORIZATION, headers::basic_authorization(creds))
            .header(header::COOKIE, headers::cookie(creds))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Sign-in request failed");
                SignInError::Network(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read sign-in response body");
            SignInError::Network(e.to_string())
        })?;

        tracing::info!(status, "Sign-in HTTP status");
        tracing::info!(%body, "Sign-in response body");

        if status != 200 {
            return Err(SignInError::Http { status, body });
        }

        parse_reward(&body).ok_or(SignInError::Parse { status, raw: body })
    }
}
