//! Runtime configuration loaded once from the environment.
//!
//! Every value is read up front and handed to the components as an immutable
//! [`Config`]; nothing else in the crate touches the environment.

use std::fmt;

use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.sfacg.com";
pub const DEFAULT_NTFY_BASE: &str = "https://ntfy.sh";

pub const ENV_NONCE: &str = "SF_NONCE";
pub const ENV_DEVICE_TOKEN: &str = "SF_DEVICETOKEN";
pub const ENV_SIGN: &str = "SF_SIGN";
pub const ENV_AUTHORIZATION: &str = "SF_AUTHORIZATION";
pub const ENV_COOKIE_SF_COMMUNITY: &str = "SF_COOKIE_SFCOMMUNITY";
pub const ENV_COOKIE_SESSION_APP: &str = "SF_COOKIE_SESSIONAPP";
pub const ENV_NTFY_TOPIC: &str = "NTFY_TOPIC";
pub const ENV_API_BASE: &str = "SF_API_BASE";
pub const ENV_NTFY_BASE: &str = "NTFY_URL";

/// Required variables, in the order they are reported when missing.
pub const REQUIRED_VARS: [&str; 7] = [
    ENV_NONCE,
    ENV_DEVICE_TOKEN,
    ENV_SIGN,
    ENV_AUTHORIZATION,
    ENV_COOKIE_SF_COMMUNITY,
    ENV_COOKIE_SESSION_APP,
    ENV_NTFY_TOPIC,
];

/// Pre-obtained platform secrets. All fields are guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub nonce: String,
    pub device_token: String,
    pub sign: String,
    pub authorization: String,
    pub sf_community: String,
    pub session_app: String,
}

// Secrets stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("nonce", &"<redacted>")
            .field("device_token", &"<redacted>")
            .field("sign", &"<redacted>")
            .field("authorization", &"<redacted>")
            .field("sf_community", &"<redacted>")
            .field("session_app", &"<redacted>")
            .finish()
    }
}

/// Where notifications are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NtfyConfig {
    pub base_url: String,
    pub topic: String,
}

impl NtfyConfig {
    pub fn topic_url(&self) -> String {
        format!("{}/{}", self.base_url, self.topic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials: Credentials,
    pub api_base: String,
    pub ntfy: NtfyConfig,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required variables are unset or empty. `ntfy` is still
    /// populated when the topic itself was present, so the failure can be
    /// reported.
    #[error("missing environment variables: {}", .names.join(", "))]
    MissingVars {
        names: Vec<&'static str>,
        ntfy: Option<NtfyConfig>,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as
    /// missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|&key| get(key).is_none())
            .collect();

        let ntfy_base = get(ENV_NTFY_BASE)
            .map(|url| trim_base(&url))
            .unwrap_or_else(|| DEFAULT_NTFY_BASE.to_string());
        let ntfy = get(ENV_NTFY_TOPIC).map(|topic| NtfyConfig {
            base_url: ntfy_base,
            topic,
        });

        let ntfy = match ntfy {
            Some(ntfy) if missing.is_empty() => ntfy,
            ntfy => {
                return Err(ConfigError::MissingVars {
                    names: missing,
                    ntfy,
                });
            }
        };

        let required = |key: &str| get(key).unwrap_or_default();
        let credentials = Credentials {
            nonce: required(ENV_NONCE),
            device_token: required(ENV_DEVICE_TOKEN),
            sign: required(ENV_SIGN),
            authorization: required(ENV_AUTHORIZATION),
            sf_community: required(ENV_COOKIE_SF_COMMUNITY),
            session_app: required(ENV_COOKIE_SESSION_APP),
        };

        let api_base = get(ENV_API_BASE)
            .map(|url| trim_base(&url))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            credentials,
            api_base,
            ntfy,
        })
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
