//! Platform authentication headers.
//!
//! The app authenticates every call with a composite `SFSecurity` header plus
//! a basic `Authorization` header and two session cookies.

use crate::config::Credentials;

pub const SF_SECURITY: &str = "SFSecurity";

/// Current Unix time in milliseconds, as embedded in `SFSecurity`.
pub fn timestamp_millis() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Build the `SFSecurity` header value.
///
/// Format: `nonce={nonce}&timestamp={ms}&devicetoken={token}&sign={sign}`
pub fn sf_security(credentials: &Credentials, timestamp: u128) -> String {
    format!(
        "nonce={}&timestamp={}&devicetoken={}&sign={}",
        credentials.nonce, timestamp, credentials.device_token, credentials.sign
    )
}

/// Build the `Cookie` header carrying the community and app session cookies.
pub fn cookie(credentials: &Credentials) -> String {
    format!(
        ".SFCommunity={}; session_APP={}",
        credentials.sf_community, credentials.session_app
    )
}

pub fn basic_authorization(credentials: &Credentials) -> String {
    format!("Basic {}", credentials.authorization)
}
