use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Name of the platform's voucher currency, the preferred reward to report.
pub const VOUCHER_LABEL: &str = "代券";

/// Body of the sign-in PUT
#[derive(Debug, Serialize)]
pub struct SignInRequest {
    #[serde(rename = "signDate")]
    pub sign_date: String,
}

/// Response from the sign-in endpoint
#[derive(Debug, Deserialize)]
pub struct SignInResponse {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(default)]
    pub data: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseStatus {
    #[serde(rename = "httpCode")]
    pub http_code: Option<i64>,
}

/// One item of the reward list, read leniently: a malformed entry yields
/// `None` fields instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardEntry {
    pub name: Option<String>,
    pub num: Option<i64>,
}

impl RewardEntry {
    pub fn from_value(value: &serde_json::Value) -> Self {
        let name = value
            .get("name")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        // Quoted numbers are accepted too
        let num = value.get("num").and_then(|v| match v {
            serde_json::Value::String(s) => s.trim().parse().ok(),
            other => other.as_i64(),
        });
        Self { name, num }
    }

    pub fn is_voucher(&self) -> bool {
        self.name.as_deref() == Some(VOUCHER_LABEL)
    }

    /// Both fields are required to report a reward.
    pub fn to_reward(&self) -> Option<Reward> {
        Some(Reward {
            name: self.name.clone()?,
            count: self.num?,
        })
    }
}

/// Reward granted by a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub name: String,
    pub count: i64,
}

impl Reward {
    pub fn is_voucher(&self) -> bool {
        self.name == VOUCHER_LABEL
    }
}

/// Why a sign-in did not yield a reward.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignInError {
    /// Non-200 HTTP status
    #[error("sign-in request failed with HTTP {status}")]
    Http { status: u16, body: String },
    /// HTTP 200 but the body holds no usable reward
    #[error("unexpected sign-in response")]
    Parse { status: u16, raw: String },
    /// Transport failure or timeout, no response received
    #[error("sign-in request failed: {0}")]
    Network(String),
}

impl SignInError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Parse { status, .. } => Some(*status),
            Self::Network(_) => None,
        }
    }
}

/// Human-readable summary of one sign-in attempt, as delivered to the
/// notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInResult {
    pub success: bool,
    pub message: String,
    pub voucher_count: Option<i64>,
    pub reward_name: Option<String>,
    pub status_code: Option<u16>,
}

impl From<Result<Reward, SignInError>> for SignInResult {
    fn from(outcome: Result<Reward, SignInError>) -> Self {
        match outcome {
            Ok(reward) => Self {
                success: true,
                message: format!("获得 {} {}", reward.count, reward.name),
                voucher_count: Some(reward.count),
                reward_name: Some(reward.name),
                status_code: Some(200),
            },
            Err(err) => {
                let status_code = err.status_code();
                let message = match err {
                    SignInError::Parse { raw, .. } => {
                        format!("签到解析失败\n原始响应: {}", raw)
                    }
                    SignInError::Http { status, body } => {
                        format!("签到失败({})\n原始响应: {}", status, body)
                    }
                    SignInError::Network(cause) => format!("签到网络请求失败: {}", cause),
                };
                Self {
                    success: false,
                    message,
                    voucher_count: None,
                    reward_name: None,
                    status_code,
                }
            }
        }
    }
}

/// ntfy message priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Default,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A push notification ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub tags: Vec<&'static str>,
}

impl Notification {
    pub fn config_error(missing: &[&str]) -> Self {
        Self {
            title: "❌ SF签到配置错误".to_string(),
            message: format!("缺少环境变量: {}", missing.join(", ")),
            priority: Priority::High,
            tags: vec!["warning", "rotating_light"],
        }
    }

    pub fn from_result(result: &SignInResult) -> Self {
        match (result.success, result.voucher_count, &result.reward_name) {
            (true, Some(count), Some(name)) => Self {
                title: format!("🎉 SF签到 +{}{}", count, name),
                message: result.message.clone(),
                priority: Priority::Default,
                tags: vec!["white_check_mark", "moneybag"],
            },
            _ => Self {
                title: "❌ SF签到失败".to_string(),
                message: result.message.clone(),
                priority: Priority::High,
                tags: vec!["x", "warning"],
            },
        }
    }

    pub fn tags_header(&self) -> String {
        self.tags.join(",")
    }
}
