pub mod client;
pub mod config;
pub mod headers;
pub mod notify;
pub mod runner;
pub mod types;

pub use client::{SignInClient, parse_reward};
pub use config::{Config, ConfigError, Credentials, NtfyConfig};
pub use notify::Notifier;
pub use runner::{RunOutcome, run};
pub use types::{Notification, Priority, Reward, SignInError, SignInResult, VOUCHER_LABEL};
