//! Token Service Config

use std::time::Duration;

use clap::Args;
use zeroize::Zeroizing;

use crate::client::{Credentials, ServiceConfig};

/// Token service connection settings.
#[derive(Debug, Args)]
pub struct ServiceArgs {
    /// Token service base URL
    #[arg(long, env = "TOKEN_SERVICE_URL")]
    pub service_url: String,

    /// Account user name
    #[arg(long, env = "GITHUB_USER")]
    pub username: String,

    /// Account password
    #[arg(long, env = "GITHUB_PASS", hide_env_values = true)]
    pub password: String,

    /// One-time password for two-factor authentication
    #[arg(long, env = "GITHUB_OTP", hide_env_values = true)]
    pub otp: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "TOKEN_SERVICE_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub timeout_seconds: u64,
}

impl ServiceArgs {
    /// Client configuration for these settings.
    pub fn into_service_config(self) -> ServiceConfig {
        ServiceConfig {
            addr: self.service_url,
            credentials: Credentials {
                username: self.username,
                password: Zeroizing::new(self.password),
                otp: self.otp.map(Zeroizing::new),
            },
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}
