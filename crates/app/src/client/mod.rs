//! Token Service HTTP Client
//!
//! Implements the reconciler's session traits over the token service's JSON
//! API. A session is a bearer credential obtained by logging in with the
//! account's user name, password and, when two-factor authentication is on,
//! a one-time password.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use githubtok::remote::{RemoteError, SessionProvider, TokenSession};
use reqwest::Client;
use tracing::debug;
use zeroize::Zeroizing;

mod http;
mod wire;

pub use http::HttpTokenSession;

/// Account credentials used to open sessions.
#[derive(Clone)]
pub struct Credentials {
    /// Account user name.
    pub username: String,

    /// Account password.
    pub password: Zeroizing<String>,

    /// Current one-time password, if two-factor authentication is enabled.
    pub otp: Option<Zeroizing<String>>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .field("otp", &self.otp.as_ref().map(|_| "**redacted**"))
            .finish()
    }
}

/// Configuration for connecting to the token service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service base address, e.g. `"https://tokens.example.com"`.
    pub addr: String,

    /// Account credentials.
    pub credentials: Credentials,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// Opens authenticated sessions against the token service.
#[derive(Debug, Clone)]
pub struct HttpSessionProvider {
    config: ServiceConfig,
    http: Client,
}

impl HttpSessionProvider {
    /// Create a provider from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ServiceConfig) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RemoteError::transport)?;

        Ok(Self { config, http })
    }

    fn base_url(&self) -> &str {
        self.config.addr.trim_end_matches('/')
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn open(&self) -> Result<Box<dyn TokenSession>, RemoteError> {
        debug!(username = %self.config.credentials.username, "opening token service session");

        let session =
            HttpTokenSession::login(self.http.clone(), self.base_url(), &self.config.credentials)
                .await?;

        Ok(Box::new(session))
    }
}
