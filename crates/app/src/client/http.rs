//! Authenticated token service session.

use std::fmt;

use async_trait::async_trait;
use githubtok::{
    remote::{NewToken, RemoteError, TokenRecord, TokenSecret, TokenSession},
    state::TokenId,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;
use zeroize::Zeroizing;

use super::{
    Credentials,
    wire::{CreateTokenRequest, CreateTokenResponse, LoginRequest, LoginResponse, TokenInfo, TokenList},
};

/// Session holding a bearer credential for the token service.
pub struct HttpTokenSession {
    http: Client,
    base_url: String,
    session: Zeroizing<String>,
}

impl fmt::Debug for HttpTokenSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTokenSession")
            .field("base_url", &self.base_url)
            .field("session", &"**redacted**")
            .finish_non_exhaustive()
    }
}

impl HttpTokenSession {
    /// Log in and return a session.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Authentication`] when the credentials are
    /// rejected, and a transport or response error otherwise.
    pub async fn login(
        http: Client,
        base_url: &str,
        credentials: &Credentials,
    ) -> Result<Self, RemoteError> {
        let body = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
            otp: credentials.otp.as_deref().map(String::as_str),
        };

        let response = http
            .post(format!("{base_url}/v1/session"))
            .json(&body)
            .send()
            .await
            .map_err(RemoteError::transport)?;

        let parsed: LoginResponse = check(response, "login")
            .await?
            .json()
            .await
            .map_err(RemoteError::transport)?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            session: Zeroizing::new(parsed.session),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.session.as_str())
    }

    async fn fetch_token(&self, id: TokenId) -> Result<TokenInfo, RemoteError> {
        let response = self
            .authorized(self.http.get(format!("{}/v1/tokens/{id}", self.base_url)))
            .send()
            .await
            .map_err(RemoteError::transport)?;

        check(response, "token lookup")
            .await?
            .json()
            .await
            .map_err(RemoteError::transport)
    }
}

#[async_trait]
impl TokenSession for HttpTokenSession {
    async fn create_token(&self, request: &NewToken) -> Result<TokenSecret, RemoteError> {
        let response = self
            .authorized(self.http.post(format!("{}/v1/tokens", self.base_url)))
            .json(&CreateTokenRequest::from(request))
            .send()
            .await
            .map_err(RemoteError::transport)?;

        if response.status() == StatusCode::CONFLICT {
            return Err(RemoteError::NameConflict(request.name.clone()));
        }

        let parsed: CreateTokenResponse = check(response, "create")
            .await?
            .json()
            .await
            .map_err(RemoteError::transport)?;

        Ok(TokenSecret::new(parsed.token))
    }

    async fn token_by_name(&self, name: &str) -> Result<TokenRecord, RemoteError> {
        let response = self
            .authorized(self.http.get(format!("{}/v1/tokens", self.base_url)))
            .query(&[("name", name)])
            .send()
            .await
            .map_err(RemoteError::transport)?;

        let list: TokenList = check(response, "token search")
            .await?
            .json()
            .await
            .map_err(RemoteError::transport)?;

        list.tokens
            .into_iter()
            .find(|token| token.name == name)
            .ok_or(RemoteError::NotFound)?
            .try_into()
    }

    async fn token_by_id(&self, id: TokenId) -> Result<TokenRecord, RemoteError> {
        self.fetch_token(id).await?.try_into()
    }

    async fn delete_token(&self, id: TokenId) -> Result<(), RemoteError> {
        let response = self
            .authorized(self.http.delete(format!("{}/v1/tokens/{id}", self.base_url)))
            .send()
            .await
            .map_err(RemoteError::transport)?;

        check(response, "delete").await?;

        Ok(())
    }

    async fn close(&self) -> Result<(), RemoteError> {
        let response = self
            .authorized(self.http.delete(format!("{}/v1/session", self.base_url)))
            .send()
            .await
            .map_err(RemoteError::transport)?;

        check(response, "logout").await?;
        debug!("token service session closed");

        Ok(())
    }
}

async fn check(response: Response, operation: &str) -> Result<Response, RemoteError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    Err(match status {
        StatusCode::NOT_FOUND => RemoteError::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Authentication(
            format!("{operation} request failed with status {status}: {text}"),
        ),
        _ => RemoteError::UnexpectedResponse(format!(
            "{operation} request failed with status {status}: {text}"
        )),
    })
}
