//! Identity providers: the external collaborator behind social sign-in.
//!
//! DESIGN
//! ======
//! Route handlers only see the [`IdentityProvider`] trait: build an
//! authorization URL, then turn the returned code into a profile. Google is
//! the one concrete provider; tests swap in a fake at the same seam.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;
use serde::Deserialize;

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const GOOGLE_SCOPES: &str = "openid email profile";

/// Social providers the auth surface knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Google,
}

impl Provider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(Self::Google),
            other => Err(IdentityError::UnknownProvider(other.to_owned())),
        }
    }
}

/// Profile fields the app keeps from a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    /// Stable account id at the provider (`sub` for Google).
    pub account_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
    #[error("provider api error: {0}")]
    ProviderApi(String),
}

/// Trait abstraction over a social identity provider.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Which provider this is.
    fn provider(&self) -> Provider;

    /// URL the browser is sent to in order to authorize the app.
    fn authorize_url(&self, state: &str, redirect_uri: &str) -> String;

    /// Exchange an authorization code for the signed-in account's profile.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] if the code exchange or profile fetch fails.
    async fn fetch_profile(&self, code: &str, redirect_uri: &str) -> Result<ProviderProfile, IdentityError>;
}

// =============================================================================
// GOOGLE
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl From<GoogleUserInfo> for ProviderProfile {
    fn from(info: GoogleUserInfo) -> Self {
        Self { account_id: info.sub, email: info.email, name: info.name, image: info.picture }
    }
}

/// Google OAuth 2.0 / OpenID Connect provider.
pub struct GoogleProvider {
    client_id: String,
    client_secret: String,
    http: reqwest::Client,
}

impl GoogleProvider {
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self { client_id, client_secret, http: reqwest::Client::new() }
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<String, IdentityError> {
        let resp = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| IdentityError::TokenExchange(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| IdentityError::TokenExchange(e.to_string()))?;
        if !status.is_success() {
            return Err(IdentityError::TokenExchange(format!("{status}: {body}")));
        }
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|_| IdentityError::TokenExchange(format!("unexpected response: {body}")))?;
        Ok(token.access_token)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, IdentityError> {
        let resp = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| IdentityError::ProviderApi(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::ProviderApi(format!("{status}: {body}")));
        }

        resp.json::<GoogleUserInfo>()
            .await
            .map_err(|e| IdentityError::ProviderApi(e.to_string()))
    }
}

#[async_trait::async_trait]
impl IdentityProvider for GoogleProvider {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn authorize_url(&self, state: &str, redirect_uri: &str) -> String {
        google_authorize_url(&self.client_id, state, redirect_uri)
    }

    async fn fetch_profile(&self, code: &str, redirect_uri: &str) -> Result<ProviderProfile, IdentityError> {
        let access_token = self.exchange_code(code, redirect_uri).await?;
        let info = self.fetch_user_info(&access_token).await?;
        Ok(info.into())
    }
}

pub(crate) fn google_authorize_url(client_id: &str, state: &str, redirect_uri: &str) -> String {
    let params = [
        ("client_id", client_id),
        ("redirect_uri", redirect_uri),
        ("response_type", "code"),
        ("scope", GOOGLE_SCOPES),
        ("state", state),
        ("prompt", "select_account"),
    ];
    match Url::parse_with_params(GOOGLE_AUTHORIZE_URL, &params) {
        Ok(url) => url.into(),
        Err(_) => GOOGLE_AUTHORIZE_URL.to_owned(),
    }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
