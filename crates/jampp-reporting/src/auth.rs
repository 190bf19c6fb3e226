//! Client-credentials access token cache

use std::sync::Arc;
use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::clock::Clock;
use crate::error::Error;

/// How long before the reported expiry a token stops being handed out
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(300);

/// The client identifier and secret presented to the token endpoint
#[derive(Clone, Debug)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: SecretString) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
        }
    }
}

#[derive(Debug)]
struct Credential {
    token: SecretString,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,

    /// Lifetime of the token in seconds
    #[serde(default)]
    expires_in: u64,
}

/// Holds a single access token and refreshes it when it is missing or expired.
///
/// The credential slot stays locked while a refresh is in flight, so callers
/// arriving during a refresh wait for it and share the new token.
#[derive(Debug)]
pub struct TokenCache {
    http: reqwest::Client,
    auth_url: Url,
    credentials: ClientCredentials,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<Credential>>,
}

impl TokenCache {
    pub fn new(
        http: reqwest::Client,
        auth_url: Url,
        credentials: ClientCredentials,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http,
            auth_url,
            credentials,
            clock,
            slot: Mutex::new(None),
        }
    }

    /// Get a token that is valid for immediate use, requesting a new one if needed
    pub async fn obtain_token(&self) -> Result<SecretString, Error> {
        let mut slot = self.slot.lock().await;
        let now = self.clock.now();
        if let Some(credential) = slot.as_ref().filter(|c| now < c.expires_at) {
            return Ok(credential.token.clone());
        }

        let credential = self.request_token().await?;
        let token = credential.token.clone();
        *slot = Some(credential);
        Ok(token)
    }

    async fn request_token(&self) -> Result<Credential, Error> {
        debug!(url = %self.auth_url, "Requesting access token");
        let response = self
            .http
            .post(self.auth_url.clone())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                (
                    "client_secret",
                    self.credentials.client_secret.expose_secret(),
                ),
            ])
            .send()
            .await
            .map_err(|e| Error::Authentication(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Authentication(status.to_string()));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Authentication(format!("invalid token response: {e}")))?;

        let token = body
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Authentication("token is empty".to_string()))?;

        // A lifetime shorter than the margin yields a threshold that has
        // already passed, so the next call refreshes again.
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(EXPIRY_MARGIN);
        let expires_at = self.clock.now() + lifetime;
        debug!(expires_in = body.expires_in, "Access token refreshed");

        Ok(Credential {
            token: SecretString::from(token),
            expires_at,
        })
    }
}
