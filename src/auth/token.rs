use super::cache::CredentialCache;
use crate::api::ApiError;
use crate::config::Config;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Audience requested for every API token
pub const AUDIENCE: &str = "https://api.resim.ai";

/// Tokens this close to expiry are treated as expired
const EXPIRY_MARGIN_SECS: i64 = 10;

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Longest lifetime accepted from the token endpoint (ten years)
const MAX_EXPIRES_IN: i64 = 10 * 365 * 24 * 60 * 60;

/// A bearer token and its absolute expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expiry: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenRecord {
    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Utc::now())
    }

    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry - now > Duration::seconds(EXPIRY_MARGIN_SECS)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
}

/// Client-credentials settings for the authorization server
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub auth_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
}

impl AuthConfig {
    /// Fails when the client ID or secret is empty
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        if config.client_id.is_empty() {
            return Err(ApiError::config(
                "client ID is required (--client-id or RESIM_CLIENT_ID)",
            ));
        }
        if config.client_secret.is_empty() {
            return Err(ApiError::config(
                "client secret is required (--client-secret or RESIM_CLIENT_SECRET)",
            ));
        }

        Ok(Self {
            auth_url: config.auth_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            audience: AUDIENCE.to_string(),
        })
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.auth_url.trim_end_matches('/'))
    }
}

struct State {
    cache: CredentialCache,
    cache_loaded: bool,
    current: Option<TokenRecord>,
}

/// Hands out bearer tokens, reusing the cached one until it expires.
///
/// The credential cache is read on the first call to [`token`](Self::token),
/// so commands that never reach the API never touch it.
pub struct TokenSource {
    http: reqwest::Client,
    auth: AuthConfig,
    state: Mutex<State>,
}

impl TokenSource {
    pub fn new(http: reqwest::Client, auth: AuthConfig, cache: CredentialCache) -> Self {
        Self {
            http,
            auth,
            state: Mutex::new(State {
                cache,
                cache_loaded: false,
                current: None,
            }),
        }
    }

    /// Return a usable token, exchanging credentials only when required
    pub async fn token(&self) -> Result<TokenRecord, ApiError> {
        let mut state = self.state.lock().await;

        if let Some(token) = &state.current {
            if token.is_usable() {
                return Ok(token.clone());
            }
            debug!("In-memory token expired at {}", token.expiry);
        }

        if !state.cache_loaded {
            state.cache_loaded = true;
            match state.cache.load() {
                Ok(()) => {}
                Err(e) if e.is_not_found() => debug!("{}", e),
                Err(e) => warn!("{}; a new token will be requested", e),
            }

            match state.cache.get(&self.auth.client_id).cloned() {
                Some(cached) if cached.is_usable() => {
                    debug!("Using cached token for client {}", self.auth.client_id);
                    state.current = Some(cached.clone());
                    return Ok(cached);
                }
                Some(cached) => {
                    debug!("Cached token expired at {}", cached.expiry);
                }
                None => {
                    debug!("No cached token for client {}", self.auth.client_id);
                }
            }
        }

        let fresh = self.exchange().await?;
        state.current = Some(fresh.clone());
        Ok(fresh)
    }

    /// Persist the last token for the next process. Failures are only logged.
    pub async fn save(&self) {
        let mut state = self.state.lock().await;
        let Some(token) = state.current.clone() else {
            return;
        };

        if let Err(e) = state.cache.save(&self.auth.client_id, token) {
            warn!("Could not save token cache: {}", e);
        }
    }

    async fn exchange(&self) -> Result<TokenRecord, ApiError> {
        let token_url = self.auth.token_url();
        info!(
            "Requesting token from {} for client {}",
            token_url, self.auth.client_id
        );

        let response = self
            .http
            .post(&token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.auth.client_id.as_str()),
                ("client_secret", self.auth.client_secret.as_str()),
                ("audience", self.auth.audience.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Auth(format!("token request to {} failed: {}", token_url, e)))?;

        let status = response.status();
        debug!("Token request status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let payload: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Auth(format!("malformed token response: {}", e)))?;

        let access_token = payload
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Auth("no access token in response".to_string()))?;

        let expires_in = payload.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);
        let expiry = expiry_after(Utc::now(), expires_in).ok_or_else(|| {
            ApiError::Auth(format!("invalid expires_in in token response: {}", expires_in))
        })?;

        Ok(TokenRecord {
            access_token,
            token_type: payload.token_type.unwrap_or_else(default_token_type),
            expiry,
            refresh_token: payload.refresh_token,
        })
    }
}

/// Expiry instant for a lifetime in seconds, `None` when out of range
fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    if !(0..=MAX_EXPIRES_IN).contains(&expires_in) {
        return None;
    }
    now.checked_add_signed(Duration::seconds(expires_in))
}
