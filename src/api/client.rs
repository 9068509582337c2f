use super::error::ApiError;
use super::resolve::{PAGE_SIZE, Page};
use super::validate::{check_response, read_payload};
use crate::auth::{AuthConfig, CredentialCache, TokenSource};
use crate::config::Config;
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// ReSim API client that attaches a bearer token to every request
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
    tokens: TokenSource,
}

impl ApiClient {
    /// Build the client for one command. No network I/O happens here.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let auth = AuthConfig::from_config(config)?;

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("resim-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::config(format!("failed to build HTTP client: {}", e)))?;

        let cache = CredentialCache::new(config.cache_path.clone());
        let tokens = TokenSource::new(http_client.clone(), auth, cache);

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            http_client,
            tokens,
        })
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Write the current token to the credential cache
    pub async fn save_credentials(&self) {
        self.tokens.save().await;
    }

    /// Send an authenticated request and validate its status
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        expected: StatusCode,
        context: &str,
    ) -> Result<Response, ApiError> {
        let token = self.tokens.token().await?;
        let url = self.url(path);
        log::debug!("{} {}", method, url);

        let mut request = self
            .http_client
            .request(method, &url)
            .bearer_auth(&token.access_token);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        check_response(request.send().await, expected, context).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .send::<()>(Method::GET, path, &[], None, StatusCode::OK, context)
            .await?;
        read_payload(response, context).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .send(Method::POST, path, &[], Some(body), StatusCode::CREATED, context)
            .await?;
        read_payload(response, context).await
    }

    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<(), ApiError> {
        self.send(Method::PUT, path, &[], Some(body), StatusCode::OK, context)
            .await?;
        Ok(())
    }

    /// Fetch one page of a list endpoint.
    ///
    /// `field` names the array in the response; a missing or `null` array is
    /// reported as an absent page so callers can treat it as fatal.
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        page_token: Option<String>,
        context: &str,
    ) -> Result<Page<T>, ApiError> {
        let mut query = vec![("pageSize", PAGE_SIZE.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .send::<()>(Method::GET, path, &query, None, StatusCode::OK, context)
            .await?;
        let mut payload: Value = read_payload(response, context).await?;

        let items = match payload.get_mut(field).map(Value::take) {
            None | Some(Value::Null) => None,
            Some(array) => Some(serde_json::from_value(array).map_err(|e| {
                ApiError::Protocol(format!("{}: unexpected {} entry: {}", context, field, e))
            })?),
        };
        let next_page_token = payload
            .get("nextPageToken")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Page {
            items,
            next_page_token,
        })
    }
}
