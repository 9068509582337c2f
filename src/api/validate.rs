//! Uniform status checking for every API call

use super::error::ApiError;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Reduce a send result to the response, or a fatal error.
///
/// A status other than `expected` consumes the body so the server's message
/// ends up in the diagnostic.
pub async fn check_response(
    result: Result<Response, reqwest::Error>,
    expected: StatusCode,
    context: &str,
) -> Result<Response, ApiError> {
    let response = result.map_err(|source| ApiError::Transport {
        context: context.to_string(),
        source,
    })?;

    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read response body: {}>", e));

    log::debug!("{}: unexpected status {}", context, status);

    Err(ApiError::UnexpectedStatus {
        context: context.to_string(),
        expected: expected.as_u16(),
        received: status.as_u16(),
        status: status.to_string(),
        body,
    })
}

/// Read a required JSON payload; `null` or an empty body counts as no response
pub async fn read_payload<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, ApiError> {
    let text = response.text().await.map_err(|source| ApiError::Transport {
        context: context.to_string(),
        source,
    })?;

    if text.trim().is_empty() {
        return Err(ApiError::empty(context));
    }

    let value: Value = serde_json::from_str(&text).map_err(|e| {
        ApiError::Protocol(format!("{}: malformed response body: {}\n{}", context, e, text))
    })?;
    if value.is_null() {
        return Err(ApiError::empty(context));
    }

    serde_json::from_value(value).map_err(|e| {
        ApiError::Protocol(format!("{}: unexpected response shape: {}\n{}", context, e, text))
    })
}
