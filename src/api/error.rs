use thiserror::Error;

/// Fatal failures of the API access layer
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input, detected before any network I/O
    #[error("{0}")]
    Config(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request never produced a response; `source` carries the reason
    #[error("{context}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(
        "{context}: expected status code {expected}, received {received} ({status})\n{body}"
    )]
    UnexpectedStatus {
        context: String,
        expected: u16,
        received: u16,
        status: String,
        body: String,
    },

    /// Response body that does not match the API contract
    #[error("{0}")]
    Protocol(String),

    #[error("{context}: no response")]
    EmptyResponse { context: String },

    #[error("failed to find {kind} with requested name: {name}")]
    NotFound { kind: String, name: String },

    #[error("interrupted")]
    Interrupted,
}

impl ApiError {
    pub fn config(message: impl Into<String>) -> Self {
        ApiError::Config(message.into())
    }

    pub fn empty(context: impl Into<String>) -> Self {
        ApiError::EmptyResponse {
            context: context.into(),
        }
    }
}
