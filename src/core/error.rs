//! Errors raised by a single Vault API call.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no group data returned from {url}")]
    EmptyRecord { url: String },

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Whether the service answered 404, which listings use for "no keys".
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}
