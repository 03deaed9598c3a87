//! Vector store errors

/// Errors returned by the remote vector store and its client.
///
/// Nothing here is retried; every variant propagates to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Vector store returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Vector store at {0} is not ready")]
    NotReady(String),
    #[error("Query failed: {}", .0.join("; "))]
    GraphQl(Vec<String>),
    #[error("Unexpected response shape: {0}")]
    Decode(String),
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),
    #[error("Query was cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl StoreError {
    /// Short machine-readable code used by the JSON API.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Http(_) | Self::NotReady(_) => "STORE_UNAVAILABLE",
            Self::Status { .. } | Self::GraphQl(_) => "STORE_ERROR",
            Self::Decode(_) => "STORE_BAD_RESPONSE",
            Self::InvalidHeader(_) => "STORE_MISCONFIGURED",
            Self::Cancelled => "CANCELLED",
        }
    }
}
