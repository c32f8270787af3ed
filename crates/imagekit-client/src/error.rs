//! Client error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connect, DNS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the raw response body
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// `X-RateLimit-Reset` missing or not an integer
    #[error("invalid X-RateLimit-Reset header: {0:?}")]
    RateLimitReset(String),

    /// Still rate limited after the configured number of retries
    #[error("rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    /// Cancelled while waiting out a rate limit
    #[error("request cancelled")]
    Cancelled,

    /// Request payload could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Response body could not be decoded
    #[error("deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Upload file or file name rejected
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Unknown listing type
    #[error("invalid type value: {0}")]
    InvalidType(String),

    /// Unknown sort order
    #[error("invalid sort value: {0}")]
    InvalidSort(String),

    /// Unknown file type filter
    #[error("invalid file type value: {0}")]
    InvalidFileType(String),

    /// `limit` outside [1, 1000]
    #[error("limit is out of bounds: {0}")]
    LimitOutOfBounds(i64),

    /// Negative `skip`
    #[error("skip is out of bounds: {0}")]
    SkipOutOfBounds(i64),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error came from rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::RateLimitReset(_))
    }

    /// Check if the request was rejected locally before reaching the network
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidFile(_)
                | Self::InvalidType(_)
                | Self::InvalidSort(_)
                | Self::InvalidFileType(_)
                | Self::LimitOutOfBounds(_)
                | Self::SkipOutOfBounds(_)
        )
    }
}
