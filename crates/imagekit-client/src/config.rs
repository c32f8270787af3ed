//! Client configuration

use crate::{ClientError, Result};
use std::fmt;
use std::time::Duration;

/// Management API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.imagekit.io/v1";

/// Upload endpoint
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";

/// Client configuration
#[derive(Clone)]
pub struct Config {
    /// Private API key, sent as the basic-auth username
    pub private_key: String,
    /// Management API base URL
    pub api_base_url: String,
    /// Upload endpoint URL
    pub upload_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Maximum 429 retries per request (`None` retries until the API lets up)
    pub max_rate_limit_retries: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            private_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("imagekit-client/{}", env!("CARGO_PKG_VERSION")),
            max_rate_limit_retries: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("private_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("upload_url", &self.upload_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("max_rate_limit_retries", &self.max_rate_limit_retries)
            .finish()
    }
}

impl Config {
    /// Create a new config with the given private key
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            ..Default::default()
        }
    }

    /// Build a config from `IMAGEKIT_PRIVATE_KEY`, `IMAGEKIT_API_URL`
    /// and `IMAGEKIT_UPLOAD_URL`
    pub fn from_env() -> Result<Self> {
        let private_key = std::env::var("IMAGEKIT_PRIVATE_KEY")
            .map_err(|_| ClientError::Config("IMAGEKIT_PRIVATE_KEY is not set".to_string()))?;

        let mut config = Self::new(private_key);
        if let Ok(url) = std::env::var("IMAGEKIT_API_URL") {
            config = config.with_api_base_url(url);
        }
        if let Ok(url) = std::env::var("IMAGEKIT_UPLOAD_URL") {
            config = config.with_upload_url(url);
        }
        Ok(config)
    }

    /// Point management calls at a different base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Point uploads at a different URL
    pub fn with_upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cap the number of 429 retries
    pub fn with_max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = Some(retries);
        self
    }

    /// Check that the config can be used to build a client
    pub fn validate(&self) -> Result<()> {
        if self.private_key.trim().is_empty() {
            return Err(ClientError::Config("private key must not be empty".to_string()));
        }
        url::Url::parse(&self.api_base_url)
            .map_err(|e| ClientError::Config(format!("invalid API base URL: {}", e)))?;
        url::Url::parse(&self.upload_url)
            .map_err(|e| ClientError::Config(format!("invalid upload URL: {}", e)))?;
        Ok(())
    }

    /// Build a management API URL for the given path
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}
