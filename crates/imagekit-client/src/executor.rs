//! Request execution: auth injection, dispatch and rate-limit backoff
//!
//! Every API call funnels through [`RequestExecutor::execute`]. Requests are
//! described as plain [`ApiRequest`] values with in-memory bodies so that a
//! `429 Too Many Requests` can be answered by re-sending the identical request
//! once the `X-RateLimit-Reset` window has passed.

use crate::{ClientError, Config, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client, Method, Response, StatusCode,
};
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Response header carrying the rate-limit wait in milliseconds
pub const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

/// An outbound API call described as plain data
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl ApiRequest {
    /// Create a request with no headers and no body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        let body = serde_json::to_vec(body).map_err(ClientError::Serialization)?;
        Ok(self
            .with_header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(body))
    }

    /// Set a header, replacing any previous value
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the raw body
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Dispatches [`ApiRequest`]s with basic auth and 429 handling
#[derive(Clone)]
pub struct RequestExecutor {
    http: Client,
    authorization: HeaderValue,
    max_rate_limit_retries: Option<u32>,
}

impl RequestExecutor {
    /// Create an executor from the client configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ClientError::Config(format!("invalid user agent: {}", e)))?,
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            http,
            authorization: basic_auth(&config.private_key)?,
            max_rate_limit_retries: config.max_rate_limit_retries,
        })
    }

    /// Execute a request and return the raw 2xx body
    pub async fn execute(&self, request: ApiRequest) -> Result<Bytes> {
        self.execute_with_cancel(request, None).await
    }

    /// Execute a request, aborting any rate-limit wait once `cancel` fires
    pub async fn execute_with_cancel(
        &self,
        mut request: ApiRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Bytes> {
        self.authorize(&mut request);

        let mut retries = 0u32;
        let response = loop {
            let response = self.dispatch(&request).await?;
            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                break response;
            }

            let wait = rate_limit_wait(response.headers())?;
            if let Some(max) = self.max_rate_limit_retries {
                if retries >= max {
                    return Err(ClientError::RateLimited { retries });
                }
            }
            retries += 1;

            warn!(
                url = %request.url,
                wait_ms = wait.as_millis() as u64,
                attempt = retries,
                "Rate limited, waiting before retry"
            );
            match cancel {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => return Err(ClientError::Cancelled),
                    _ = tokio::time::sleep(wait) => {}
                },
                None => tokio::time::sleep(wait).await,
            }
        };

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }

    /// Set the basic-auth header, replacing whatever the caller put there
    fn authorize(&self, request: &mut ApiRequest) {
        request
            .headers
            .insert(header::AUTHORIZATION, self.authorization.clone());
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<Response> {
        let mut req = self
            .http
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());

        if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        debug!("Sending {} request to {}", request.method, request.url);
        Ok(req.send().await?)
    }
}

/// `Basic base64(<key>:)` with an empty password
fn basic_auth(private_key: &str) -> Result<HeaderValue> {
    let encoded = STANDARD.encode(format!("{}:", private_key));
    let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))
        .map_err(|e| ClientError::Config(format!("invalid private key: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Read the wait duration off a 429 response
fn rate_limit_wait(headers: &HeaderMap) -> Result<Duration> {
    let raw = headers
        .get(RATE_LIMIT_RESET_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();

    let millis: i64 = raw
        .parse()
        .map_err(|_| ClientError::RateLimitReset(raw.clone()))?;

    Ok(Duration::from_millis(millis.max(0) as u64))
}
