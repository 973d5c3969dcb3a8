//! Low-level HTTP client infrastructure for Matrix API requests
//!
//! This module provides foundational HTTP client functionality with:
//! - Generic JSON request/response handling
//! - Matrix-spec-compliant error parsing
//! - Opt-in retry with exponential backoff
//! - Thread-safe access token management

use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::ClientConfig;

/// HTTP client errors with Matrix-spec error handling
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Matrix error {errcode}: {error} (HTTP {status})")]
    Matrix {
        status: u16,
        errcode: String,
        error: String,
        retry_after_ms: Option<u64>,
    },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Max retries exceeded after {attempts} attempts: {last}")]
    MaxRetriesExceeded {
        attempts: u32,
        #[source]
        last: Box<HttpClientError>,
    },
}

impl HttpClientError {
    /// Whether a request failing with this error is worth sending again
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpClientError::Network(_) => true,
            HttpClientError::Matrix { status, errcode, .. } => {
                *status >= 500 || errcode == "M_LIMIT_EXCEEDED"
            },
            _ => false,
        }
    }
}

/// Matrix error response format per specification
#[derive(Debug, Deserialize)]
struct MatrixErrorResponse {
    errcode: String,
    error: String,
    #[serde(default)]
    retry_after_ms: Option<u64>,
}

/// Low-level HTTP client for Matrix API requests
#[derive(Clone, Debug)]
pub struct MatrixHttpClient {
    client: Client,
    homeserver_url: Url,
    access_token: Arc<RwLock<Option<String>>>,
}

impl MatrixHttpClient {
    /// Create a new Matrix HTTP client
    ///
    /// # Arguments
    /// * `config` - Homeserver URL, timeout and user agent
    ///
    /// # Returns
    /// * `Result<Self, HttpClientError>` - New client or error
    pub fn new(config: &ClientConfig) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            homeserver_url: config.homeserver_url.clone(),
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the homeserver URL
    pub fn homeserver_url(&self) -> &Url {
        &self.homeserver_url
    }

    /// Generic request method for any request/response types
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, PUT, DELETE, etc.)
    /// * `path` - API path (e.g., "/_matrix/client/v3/user_directory/search")
    /// * `body` - Optional request body
    ///
    /// # Returns
    /// * `Result<R, HttpClientError>` - Deserialized response or error
    pub async fn request<T, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<R, HttpClientError>
    where
        T: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let url = self.homeserver_url.join(path)?;

        let mut req = self.client.request(method, url);

        if let Some(token) = self.access_token.read().await.as_ref() {
            req = req.bearer_auth(token);
        }

        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();

        if status.is_success() {
            let data = response.json::<R>().await?;
            Ok(data)
        } else {
            let error_body = response.text().await?;
            Err(parse_matrix_error(status.as_u16(), &error_body))
        }
    }

    /// Set access token for authenticated requests
    ///
    /// # Arguments
    /// * `token` - Access token from login/registration
    pub async fn set_access_token(&self, token: String) {
        let mut guard = self.access_token.write().await;
        *guard = Some(token);
    }

    /// Get current access token
    ///
    /// # Returns
    /// * `Result<String, HttpClientError>` - Token or authentication error
    pub async fn get_access_token(&self) -> Result<String, HttpClientError> {
        self.access_token
            .read()
            .await
            .clone()
            .ok_or(HttpClientError::AuthenticationRequired)
    }

    /// Clear access token (logout)
    pub async fn clear_access_token(&self) {
        let mut guard = self.access_token.write().await;
        *guard = None;
    }

    /// Check if access token is set
    pub async fn has_access_token(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    /// Request with retry logic and exponential backoff
    ///
    /// `max_retries` counts additional attempts after the first one, so `0`
    /// sends the request exactly once.
    ///
    /// # Returns
    /// * `Result<R, HttpClientError>` - Response or error after retries
    pub async fn request_with_retry<T, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
        max_retries: u32,
    ) -> Result<R, HttpClientError>
    where
        T: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let mut attempt = 0;

        loop {
            match self.request(method.clone(), path, body).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    attempt += 1;

                    if !e.is_retryable() {
                        return Err(e);
                    }
                    if attempt > max_retries {
                        if max_retries == 0 {
                            return Err(e);
                        }
                        return Err(HttpClientError::MaxRetriesExceeded {
                            attempts: attempt,
                            last: Box::new(e),
                        });
                    }

                    // Exponential backoff: 100ms * 2^(attempt-1), unless the server says otherwise
                    let delay = if let HttpClientError::Matrix { retry_after_ms: Some(ms), .. } = &e {
                        Duration::from_millis(*ms)
                    } else {
                        Duration::from_millis(100 * 2u64.pow(attempt - 1))
                    };

                    warn!("{} {} failed (attempt {}): {}, retrying in {:?}", method, path, attempt, e, delay);
                    tokio::time::sleep(delay).await;
                },
            }
        }
    }

    /// Convenience method for GET requests
    pub async fn get<R>(&self, path: &str, max_retries: u32) -> Result<R, HttpClientError>
    where
        R: for<'de> Deserialize<'de>,
    {
        debug!("GET {}", path);
        self.request_with_retry::<(), R>(Method::GET, path, None, max_retries).await
    }

    /// Convenience method for POST requests
    pub async fn post<T, R>(&self, path: &str, body: &T, max_retries: u32) -> Result<R, HttpClientError>
    where
        T: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        debug!("POST {}", path);
        self.request_with_retry(Method::POST, path, Some(body), max_retries).await
    }
}

/// Parse Matrix error response per specification
fn parse_matrix_error(status: u16, body: &str) -> HttpClientError {
    match serde_json::from_str::<MatrixErrorResponse>(body) {
        Ok(matrix_err) => HttpClientError::Matrix {
            status,
            errcode: matrix_err.errcode,
            error: matrix_err.error,
            retry_after_ms: matrix_err.retry_after_ms,
        },
        // Non-JSON error bodies (proxies, load balancers)
        Err(_) => HttpClientError::Matrix {
            status,
            errcode: "M_UNKNOWN".to_string(),
            error: body.to_string(),
            retry_after_ms: None,
        },
    }
}
