//! Matryx Matrix Client Library
//!
//! HTTP plumbing for the Matrix client-server API and the user discovery
//! engine built on top of it.

pub mod _matrix;
pub mod discovery;
pub mod http_client;

use url::Url;

pub use discovery::{
    CollaboratorError,
    DirectorySearch,
    DiscoveryError,
    DiscoveryService,
    MatrixDirectory,
    ProfileResolver,
};
pub use http_client::{HttpClientError, MatrixHttpClient};
pub use matryx_entity::{SearchResultsPage, UserProfile};

/// Upper bound the homeserver applies to directory search limits
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// Matrix client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The homeserver URL
    pub homeserver_url: Url,
    /// HTTP client timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
    /// Extra attempts for requests failing with network errors, 5xx or rate limiting
    pub max_retries: u32,
    /// Number of results requested from the user directory
    pub search_limit: u32,
}

impl ClientConfig {
    /// Configuration for `homeserver_url` with default settings
    pub fn new(homeserver_url: Url) -> Self {
        Self {
            homeserver_url,
            timeout_secs: 30,
            user_agent: "Matryx/0.1.0".to_string(),
            max_retries: 0,
            search_limit: 10,
        }
    }

    /// `search_limit` clamped to what a homeserver accepts
    pub fn effective_search_limit(&self) -> u32 {
        self.search_limit.clamp(1, MAX_SEARCH_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new(Url::parse("https://matrix.example.com").unwrap())
    }

    #[test]
    fn test_client_config_defaults() {
        let config = config();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.user_agent, "Matryx/0.1.0");
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.search_limit, 10);
    }

    #[test]
    fn test_search_limit_is_clamped() {
        let mut config = config();
        config.search_limit = 0;
        assert_eq!(config.effective_search_limit(), 1);
        config.search_limit = 500;
        assert_eq!(config.effective_search_limit(), MAX_SEARCH_LIMIT);
        config.search_limit = 25;
        assert_eq!(config.effective_search_limit(), 25);
    }

    #[test]
    fn test_http_client_creation() {
        let client = MatrixHttpClient::new(&config());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().homeserver_url().as_str(), "https://matrix.example.com/");
    }
}
