//! Configuration file for the discovery CLI.
//!
//! ```toml
//! homeserver_url = "https://matrix.example.org"
//! user_id = "@me:example.org"
//! access_token = "syt_..."
//! # optional
//! search_limit = 20
//! max_retries = 2
//! log_level = "debug"
//! ```

use std::path::{Path, PathBuf};

use matryx_client::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Directory under the platform config/cache dirs used by matryx
pub const APP_DIR: &str = "matryx";

/// Default config file name
pub const CONFIG_FILE: &str = "discover.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no configuration file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not determine the configuration directory; pass --config")]
    NoConfigDir,

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("user_id {0:?} is not a fully-qualified Matrix user ID")]
    InvalidUserId(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverConfig {
    /// Homeserver to search
    pub homeserver_url: Url,

    /// Signed-in account, hidden from all results
    pub user_id: String,

    /// Access token for the account
    pub access_token: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts for transient homeserver failures
    #[serde(default)]
    pub max_retries: u32,

    /// Number of directory results to request
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where log files go, defaults to the platform cache dir
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_search_limit() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DiscoverConfig {
    /// Platform default location, e.g. `~/.config/matryx/discover.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from `path`, or from [`DiscoverConfig::default_path`] when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Io { path: path.clone(), source })?;

        Self::parse(&contents).map_err(|e| match e {
            ParseError::Toml(source) => ConfigError::Parse { path, source },
            ParseError::UserId(user_id) => ConfigError::InvalidUserId(user_id),
        })
    }

    fn parse(contents: &str) -> Result<Self, ParseError> {
        let config: Self = toml::from_str(contents).map_err(ParseError::Toml)?;
        if !matryx_client::discovery::is_identifier_shaped(&config.user_id) {
            return Err(ParseError::UserId(config.user_id));
        }
        Ok(config)
    }

    /// Settings for the Matrix HTTP client
    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::new(self.homeserver_url.clone());
        client.timeout_secs = self.timeout_secs;
        client.max_retries = self.max_retries;
        client.search_limit = self.search_limit;
        client
    }

    /// Directory for log files
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join(APP_DIR).join("logs")))
    }
}

enum ParseError {
    Toml(toml::de::Error),
    UserId(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const MINIMAL: &str = r#"
        homeserver_url = "https://matrix.example.org"
        user_id = "@me:example.org"
        access_token = "syt_secret"
    "#;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let file = write_config(MINIMAL);
        let config = DiscoverConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.homeserver_url.as_str(), "https://matrix.example.org/");
        assert_eq!(config.user_id, "@me:example.org");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.search_limit, 10);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_client_config_carries_overrides() {
        let file = write_config(&format!("{MINIMAL}\nsearch_limit = 40\nmax_retries = 3\ntimeout_secs = 5\n"));
        let client = DiscoverConfig::load(Some(file.path())).unwrap().client_config();

        assert_eq!(client.homeserver_url.as_str(), "https://matrix.example.org/");
        assert_eq!(client.search_limit, 40);
        assert_eq!(client.max_retries, 3);
        assert_eq!(client.timeout_secs, 5);
    }

    #[test]
    fn test_explicit_log_dir_wins() {
        let file = write_config(&format!("{MINIMAL}\nlog_dir = \"/tmp/matryx-logs\"\n"));
        let config = DiscoverConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.log_dir(), Some(PathBuf::from("/tmp/matryx-logs")));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        match DiscoverConfig::load(Some(&path)) {
            Err(ConfigError::NotFound(missing)) => assert_eq!(missing, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_key_is_parse_error() {
        let file = write_config("homeserver_url = \"https://matrix.example.org\"\n");

        assert!(matches!(DiscoverConfig::load(Some(file.path())), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_bare_localpart_user_id_rejected() {
        let file = write_config(
            "homeserver_url = \"https://matrix.example.org\"\nuser_id = \"me\"\naccess_token = \"t\"\n",
        );

        match DiscoverConfig::load(Some(file.path())) {
            Err(ConfigError::InvalidUserId(user_id)) => assert_eq!(user_id, "me"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
