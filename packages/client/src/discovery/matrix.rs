//! Directory search and profile resolution backed by a Matrix homeserver.

use async_trait::async_trait;
use matryx_entity::{SearchResultsPage, UserProfile};

use super::{CollaboratorError, DirectorySearch, ProfileResolver};
use crate::ClientConfig;
use crate::_matrix::client::v3::{profile, user_directory};
use crate::http_client::MatrixHttpClient;

/// Serves both discovery collaborators from one homeserver connection.
///
/// Retries, if configured, happen here and never in the discovery service.
#[derive(Debug, Clone)]
pub struct MatrixDirectory {
    http: MatrixHttpClient,
    search_limit: u32,
    max_retries: u32,
}

impl MatrixDirectory {
    pub fn new(http: MatrixHttpClient, config: &ClientConfig) -> Self {
        Self { http, search_limit: config.effective_search_limit(), max_retries: config.max_retries }
    }

    pub fn http(&self) -> &MatrixHttpClient {
        &self.http
    }
}

#[async_trait]
impl DirectorySearch for MatrixDirectory {
    async fn search_directory(&self, query: &str) -> Result<SearchResultsPage, CollaboratorError> {
        Ok(user_directory::search(&self.http, query, Some(self.search_limit), self.max_retries).await?)
    }
}

#[async_trait]
impl ProfileResolver for MatrixDirectory {
    async fn resolve_profile(&self, user_id: &str) -> Result<UserProfile, CollaboratorError> {
        Ok(profile::get_profile(&self.http, user_id, self.max_retries).await?)
    }
}
