//! Matrix User Directory Search
//!
//! POST /_matrix/client/v3/user_directory/search

use matryx_entity::SearchResultsPage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http_client::{HttpClientError, MatrixHttpClient};

pub const PATH: &str = "/_matrix/client/v3/user_directory/search";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchRequest {
    pub search_term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// POST /_matrix/client/v3/user_directory/search
///
/// Search the homeserver's user directory. The server decides which users are
/// visible to the caller and flags the page as `limited` when it hit `limit`.
pub async fn search(
    http: &MatrixHttpClient,
    search_term: &str,
    limit: Option<u32>,
    max_retries: u32,
) -> Result<SearchResultsPage, HttpClientError> {
    let request = UserSearchRequest { search_term: search_term.to_string(), limit };

    let page: SearchResultsPage = http.post(PATH, &request, max_retries).await?;

    debug!(
        "User directory search for {:?} returned {} results (limited={})",
        search_term,
        page.results.len(),
        page.is_truncated
    );
    Ok(page)
}
