use serde::{Deserialize, Serialize};

use crate::types::UserProfile;

/// One page of user directory search results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResultsPage {
    /// Matching users, in server order
    #[serde(default)]
    pub results: Vec<UserProfile>,
    /// Whether the server cut the results short at the query limit
    #[serde(rename = "limited", default)]
    pub is_truncated: bool,
}

impl SearchResultsPage {
    pub fn new(results: Vec<UserProfile>, is_truncated: bool) -> Self {
        Self { results, is_truncated }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
