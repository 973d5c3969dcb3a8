//! Matrix User Profile Lookup
//!
//! GET /_matrix/client/v3/profile/{userId}
//!
//! Fetch the public profile of a single, fully-qualified user ID.

use matryx_entity::UserProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http_client::{HttpClientError, MatrixHttpClient};

/// Body of a successful profile response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// The user's display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,

    /// The user's avatar URL (MXC URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileResponse {
    /// Attach the response to the user ID it was requested for
    pub fn into_user_profile(self, user_id: &str) -> UserProfile {
        UserProfile::with_profile_data(user_id, self.displayname, self.avatar_url)
    }
}

pub fn path(user_id: &str) -> String {
    format!("/_matrix/client/v3/profile/{}", urlencoding::encode(user_id))
}

/// GET /_matrix/client/v3/profile/{userId}
///
/// Get the combined profile information for a user.
pub async fn get_profile(
    http: &MatrixHttpClient,
    user_id: &str,
    max_retries: u32,
) -> Result<UserProfile, HttpClientError> {
    debug!("Getting profile for user: {}", user_id);

    let response: ProfileResponse = http.get(&path(user_id), max_retries).await?;

    debug!(
        "Retrieved profile for {}: displayname={:?}, avatar_url={:?}",
        user_id, response.displayname, response.avatar_url
    );
    Ok(response.into_user_profile(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_encodes_user_id() {
        assert_eq!(path("@alice:example.org"), "/_matrix/client/v3/profile/%40alice%3Aexample.org");
    }

    #[test]
    fn test_into_user_profile() {
        let response: ProfileResponse =
            serde_json::from_str(r#"{"displayname":"Alice","avatar_url":"mxc://example.org/a"}"#).unwrap();
        let profile = response.into_user_profile("@alice:example.org");
        assert_eq!(profile.user_id, "@alice:example.org");
        assert_eq!(profile.display_name.as_deref(), Some("Alice"));
        assert_eq!(profile.avatar_url.as_deref(), Some("mxc://example.org/a"));
    }
}
