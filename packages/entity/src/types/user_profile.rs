use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Matrix user profile information
///
/// Two profiles describe the same account iff their `user_id` values are equal;
/// `display_name` and `avatar_url` take no part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID (MXID)
    pub user_id: String,

    /// User's display name
    #[serde(default, alias = "displayname", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// User's avatar URL (MXC URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Create a new user profile
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), display_name: None, avatar_url: None }
    }

    /// Create a user profile with display name and avatar
    pub fn with_profile_data(
        user_id: impl Into<String>,
        display_name: Option<String>,
        avatar_url: Option<String>,
    ) -> Self {
        Self { user_id: user_id.into(), display_name, avatar_url }
    }

    /// Bare profile standing in for a typed-in identifier nobody could resolve.
    pub fn placeholder(user_id: impl Into<String>) -> Self {
        Self::new(user_id)
    }

    /// Whether this profile belongs to `user_id`
    pub fn is(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Display name if set, otherwise the user ID
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.user_id)
    }
}

impl PartialEq for UserProfile {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

impl Eq for UserProfile {}

impl Hash for UserProfile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_profile_data() {
        let a = UserProfile::with_profile_data("@alice:example.org", Some("Alice".into()), None);
        let b = UserProfile::with_profile_data(
            "@alice:example.org",
            Some("Alice (work)".into()),
            Some("mxc://example.org/abc".into()),
        );
        assert_eq!(a, b);
        assert_ne!(a, UserProfile::new("@bob:example.org"));

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_placeholder_is_bare() {
        let profile = UserProfile::placeholder("@typed:example.org");
        assert_eq!(profile.user_id, "@typed:example.org");
        assert!(profile.display_name.is_none());
        assert!(profile.avatar_url.is_none());
        assert_eq!(profile.display_label(), "@typed:example.org");
    }

    #[test]
    fn test_deserialize_directory_entry() {
        let json = r#"{"user_id":"@alice:example.org","display_name":"Alice","avatar_url":"mxc://example.org/a"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Alice"));
        assert_eq!(profile.avatar_url.as_deref(), Some("mxc://example.org/a"));
        assert_eq!(profile.display_label(), "Alice");
    }

    #[test]
    fn test_deserialize_profile_endpoint_field_name() {
        let json = r#"{"user_id":"@bob:example.org","displayname":"Bob"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Bob"));
        assert!(profile.avatar_url.is_none());
    }

    #[test]
    fn test_serialize_skips_missing_fields() {
        let json = serde_json::to_string(&UserProfile::new("@carol:example.org")).unwrap();
        assert_eq!(json, r#"{"user_id":"@carol:example.org"}"#);
    }
}
