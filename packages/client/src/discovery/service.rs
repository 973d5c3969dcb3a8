use matryx_entity::UserProfile;
use tracing::{debug, instrument, warn};

use super::merger::{self, MergePlan};
use super::{DirectorySearch, DiscoveryError, ProfileResolver};

/// Entry point for user discovery.
///
/// Holds nothing but its collaborators and the signed-in user's ID, so a single
/// instance can serve overlapping searches (e.g. one per keystroke) without
/// locking. Cancelling a search is a matter of dropping its future.
#[derive(Debug, Clone)]
pub struct DiscoveryService<S, R> {
    directory: S,
    resolver: R,
    own_user_id: String,
}

impl<S, R> DiscoveryService<S, R>
where
    S: DirectorySearch,
    R: ProfileResolver,
{
    pub fn new(directory: S, resolver: R, own_user_id: impl Into<String>) -> Self {
        Self { directory, resolver, own_user_id: own_user_id.into() }
    }

    /// The account holder excluded from every result
    pub fn own_user_id(&self) -> &str {
        &self.own_user_id
    }

    /// Search for users matching `query`.
    ///
    /// The directory is always searched first. The query is resolved as a user
    /// ID afterwards only if it is shaped like one and the directory did not
    /// already return that exact user. Fails only when neither lookup yields a
    /// usable result.
    #[instrument(skip_all, fields(query = %query), level = "debug")]
    pub async fn search_profiles(&self, query: &str) -> Result<Vec<UserProfile>, DiscoveryError> {
        let outcome = self.directory.search_directory(query).await;
        if let Err(e) = &outcome {
            warn!("User directory search failed: {}", e);
        }

        let pending = match merger::plan(outcome, query, &self.own_user_id) {
            MergePlan::Complete(result) => {
                debug!("Merge complete without resolution");
                return result;
            },
            MergePlan::Resolve(pending) => pending,
        };

        debug!(search_failed = pending.search_failed(), "Resolving {} directly", pending.user_id());
        let resolved = self.resolver.resolve_profile(pending.user_id()).await;
        if let Err(e) = &resolved {
            warn!("Profile lookup for {} failed: {}", pending.user_id(), e);
        }

        let result = pending.finish(resolved);
        match &result {
            Ok(profiles) => debug!("Discovery returned {} profiles", profiles.len()),
            Err(e) => warn!("Discovery failed: {}", e),
        }
        result
    }
}
