//! User discovery: turn a free-form query into a deduplicated list of profiles.
//!
//! A query goes to the user directory first. If it looks like a full Matrix
//! user ID and the directory did not already return that exact user, the
//! profile is resolved directly and merged into the results. The operation
//! only fails when neither lookup produced anything usable.

pub mod classifier;
pub mod matrix;
pub mod merger;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use matryx_entity::{SearchResultsPage, UserProfile};

pub use classifier::is_identifier_shaped;
pub use matrix::MatrixDirectory;
pub use merger::{MergePlan, PendingResolution, SearchOutcome, merge, plan};
pub use service::DiscoveryService;

/// Failure reported by a directory or profile collaborator. Never inspected,
/// only logged.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// The only error user discovery surfaces to its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed searching users")]
    FailedSearchingUsers,
}

/// Remote user directory search
#[async_trait]
pub trait DirectorySearch: Send + Sync {
    async fn search_directory(&self, query: &str) -> Result<SearchResultsPage, CollaboratorError>;
}

/// Exact lookup of one fully-qualified user ID
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    async fn resolve_profile(&self, user_id: &str) -> Result<UserProfile, CollaboratorError>;
}

#[async_trait]
impl<T: DirectorySearch + ?Sized> DirectorySearch for Arc<T> {
    async fn search_directory(&self, query: &str) -> Result<SearchResultsPage, CollaboratorError> {
        (**self).search_directory(query).await
    }
}

#[async_trait]
impl<T: ProfileResolver + ?Sized> ProfileResolver for Arc<T> {
    async fn resolve_profile(&self, user_id: &str) -> Result<UserProfile, CollaboratorError> {
        (**self).resolve_profile(user_id).await
    }
}
