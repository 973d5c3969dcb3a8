//! Merging of directory search results with an exact profile resolution.
//!
//! The merge is split in two pure steps so the caller decides when (and
//! whether) the resolver actually runs:
//!
//! 1. [`plan`] filters the directory page and either completes the merge or
//!    returns a [`PendingResolution`] naming the user ID to resolve.
//! 2. [`PendingResolution::finish`] folds the resolver's answer into the list.
//!
//! [`merge`] chains both for callers with a synchronous resolver.
//!
//! Failure policy: once the directory produced a usable list (even an empty
//! one) a failed resolution never fails the merge, the typed identifier is
//! offered as a placeholder instead. Only when neither source produced
//! anything does the merge report [`DiscoveryError::FailedSearchingUsers`].

use std::collections::HashSet;

use matryx_entity::{SearchResultsPage, UserProfile};

use super::{CollaboratorError, DiscoveryError, is_identifier_shaped};

/// Result of the directory search as seen by the merger
pub type SearchOutcome = Result<SearchResultsPage, CollaboratorError>;

/// What the merge needs next
#[derive(Debug, Clone, PartialEq)]
pub enum MergePlan {
    /// No resolution needed, this is the final result
    Complete(Result<Vec<UserProfile>, DiscoveryError>),
    /// The query must be resolved before the merge can finish
    Resolve(PendingResolution),
}

/// A merge waiting on the resolution of the query as a user ID
#[derive(Debug, Clone, PartialEq)]
pub struct PendingResolution {
    query: String,
    own_user_id: String,
    /// Filtered directory results, `None` when the search failed
    working: Option<Vec<UserProfile>>,
}

impl PendingResolution {
    /// The user ID to hand to the resolver
    pub fn user_id(&self) -> &str {
        &self.query
    }

    pub fn search_failed(&self) -> bool {
        self.working.is_none()
    }

    /// Complete the merge with the resolver's answer.
    pub fn finish<E>(self, resolved: Result<UserProfile, E>) -> Result<Vec<UserProfile>, DiscoveryError> {
        match (self.working, resolved) {
            (Some(working), Ok(profile)) => {
                if profile.is(&self.own_user_id) {
                    Ok(working)
                } else {
                    Ok(promote(working, profile))
                }
            },
            (Some(working), Err(_)) => {
                if self.query == self.own_user_id {
                    Ok(working)
                } else {
                    Ok(promote(working, UserProfile::placeholder(self.query)))
                }
            },
            (None, Ok(profile)) => Ok(exclude(vec![profile], &self.own_user_id)),
            (None, Err(_)) => Err(DiscoveryError::FailedSearchingUsers),
        }
    }
}

/// Decide how to merge a directory search outcome for `query`.
///
/// The account holder (`own_user_id`) is dropped from the directory page, as
/// are repeated entries for a user ID already seen earlier in the page.
pub fn plan<E>(outcome: Result<SearchResultsPage, E>, query: &str, own_user_id: &str) -> MergePlan {
    let working = outcome.ok().map(|page| exclude(page.results, own_user_id));

    let needs_resolution = is_identifier_shaped(query)
        && working
            .as_ref()
            .is_none_or(|profiles| !profiles.iter().any(|p| p.is(query)));

    match (working, needs_resolution) {
        (Some(working), false) => MergePlan::Complete(Ok(working)),
        (None, false) => MergePlan::Complete(Err(DiscoveryError::FailedSearchingUsers)),
        (working, true) => MergePlan::Resolve(PendingResolution {
            query: query.to_string(),
            own_user_id: own_user_id.to_string(),
            working,
        }),
    }
}

/// Merge a directory search outcome with a lazily invoked resolver.
///
/// `resolve` runs at most once, and only when [`plan`] asks for it.
pub fn merge<E, F, RE>(
    outcome: Result<SearchResultsPage, E>,
    query: &str,
    own_user_id: &str,
    resolve: F,
) -> Result<Vec<UserProfile>, DiscoveryError>
where
    F: FnOnce() -> Result<UserProfile, RE>,
{
    match plan(outcome, query, own_user_id) {
        MergePlan::Complete(result) => result,
        MergePlan::Resolve(pending) => pending.finish(resolve()),
    }
}

/// Drop `user_id` and any repeated user IDs, keeping first occurrences in order.
fn exclude(profiles: Vec<UserProfile>, user_id: &str) -> Vec<UserProfile> {
    let mut seen = HashSet::new();
    profiles
        .into_iter()
        .filter(|p| !p.is(user_id) && seen.insert(p.user_id.clone()))
        .collect()
}

/// Put `profile` first, replacing any existing entry for the same user.
fn promote(profiles: Vec<UserProfile>, profile: UserProfile) -> Vec<UserProfile> {
    let rest: Vec<UserProfile> = profiles.into_iter().filter(|p| !p.is(&profile.user_id)).collect();
    std::iter::once(profile).chain(rest).collect()
}
