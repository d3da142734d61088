//! Tracker error types.

use thiserror::Error;

/// Conditions reported by an [`IssueTracker`](super::IssueTracker).
///
/// `NotFound` is the only condition callers interpret; the others are
/// surfaced to the operator with their original message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// The requested repository or issue does not exist (or is not visible).
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The API refused the request because the rate limit was exhausted.
    #[error("Rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// Any other API or transport failure.
    #[error("GitHub API error: {message}")]
    Transport { message: String },
}

impl TrackerError {
    /// Returns true if this is a `NotFound` condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
