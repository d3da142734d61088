//! Remote issue tracker interface.
//!
//! The move workflow only talks to the tracker through [`IssueTracker`].
//! [`GitHubTracker`] implements it on top of octocrab.

mod error;
mod github;
mod models;
mod rate_limit;

pub use error::TrackerError;
pub use github::GitHubTracker;
pub use models::{
    Comment, CreatedIssue, CurrentUser, IssuePatch, IssueState, RepositoryInfo, TrackedIssue,
};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo};

use crate::reference::RepositoryReference;
use async_trait::async_trait;

/// Operations the move workflow needs from a hosted issue tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Returns the account the client is authenticated as.
    async fn current_user(&self) -> Result<CurrentUser, TrackerError>;

    /// Looks up a repository.
    async fn get_repository(
        &self,
        repository: &RepositoryReference,
    ) -> Result<RepositoryInfo, TrackerError>;

    /// Fetches a single issue.
    async fn get_issue(
        &self,
        repository: &RepositoryReference,
        number: u64,
    ) -> Result<TrackedIssue, TrackerError>;

    /// Lists every comment on an issue, oldest first.
    async fn list_comments(
        &self,
        repository: &RepositoryReference,
        number: u64,
    ) -> Result<Vec<Comment>, TrackerError>;

    /// Opens a new issue.
    async fn create_issue(
        &self,
        repository: &RepositoryReference,
        title: &str,
        body: &str,
    ) -> Result<CreatedIssue, TrackerError>;

    /// Adds a comment to an issue.
    async fn create_comment(
        &self,
        repository: &RepositoryReference,
        number: u64,
        body: &str,
    ) -> Result<(), TrackerError>;

    /// Applies a patch to an existing issue.
    async fn update_issue(
        &self,
        repository: &RepositoryReference,
        number: u64,
        patch: &IssuePatch,
    ) -> Result<(), TrackerError>;
}
