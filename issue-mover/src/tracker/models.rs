//! Strongly typed tracker entities.
//!
//! Remote payloads are converted into these as soon as they are received so
//! nothing past the tracker boundary depends on the API's response shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The authenticated account the tracker acts as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Account login.
    pub login: String,
}

/// Repository metadata returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryInfo {
    /// Repository owner.
    pub org: String,
    /// Repository name.
    pub repo: String,
    /// Full repository name in "owner/name" format.
    pub full_name: String,
}

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// Issue is open.
    Open,
    /// Issue is closed.
    Closed,
}

/// An issue as fetched from the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedIssue {
    /// Issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body; empty when the issue has none.
    pub body: String,
    /// Login of the issue author.
    pub author: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Closing time, if the issue is closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Current state.
    pub state: IssueState,
    /// Web URL of the issue.
    pub html_url: String,
}

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Login of the comment author.
    pub author: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Comment body; empty when the comment has none.
    pub body: String,
}

/// An issue that was just created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Number assigned by the tracker.
    pub number: u64,
    /// Web URL of the new issue.
    pub html_url: String,
}

/// Changes to apply to an existing issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePatch {
    /// New state, if it should change.
    pub state: Option<IssueState>,
}

impl IssuePatch {
    /// A patch that closes the issue.
    #[must_use]
    pub fn close() -> Self {
        Self {
            state: Some(IssueState::Closed),
        }
    }
}
