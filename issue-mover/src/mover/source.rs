//! The issue being moved.

use crate::reference::IssueReference;
use crate::tracker::{Comment, IssueState, TrackedIssue};
use chrono::{DateTime, Utc};

/// A fetched source issue together with its comments.
#[derive(Debug, Clone)]
pub struct SourceIssue {
    /// Where the issue lives.
    pub reference: IssueReference,
    /// Issue title, copied verbatim.
    pub title: String,
    /// Issue body; empty when the issue has none.
    pub body: String,
    /// Login of the issue author.
    pub author: String,
    /// Creation time, shown in the attribution header.
    pub created_at: DateTime<Utc>,
    /// Closing time, if the issue is closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Current state.
    pub state: IssueState,
    /// Web URL of the issue.
    pub html_url: String,
    /// Comments in the order the tracker listed them.
    pub comments: Vec<Comment>,
}

impl SourceIssue {
    /// Combines a fetched issue with its comments.
    pub fn new(reference: IssueReference, issue: TrackedIssue, comments: Vec<Comment>) -> Self {
        Self {
            reference,
            title: issue.title,
            body: issue.body,
            author: issue.author,
            created_at: issue.created_at,
            closed_at: issue.closed_at,
            state: issue.state,
            html_url: issue.html_url,
            comments,
        }
    }

    /// Returns true if the issue has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some() || self.state == IssueState::Closed
    }
}
