//! Move outcome types.

use crate::reference::{IssueReference, RepositoryReference};
use serde::Serialize;

/// Result of a move that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The issue was copied and the source closed.
    Moved {
        /// Issue that was moved.
        source: IssueReference,
        /// Newly created issue.
        destination: IssueReference,
        /// Web URL of the new issue.
        destination_url: String,
        /// Number of comments copied.
        comments_copied: usize,
    },

    /// Dry run: what would have been created.
    Previewed {
        /// Issue that would be moved.
        source: IssueReference,
        /// Repository the issue would be created in.
        destination_repository: RepositoryReference,
        /// Title of the issue that would be created.
        title: String,
        /// Body of the issue that would be created.
        body: String,
        /// Bodies of the comments that would be copied, in order.
        comments: Vec<String>,
    },
}
