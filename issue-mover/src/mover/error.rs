//! Move error types.

use crate::reference::ParseError;
use crate::templates::TemplateError;
use crate::tracker::TrackerError;
use std::fmt;
use thiserror::Error;

/// Steps of a move, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStep {
    /// Parsing the source URL and destination repository.
    ParseReferences,
    /// Querying the authenticated user.
    Authenticate,
    /// Looking up the source and destination repositories.
    ResolveRepositories,
    /// Fetching the source issue.
    FetchSourceIssue,
    /// Listing the source issue's comments.
    FetchComments,
    /// Refusing to move an already closed issue.
    PrecheckState,
    /// Opening the destination issue.
    CreateDestinationIssue,
    /// Copying comments to the destination issue.
    CopyComments,
    /// Posting the "moved to" notice on the source issue.
    AnnotateSource,
    /// Closing the source issue.
    CloseSource,
}

impl fmt::Display for MoveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ParseReferences => "parse references",
            Self::Authenticate => "authenticate",
            Self::ResolveRepositories => "resolve repositories",
            Self::FetchSourceIssue => "fetch source issue",
            Self::FetchComments => "fetch comments",
            Self::PrecheckState => "check source issue state",
            Self::CreateDestinationIssue => "create destination issue",
            Self::CopyComments => "copy comments",
            Self::AnnotateSource => "annotate source issue",
            Self::CloseSource => "close source issue",
        })
    }
}

/// Which side of the move a repository is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryRole {
    /// Repository the issue is moved from.
    Source,
    /// Repository the issue is moved to.
    Destination,
}

impl fmt::Display for RepositoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "Source",
            Self::Destination => "Destination",
        })
    }
}

/// What had already been changed when a move stopped.
///
/// Nothing is rolled back, so this is what an operator has to clean up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialState {
    /// Neither repository was modified.
    Untouched,

    /// The destination issue exists but the source was not annotated or closed.
    DestinationCreated {
        /// Web URL of the destination issue.
        url: String,
        /// Comments copied before the failure.
        comments_copied: usize,
        /// Comments on the source issue.
        total: usize,
    },

    /// The destination is complete and the source annotated, but still open.
    SourceAnnotated {
        /// Web URL of the destination issue.
        url: String,
    },
}

impl fmt::Display for PartialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untouched => {
                f.write_str("nothing was changed on either repository, the move can be retried")
            }
            Self::DestinationCreated {
                url,
                comments_copied,
                total,
            } => write!(
                f,
                "{url} was created with {comments_copied} of {total} comments; \
                 the source issue was not annotated or closed"
            ),
            Self::SourceAnnotated { url } => write!(
                f,
                "{url} is complete and the source issue was annotated but is still open"
            ),
        }
    }
}

/// Errors that end a move.
#[derive(Debug, Error)]
pub enum MoveError {
    /// The source URL or destination repository could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A repository lookup returned not found.
    #[error("{role} repository {org}/{repo} not found")]
    RepositoryNotFound {
        role: RepositoryRole,
        org: String,
        repo: String,
    },

    /// The source issue does not exist.
    #[error("Issue #{number} not found in {org}/{repo}")]
    IssueNotFound {
        number: u64,
        org: String,
        repo: String,
    },

    /// The source issue is closed, so it was probably moved already.
    #[error("Issue #{number} is already closed, refusing to move it again")]
    AlreadyClosed { number: u64 },

    /// A tracker call failed for any other reason.
    #[error("Failed to {step}: {cause}; {state}")]
    Remote {
        step: MoveStep,
        #[source]
        cause: TrackerError,
        state: PartialState,
    },

    /// Copying one of the comments failed.
    #[error("Failed to copy comment {index} of {total}: {cause}; {state}")]
    CommentCopyFailed {
        /// 1-based position of the failing comment.
        index: usize,
        total: usize,
        #[source]
        cause: TrackerError,
        state: PartialState,
    },

    /// Text to post could not be composed.
    #[error("Failed to compose text to {step}: {cause}; {state}")]
    Template {
        step: MoveStep,
        #[source]
        cause: TemplateError,
        state: PartialState,
    },
}

impl MoveError {
    /// Returns the step at which the move stopped.
    #[must_use]
    pub fn step(&self) -> MoveStep {
        match self {
            Self::Parse(_) => MoveStep::ParseReferences,
            Self::RepositoryNotFound { .. } => MoveStep::ResolveRepositories,
            Self::IssueNotFound { .. } => MoveStep::FetchSourceIssue,
            Self::AlreadyClosed { .. } => MoveStep::PrecheckState,
            Self::Remote { step, .. } | Self::Template { step, .. } => *step,
            Self::CommentCopyFailed { .. } => MoveStep::CopyComments,
        }
    }

    /// Returns what had been changed when the move stopped.
    #[must_use]
    pub fn partial_state(&self) -> PartialState {
        match self {
            Self::Remote { state, .. }
            | Self::CommentCopyFailed { state, .. }
            | Self::Template { state, .. } => state.clone(),
            _ => PartialState::Untouched,
        }
    }
}

/// Errors that occur while setting up a [`Mover`](super::Mover).
#[derive(Debug, Error)]
pub enum MoverError {
    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_names_step_and_state() {
        let err = MoveError::Remote {
            step: MoveStep::CloseSource,
            cause: TrackerError::Transport {
                message: "Server Error (HTTP 502)".to_string(),
            },
            state: PartialState::SourceAnnotated {
                url: "https://github.com/acme/widgets2/issues/9".to_string(),
            },
        };

        assert_eq!(err.step(), MoveStep::CloseSource);
        assert_eq!(
            err.to_string(),
            "Failed to close source issue: GitHub API error: Server Error (HTTP 502); \
             https://github.com/acme/widgets2/issues/9 is complete and the source issue \
             was annotated but is still open"
        );
    }

    #[test]
    fn lookup_errors_are_untouched() {
        let err = MoveError::RepositoryNotFound {
            role: RepositoryRole::Destination,
            org: "acme".to_string(),
            repo: "nope".to_string(),
        };

        assert_eq!(err.to_string(), "Destination repository acme/nope not found");
        assert_eq!(err.step(), MoveStep::ResolveRepositories);
        assert_eq!(err.partial_state(), PartialState::Untouched);
    }

    #[test]
    fn parse_errors_happen_before_anything_else() {
        let err = MoveError::from(ParseError::BadRepoFormat {
            input: "a".to_string(),
        });
        assert_eq!(err.step(), MoveStep::ParseReferences);
        assert_eq!(err.to_string(), "'a' is not of the form <org>/<repo>");
    }
}
