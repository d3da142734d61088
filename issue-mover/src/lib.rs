#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod mover;
pub mod progress;
pub mod reference;
pub mod templates;
pub mod tracker;

pub use mover::{
    move_issue, MoveError, MoveOutcome, MoveRequest, MoveStep, Mover, MoverConfig, MoverError,
    PartialState, RepositoryRole, SourceIssue,
};
pub use progress::{ConsoleReporter, ProgressReporter, SilentReporter, TracingReporter};
pub use reference::{
    parse_issue_ref, parse_repo_ref, IssueReference, ParseError, RepositoryReference,
    DEFAULT_WEB_HOST,
};
pub use templates::{format_timestamp, TemplateError, TemplateRenderer};
pub use tracker::{
    Comment, CreatedIssue, CurrentUser, GitHubTracker, IssuePatch, IssueState, IssueTracker,
    RepositoryInfo, TrackedIssue, TrackerError,
};
