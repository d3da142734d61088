//! Identifier parsing error types.

use thiserror::Error;

/// Errors produced while parsing issue and repository identifiers.
///
/// All of these are raised before any network call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input is not an absolute, well-formed URL.
    #[error("'{input}' is not a valid absolute URL")]
    MalformedUrl { input: String },

    /// URL points at a host other than the tracker's web host.
    #[error("URL host '{found}' does not match '{expected}'")]
    WrongHost { expected: String, found: String },

    /// URL path does not have the `{org}/{repo}/issues/{number}` shape.
    #[error("URL path '{path}' is not of the form <org>/<repo>/issues/<number>")]
    BadIssuePathShape { path: String },

    /// Third path segment is something other than `issues`.
    #[error("URL does not point to an issue (found '{segment}' instead of 'issues')")]
    NotAnIssueUrl { segment: String },

    /// Issue number segment is not a non-negative base-10 integer.
    #[error("'{segment}' is not a valid issue number")]
    BadIssueNumber { segment: String },

    /// Repository string is not `<org>/<repo>`.
    #[error("'{input}' is not of the form <org>/<repo>")]
    BadRepoFormat { input: String },
}
