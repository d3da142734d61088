//! Issue reference type.

use super::RepositoryReference;
use serde::Serialize;
use std::fmt;

/// A single issue within a repository, e.g. `acme/widgets#42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IssueReference {
    /// Repository owner (user or organization).
    pub org: String,

    /// Repository name.
    pub repo: String,

    /// Issue number within the repository.
    pub number: u64,
}

impl IssueReference {
    /// Creates a new issue reference.
    pub fn new(org: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
            number,
        }
    }

    /// Returns the repository containing this issue.
    #[must_use]
    pub fn repository(&self) -> RepositoryReference {
        RepositoryReference::new(&self.org, &self.repo)
    }
}

impl fmt::Display for IssueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.org, self.repo, self.number)
    }
}
