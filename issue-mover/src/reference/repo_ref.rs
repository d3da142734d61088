//! Repository reference type.

use serde::Serialize;
use std::fmt;

/// A repository identified by owner and name, e.g. `acme/widgets`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryReference {
    /// Repository owner (user or organization).
    pub org: String,

    /// Repository name.
    pub repo: String,
}

impl RepositoryReference {
    /// Creates a new repository reference.
    pub fn new(org: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.repo)
    }
}
