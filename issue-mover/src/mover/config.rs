//! Mover configuration.

use crate::reference::DEFAULT_WEB_HOST;

/// Configuration for moving an issue.
#[derive(Debug, Clone)]
pub struct MoverConfig {
    /// GitHub token used for API calls.
    token: String,
    /// Canonical web host of the tracker.
    host: String,
    /// Whether to preview the move without changing anything.
    dry_run: bool,
}

impl MoverConfig {
    /// Creates a configuration targeting public GitHub.
    pub fn new(token: String) -> Self {
        Self {
            token,
            host: DEFAULT_WEB_HOST.to_string(),
            dry_run: false,
        }
    }

    /// Sets the web host (e.g. a GitHub Enterprise server).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the web host issue URLs must point at.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the API root for the host, or `None` for public GitHub.
    ///
    /// GitHub Enterprise serves its REST API under `/api/v3`.
    pub fn api_base(&self) -> Option<String> {
        if self.host.eq_ignore_ascii_case(DEFAULT_WEB_HOST) {
            None
        } else {
            Some(format!("https://{}/api/v3", self.host))
        }
    }
}
