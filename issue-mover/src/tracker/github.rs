//! [`IssueTracker`] implementation backed by octocrab.

use super::rate_limit::ensure_core_rate_limit;
use super::{
    Comment, CreatedIssue, CurrentUser, IssuePatch, IssueState, IssueTracker, RepositoryInfo,
    TrackedIssue, TrackerError,
};
use crate::reference::RepositoryReference;
use async_trait::async_trait;
use octocrab::models;
use octocrab::Octocrab;
use tracing::debug;

/// Comments requested per page when listing.
const COMMENTS_PER_PAGE: u8 = 100;

/// GitHub (or GitHub Enterprise) issue tracker.
#[derive(Clone)]
pub struct GitHubTracker {
    octocrab: Octocrab,
}

impl GitHubTracker {
    /// Wraps an already configured octocrab client.
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// Builds a client authenticated with a personal access token.
    ///
    /// # Arguments
    ///
    /// * `token` - GitHub personal access token
    /// * `api_base` - Optional API root, for GitHub Enterprise installations
    ///
    /// # Errors
    ///
    /// Returns an error if the API base is not a valid URI or the client
    /// cannot be built.
    pub fn from_token(token: &str, api_base: Option<&str>) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(api_base) = api_base {
            builder = builder.base_uri(api_base)?;
        }
        Ok(Self::new(builder.build()?))
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn current_user(&self) -> Result<CurrentUser, TrackerError> {
        let user = self
            .octocrab
            .current()
            .user()
            .await
            .map_err(|e| classify_error("authenticated user", e))?;
        Ok(CurrentUser { login: user.login })
    }

    async fn get_repository(
        &self,
        repository: &RepositoryReference,
    ) -> Result<RepositoryInfo, TrackerError> {
        debug!(repo = %repository, "Fetching repository");
        let repo = self
            .octocrab
            .repos(&repository.org, &repository.repo)
            .get()
            .await
            .map_err(|e| classify_error(format!("repository {repository}"), e))?;

        Ok(RepositoryInfo {
            org: repository.org.clone(),
            repo: repo.name,
            full_name: repo.full_name.unwrap_or_else(|| repository.to_string()),
        })
    }

    async fn get_issue(
        &self,
        repository: &RepositoryReference,
        number: u64,
    ) -> Result<TrackedIssue, TrackerError> {
        debug!(repo = %repository, number, "Fetching issue");
        let issue = self
            .octocrab
            .issues(&repository.org, &repository.repo)
            .get(number)
            .await
            .map_err(|e| classify_error(format!("issue {repository}#{number}"), e))?;

        Ok(TrackedIssue {
            number: issue.number,
            title: issue.title,
            body: issue.body.unwrap_or_default(),
            author: issue.user.login,
            created_at: issue.created_at,
            closed_at: issue.closed_at,
            state: match issue.state {
                models::IssueState::Closed => IssueState::Closed,
                _ => IssueState::Open,
            },
            html_url: issue.html_url.to_string(),
        })
    }

    async fn list_comments(
        &self,
        repository: &RepositoryReference,
        number: u64,
    ) -> Result<Vec<Comment>, TrackerError> {
        let resource = || format!("comments of {repository}#{number}");
        let first_page = self
            .octocrab
            .issues(&repository.org, &repository.repo)
            .list_comments(number)
            .per_page(COMMENTS_PER_PAGE)
            .send()
            .await
            .map_err(|e| classify_error(resource(), e))?;

        let comments = self
            .octocrab
            .all_pages(first_page)
            .await
            .map_err(|e| classify_error(resource(), e))?;
        debug!(repo = %repository, number, count = comments.len(), "Fetched comments");

        Ok(comments
            .into_iter()
            .map(|c| Comment {
                author: c.user.login,
                created_at: c.created_at,
                body: c.body.unwrap_or_default(),
            })
            .collect())
    }

    async fn create_issue(
        &self,
        repository: &RepositoryReference,
        title: &str,
        body: &str,
    ) -> Result<CreatedIssue, TrackerError> {
        ensure_core_rate_limit(&self.octocrab).await;
        let issue = self
            .octocrab
            .issues(&repository.org, &repository.repo)
            .create(title)
            .body(body)
            .send()
            .await
            .map_err(|e| classify_error(format!("repository {repository}"), e))?;

        Ok(CreatedIssue {
            number: issue.number,
            html_url: issue.html_url.to_string(),
        })
    }

    async fn create_comment(
        &self,
        repository: &RepositoryReference,
        number: u64,
        body: &str,
    ) -> Result<(), TrackerError> {
        ensure_core_rate_limit(&self.octocrab).await;
        self.octocrab
            .issues(&repository.org, &repository.repo)
            .create_comment(number, body)
            .await
            .map_err(|e| classify_error(format!("issue {repository}#{number}"), e))?;
        Ok(())
    }

    async fn update_issue(
        &self,
        repository: &RepositoryReference,
        number: u64,
        patch: &IssuePatch,
    ) -> Result<(), TrackerError> {
        ensure_core_rate_limit(&self.octocrab).await;
        let handler = self.octocrab.issues(&repository.org, &repository.repo);
        let mut update = handler.update(number);
        if let Some(state) = patch.state {
            update = update.state(match state {
                IssueState::Open => models::IssueState::Open,
                IssueState::Closed => models::IssueState::Closed,
            });
        }
        update
            .send()
            .await
            .map_err(|e| classify_error(format!("issue {repository}#{number}"), e))?;
        Ok(())
    }
}

/// Maps an octocrab error onto a [`TrackerError`].
fn classify_error(resource: impl Into<String>, error: octocrab::Error) -> TrackerError {
    match &error {
        octocrab::Error::GitHub { source, .. } => {
            classify_status(resource, source.status_code.as_u16(), &source.message)
        }
        _ => TrackerError::Transport {
            message: error.to_string(),
        },
    }
}

/// Maps an HTTP error status and message onto a [`TrackerError`].
fn classify_status(resource: impl Into<String>, status: u16, message: &str) -> TrackerError {
    let rate_limited = match status {
        429 => true,
        403 => message.to_lowercase().contains("rate limit"),
        _ => false,
    };

    if status == 404 {
        TrackerError::NotFound {
            resource: resource.into(),
        }
    } else if rate_limited {
        TrackerError::RateLimited {
            message: message.to_string(),
        }
    } else {
        TrackerError::Transport {
            message: format!("{message} (HTTP {status})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_is_distinguished() {
        let err = classify_status("repository acme/widgets", 404, "Not Found");
        assert_eq!(
            err,
            TrackerError::NotFound {
                resource: "repository acme/widgets".to_string()
            }
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "repository acme/widgets not found");
    }

    #[test]
    fn rate_limit_statuses_are_detected() {
        assert!(matches!(
            classify_status("x", 403, "API rate limit exceeded for user ID 1."),
            TrackerError::RateLimited { .. }
        ));
        assert!(matches!(
            classify_status("x", 429, "Too Many Requests"),
            TrackerError::RateLimited { .. }
        ));
    }

    #[test]
    fn other_statuses_keep_message() {
        let err = classify_status("x", 403, "Resource not accessible by integration");
        assert_eq!(
            err,
            TrackerError::Transport {
                message: "Resource not accessible by integration (HTTP 403)".to_string()
            }
        );
        assert!(!err.is_not_found());
    }
}
