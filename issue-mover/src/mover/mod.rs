//! Moves an issue from one repository to another.
//!
//! A move runs these steps strictly in order, one tracker call at a time:
//!
//! 1. Authenticate
//! 2. Look up the source and destination repositories
//! 3. Fetch the source issue
//! 4. Fetch its comments
//! 5. Refuse to continue if the source issue is closed
//! 6. Create the destination issue
//! 7. Copy the comments, oldest first
//! 8. Post a "moved to" notice on the source issue
//! 9. Close the source issue
//!
//! Any failure ends the move. Nothing is rolled back: a failure from step 6
//! onwards leaves whatever was already written in place, and the resulting
//! [`MoveError`] says what that is.

mod config;
mod error;
mod outcome;
mod source;

pub use config::MoverConfig;
pub use error::{MoveError, MoveStep, MoverError, PartialState, RepositoryRole};
pub use outcome::MoveOutcome;
pub use source::SourceIssue;

use crate::progress::ProgressReporter;
use crate::reference::{
    parse_issue_ref, parse_repo_ref, IssueReference, ParseError, RepositoryReference,
};
use crate::templates::TemplateRenderer;
use crate::tracker::{GitHubTracker, IssuePatch, IssueTracker, TrackerError};
use std::future::Future;
use tracing::{debug, info, info_span, warn, Instrument};

/// A validated request to move one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Issue to move.
    pub source: IssueReference,
    /// Repository to move it to.
    pub destination: RepositoryReference,
    /// Stop after composing the destination issue.
    pub dry_run: bool,
}

impl MoveRequest {
    /// Parses and validates the source URL and destination repository.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if either identifier is malformed.
    pub fn parse(from: &str, to: &str, host: &str, dry_run: bool) -> Result<Self, ParseError> {
        Ok(Self {
            source: parse_issue_ref(from, host)?,
            destination: parse_repo_ref(to)?,
            dry_run,
        })
    }
}

/// Moves issues on GitHub using a token-authenticated client.
pub struct Mover {
    config: MoverConfig,
    tracker: GitHubTracker,
    renderer: TemplateRenderer,
}

impl Mover {
    /// Builds a mover from the provided configuration.
    ///
    /// No network calls are made.
    ///
    /// # Errors
    ///
    /// Returns [`MoverError`] if the GitHub client cannot be built.
    pub fn new(config: MoverConfig) -> Result<Self, MoverError> {
        let api_base = config.api_base();
        let tracker = GitHubTracker::from_token(config.token(), api_base.as_deref())?;
        Ok(Self {
            config,
            tracker,
            renderer: TemplateRenderer::new(),
        })
    }

    /// Parses the identifiers and moves the issue.
    ///
    /// # Arguments
    ///
    /// * `from` - Source issue URL
    /// * `to` - Destination repository as `org/repo`
    /// * `reporter` - Receives progress events
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] describing the step that failed. The error has
    /// already been passed to `reporter`.
    pub async fn run(
        &self,
        from: &str,
        to: &str,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<MoveOutcome, MoveError> {
        let request = MoveRequest::parse(from, to, self.config.host(), self.config.dry_run())
            .map_err(|e| {
                let err = MoveError::from(e);
                reporter.step_failed(&err.to_string());
                err
            })?;

        move_issue(&self.tracker, reporter, &self.renderer, &request).await
    }
}

/// Moves the issue described by `request` using any [`IssueTracker`].
///
/// # Errors
///
/// Returns [`MoveError`] describing the step that failed and what had already
/// been changed. The error has already been passed to `reporter`.
pub async fn move_issue(
    tracker: &dyn IssueTracker,
    reporter: &mut dyn ProgressReporter,
    renderer: &TemplateRenderer,
    request: &MoveRequest,
) -> Result<MoveOutcome, MoveError> {
    let span = info_span!(
        "move_issue",
        source = %request.source,
        destination = %request.destination,
        dry_run = request.dry_run
    );

    MoveRun {
        tracker,
        reporter,
        renderer,
    }
    .execute(request)
    .instrument(span)
    .await
}

/// State of a single move.
struct MoveRun<'a> {
    tracker: &'a dyn IssueTracker,
    reporter: &'a mut dyn ProgressReporter,
    renderer: &'a TemplateRenderer,
}

impl MoveRun<'_> {
    async fn execute(mut self, request: &MoveRequest) -> Result<MoveOutcome, MoveError> {
        let tracker = self.tracker;
        let source_ref = &request.source;
        let source_repo = source_ref.repository();
        let destination_repo = &request.destination;
        let untouched = |step: MoveStep| {
            move |cause: TrackerError| MoveError::Remote {
                step,
                cause,
                state: PartialState::Untouched,
            }
        };

        let user = self
            .step(
                "Authenticating".to_string(),
                tracker.current_user(),
                untouched(MoveStep::Authenticate),
            )
            .await?;
        info!(login = %user.login, "Authenticated");

        for (role, repository) in [
            (RepositoryRole::Source, &source_repo),
            (RepositoryRole::Destination, destination_repo),
        ] {
            self.step(
                format!("Looking up {} repository {repository}", role_label(role)),
                tracker.get_repository(repository),
                |cause| repository_lookup_error(role, repository, cause),
            )
            .await?;
        }

        let issue = self
            .step(
                format!("Fetching issue {source_ref}"),
                tracker.get_issue(&source_repo, source_ref.number),
                |cause| issue_lookup_error(source_ref, cause),
            )
            .await?;

        let comments = self
            .step(
                format!("Fetching comments of {source_ref}"),
                tracker.list_comments(&source_repo, source_ref.number),
                untouched(MoveStep::FetchComments),
            )
            .await?;
        let source = SourceIssue::new(source_ref.clone(), issue, comments);
        debug!(
            source = %source.reference,
            url = %source.html_url,
            comments = source.comments.len(),
            "Fetched source issue"
        );

        self.reporter.step_started("Checking issue state");
        if source.is_closed() {
            return Err(self.fail(MoveError::AlreadyClosed {
                number: source.reference.number,
            }));
        }
        self.reporter.step_succeeded();

        let body = self
            .renderer
            .render_issue_body(&source.author, &source.created_at, &source.body, source_ref)
            .map_err(|cause| MoveError::Template {
                step: MoveStep::CreateDestinationIssue,
                cause,
                state: PartialState::Untouched,
            });
        let comment_bodies = source
            .comments
            .iter()
            .map(|comment| self.renderer.render_comment_body(comment))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|cause| MoveError::Template {
                step: MoveStep::CopyComments,
                cause,
                state: PartialState::Untouched,
            });
        let (body, comment_bodies) = match (body, comment_bodies) {
            (Ok(body), Ok(comment_bodies)) => (body, comment_bodies),
            (Err(e), _) | (_, Err(e)) => return Err(self.fail(e)),
        };

        if request.dry_run {
            info!("Dry run, not creating anything");
            return Ok(MoveOutcome::Previewed {
                source: source.reference,
                destination_repository: destination_repo.clone(),
                title: source.title,
                body,
                comments: comment_bodies,
            });
        }

        let created = self
            .step(
                format!("Creating issue in {destination_repo}"),
                tracker.create_issue(destination_repo, &source.title, &body),
                untouched(MoveStep::CreateDestinationIssue),
            )
            .await?;
        let destination = IssueReference::new(
            &destination_repo.org,
            &destination_repo.repo,
            created.number,
        );
        info!(destination = %destination, url = %created.html_url, "Created destination issue");

        let total = comment_bodies.len();
        let destination_created = |comments_copied: usize| PartialState::DestinationCreated {
            url: created.html_url.clone(),
            comments_copied,
            total,
        };
        for (i, comment_body) in comment_bodies.iter().enumerate() {
            let index = i + 1;
            self.step(
                format!("Copying comment {index}/{total}"),
                tracker.create_comment(destination_repo, created.number, comment_body),
                |cause| MoveError::CommentCopyFailed {
                    index,
                    total,
                    cause,
                    state: destination_created(i),
                },
            )
            .await?;
        }

        let notice = match self.renderer.render_moved_notice(&destination) {
            Ok(notice) => notice,
            Err(cause) => {
                return Err(self.fail(MoveError::Template {
                    step: MoveStep::AnnotateSource,
                    cause,
                    state: destination_created(total),
                }))
            }
        };
        self.step(
            format!("Annotating {source_ref}"),
            tracker.create_comment(&source_repo, source_ref.number, &notice),
            |cause| MoveError::Remote {
                step: MoveStep::AnnotateSource,
                cause,
                state: destination_created(total),
            },
        )
        .await?;

        self.step(
            format!("Closing {source_ref}"),
            tracker.update_issue(&source_repo, source_ref.number, &IssuePatch::close()),
            |cause| MoveError::Remote {
                step: MoveStep::CloseSource,
                cause,
                state: PartialState::SourceAnnotated {
                    url: created.html_url.clone(),
                },
            },
        )
        .await?;

        info!(
            source_url = %source.html_url,
            destination = %destination,
            comments_copied = total,
            "Issue moved"
        );
        Ok(MoveOutcome::Moved {
            source: source.reference,
            destination,
            destination_url: created.html_url,
            comments_copied: total,
        })
    }

    /// Runs one tracker call, reporting its start and resolution.
    async fn step<T, F>(
        &mut self,
        label: String,
        call: F,
        on_error: impl FnOnce(TrackerError) -> MoveError,
    ) -> Result<T, MoveError>
    where
        F: Future<Output = Result<T, TrackerError>>,
    {
        debug!(step = %label, "Starting step");
        self.reporter.step_started(&label);
        match call.await {
            Ok(value) => {
                self.reporter.step_succeeded();
                Ok(value)
            }
            Err(cause) => Err(self.fail(on_error(cause))),
        }
    }

    /// Reports a failure and hands the error back.
    fn fail(&mut self, error: MoveError) -> MoveError {
        if error.partial_state() != PartialState::Untouched {
            warn!(state = %error.partial_state(), "Move stopped after modifying repositories");
        }
        self.reporter.step_failed(&error.to_string());
        error
    }
}

fn role_label(role: RepositoryRole) -> &'static str {
    match role {
        RepositoryRole::Source => "source",
        RepositoryRole::Destination => "destination",
    }
}

fn repository_lookup_error(
    role: RepositoryRole,
    repository: &RepositoryReference,
    cause: TrackerError,
) -> MoveError {
    if cause.is_not_found() {
        MoveError::RepositoryNotFound {
            role,
            org: repository.org.clone(),
            repo: repository.repo.clone(),
        }
    } else {
        MoveError::Remote {
            step: MoveStep::ResolveRepositories,
            cause,
            state: PartialState::Untouched,
        }
    }
}

fn issue_lookup_error(issue: &IssueReference, cause: TrackerError) -> MoveError {
    if cause.is_not_found() {
        MoveError::IssueNotFound {
            number: issue.number,
            org: issue.org.clone(),
            repo: issue.repo.clone(),
        }
    } else {
        MoveError::Remote {
            step: MoveStep::FetchSourceIssue,
            cause,
            state: PartialState::Untouched,
        }
    }
}
