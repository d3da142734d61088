//! CLI for the issue mover.
//!
//! Moves a GitHub issue and its comments to another repository, then links
//! and closes the original.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use issue_mover::{ConsoleReporter, MoveOutcome, Mover, MoverConfig, DEFAULT_WEB_HOST};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Mover - Move a GitHub issue and its comments to another repository.
#[derive(Parser, Debug)]
#[command(name = "issue-mover", author, version, about, long_about = None)]
struct Args {
    /// URL of the issue to move, e.g. https://github.com/org/repo/issues/1.
    #[arg(long, value_name = "URL")]
    from: Option<String>,

    /// Destination repository as org/repo.
    #[arg(long, value_name = "ORG/REPO")]
    to: Option<String>,

    /// GitHub Personal Access Token.
    #[arg(long)]
    token: Option<String>,

    /// Web host of the tracker (for GitHub Enterprise).
    #[arg(long, default_value = DEFAULT_WEB_HOST)]
    host: String,

    /// Preview the new issue without creating or closing anything.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // rustls needs a process-wide crypto provider before octocrab opens a connection.
    // Err only means one is already installed.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let (from, to, config) = match Invocation::from_parse(Args::try_parse()) {
        Invocation::Move { from, to, config } => (from, to, config),
        Invocation::Usage => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Invocation::Help(e) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Invocation::Invalid(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    // Run the main logic
    match run(config, &from, &to).await {
        Ok(outcome) => {
            print_summary(&outcome);
            ExitCode::SUCCESS
        }
        Err(()) => ExitCode::FAILURE,
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output) on stderr, so it does not
///   interleave with the progress lines on stdout
/// - Log level filtering via `RUST_LOG` env var (defaults to "warn")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        // Progress is already shown on stdout; logs are opt-in via RUST_LOG
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

/// What the command line asks the tool to do.
#[derive(Debug)]
enum Invocation {
    /// Move `from` to `to`.
    Move {
        from: String,
        to: String,
        config: MoverConfig,
    },
    /// A required flag is missing: print usage and succeed.
    Usage,
    /// `--help` or `--version`: print it and succeed.
    Help(clap::Error),
    /// Anything clap rejects, such as an unexpected positional argument:
    /// print it and fail.
    Invalid(clap::Error),
}

impl Invocation {
    /// Decides what to do from a clap parse result.
    fn from_parse(parsed: Result<Args, clap::Error>) -> Self {
        let args = match parsed {
            Ok(args) => args,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Self::Help(e),
                    _ => Self::Invalid(e),
                }
            }
        };

        let (Some(from), Some(to), Some(token)) = (args.from, args.to, args.token) else {
            return Self::Usage;
        };

        let config = MoverConfig::new(token)
            .with_host(args.host)
            .with_dry_run(args.dry_run);
        Self::Move { from, to, config }
    }
}

fn print_usage() {
    let _ = Args::command().print_help();
    println!();
}

/// Main execution logic.
///
/// Failures have already been printed by the reporter when this returns.
async fn run(config: MoverConfig, from: &str, to: &str) -> Result<MoveOutcome, ()> {
    let mut reporter = ConsoleReporter::new();
    let mover = Mover::new(config).map_err(|e| {
        error!(error = %e, "Failed to create GitHub client");
        println!("❌ Failed to create GitHub client: {e}");
    })?;

    mover.run(from, to, &mut reporter).await.map_err(|e| {
        debug!(step = %e.step(), error = ?e, "Move failed");
    })
}

/// Prints the final outcome.
fn print_summary(outcome: &MoveOutcome) {
    match outcome {
        MoveOutcome::Moved {
            source,
            destination,
            destination_url,
            comments_copied,
        } => {
            println!("\nMoved {source} to {destination}");
            println!("  URL: {destination_url}");
            println!("  Comments copied: {comments_copied}");
        }
        MoveOutcome::Previewed {
            source,
            destination_repository,
            title,
            body,
            comments,
        } => {
            println!("\n[DRY RUN] Would move {source} to {destination_repository}");
            println!("  Title: {title}");
            println!("  Comments to copy: {}", comments.len());
            println!("\n  Issue body:");
            for line in body.lines() {
                println!("    {line}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(args: &[&str]) -> Invocation {
        Invocation::from_parse(Args::try_parse_from(args))
    }

    #[test]
    fn no_arguments_shows_usage() {
        assert!(matches!(invocation(&["issue-mover"]), Invocation::Usage));
    }

    #[test]
    fn missing_token_shows_usage() {
        let parsed = invocation(&[
            "issue-mover",
            "--from=https://github.com/acme/widgets/issues/42",
            "--to=acme/widgets2",
        ]);
        assert!(matches!(parsed, Invocation::Usage));
    }

    #[test]
    fn help_succeeds() {
        assert!(matches!(
            invocation(&["issue-mover", "--help"]),
            Invocation::Help(_)
        ));
    }

    #[test]
    fn unexpected_positional_fails() {
        match invocation(&["issue-mover", "extra"]) {
            Invocation::Invalid(e) => {
                assert!(e.to_string().contains("extra"));
            }
            other => panic!("unexpected invocation: {other:?}"),
        }
    }

    #[test]
    fn all_flags_build_a_move() {
        let parsed = invocation(&[
            "issue-mover",
            "--from=https://github.com/acme/widgets/issues/42",
            "--to=acme/widgets2",
            "--token=X",
            "--dry-run",
        ]);

        match parsed {
            Invocation::Move { from, to, config } => {
                assert_eq!(from, "https://github.com/acme/widgets/issues/42");
                assert_eq!(to, "acme/widgets2");
                assert_eq!(config.token(), "X");
                assert_eq!(config.host(), DEFAULT_WEB_HOST);
                assert!(config.dry_run());
            }
            other => panic!("unexpected invocation: {other:?}"),
        }
    }

    #[test]
    fn usage_names_the_binary() {
        let usage = Args::command().render_usage().to_string();
        assert!(usage.contains("issue-mover [OPTIONS]"), "{usage}");
    }
}
