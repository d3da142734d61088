//! Step progress reporting.
//!
//! The move workflow announces each step through [`ProgressReporter`] and
//! never writes to the terminal itself. Every `step_started` is followed by
//! exactly one `step_succeeded` or `step_failed` before the next step starts.

mod console;

pub use console::ConsoleReporter;

use tracing::{error, info};

/// Receives step events from the move workflow.
///
/// Implementations must not panic.
pub trait ProgressReporter {
    /// A step is about to run.
    fn step_started(&mut self, label: &str);

    /// The step most recently started has succeeded.
    fn step_succeeded(&mut self);

    /// The step most recently started has failed.
    fn step_failed(&mut self, message: &str);
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step_started(&mut self, _label: &str) {}

    fn step_succeeded(&mut self) {}

    fn step_failed(&mut self, _message: &str) {}
}

/// Emits events as tracing records.
#[derive(Debug, Default, Clone)]
pub struct TracingReporter {
    current: Option<String>,
}

impl ProgressReporter for TracingReporter {
    fn step_started(&mut self, label: &str) {
        info!(step = %label, "Step started");
        self.current = Some(label.to_string());
    }

    fn step_succeeded(&mut self) {
        let step = self.current.take().unwrap_or_default();
        info!(step = %step, "Step succeeded");
    }

    fn step_failed(&mut self, message: &str) {
        let step = self.current.take().unwrap_or_default();
        error!(step = %step, error = %message, "Step failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_reporter_tracks_current_step() {
        let mut reporter = TracingReporter::default();
        reporter.step_started("Fetching issue");
        assert_eq!(reporter.current.as_deref(), Some("Fetching issue"));

        reporter.step_succeeded();
        assert_eq!(reporter.current, None);

        reporter.step_started("Closing issue");
        reporter.step_failed("boom");
        assert_eq!(reporter.current, None);
    }

    #[test]
    fn silent_reporter_accepts_events() {
        let reporter: &mut dyn ProgressReporter = &mut SilentReporter;
        reporter.step_started("anything");
        reporter.step_failed("ignored");
    }
}
