//! Console progress output.

use super::ProgressReporter;
use std::io::{self, Write};

/// Writes one status line per step to a writer (stdout by default).
///
/// A step is printed as `⏳ label...` when it starts and completed with
/// ` ✅` on success. Failures print a separate `❌ message` line.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    in_step: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// Creates a reporter writing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            in_step: false,
        }
    }

    /// Consumes the reporter and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

// Write errors are ignored: progress output is best effort.
impl<W: Write> ProgressReporter for ConsoleReporter<W> {
    fn step_started(&mut self, label: &str) {
        let _ = write!(self.out, "⏳ {label}...");
        let _ = self.out.flush();
        self.in_step = true;
    }

    fn step_succeeded(&mut self) {
        let _ = writeln!(self.out, " ✅");
        self.in_step = false;
    }

    fn step_failed(&mut self, message: &str) {
        if self.in_step {
            let _ = writeln!(self.out);
            self.in_step = false;
        }
        let _ = writeln!(self.out, "❌ {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn renders_successful_step_on_one_line() {
        let mut reporter = ConsoleReporter::with_writer(Vec::new());
        reporter.step_started("Fetching issue");
        reporter.step_succeeded();

        assert_eq!(output(reporter), "⏳ Fetching issue... ✅\n");
    }

    #[test]
    fn renders_failure_on_its_own_line() {
        let mut reporter = ConsoleReporter::with_writer(Vec::new());
        reporter.step_started("Fetching issue");
        reporter.step_failed("issue acme/widgets#1 not found");

        assert_eq!(
            output(reporter),
            "⏳ Fetching issue...\n❌ issue acme/widgets#1 not found\n"
        );
    }

    #[test]
    fn renders_failure_without_started_step() {
        let mut reporter = ConsoleReporter::with_writer(Vec::new());
        reporter.step_failed("bad input");

        assert_eq!(output(reporter), "❌ bad input\n");
    }
}
