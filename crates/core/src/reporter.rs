//! Status line composition and process termination.
//!
//! [`Reporter::exit`] is the only place a check terminates the process, so
//! the supervisor always receives exactly one status line and one exit code.

use std::io::Write;

use crate::perfdata::{PerfData, PerfDataEntry};
use crate::verdict::Verdict;

/// Terminal verdict of a check run plus its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub verdict: Verdict,
    pub message: String,
}

impl Outcome {
    pub fn new(verdict: Verdict, message: impl Into<String>) -> Self {
        Self {
            verdict,
            message: message.into(),
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(Verdict::Critical, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Verdict::Unknown, message)
    }
}

/// Owns the check name and the perfdata accumulated during a run.
#[derive(Debug)]
pub struct Reporter {
    name: &'static str,
    perfdata: PerfData,
}

impl Reporter {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            perfdata: PerfData::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn add_perf_data(&mut self, entry: PerfDataEntry) {
        tracing::debug!(perfdata = %entry, "Recording perfdata");
        self.perfdata.add(entry);
    }

    pub fn perfdata(&self) -> &PerfData {
        &self.perfdata
    }

    /// Compose `<name> <VERDICT>. <message>[|<perfdata>]`.
    ///
    /// Line breaks in the message are flattened to spaces and `|` becomes
    /// `/`, so the only separator on the line is the one before perfdata.
    pub fn status_line(&self, outcome: &Outcome) -> String {
        let message = outcome
            .message
            .trim()
            .replace(['\r', '\n'], " ")
            .replace('|', "/");
        let mut line = format!("{} {}. {}", self.name, outcome.verdict, message);
        if !self.perfdata.is_empty() {
            line.push('|');
            line.push_str(self.perfdata.as_str());
        }
        line
    }

    /// Print the status line to stdout and exit with the verdict's code.
    pub fn exit(self, outcome: Outcome) -> ! {
        let line = self.status_line(&outcome);
        let code = outcome.verdict.exit_code();
        tracing::debug!(verdict = %outcome.verdict, code, "Check finished");

        let mut stdout = std::io::stdout().lock();
        // Nothing useful can be done if stdout is gone; the exit code still
        // carries the verdict.
        let _ = writeln!(stdout, "{line}");
        let _ = stdout.flush();

        std::process::exit(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_without_perfdata() {
        let reporter = Reporter::new("CHECK WEB");
        let outcome = Outcome::critical("timed out while opening connection");
        assert_eq!(
            reporter.status_line(&outcome),
            "CHECK WEB CRITICAL. timed out while opening connection"
        );
    }

    #[test]
    fn status_line_with_perfdata() {
        let mut reporter = Reporter::new("CHECK LOCAL CPU");
        reporter.add_perf_data(
            PerfDataEntry::new("cpu", 74.0, "%")
                .with_thresholds(75.0, 90.0)
                .with_min(0.0)
                .with_max(100.0),
        );
        let outcome = Outcome::new(Verdict::Ok, "CPU usage 74%");
        assert_eq!(
            reporter.status_line(&outcome),
            "CHECK LOCAL CPU OK. CPU usage 74%|cpu=74%;75;90;0;100 "
        );
    }

    #[test]
    fn status_line_is_a_single_line() {
        let reporter = Reporter::new("CHECK WEB");
        let line = reporter.status_line(&Outcome::unknown("error: bad flag\n\nUsage: check_web\n"));
        assert!(!line.contains('\n'));
        assert!(line.starts_with("CHECK WEB UNKNOWN. error: bad flag"));
    }

    #[test]
    fn pipe_in_message_does_not_split_perfdata() {
        let mut reporter = Reporter::new("CHECK WEB");
        reporter.add_perf_data(PerfDataEntry::new("time", 10.0, "ms").with_min(0.0));
        let line = reporter.status_line(&Outcome::critical(
            "pattern 'foo|bar' not found in response body",
        ));
        assert_eq!(line.matches('|').count(), 1);
        assert_eq!(
            line,
            "CHECK WEB CRITICAL. pattern 'foo/bar' not found in response body|time=10ms;;;0; "
        );
    }
}
