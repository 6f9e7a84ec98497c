//! Check verdicts and the fixed verdict/exit-code table.
//!
//! The supervisor reads a check's health from its process exit code, so the
//! mapping below is part of the wire contract and never changes.

use std::fmt;

/// Health classification produced by a single check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Ok,
    Warning,
    Critical,
    /// Configuration or precondition failure. Never produced by an observation.
    Unknown,
}

impl Verdict {
    /// Every verdict, in exit-code order.
    pub const ALL: [Verdict; 4] = [
        Verdict::Ok,
        Verdict::Warning,
        Verdict::Critical,
        Verdict::Unknown,
    ];

    /// Process exit code expected by the supervisor.
    pub const fn exit_code(self) -> i32 {
        match self {
            Verdict::Ok => 0,
            Verdict::Warning => 1,
            Verdict::Critical => 2,
            Verdict::Unknown => 3,
        }
    }

    /// Upper-case label used in the status line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::Warning => "WARNING",
            Verdict::Critical => "CRITICAL",
            Verdict::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for Verdict {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.exit_code() == code)
            .ok_or(code)
    }
}
