use std::fmt;
use std::time::Duration;

/// How a single command invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
    Timeout,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
            Outcome::Timeout => "Timeout",
        })
    }
}

/// Record of one command invocation.
///
/// Produced by [`crate::services::CommandExecutor`] for every attempt,
/// including timeouts and launch faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// The literal command text that was run
    pub command: String,

    /// Combined stdout and stderr
    pub output: String,

    pub outcome: Outcome,

    /// Free-text explanation for anything other than a clean success
    pub diagnostic: String,

    pub duration: Duration,
}

impl CommandResult {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Output trimmed of surrounding whitespace, empty unless the command succeeded
    pub fn success_output(&self) -> Option<&str> {
        self.is_success().then(|| self.output.trim())
    }
}
