use crate::metrics::Metrics;
use crate::models::{CommandResult, Outcome};
use crate::services::report::{IssueKind, ReportLog};
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

/// Default wall-clock bound for one command
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// What a launched process reported back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutput {
    /// Process signalled success
    pub success: bool,
    pub code: Option<i32>,
    /// Combined stdout and stderr
    pub output: String,
}

impl LaunchOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            output: output.into(),
        }
    }

    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            output: output.into(),
        }
    }
}

/// Runs a command line to completion.
///
/// The executor owns timeouts and bookkeeping; a launcher only starts the
/// process and collects its output. Dropping the returned future must stop
/// waiting on the process.
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self, command: &str) -> std::io::Result<LaunchOutput>;
}

/// Launches commands through the platform shell (`cmd /C` or `sh -c`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[async_trait]
impl Launcher for SystemLauncher {
    async fn launch(&self, command: &str) -> std::io::Result<LaunchOutput> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", command]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", command]);
            c
        };

        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(LaunchOutput {
            success: output.status.success(),
            code: output.status.code(),
            output: text,
        })
    }
}

/// Runs single commands with a hard time bound.
///
/// [`execute`](Self::execute) never fails: launch faults, non-zero exits and
/// timeouts all come back as a [`CommandResult`], and every result is in the
/// [`ReportLog`] before the call returns.
#[derive(Clone)]
pub struct CommandExecutor {
    launcher: Arc<dyn Launcher>,
    report: ReportLog,
    timeout: Duration,
    metrics: Arc<Metrics>,
}

impl CommandExecutor {
    pub fn new(launcher: Arc<dyn Launcher>, report: ReportLog) -> Self {
        Self {
            launcher,
            report,
            timeout: DEFAULT_COMMAND_TIMEOUT,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Executor running real commands through [`SystemLauncher`]
    pub fn system(report: ReportLog) -> Self {
        Self::new(Arc::new(SystemLauncher), report)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn report(&self) -> &ReportLog {
        &self.report
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub async fn execute(&self, command: &str) -> CommandResult {
        tracing::debug!("Executing: {}", command);
        let start = Instant::now();

        let (output, outcome, diagnostic) =
            match timeout(self.timeout, self.launcher.launch(command)).await {
                Ok(Ok(launched)) if launched.success => {
                    (launched.output, Outcome::Success, String::new())
                }
                Ok(Ok(launched)) => {
                    let diagnostic = match launched.code {
                        Some(code) => format!("Exited with code {}", code),
                        None => "Terminated without an exit code".to_string(),
                    };
                    (launched.output, Outcome::Failure, diagnostic)
                }
                Ok(Err(e)) => (String::new(), Outcome::Failure, e.to_string()),
                Err(_) => (
                    String::new(),
                    Outcome::Timeout,
                    format!("Timeout after {} seconds", self.timeout.as_secs_f32()),
                ),
            };

        let result = CommandResult {
            command: command.to_string(),
            output,
            outcome,
            diagnostic,
            duration: start.elapsed(),
        };

        self.report.record_command(&result);
        self.metrics.record_command(result.outcome, result.duration);

        match result.outcome {
            Outcome::Success => tracing::debug!(
                "Command succeeded in {:.2}s: {}",
                result.duration.as_secs_f32(),
                command
            ),
            Outcome::Failure => {
                tracing::warn!("Command failed ({}): {}", result.diagnostic, command);
                self.report.record_issue(
                    IssueKind::CommandFailure,
                    format!("{} ({})", command, result.diagnostic),
                );
            }
            Outcome::Timeout => {
                tracing::warn!("{}: {}", result.diagnostic, command);
                self.report.record_issue(
                    IssueKind::CommandTimeout,
                    format!("{} ({})", command, result.diagnostic),
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::Ordering;

    struct Scripted(io::Result<LaunchOutput>);

    #[async_trait]
    impl Launcher for Scripted {
        async fn launch(&self, _command: &str) -> io::Result<LaunchOutput> {
            match &self.0 {
                Ok(output) => Ok(output.clone()),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }
    }

    struct Hanging;

    #[async_trait]
    impl Launcher for Hanging {
        async fn launch(&self, _command: &str) -> io::Result<LaunchOutput> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(LaunchOutput::ok(""))
        }
    }

    fn executor(launcher: impl Launcher + 'static) -> CommandExecutor {
        CommandExecutor::new(Arc::new(launcher), ReportLog::new())
    }

    #[tokio::test]
    async fn test_success_captures_output() {
        let exec = executor(Scripted(Ok(LaunchOutput::ok("CORP\r\n"))));
        let result = exec.execute("echo %USERDOMAIN%").await;

        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.success_output(), Some("CORP"));
        assert!(result.diagnostic.is_empty());
        assert_eq!(exec.report().commands(), vec![result]);
        assert!(exec.report().issues().is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure_with_output() {
        let exec = executor(Scripted(Ok(LaunchOutput::failed(5, "Access is denied."))));
        let result = exec.execute("sc stop WinDefend").await;

        assert_eq!(result.outcome, Outcome::Failure);
        assert_eq!(result.output, "Access is denied.");
        assert!(result.diagnostic.contains('5'));
        assert_eq!(exec.report().issues()[0].0, IssueKind::CommandFailure);
    }

    #[tokio::test]
    async fn test_launch_fault_is_failure() {
        let exec = executor(Scripted(Err(io::Error::new(
            io::ErrorKind::NotFound,
            "program not found",
        ))));
        let result = exec.execute("nltest /sc_query:CORP").await;

        assert_eq!(result.outcome, Outcome::Failure);
        assert!(result.diagnostic.contains("program not found"));
        assert_eq!(exec.metrics().commands_failed.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_recorded() {
        let exec = executor(Hanging).with_timeout(Duration::from_millis(50));
        let result = exec.execute("defrag C: /O /U").await;

        assert_eq!(result.outcome, Outcome::Timeout);
        assert_eq!(result.command, "defrag C: /O /U");
        assert!(result.diagnostic.starts_with("Timeout after"));
        assert_eq!(exec.report().commands()[0].command, "defrag C: /O /U");
        assert_eq!(exec.report().issues()[0].0, IssueKind::CommandTimeout);
    }
}
