//! Executor behaviour against real processes.
//!
//! These use `sh -c`, so they only run on Unix hosts.
#![cfg(unix)]

use std::time::Duration;
use wintweak::models::Outcome;
use wintweak::services::{CommandExecutor, IssueKind, ReportLog};

fn executor(timeout: Duration) -> CommandExecutor {
    CommandExecutor::system(ReportLog::new()).with_timeout(timeout)
}

#[tokio::test]
async fn test_success_captures_output() {
    let executor = executor(Duration::from_secs(10));
    let result = executor.execute("echo hello").await;

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.success_output(), Some("hello"));
    assert!(result.diagnostic.is_empty());
}

#[tokio::test]
async fn test_nonzero_exit_is_failure_with_output() {
    let executor = executor(Duration::from_secs(10));
    let result = executor.execute("echo partial; exit 3").await;

    assert_eq!(result.outcome, Outcome::Failure);
    assert_eq!(result.diagnostic, "Exited with code 3");
    assert!(result.output.contains("partial"));
    assert!(executor
        .report()
        .issues()
        .iter()
        .any(|(kind, _)| *kind == IssueKind::CommandFailure));
}

#[tokio::test]
async fn test_missing_program_is_failure() {
    let executor = executor(Duration::from_secs(10));
    let result = executor.execute("definitely-not-a-real-command-7f3a").await;

    assert_eq!(result.outcome, Outcome::Failure);
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_slow_command_times_out_and_is_logged() {
    let executor = executor(Duration::from_millis(200));
    let started = std::time::Instant::now();

    let result = executor.execute("sleep 5").await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(result.outcome, Outcome::Timeout);
    assert!(result.diagnostic.starts_with("Timeout after"));

    let logged = executor.report().commands();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].command, "sleep 5");
    assert_eq!(logged[0].outcome, Outcome::Timeout);
    assert!(executor
        .report()
        .issues()
        .iter()
        .any(|(kind, _)| *kind == IssueKind::CommandTimeout));
}

#[tokio::test]
async fn test_commands_are_logged_in_order() {
    let executor = executor(Duration::from_secs(10));
    for command in ["echo one", "exit 1", "echo three"] {
        executor.execute(command).await;
    }

    let commands: Vec<String> = executor
        .report()
        .commands()
        .into_iter()
        .map(|result| result.command)
        .collect();
    assert_eq!(commands, vec!["echo one", "exit 1", "echo three"]);
}
