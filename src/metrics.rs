// Run metrics
//
// Lightweight counters shared by the executor, the orchestrator and the
// background backup tasks, summarized once at exit.

use crate::models::Outcome;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Process-wide counters.
///
/// Uses relaxed atomics; the values are only read for the exit summary.
#[derive(Debug)]
pub struct Metrics {
    pub commands_succeeded: AtomicUsize,
    pub commands_failed: AtomicUsize,
    pub commands_timed_out: AtomicUsize,

    /// Wall-clock time spent inside commands, in milliseconds
    pub total_command_time_ms: AtomicU64,

    pub tweaks_applied: AtomicUsize,
    pub tweaks_restored: AtomicUsize,

    /// Ledger entries restore found without an inverse
    pub inverses_missing: AtomicUsize,

    pub backups_completed: AtomicUsize,
    pub backups_failed: AtomicUsize,

    /// Notifications broadcast to subscribers
    pub notifications_sent: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            commands_succeeded: AtomicUsize::new(0),
            commands_failed: AtomicUsize::new(0),
            commands_timed_out: AtomicUsize::new(0),
            total_command_time_ms: AtomicU64::new(0),
            tweaks_applied: AtomicUsize::new(0),
            tweaks_restored: AtomicUsize::new(0),
            inverses_missing: AtomicUsize::new(0),
            backups_completed: AtomicUsize::new(0),
            backups_failed: AtomicUsize::new(0),
            notifications_sent: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record one finished command
    pub fn record_command(&self, outcome: Outcome, duration: Duration) {
        let counter = match outcome {
            Outcome::Success => &self.commands_succeeded,
            Outcome::Failure => &self.commands_failed,
            Outcome::Timeout => &self.commands_timed_out,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.total_command_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_tweak_applied(&self) {
        self.tweaks_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tweak_restored(&self) {
        self.tweaks_restored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_inverse_missing(&self) {
        self.inverses_missing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backup_completed(&self) {
        self.backups_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backup_failed(&self) {
        self.backups_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification(&self) {
        self.notifications_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn commands_run(&self) -> usize {
        self.commands_succeeded.load(Ordering::Relaxed)
            + self.commands_failed.load(Ordering::Relaxed)
            + self.commands_timed_out.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average command time in milliseconds
    pub fn avg_command_time_ms(&self) -> f64 {
        let total = self.total_command_time_ms.load(Ordering::Relaxed);
        let count = self.commands_run();
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("=== Run Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Commands: {} succeeded, {} failed, {} timed out (avg: {:.2}ms)",
            self.commands_succeeded.load(Ordering::Relaxed),
            self.commands_failed.load(Ordering::Relaxed),
            self.commands_timed_out.load(Ordering::Relaxed),
            self.avg_command_time_ms()
        );
        tracing::info!(
            "Tweaks: {} applied, {} restored, {} without inverse",
            self.tweaks_applied.load(Ordering::Relaxed),
            self.tweaks_restored.load(Ordering::Relaxed),
            self.inverses_missing.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Backups: {} completed, {} failed; notifications: {}",
            self.backups_completed.load(Ordering::Relaxed),
            self.backups_failed.load(Ordering::Relaxed),
            self.notifications_sent.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
