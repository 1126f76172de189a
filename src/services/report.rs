use crate::models::CommandResult;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};

/// Non-fatal problems recorded alongside command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    CommandFailure,
    CommandTimeout,
    BackupFailure,
    RestorePointFailure,
    RestoreInverseMissing,
    ScanSourceUnavailable,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IssueKind::CommandFailure => "Command failure",
            IssueKind::CommandTimeout => "Command timeout",
            IssueKind::BackupFailure => "Backup failure",
            IssueKind::RestorePointFailure => "Restore point failure",
            IssueKind::RestoreInverseMissing => "Restore inverse missing",
            IssueKind::ScanSourceUnavailable => "Scan source unavailable",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    Command {
        at: DateTime<Local>,
        result: CommandResult,
    },
    Issue {
        at: DateTime<Local>,
        kind: IssueKind,
        detail: String,
    },
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEntry::Command { at, result } => {
                writeln!(f, "[{}] Command: {}", at.format("%Y-%m-%d %H:%M:%S"), result.command)?;
                writeln!(f, "Outcome: {}", result.outcome)?;
                writeln!(f, "Output: {}", result.output.trim_end())?;
                if !result.diagnostic.is_empty() {
                    writeln!(f, "Diagnostic: {}", result.diagnostic)?;
                }
                Ok(())
            }
            ReportEntry::Issue { at, kind, detail } => {
                writeln!(f, "[{}] {}: {}", at.format("%Y-%m-%d %H:%M:%S"), kind, detail)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No actions have been performed yet")]
    Empty,

    #[error("Failed to write report to {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open report journal {path}: {source}")]
    Journal {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Journal file fed by a dedicated writer thread.
///
/// Entries are queued under the log's lock, so the file keeps append order
/// without async workers waiting on disk. The last clone to drop flushes it.
#[derive(Debug, Clone)]
struct Journal {
    path: Utf8PathBuf,
    writer: NonBlocking,
    _flush: Arc<WorkerGuard>,
}

impl Journal {
    fn open(path: Utf8PathBuf) -> Result<Self, ReportError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ReportError::Journal {
                path: path.clone(),
                source,
            })?;

        let (writer, guard) = NonBlockingBuilder::default()
            .lossy(false)
            .thread_name("wintweak-journal")
            .finish(file);

        Ok(Self {
            path,
            writer,
            _flush: Arc::new(guard),
        })
    }

    fn append(&self, entry: &ReportEntry) {
        let mut writer = self.writer.clone();
        if let Err(e) = writer.write_all(format!("{}\n", entry).as_bytes()) {
            tracing::warn!("Failed to append to report journal {}: {}", self.path, e);
        }
    }
}

/// Append-only log of every command attempt and every non-fatal issue.
///
/// Clones share the same entries, so background tasks and the foreground
/// run can append concurrently. Entries from one writer keep their order.
#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    entries: Arc<Mutex<Vec<ReportEntry>>>,
    journal: Option<Journal>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log that also appends every entry to `journal` as it is recorded
    pub fn with_journal(journal: impl Into<Utf8PathBuf>) -> Result<Self, ReportError> {
        Ok(Self {
            entries: Arc::default(),
            journal: Some(Journal::open(journal.into())?),
        })
    }

    pub fn record_command(&self, result: &CommandResult) {
        self.push(ReportEntry::Command {
            at: Local::now(),
            result: result.clone(),
        });
    }

    pub fn record_issue(&self, kind: IssueKind, detail: impl Into<String>) {
        self.push(ReportEntry::Issue {
            at: Local::now(),
            kind,
            detail: detail.into(),
        });
    }

    fn push(&self, entry: ReportEntry) {
        let mut entries = self.lock();
        if let Some(journal) = &self.journal {
            journal.append(&entry);
        }
        entries.push(entry);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ReportEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entries(&self) -> Vec<ReportEntry> {
        self.lock().clone()
    }

    /// Command results in append order
    pub fn commands(&self) -> Vec<CommandResult> {
        self.lock()
            .iter()
            .filter_map(|entry| match entry {
                ReportEntry::Command { result, .. } => Some(result.clone()),
                ReportEntry::Issue { .. } => None,
            })
            .collect()
    }

    /// Recorded issues in append order
    pub fn issues(&self) -> Vec<(IssueKind, String)> {
        self.lock()
            .iter()
            .filter_map(|entry| match entry {
                ReportEntry::Issue { kind, detail, .. } => Some((*kind, detail.clone())),
                ReportEntry::Command { .. } => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Plain text rendering of every entry, blank line separated
    pub fn render(&self) -> String {
        self.lock()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the rendered log to `path`
    pub fn export(&self, path: &Utf8Path) -> Result<(), ReportError> {
        if self.is_empty() {
            return Err(ReportError::Empty);
        }

        let text = format!(
            "Windows 11 Optimizer Report\nGenerated: {}\n\n{}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.render()
        );
        fs::write(path, text).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Exported report with {} entries to {}", self.len(), path);
        Ok(())
    }
}
