use crate::models::{BackupArtifact, Scope};
use crate::services::executor::CommandExecutor;
use crate::services::report::IssueKind;
use crate::state::{Notification, Notifier};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio::task::JoinHandle;

/// Checkpoint requested before applying tweaks
pub const RESTORE_POINT_COMMAND: &str = r#"powershell -Command "Checkpoint-Computer -Description \"Win11Optimizer Backup\" -RestorePointType \"MODIFY_SETTINGS\"""#;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Failed to create backup directory {path}: {source}")]
    CreateDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to export {scope}: {detail}")]
    Export { scope: Scope, detail: String },

    #[error("No registry scope could be exported")]
    NothingExported,
}

/// Result of one snapshot of both scopes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotOutcome {
    pub artifacts: Vec<BackupArtifact>,
    pub failures: Vec<(Scope, String)>,
}

impl SnapshotOutcome {
    /// The artifact exposed as the last backup: user scope when available
    pub fn preferred(&self) -> Option<&BackupArtifact> {
        self.artifacts
            .iter()
            .find(|artifact| artifact.scope == Scope::User)
            .or_else(|| self.artifacts.first())
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && !self.artifacts.is_empty()
    }
}

/// Exports the registry and requests restore points off the caller's path.
///
/// Failures never propagate out of the background tasks: they are written to
/// the report log as [`IssueKind::BackupFailure`] or
/// [`IssueKind::RestorePointFailure`] and broadcast as notifications.
#[derive(Clone)]
pub struct BackupCoordinator {
    executor: CommandExecutor,
    backup_dir: Utf8PathBuf,
    notifier: Notifier,
    /// Stems handed out to snapshots of this process, finished or not
    claimed: Arc<Mutex<HashSet<String>>>,
}

impl BackupCoordinator {
    pub fn new(
        executor: CommandExecutor,
        backup_dir: impl Into<Utf8PathBuf>,
        notifier: Notifier,
    ) -> Self {
        Self {
            executor,
            backup_dir: backup_dir.into(),
            notifier,
            claimed: Arc::default(),
        }
    }

    pub fn backup_dir(&self) -> &Utf8Path {
        &self.backup_dir
    }

    /// `<dir>/<HIVE>_<stem>.reg`
    pub fn artifact_path(&self, scope: Scope, stem: &str) -> Utf8PathBuf {
        self.backup_dir.join(format!("{}_{}.reg", scope.hive(), stem))
    }

    /// Reserve a file stem for one snapshot taken at `at`.
    ///
    /// The stem is `YYYYmmdd_HHMMSS_mmm`, with `_N` appended when an earlier
    /// snapshot already claimed it or left a file with that name. Both scopes
    /// of a snapshot share the stem, so every snapshot gets its own pair.
    pub fn claim_stem(&self, at: DateTime<Local>) -> String {
        let base = at.format("%Y%m%d_%H%M%S_%3f").to_string();
        let mut claimed = self.claimed.lock().unwrap_or_else(PoisonError::into_inner);

        let mut stem = base.clone();
        let mut suffix = 1;
        while claimed.contains(&stem)
            || Scope::ALL
                .iter()
                .any(|scope| self.artifact_path(*scope, &stem).exists())
        {
            stem = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        claimed.insert(stem.clone());
        stem
    }

    /// Export one scope to the file named by `stem`.
    ///
    /// The export never overwrites: `reg export` fails if the file exists.
    pub async fn export_scope(
        &self,
        scope: Scope,
        stem: &str,
        at: DateTime<Local>,
    ) -> Result<BackupArtifact, BackupError> {
        let path = self.artifact_path(scope, stem);
        let command = format!(r#"reg export {} "{}""#, scope.hive(), path);
        let result = self.executor.execute(&command).await;

        if result.is_success() {
            Ok(BackupArtifact {
                scope,
                path,
                created_at: at,
            })
        } else {
            Err(BackupError::Export {
                scope,
                detail: result.diagnostic,
            })
        }
    }

    /// Export both scopes. A failing scope does not stop the other.
    pub async fn snapshot(&self) -> SnapshotOutcome {
        let mut outcome = SnapshotOutcome::default();

        if let Err(source) = tokio::fs::create_dir_all(&self.backup_dir).await {
            let error = BackupError::CreateDir {
                path: self.backup_dir.clone(),
                source,
            };
            for scope in Scope::ALL {
                self.report_failure(scope, &error);
                outcome.failures.push((scope, error.to_string()));
            }
            return outcome;
        }

        let at = Local::now();
        let stem = self.claim_stem(at);
        for scope in Scope::ALL {
            match self.export_scope(scope, &stem, at).await {
                Ok(artifact) => {
                    tracing::info!("Backed up {} to {}", scope, artifact.path);
                    self.executor.metrics().record_backup_completed();
                    self.notifier.send(Notification::BackupCompleted {
                        artifact: artifact.clone(),
                    });
                    outcome.artifacts.push(artifact);
                }
                Err(e) => {
                    self.report_failure(scope, &e);
                    outcome.failures.push((scope, e.to_string()));
                }
            }
        }

        outcome
    }

    fn report_failure(&self, scope: Scope, error: &BackupError) {
        tracing::error!("Backup of {} failed: {}", scope, error);
        self.executor.metrics().record_backup_failed();
        self.executor
            .report()
            .record_issue(IssueKind::BackupFailure, error.to_string());
        self.notifier.send(Notification::BackupFailed {
            scope,
            detail: error.to_string(),
        });
    }

    /// Run [`snapshot`](Self::snapshot) as a detached task
    pub fn spawn_snapshot(&self) -> JoinHandle<SnapshotOutcome> {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.snapshot().await })
    }

    /// Request a system restore point. Returns whether it was created.
    pub async fn create_restore_point(&self) -> bool {
        let result = self.executor.execute(RESTORE_POINT_COMMAND).await;

        if result.is_success() {
            tracing::info!("System restore point created");
            self.notifier.send(Notification::RestorePointCreated);
            true
        } else {
            tracing::warn!("Could not create restore point: {}", result.diagnostic);
            self.executor
                .report()
                .record_issue(IssueKind::RestorePointFailure, result.diagnostic.clone());
            self.notifier.send(Notification::RestorePointFailed {
                detail: result.diagnostic,
            });
            false
        }
    }

    /// Run [`create_restore_point`](Self::create_restore_point) as a detached task
    pub fn spawn_restore_point(&self) -> JoinHandle<bool> {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.create_restore_point().await })
    }
}
