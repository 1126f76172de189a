//! Apply and restore runs, and the [`Optimizer`] handle that wires them up.
//!
//! Every run takes the single orchestration permit from
//! [`OrchestrationContext`] for its whole duration, so apply and restore never
//! interleave. Commands inside a run are executed strictly one after another.

pub mod apply;
pub mod restore;

pub use apply::{ApplicationOrchestrator, ApplyReport, DOMAIN_VAR, current_domain};
pub use restore::{RestorePlanner, RestoreReport};

use crate::catalog::{TemplateVars, TweakCatalog};
use crate::metrics::Metrics;
use crate::models::{BackupArtifact, OptimizerSettings, ScanMatch, Selection, Tier};
use crate::services::{
    BackupCoordinator, BackupError, CommandExecutor, DiagnosticsError, DomainTrustDiagnostics,
    DomainTrustReport, Launcher, ReportLog, SecurityScanner, SystemLauncher,
};
use crate::state::{LedgerStore, Notification, OrchestrationContext, OrchestrationError};
use camino::Utf8PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Run `commands` in order, rendering each with `vars`.
///
/// Returns how many did not succeed. A failing command never stops the rest.
pub(crate) async fn run_commands(
    executor: &CommandExecutor,
    commands: &[&str],
    vars: &TemplateVars,
) -> usize {
    let mut failed = 0;
    for template in commands {
        let command = vars.render(template);
        if !executor.execute(&command).await.is_success() {
            failed += 1;
        }
    }
    failed
}

/// Restore point requests still running in the background
#[derive(Clone, Default)]
pub(crate) struct BackgroundTasks(Arc<Mutex<Vec<JoinHandle<bool>>>>);

impl BackgroundTasks {
    pub(crate) fn push(&self, handle: JoinHandle<bool>) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }

    async fn settle(&self) -> Vec<bool> {
        let handles: Vec<_> = self
            .0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(created) => results.push(created),
                Err(e) => {
                    tracing::error!("Restore point task did not complete: {}", e);
                    results.push(false);
                }
            }
        }
        results
    }
}

/// Entry point for callers: one handle per machine.
///
/// Cloning shares everything, including the ledger and the report log.
#[derive(Clone)]
pub struct Optimizer {
    catalog: Arc<TweakCatalog>,
    executor: CommandExecutor,
    context: OrchestrationContext,
    backups: BackupCoordinator,
    scanner: Arc<SecurityScanner>,
    background: BackgroundTasks,
    settings: OptimizerSettings,
}

impl Optimizer {
    /// Build an optimizer that launches commands through `launcher`
    pub fn new(settings: OptimizerSettings, launcher: Arc<dyn Launcher>) -> Self {
        let metrics = Arc::new(Metrics::new());
        let report = match &settings.report_journal {
            Some(journal) => ReportLog::with_journal(journal.clone()).unwrap_or_else(|e| {
                tracing::warn!("{}, continuing without a journal", e);
                ReportLog::new()
            }),
            None => ReportLog::new(),
        };

        let executor = CommandExecutor::new(launcher, report)
            .with_timeout(settings.command_timeout())
            .with_metrics(Arc::clone(&metrics));
        let context = OrchestrationContext::with_metrics(metrics);
        let backups = BackupCoordinator::new(
            executor.clone(),
            settings.backup_dir.clone(),
            context.notifier().clone(),
        );
        let scanner = Arc::new(SecurityScanner::system(executor.clone()));

        Self {
            catalog: Arc::new(TweakCatalog::builtin()),
            executor,
            context,
            backups,
            scanner,
            background: BackgroundTasks::default(),
            settings,
        }
    }

    /// Optimizer running real processes on this machine
    pub fn system(settings: OptimizerSettings) -> Self {
        Self::new(settings, Arc::new(SystemLauncher))
    }

    pub fn with_catalog(mut self, catalog: TweakCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn with_scanner(mut self, scanner: SecurityScanner) -> Self {
        self.scanner = Arc::new(scanner);
        self
    }

    /// Keep the ledger in `store`, picking up what earlier processes left there.
    ///
    /// Without a store the ledger lives only as long as this handle, and a
    /// restore from a later process only runs the baseline reset.
    pub fn with_ledger(self, store: LedgerStore) -> Result<Self, OrchestrationError> {
        self.context.attach_ledger(store)?;
        Ok(self)
    }

    pub fn applier(&self) -> ApplicationOrchestrator {
        ApplicationOrchestrator {
            catalog: Arc::clone(&self.catalog),
            executor: self.executor.clone(),
            backups: self.backups.clone(),
            context: self.context.clone(),
            background: self.background.clone(),
            fallback_domain: self.settings.fallback_domain.clone(),
            create_restore_point: self.settings.create_restore_point,
        }
    }

    pub fn planner(&self) -> RestorePlanner {
        RestorePlanner {
            catalog: Arc::clone(&self.catalog),
            executor: self.executor.clone(),
            context: self.context.clone(),
        }
    }

    /// Apply the selected tweaks of every tier up to `tier`
    pub async fn apply(
        &self,
        tier: Tier,
        selection: &Selection,
    ) -> Result<ApplyReport, OrchestrationError> {
        self.applier().apply(tier, selection).await
    }

    /// Revert every tracked tweak and reset the baseline groups
    pub async fn restore_all(&self) -> Result<RestoreReport, OrchestrationError> {
        self.planner().restore_all().await
    }

    /// Export both registry scopes now and record the result as the last backup
    pub async fn backup_now(&self) -> Result<BackupArtifact, OrchestrationError> {
        let guard = self.context.begin_backup()?;
        let outcome = self.backups.snapshot().await;

        let artifact = outcome
            .preferred()
            .cloned()
            .ok_or(BackupError::NothingExported)?;
        guard.record_backup(artifact.clone());
        Ok(artifact)
    }

    /// Request a system restore point and wait for the answer
    pub async fn create_restore_point(&self) -> bool {
        self.backups.create_restore_point().await
    }

    /// Wait for background backup work started by earlier runs.
    ///
    /// Records the pending snapshot, if any, as the last backup. Returns the
    /// newly recorded artifact.
    pub async fn settle(&self) -> Result<Option<BackupArtifact>, OrchestrationError> {
        let guard = self.context.begin_backup()?;
        let artifact = guard.wait_for_backup().await;
        drop(guard);

        let restore_points = self.background.settle().await;
        if !restore_points.is_empty() {
            tracing::debug!(
                "{} of {} restore point request(s) succeeded",
                restore_points.iter().filter(|created| **created).count(),
                restore_points.len()
            );
        }
        Ok(artifact)
    }

    /// Run the read-only domain trust checks and save the report
    pub async fn verify_domain_trust(&self) -> Result<DomainTrustReport, DiagnosticsError> {
        DomainTrustDiagnostics::new(self.executor.clone(), self.settings.domain_trust_log.clone())
            .verify()
            .await
    }

    /// Look for third-party endpoint security products
    pub async fn scan(&self) -> Vec<ScanMatch> {
        self.scanner.scan().await
    }

    pub fn catalog(&self) -> &TweakCatalog {
        &self.catalog
    }

    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    pub fn report(&self) -> &ReportLog {
        self.executor.report()
    }

    pub fn context(&self) -> &OrchestrationContext {
        &self.context
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        self.executor.metrics()
    }

    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    pub fn backup_dir(&self) -> Utf8PathBuf {
        self.backups.backup_dir().to_path_buf()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.context.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LaunchOutput;
    use async_trait::async_trait;

    struct Domain(&'static str);

    #[async_trait]
    impl Launcher for Domain {
        async fn launch(&self, command: &str) -> std::io::Result<LaunchOutput> {
            if command == "echo %USERDOMAIN%" {
                Ok(LaunchOutput::ok(format!("{}\r\n", self.0)))
            } else if command.contains("fail") {
                Ok(LaunchOutput::failed(1, ""))
            } else {
                Ok(LaunchOutput::ok(""))
            }
        }
    }

    fn executor(domain: &'static str) -> CommandExecutor {
        CommandExecutor::new(Arc::new(Domain(domain)), ReportLog::new())
    }

    #[tokio::test]
    async fn test_run_commands_counts_failures_and_continues() {
        let executor = executor("CORP");
        let vars = TemplateVars::new().with("domain", "CORP");

        let failed = run_commands(
            &executor,
            &["echo one", "fail {{domain}}", "echo three"],
            &vars,
        )
        .await;

        assert_eq!(failed, 1);
        let commands: Vec<_> = executor
            .report()
            .commands()
            .into_iter()
            .map(|result| result.command)
            .collect();
        assert_eq!(commands, vec!["echo one", "fail CORP", "echo three"]);
    }

    #[tokio::test]
    async fn test_current_domain_reads_userdomain() {
        assert_eq!(current_domain(&executor("CORP"), "WORKGROUP").await, "CORP");
    }

    #[tokio::test]
    async fn test_current_domain_falls_back_when_unexpanded() {
        assert_eq!(
            current_domain(&executor("%USERDOMAIN%"), "WORKGROUP").await,
            "WORKGROUP"
        );
        assert_eq!(current_domain(&executor(""), "WORKGROUP").await, "WORKGROUP");
    }
}
