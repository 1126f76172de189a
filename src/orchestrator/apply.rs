use super::{BackgroundTasks, run_commands};
use crate::catalog::{TemplateVars, TweakCatalog, uses_placeholder};
use crate::models::{BackupArtifact, Selection, Tier, TweakDefinition};
use crate::services::{BackupCoordinator, CommandExecutor};
use crate::state::{Notification, OrchestrationContext, OrchestrationError};
use std::sync::Arc;

/// Placeholder filled with the machine's domain
pub const DOMAIN_VAR: &str = "domain";

/// What an apply run did
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub tier: Tier,

    /// Display names of every dispatched tweak, in run order
    pub applied: Vec<String>,

    /// Dispatched tweaks with at least one failed or timed out command
    pub partially_failed: Vec<String>,

    /// Latest completed backup when the run finished
    pub backup: Option<BackupArtifact>,

    /// The snapshot started by this run was still running
    pub backup_pending: bool,

    /// At least one dispatched tweak only takes effect after a reboot
    pub requires_reboot: bool,
}

/// Applies the tier-cumulative tweak set.
///
/// Each run starts a background registry snapshot (and optionally a restore
/// point) without waiting for it, then runs every resolved tweak's forward
/// action in order. Command failures are logged and the run continues.
#[derive(Clone)]
pub struct ApplicationOrchestrator {
    pub(super) catalog: Arc<TweakCatalog>,
    pub(super) executor: CommandExecutor,
    pub(super) backups: BackupCoordinator,
    pub(super) context: OrchestrationContext,
    pub(super) background: BackgroundTasks,
    pub(super) fallback_domain: String,
    pub(super) create_restore_point: bool,
}

impl ApplicationOrchestrator {
    pub async fn apply(
        &self,
        tier: Tier,
        selection: &Selection,
    ) -> Result<ApplyReport, OrchestrationError> {
        if let Some(unknown) = selection.ids().find(|id| !self.catalog.contains(id)) {
            return Err(OrchestrationError::UnknownTweak(unknown.to_string()));
        }

        let guard = self.context.begin_apply(tier)?;

        // Record a snapshot left over from an earlier run before starting ours
        guard.reconcile_backup().await;
        guard.track_backup(self.backups.spawn_snapshot());
        if self.create_restore_point {
            self.background.push(self.backups.spawn_restore_point());
        }

        let plan = self.catalog.resolve(tier, selection);
        tracing::info!("Applying {} tweak(s) at tier {}", plan.len(), tier);

        let vars = self.template_vars(&plan).await;
        let notifier = self.context.notifier();

        let mut report = ApplyReport {
            tier,
            applied: Vec::with_capacity(plan.len()),
            partially_failed: Vec::new(),
            backup: None,
            backup_pending: false,
            requires_reboot: false,
        };

        for def in plan {
            tracing::info!("Applying {} ({})", def.name, def.id);
            let failed = run_commands(&self.executor, def.forward, &vars).await;

            guard.record_applied(def.id).await;
            self.executor.metrics().record_tweak_applied();
            notifier.send(Notification::TweakDispatched {
                id: def.id.to_string(),
                name: def.name.to_string(),
                failed_commands: failed,
            });

            if failed > 0 {
                tracing::warn!("{}: {} command(s) did not succeed", def.name, failed);
                report.partially_failed.push(def.name.to_string());
            }
            report.requires_reboot |= def.requires_reboot;
            report.applied.push(def.name.to_string());
        }

        guard.reconcile_backup().await;
        report.backup = self.context.last_backup();
        report.backup_pending = self.context.has_pending_backup();

        tracing::info!(
            "Applied {} tweak(s), {} with failures",
            report.applied.len(),
            report.partially_failed.len()
        );
        Ok(report)
    }

    /// Variables for the resolved plan; the domain is only looked up if used
    async fn template_vars(&self, plan: &[&TweakDefinition]) -> TemplateVars {
        let needs_domain = plan
            .iter()
            .flat_map(|def| def.forward.iter())
            .any(|command| uses_placeholder(command, DOMAIN_VAR));

        let mut vars = TemplateVars::new();
        if needs_domain {
            let domain = current_domain(&self.executor, &self.fallback_domain).await;
            vars.insert(DOMAIN_VAR, domain);
        }
        vars
    }
}

/// The logged-on user's domain, or `fallback` when it cannot be read
pub async fn current_domain(executor: &CommandExecutor, fallback: &str) -> String {
    let result = executor.execute("echo %USERDOMAIN%").await;
    match result.success_output() {
        Some(domain) if !domain.is_empty() && !domain.contains('%') => {
            tracing::debug!("Current domain: {}", domain);
            domain.to_string()
        }
        _ => {
            tracing::warn!("Could not determine the current domain, using {}", fallback);
            fallback.to_string()
        }
    }
}
