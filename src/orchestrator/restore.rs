use super::run_commands;
use crate::catalog::{TemplateVars, TweakCatalog};
use crate::services::{CommandExecutor, IssueKind};
use crate::state::{Notification, OrchestrationContext, OrchestrationError};
use std::sync::Arc;

/// What a restore run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Display names of tweaks whose inverse was run, in ledger order
    pub restored: Vec<String>,

    /// Ledger identifiers without an inverse
    pub missing_inverse: Vec<String>,

    /// Baseline groups re-applied afterwards
    pub baseline: Vec<&'static str>,
}

/// Reverts tracked tweaks, then resets the baseline groups.
///
/// Runs every inverse for the ledger in order, reports entries without one,
/// re-applies [`BASELINE_RESET`](crate::catalog::BASELINE_RESET)
/// unconditionally and finally empties the ledger.
#[derive(Clone)]
pub struct RestorePlanner {
    pub(super) catalog: Arc<TweakCatalog>,
    pub(super) executor: CommandExecutor,
    pub(super) context: OrchestrationContext,
}

impl RestorePlanner {
    pub async fn restore_all(&self) -> Result<RestoreReport, OrchestrationError> {
        let guard = self.context.begin_restore()?;
        let notifier = self.context.notifier();
        let vars = TemplateVars::new();
        let mut report = RestoreReport::default();

        let ledger = guard.ledger();
        tracing::info!("Restoring {} tracked tweak(s)", ledger.len());

        for id in ledger {
            let def = self.catalog.get(&id);
            match def.and_then(|def| def.inverse) {
                Some(inverse) if !inverse.is_empty() => {
                    let name = def.map_or(id.as_str(), |def| def.name);
                    tracing::info!("Restoring {}", name);
                    run_commands(&self.executor, inverse, &vars).await;
                    self.executor.metrics().record_tweak_restored();
                    report.restored.push(name.to_string());
                }
                _ => {
                    tracing::warn!("No inverse for '{}', relying on the baseline reset", id);
                    self.executor
                        .report()
                        .record_issue(IssueKind::RestoreInverseMissing, id.clone());
                    self.executor.metrics().record_inverse_missing();
                    notifier.send(Notification::InverseMissing { id: id.clone() });
                    report.missing_inverse.push(id);
                }
            }
        }

        for group in self.catalog.baseline() {
            tracing::info!("Resetting {} to defaults", group.name);
            run_commands(&self.executor, group.commands, &vars).await;
            report.baseline.push(group.name);
        }

        guard.clear_ledger().await;
        tracing::info!(
            "Restore complete: {} reverted, {} without inverse, {} baseline group(s)",
            report.restored.len(),
            report.missing_inverse.len(),
            report.baseline.len()
        );
        Ok(report)
    }
}
