//! Data models for the optimizer.
//!
//! - [`TweakDefinition`], [`Tier`], [`Selection`]: the catalog vocabulary
//! - [`CommandResult`], [`Outcome`]: the record of one executed command
//! - [`BackupArtifact`], [`Scope`]: registry exports
//! - [`ScanMatch`], [`Evidence`], [`VendorSignature`]: security scan results
//! - [`OptimizerSettings`]: user settings loaded from `Optimizer Settings.yaml`
//!
//! Models carry no behaviour beyond small helpers; the services and the
//! orchestrator own all side effects.

pub mod backup;
pub mod command;
pub mod config;
pub mod scan;
pub mod tweak;

pub use backup::{BackupArtifact, Scope};
pub use command::{CommandResult, Outcome};
pub use config::{OptimizerSettings, SettingsFile};
pub use scan::{Evidence, EvidenceSource, ScanMatch, VendorSignature};
pub use tweak::{Selection, Tier, TweakDefinition};

/// Maximum number of apply/restore runs in flight at once.
///
/// Both mutate the applied-tweak ledger and the same registry keys, so runs
/// are strictly serialized. Enforced by
/// [`OrchestrationContext`](crate::state::OrchestrationContext).
pub const MAX_CONCURRENT_ORCHESTRATIONS: usize = 1;
