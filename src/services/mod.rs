//! Services - side-effecting building blocks the orchestrator composes.
//!
//! # Components
//!
//! - [`CommandExecutor`]: runs one shell command with a hard time bound and
//!   always yields a [`CommandResult`](crate::models::CommandResult). Process
//!   launching sits behind the [`Launcher`] trait; [`SystemLauncher`] uses
//!   `cmd /C` on Windows and `sh -c` elsewhere.
//! - [`ReportLog`]: append-only record of command results and non-fatal
//!   [`IssueKind`]s, exportable as plain text.
//! - [`BackupCoordinator`]: registry exports and restore points as detached
//!   tasks.
//! - [`SecurityScanner`]: detects third-party endpoint security through
//!   pluggable [`EvidenceProvider`]s.
//! - [`DomainTrustDiagnostics`]: read-only domain membership report.
//!
//! Nothing here mutates the ledger; that is reserved for
//! [`crate::orchestrator`] through [`crate::state::LedgerGuard`].

pub mod backup;
pub mod diagnostics;
pub mod executor;
pub mod report;
pub mod scanner;

pub use backup::{BackupCoordinator, BackupError, RESTORE_POINT_COMMAND, SnapshotOutcome};
pub use diagnostics::{DiagnosticsError, DomainTrustDiagnostics, DomainTrustReport};
pub use executor::{CommandExecutor, DEFAULT_COMMAND_TIMEOUT, LaunchOutput, Launcher, SystemLauncher};
pub use report::{IssueKind, ReportEntry, ReportError, ReportLog};
pub use scanner::{
    EXCLUDED_SIGNATURE, EvidenceProvider, InstalledProgramsProvider, RegisteredServicesProvider,
    RunningProcessesProvider, ScanError, SecurityScanner, VENDOR_SIGNATURES, admission_warning,
};
