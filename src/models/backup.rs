use camino::Utf8PathBuf;
use chrono::{DateTime, Local};
use std::fmt;

/// Partition of the configuration store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    User,
    Machine,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::User, Scope::Machine];

    /// Registry root key exported for this scope
    pub fn hive(&self) -> &'static str {
        match self {
            Scope::User => "HKCU",
            Scope::Machine => "HKLM",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::User => "user scope",
            Scope::Machine => "machine scope",
        })
    }
}

/// A registry export written by [`crate::services::BackupCoordinator`].
///
/// Artifacts are never deleted by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupArtifact {
    pub scope: Scope,
    pub path: Utf8PathBuf,
    pub created_at: DateTime<Local>,
}
