use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Ledger file name inside the configuration directory
pub const LEDGER_FILE_NAME: &str = "Applied Tweaks.yaml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(rename = "Applied_Tweaks", default)]
    applied: IndexSet<String>,
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to read ledger {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse ledger {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Failed to serialize ledger: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("Failed to write ledger {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// YAML copy of the applied-tweak ledger, so a restore in a later process
/// still knows what an earlier apply changed.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: Utf8PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read the stored ledger. A missing or empty file is an empty ledger.
    pub fn load(&self) -> Result<IndexSet<String>, LedgerError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(IndexSet::new()),
            Err(source) => {
                return Err(LedgerError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(IndexSet::new());
        }

        let file: LedgerFile =
            serde_yaml_ng::from_str(&contents).map_err(|source| LedgerError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!("Loaded {} tracked tweak(s) from {}", file.applied.len(), self.path);
        Ok(file.applied)
    }

    /// Replace the stored ledger with `ledger`.
    ///
    /// Written to a sibling file first and renamed over the old one, so a
    /// crash mid-write leaves the previous ledger readable.
    pub async fn save(&self, ledger: &IndexSet<String>) -> Result<(), LedgerError> {
        let file = LedgerFile {
            applied: ledger.clone(),
        };
        let yaml = serde_yaml_ng::to_string(&file).map_err(LedgerError::Serialize)?;

        let staging = self.path.with_extension("yaml.tmp");
        let write_error = |source| LedgerError::Write {
            path: self.path.clone(),
            source,
        };
        tokio::fs::write(&staging, yaml).await.map_err(write_error)?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(write_error)?;

        tracing::debug!("Saved {} tracked tweak(s) to {}", ledger.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> LedgerStore {
        let dir = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
        LedgerStore::new(dir.join(LEDGER_FILE_NAME))
    }

    #[test]
    fn test_missing_or_empty_file_is_empty_ledger() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert!(store.load().unwrap().is_empty());

        fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_order() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let ledger: IndexSet<String> = ["disable_timeline", "disable_cortana", "disable_game_bar"]
            .into_iter()
            .map(String::from)
            .collect();

        store.save(&ledger).await.unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("Applied_Tweaks:"));
        assert_eq!(store.load().unwrap(), ledger);
        assert!(!store.path().with_extension("yaml.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_contents() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let ledger: IndexSet<String> = ["disable_cortana".to_string()].into_iter().collect();

        store.save(&ledger).await.unwrap();
        store.save(&IndexSet::new()).await.unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.path(), "Applied_Tweaks: [unclosed").unwrap();

        assert!(matches!(store.load(), Err(LedgerError::Parse { .. })));
    }
}
