use crate::models::{OptimizerSettings, SettingsFile};
use crate::state::{LEDGER_FILE_NAME, LedgerStore};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Settings file name inside the configuration directory
pub const SETTINGS_FILE_NAME: &str = "Optimizer Settings.yaml";

/// Loads and saves `Optimizer Settings.yaml`.
///
/// A missing file is not an error: defaults are returned and the file is
/// only written by [`save_settings`](Self::save_settings).
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a manager for `config_dir`, creating the directory if needed
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
        })
    }

    /// Load the settings, or defaults if the file doesn't exist
    pub fn load_settings(&self) -> Result<OptimizerSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(OptimizerSettings::default());
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        // An empty file deserializes to nothing at all
        if file_contents.trim().is_empty() {
            tracing::warn!("Settings file {} is empty, using defaults", self.settings_path);
            return Ok(OptimizerSettings::default());
        }

        let file: SettingsFile = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(file.optimizer)
    }

    pub fn save_settings(&self, settings: &OptimizerSettings) -> Result<()> {
        let file = SettingsFile {
            optimizer: settings.clone(),
        };
        let yaml_string =
            serde_yaml_ng::to_string(&file).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Store for the applied-tweak ledger, next to the settings file
    pub fn ledger_store(&self) -> LedgerStore {
        LedgerStore::new(self.config_dir.join(LEDGER_FILE_NAME))
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        assert!(!manager.settings_path().exists());
        assert_eq!(manager.load_settings().unwrap(), OptimizerSettings::default());
    }

    #[test]
    fn test_load_save_settings() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = OptimizerSettings {
            command_timeout: 12,
            fallback_domain: "CORP".to_string(),
            create_restore_point: false,
            ..Default::default()
        };
        manager.save_settings(&settings).unwrap();

        let contents = fs::read_to_string(manager.settings_path()).unwrap();
        assert!(contents.contains("Optimizer_Settings"));
        assert!(contents.contains("Command Timeout: 12"));

        assert_eq!(manager.load_settings().unwrap(), settings);
    }

    #[test]
    fn test_ledger_lives_next_to_settings() {
        let (manager, _temp_dir) = create_test_config_manager();
        let store = manager.ledger_store();
        assert_eq!(store.path().parent(), Some(manager.config_dir()));
        assert_eq!(store.path().file_name(), Some("Applied Tweaks.yaml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::write(manager.settings_path(), "\n").unwrap();
        assert_eq!(manager.load_settings().unwrap(), OptimizerSettings::default());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::write(manager.settings_path(), "Optimizer_Settings: [unclosed").unwrap();

        let err = manager.load_settings().unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings"));
    }
}
