//! Integration tests for ConfigManager and settings handling
//!
//! These tests verify:
//! - Settings loading and saving
//! - Defaults for missing files and keys
//! - Settings flowing into an Optimizer

mod common;

use camino::Utf8PathBuf;
use common::FakeSystem;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wintweak::config::SETTINGS_FILE_NAME;
use wintweak::{ConfigManager, Optimizer, OptimizerSettings};

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
    assert_eq!(manager.settings_path(), config_path.join(SETTINGS_FILE_NAME));
}

#[test]
fn test_config_dir_is_created() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("WinTweak Data");

    ConfigManager::new(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn test_load_default_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let settings = manager.load_settings().unwrap();

    assert_eq!(settings.command_timeout(), Duration::from_secs(30));
    assert_eq!(settings.fallback_domain, "WORKGROUP");
    assert_eq!(settings.backup_dir, Utf8PathBuf::from(r"C:\Win11_Optimizer_Backup"));
    assert!(settings.create_restore_point);
}

#[test]
fn test_hand_written_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let yaml = r#"Optimizer_Settings:
  Command Timeout: 45
  Backup Directory: D:\Backups
  Debug Mode: true
  Create Restore Point: false
  Report Journal: optimizer-journal.log
"#;
    fs::write(manager.settings_path(), yaml).unwrap();

    let settings = manager.load_settings().unwrap();
    assert_eq!(settings.command_timeout, 45);
    assert_eq!(settings.backup_dir, Utf8PathBuf::from(r"D:\Backups"));
    assert!(settings.debug_mode);
    assert!(!settings.create_restore_point);
    assert_eq!(
        settings.report_journal,
        Some(Utf8PathBuf::from("optimizer-journal.log"))
    );
    // Keys not present keep their defaults
    assert_eq!(settings.fallback_domain, "WORKGROUP");
}

#[test]
fn test_settings_round_trip_through_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let settings = OptimizerSettings {
        fallback_domain: "CONTOSO".to_string(),
        report_journal: Some(config_path.join("journal.log")),
        ..Default::default()
    };
    manager.save_settings(&settings).unwrap();

    let reloaded = ConfigManager::new(&config_path)
        .unwrap()
        .load_settings()
        .unwrap();
    assert_eq!(reloaded, settings);
}

#[tokio::test]
async fn test_settings_drive_the_optimizer() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let journal = config_path.join("journal.log");
    let settings = OptimizerSettings {
        command_timeout: 7,
        report_journal: Some(journal.clone()),
        ..common::settings_in(&config_path)
    };
    manager.save_settings(&settings).unwrap();

    let optimizer = Optimizer::new(
        manager.load_settings().unwrap(),
        Arc::new(FakeSystem::new("CORP")),
    );
    assert_eq!(optimizer.executor().timeout(), Duration::from_secs(7));
    assert_eq!(optimizer.backup_dir(), config_path.join("backup"));

    optimizer.create_restore_point().await;
    // The journal is flushed once the last handle is gone
    drop(optimizer);
    let journal_text = fs::read_to_string(&journal).unwrap();
    assert!(journal_text.contains("Checkpoint-Computer"));
}
