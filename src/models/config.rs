use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings file loaded from `Optimizer Settings.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(rename = "Optimizer_Settings", default)]
    pub optimizer: OptimizerSettings,
}

/// User-tunable behaviour of the optimizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Wall-clock bound for a single command, in seconds
    #[serde(rename = "Command Timeout", default = "default_command_timeout")]
    pub command_timeout: u64,

    #[serde(rename = "Backup Directory", default = "default_backup_dir")]
    pub backup_dir: Utf8PathBuf,

    #[serde(rename = "Log Directory", default = "default_log_dir")]
    pub log_dir: Utf8PathBuf,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    /// Request a system restore point alongside the registry backup
    #[serde(rename = "Create Restore Point", default = "default_true")]
    pub create_restore_point: bool,

    /// Domain substituted when `%USERDOMAIN%` cannot be read
    #[serde(rename = "Fallback Domain", default = "default_fallback_domain")]
    pub fallback_domain: String,

    #[serde(rename = "Domain Trust Log", default = "default_domain_trust_log")]
    pub domain_trust_log: Utf8PathBuf,

    /// Mirror every report entry to this file as it is appended
    #[serde(rename = "Report Journal", default)]
    pub report_journal: Option<Utf8PathBuf>,
}

impl OptimizerSettings {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout)
    }
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            command_timeout: default_command_timeout(),
            backup_dir: default_backup_dir(),
            log_dir: default_log_dir(),
            debug_mode: false,
            create_restore_point: true,
            fallback_domain: default_fallback_domain(),
            domain_trust_log: default_domain_trust_log(),
            report_journal: None,
        }
    }
}

fn default_command_timeout() -> u64 {
    30
}

fn default_backup_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(r"C:\Win11_Optimizer_Backup")
}

fn default_log_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("logs")
}

fn default_true() -> bool {
    true
}

fn default_fallback_domain() -> String {
    "WORKGROUP".to_string()
}

fn default_domain_trust_log() -> Utf8PathBuf {
    Utf8PathBuf::from(r"C:\Windows\DomainTrustStatus.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimizer_settings_defaults() {
        let settings = OptimizerSettings::default();
        assert_eq!(settings.command_timeout, 30);
        assert_eq!(settings.command_timeout(), Duration::from_secs(30));
        assert!(settings.create_restore_point);
        assert!(!settings.debug_mode);
        assert!(settings.report_journal.is_none());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "Optimizer_Settings:\n  Command Timeout: 5\n  Fallback Domain: CORP\n";
        let file: SettingsFile = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(file.optimizer.command_timeout, 5);
        assert_eq!(file.optimizer.fallback_domain, "CORP");
        assert_eq!(file.optimizer.log_dir, Utf8PathBuf::from("logs"));
        assert!(file.optimizer.create_restore_point);
    }
}
