//! Shared fixtures for the integration tests.
//!
//! [`FakeSystem`] stands in for the Windows registry and service manager so
//! apply/restore round trips can be observed on any platform.

#![allow(dead_code)]

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Arc, LazyLock, Mutex};
use tempfile::TempDir;
use wintweak::models::OptimizerSettings;
use wintweak::services::{LaunchOutput, Launcher, ReportLog, SecurityScanner};
use wintweak::Optimizer;

static REG_ADD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^reg add "([^"]+)" (?:/v "([^"]+)"|/ve) /t (\S+) /d (?:"([^"]*)"|(\S+)) /f$"#)
        .unwrap()
});
static REG_DELETE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^reg delete "([^"]+)" /v "([^"]+)" /f$"#).unwrap());
static REG_EXPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^reg export (\S+) "([^"]+)"$"#).unwrap());
static SC_CONFIG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sc config (\S+) start= (\S+)$").unwrap());

/// Registry value address: lowercased key path and value name (empty for the default value)
pub type ValueKey = (String, String);

pub fn value_key(key: &str, name: &str) -> ValueKey {
    (key.to_lowercase(), name.to_lowercase())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    pub values: BTreeMap<ValueKey, String>,
    pub services: BTreeMap<String, String>,
}

#[derive(Default)]
struct Inner {
    state: StoreState,
    commands: Vec<String>,
    failing: Vec<String>,
}

/// In-memory configuration store that interprets `reg` and `sc config`.
///
/// Other commands succeed without effect. `reg export` writes a small file
/// so backup artifacts exist on disk, and fails if that file already exists.
pub struct FakeSystem {
    domain: String,
    inner: Mutex<Inner>,
}

impl FakeSystem {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Commands containing `fragment` exit with code 1
    pub fn fail_on(&self, fragment: &str) {
        self.inner.lock().unwrap().failing.push(fragment.to_string());
    }

    pub fn set_value(&self, key: &str, name: &str, data: &str) {
        self.inner
            .lock()
            .unwrap()
            .state
            .values
            .insert(value_key(key, name), data.to_string());
    }

    pub fn value(&self, key: &str, name: &str) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .state
            .values
            .get(&value_key(key, name))
            .cloned()
    }

    pub fn service(&self, name: &str) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .state
            .services
            .get(&name.to_lowercase())
            .cloned()
    }

    pub fn state(&self) -> StoreState {
        self.inner.lock().unwrap().state.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.inner.lock().unwrap().commands.clone()
    }

    /// Interpret one command against the store
    pub fn run(&self, command: &str) -> LaunchOutput {
        let mut inner = self.inner.lock().unwrap();
        inner.commands.push(command.to_string());

        if inner.failing.iter().any(|fragment| command.contains(fragment.as_str())) {
            return LaunchOutput::failed(1, "Access is denied.");
        }

        if command == "echo %USERDOMAIN%" {
            return LaunchOutput::ok(format!("{}\r\n", self.domain));
        }

        if let Some(caps) = REG_ADD.captures(command) {
            let name = caps.get(2).map_or("", |m| m.as_str());
            let data = caps
                .get(4)
                .or_else(|| caps.get(5))
                .map_or("", |m| m.as_str());
            inner
                .state
                .values
                .insert(value_key(&caps[1], name), data.to_string());
            return LaunchOutput::ok("The operation completed successfully.");
        }

        if let Some(caps) = REG_DELETE.captures(command) {
            return match inner.state.values.remove(&value_key(&caps[1], &caps[2])) {
                Some(_) => LaunchOutput::ok("The operation completed successfully."),
                None => LaunchOutput::failed(
                    1,
                    "ERROR: The system was unable to find the specified registry key or value.",
                ),
            };
        }

        if let Some(caps) = SC_CONFIG.captures(command) {
            inner
                .state
                .services
                .insert(caps[1].to_lowercase(), caps[2].to_string());
            return LaunchOutput::ok("[SC] ChangeServiceConfig SUCCESS");
        }

        if let Some(caps) = REG_EXPORT.captures(command) {
            // Without /y an existing file is never replaced
            let written = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&caps[2])
                .and_then(|mut file| {
                    write!(file, "Windows Registry Editor Version 5.00\n\n[{}]\n", &caps[1])
                });
            return match written {
                Ok(()) => LaunchOutput::ok("The operation completed successfully."),
                Err(e) => LaunchOutput::failed(1, e.to_string()),
            };
        }

        LaunchOutput::ok("")
    }
}

#[async_trait]
impl Launcher for FakeSystem {
    async fn launch(&self, command: &str) -> std::io::Result<LaunchOutput> {
        Ok(self.run(command))
    }
}

pub fn utf8(path: &std::path::Path) -> Utf8PathBuf {
    Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
}

/// Settings pointing every path into `dir`
pub fn settings_in(dir: &Utf8Path) -> OptimizerSettings {
    OptimizerSettings {
        command_timeout: 5,
        backup_dir: dir.join("backup"),
        log_dir: dir.join("logs"),
        create_restore_point: false,
        domain_trust_log: dir.join("DomainTrustStatus.log"),
        ..Default::default()
    }
}

/// Optimizer over `system` that finds no security products
pub fn optimizer_over(system: &Arc<FakeSystem>, settings: OptimizerSettings) -> Optimizer {
    Optimizer::new(settings, system.clone())
        .with_scanner(SecurityScanner::new(Vec::new(), ReportLog::new()))
}

pub struct Harness {
    pub optimizer: Optimizer,
    pub system: Arc<FakeSystem>,
    pub dir: Utf8PathBuf,
    _temp: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(|_| {})
    }

    pub fn with_settings(tweak: impl FnOnce(&mut OptimizerSettings)) -> Self {
        let temp = TempDir::new().unwrap();
        let dir = utf8(temp.path());
        let mut settings = settings_in(&dir);
        tweak(&mut settings);

        let system = Arc::new(FakeSystem::new("CORP"));
        let optimizer = optimizer_over(&system, settings);

        Self {
            optimizer,
            system,
            dir,
            _temp: temp,
        }
    }
}
