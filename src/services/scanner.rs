//! Security product detection used as the admission gate.
//!
//! Three [`EvidenceProvider`]s each return raw text lines (program display
//! names, process names, service listing lines). The [`SecurityScanner`]
//! matches every line against [`VENDOR_SIGNATURES`] and merges the hits by
//! vendor. A provider that cannot be queried is skipped and recorded as
//! [`IssueKind::ScanSourceUnavailable`].

use crate::models::{Evidence, EvidenceSource, ScanMatch, VendorSignature};
use crate::services::executor::CommandExecutor;
use crate::services::report::{IssueKind, ReportLog};
use async_trait::async_trait;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use sysinfo::{ProcessesToUpdate, System};
use thiserror::Error;

/// Third-party endpoint security products known to conflict with the tweaks
pub const VENDOR_SIGNATURES: &[VendorSignature] = &[
    VendorSignature {
        vendor: "Sophos",
        aliases: &["Sophos", "Sophos Endpoint", "Sophos Anti-Virus", "Sophos Endpoint Defense"],
    },
    VendorSignature {
        vendor: "McAfee",
        aliases: &["McAfee", "VirusScan", "Endpoint Security", "McAfee Agent"],
    },
    VendorSignature {
        vendor: "Norton",
        aliases: &["Norton", "Symantec", "Norton Security", "Symantec Endpoint"],
    },
    VendorSignature {
        vendor: "Kaspersky",
        aliases: &["Kaspersky", "Kaspersky Endpoint", "Kaspersky Security"],
    },
    VendorSignature {
        vendor: "Trend Micro",
        aliases: &["Trend Micro", "OfficeScan", "Trend Micro Apex One"],
    },
    VendorSignature {
        vendor: "ESET",
        aliases: &["ESET", "ESET Endpoint", "ESET Security"],
    },
    VendorSignature {
        vendor: "CrowdStrike",
        aliases: &["CrowdStrike", "Falcon"],
    },
    VendorSignature {
        vendor: "SentinelOne",
        aliases: &["SentinelOne", "Sentinel Agent"],
    },
    VendorSignature {
        vendor: "Carbon Black",
        aliases: &["Carbon Black", "CB Defense", "VMware Carbon Black"],
    },
    VendorSignature {
        vendor: "Bitdefender",
        aliases: &["Bitdefender", "Bitdefender Endpoint", "Bitdefender GravityZone"],
    },
    VendorSignature {
        vendor: "Avast",
        aliases: &["Avast", "Avast Business", "AVG Business"],
    },
    VendorSignature {
        vendor: "AVG",
        aliases: &["AVG", "AVG Business"],
    },
    VendorSignature {
        vendor: "Webroot",
        aliases: &["Webroot", "Webroot SecureAnywhere"],
    },
    VendorSignature {
        vendor: "Malwarebytes",
        aliases: &["Malwarebytes", "Malwarebytes Endpoint"],
    },
    VendorSignature {
        vendor: "Cylance",
        aliases: &["Cylance", "CylancePROTECT"],
    },
    VendorSignature {
        vendor: "FireEye",
        aliases: &["FireEye", "FireEye Endpoint", "FireEye HX"],
    },
    VendorSignature {
        vendor: "Check Point",
        aliases: &["Check Point", "ZoneAlarm", "Endpoint Security"],
    },
    VendorSignature {
        vendor: "Panda",
        aliases: &["Panda", "Panda Security"],
    },
    VendorSignature {
        vendor: "Comodo",
        aliases: &["Comodo", "Comodo Security"],
    },
];

/// The platform's built-in protection. Evidence matching it is dropped.
pub const EXCLUDED_SIGNATURE: VendorSignature = VendorSignature {
    vendor: "Microsoft Defender",
    aliases: &[
        "Microsoft Defender",
        "Windows Defender",
        "MsMpEng",
        "WinDefend",
        "MpDefenderCoreService",
        "Windows Security",
    ],
};

const UNINSTALL_KEYS: [&str; 2] = [
    r"HKLM\SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall",
    r"HKLM\SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall",
];

static DISPLAY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*DisplayName\s+REG_\w+\s+(.+?)\s*$").expect("Invalid DisplayName regex")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("{evidence} source unavailable: {reason}")]
    SourceUnavailable {
        evidence: EvidenceSource,
        reason: String,
    },
}

/// One independent place to look for security products
#[async_trait]
pub trait EvidenceProvider: Send + Sync {
    fn source(&self) -> EvidenceSource;

    /// Raw text lines to match against vendor aliases
    async fn collect(&self) -> Result<Vec<String>, ScanError>;
}

/// Display names of installed programs, native and 32-bit uninstall keys
pub struct InstalledProgramsProvider {
    executor: CommandExecutor,
}

impl InstalledProgramsProvider {
    pub fn new(executor: CommandExecutor) -> Self {
        Self { executor }
    }
}

/// Extract `DisplayName` values from `reg query /s /v DisplayName` output
pub fn parse_display_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| DISPLAY_NAME.captures(line))
        .map(|caps| caps[1].to_string())
        .collect()
}

#[async_trait]
impl EvidenceProvider for InstalledProgramsProvider {
    fn source(&self) -> EvidenceSource {
        EvidenceSource::InstalledPrograms
    }

    async fn collect(&self) -> Result<Vec<String>, ScanError> {
        let mut names = Vec::new();
        let mut failures = Vec::new();

        for key in UNINSTALL_KEYS {
            let result = self
                .executor
                .execute(&format!(r#"reg query "{}" /s /v DisplayName"#, key))
                .await;
            match result.success_output() {
                Some(output) => names.extend(parse_display_names(output)),
                None => failures.push(format!("{}: {}", key, result.diagnostic)),
            }
        }

        if failures.len() == UNINSTALL_KEYS.len() {
            return Err(ScanError::SourceUnavailable {
                evidence: self.source(),
                reason: failures.join("; "),
            });
        }
        Ok(names)
    }
}

/// Names of running processes
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningProcessesProvider;

#[async_trait]
impl EvidenceProvider for RunningProcessesProvider {
    fn source(&self) -> EvidenceSource {
        EvidenceSource::RunningProcesses
    }

    async fn collect(&self) -> Result<Vec<String>, ScanError> {
        let names = tokio::task::spawn_blocking(|| {
            let mut system = System::new();
            system.refresh_processes(ProcessesToUpdate::All, true);
            system
                .processes()
                .values()
                .map(|process| process.name().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| ScanError::SourceUnavailable {
            evidence: self.source(),
            reason: e.to_string(),
        })?;

        if names.is_empty() {
            return Err(ScanError::SourceUnavailable {
                evidence: self.source(),
                reason: "process list is empty".to_string(),
            });
        }
        Ok(names)
    }
}

/// Lines of the `sc query` service listing
pub struct RegisteredServicesProvider {
    executor: CommandExecutor,
}

impl RegisteredServicesProvider {
    pub fn new(executor: CommandExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl EvidenceProvider for RegisteredServicesProvider {
    fn source(&self) -> EvidenceSource {
        EvidenceSource::RegisteredServices
    }

    async fn collect(&self) -> Result<Vec<String>, ScanError> {
        let result = self.executor.execute("sc query").await;
        match result.success_output() {
            Some(output) => Ok(output
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            None => Err(ScanError::SourceUnavailable {
                evidence: self.source(),
                reason: result.diagnostic,
            }),
        }
    }
}

/// Merges evidence from every provider into one match per vendor
pub struct SecurityScanner {
    providers: Vec<Arc<dyn EvidenceProvider>>,
    report: ReportLog,
}

impl SecurityScanner {
    pub fn new(providers: Vec<Arc<dyn EvidenceProvider>>, report: ReportLog) -> Self {
        Self { providers, report }
    }

    /// Scanner over installed programs, running processes and services
    pub fn system(executor: CommandExecutor) -> Self {
        let report = executor.report().clone();
        Self::new(
            vec![
                Arc::new(InstalledProgramsProvider::new(executor.clone())),
                Arc::new(RunningProcessesProvider),
                Arc::new(RegisteredServicesProvider::new(executor)),
            ],
            report,
        )
    }

    /// Query every provider in order and merge the hits.
    ///
    /// Vendors keep the order they were first seen in; repeated identical
    /// evidence is kept once.
    pub async fn scan(&self) -> Vec<ScanMatch> {
        let mut merged: IndexMap<&'static str, Vec<Evidence>> = IndexMap::new();

        for provider in &self.providers {
            let source = provider.source();
            let lines = match provider.collect().await {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!("{}", e);
                    self.report
                        .record_issue(IssueKind::ScanSourceUnavailable, e.to_string());
                    continue;
                }
            };
            tracing::debug!("Scanning {} {} entries", lines.len(), source);

            for line in &lines {
                if EXCLUDED_SIGNATURE.matches(line) {
                    continue;
                }
                for signature in VENDOR_SIGNATURES.iter().filter(|sig| sig.matches(line)) {
                    let evidence = Evidence {
                        source,
                        detail: line.trim().to_string(),
                    };
                    let entries = merged.entry(signature.vendor).or_default();
                    if !entries.contains(&evidence) {
                        entries.push(evidence);
                    }
                }
            }
        }

        let matches: Vec<ScanMatch> = merged
            .into_iter()
            .map(|(vendor, evidence)| ScanMatch {
                vendor: vendor.to_string(),
                evidence,
            })
            .collect();

        if matches.is_empty() {
            tracing::info!("No conflicting security products detected");
        } else {
            tracing::warn!(
                "Detected security products: {}",
                matches
                    .iter()
                    .map(|m| m.vendor.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        matches
    }
}

/// Human readable warning shown when the scan is nonempty
pub fn admission_warning(matches: &[ScanMatch]) -> String {
    let mut text = String::from(
        "ENDPOINT SECURITY DETECTED\n\n\
         The following security software was found on this system:\n\n",
    );
    for m in matches {
        text.push_str(&format!("  * {}\n", m.vendor));
        for evidence in &m.evidence {
            text.push_str(&format!("      - {}\n", evidence));
        }
    }
    text.push_str(
        "\nThis optimizer changes services, policies and registry settings that \
         endpoint protection products monitor or lock. Running it alongside them can \
         trigger alerts, be blocked part-way, or leave the system inconsistent.\n\n\
         Uninstall or disable the products above, or ask your IT department, \
         before running the optimizer.\n",
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_names() {
        let output = "\
HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\{1234}
    DisplayName    REG_SZ    Sophos Endpoint Agent

HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\7-Zip
    DisplayName    REG_SZ    7-Zip 23.01 (x64)

End of search: 2 match(es) found.
";
        assert_eq!(
            parse_display_names(output),
            vec!["Sophos Endpoint Agent", "7-Zip 23.01 (x64)"]
        );
    }

    #[test]
    fn test_signature_matching_is_case_insensitive() {
        let crowdstrike = VENDOR_SIGNATURES
            .iter()
            .find(|sig| sig.vendor == "CrowdStrike")
            .unwrap();
        assert!(crowdstrike.matches("csfalconservice.exe"));
        assert!(!crowdstrike.matches("explorer.exe"));
    }

    #[test]
    fn test_excluded_signature() {
        assert!(EXCLUDED_SIGNATURE.matches("SERVICE_NAME: WinDefend"));
        assert!(EXCLUDED_SIGNATURE.matches("MsMpEng.exe"));
        assert!(!VENDOR_SIGNATURES.iter().any(|sig| sig.vendor == EXCLUDED_SIGNATURE.vendor));
    }

    #[test]
    fn test_admission_warning_lists_vendors_and_evidence() {
        let matches = vec![ScanMatch {
            vendor: "Sophos".to_string(),
            evidence: vec![Evidence {
                source: EvidenceSource::RunningProcesses,
                detail: "SophosHealth.exe".to_string(),
            }],
        }];
        let text = admission_warning(&matches);
        assert!(text.contains("* Sophos"));
        assert!(text.contains("SophosHealth.exe (running process)"));
    }
}
