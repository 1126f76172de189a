use async_trait::async_trait;
use mockall::mock;
use std::sync::Arc;
use wintweak::models::{Evidence, EvidenceSource};
use wintweak::services::{
    EvidenceProvider, IssueKind, ReportLog, ScanError, SecurityScanner, admission_warning,
};

mock! {
    pub Provider {}

    #[async_trait]
    impl EvidenceProvider for Provider {
        fn source(&self) -> EvidenceSource;
        async fn collect(&self) -> Result<Vec<String>, ScanError>;
    }
}

fn provider(source: EvidenceSource, lines: &[&str]) -> Arc<dyn EvidenceProvider> {
    let lines: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
    let mut mock = MockProvider::new();
    mock.expect_source().return_const(source);
    mock.expect_collect()
        .times(1)
        .returning(move || Ok(lines.clone()));
    Arc::new(mock)
}

fn unavailable(source: EvidenceSource) -> Arc<dyn EvidenceProvider> {
    let mut mock = MockProvider::new();
    mock.expect_source().return_const(source);
    mock.expect_collect().times(1).returning(move || {
        Err(ScanError::SourceUnavailable {
            evidence: source,
            reason: "Access is denied.".to_string(),
        })
    });
    Arc::new(mock)
}

#[tokio::test]
async fn test_vendor_seen_by_two_sources_is_merged() {
    let scanner = SecurityScanner::new(
        vec![
            provider(
                EvidenceSource::InstalledPrograms,
                &["CrowdStrike Windows Sensor", "7-Zip 23.01 (x64)"],
            ),
            provider(
                EvidenceSource::RunningProcesses,
                &["explorer.exe", "CSFalconService.exe"],
            ),
        ],
        ReportLog::new(),
    );

    let matches = scanner.scan().await;

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].vendor, "CrowdStrike");
    assert_eq!(
        matches[0].evidence,
        vec![
            Evidence {
                source: EvidenceSource::InstalledPrograms,
                detail: "CrowdStrike Windows Sensor".to_string(),
            },
            Evidence {
                source: EvidenceSource::RunningProcesses,
                detail: "CSFalconService.exe".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_vendors_keep_first_seen_order() {
    let scanner = SecurityScanner::new(
        vec![
            provider(
                EvidenceSource::InstalledPrograms,
                &["Sophos Endpoint Agent", "ESET Management Agent"],
            ),
            provider(
                EvidenceSource::RegisteredServices,
                &["SERVICE_NAME: ekrn ESET Service", "Kaspersky Anti-Virus Service"],
            ),
        ],
        ReportLog::new(),
    );

    let vendors: Vec<String> = scanner.scan().await.into_iter().map(|m| m.vendor).collect();
    assert_eq!(vendors, vec!["Sophos", "ESET", "Kaspersky"]);
}

#[tokio::test]
async fn test_repeated_evidence_is_kept_once() {
    let scanner = SecurityScanner::new(
        vec![provider(
            EvidenceSource::RunningProcesses,
            &["SophosHealth.exe", "SophosHealth.exe"],
        )],
        ReportLog::new(),
    );

    let matches = scanner.scan().await;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].evidence.len(), 1);
}

#[tokio::test]
async fn test_builtin_protection_is_never_reported() {
    let scanner = SecurityScanner::new(
        vec![
            provider(
                EvidenceSource::InstalledPrograms,
                &["Microsoft Defender for Endpoint Security", "Windows Security"],
            ),
            provider(EvidenceSource::RunningProcesses, &["MsMpEng.exe"]),
            provider(
                EvidenceSource::RegisteredServices,
                &["SERVICE_NAME: WinDefend"],
            ),
        ],
        ReportLog::new(),
    );

    assert!(scanner.scan().await.is_empty());
}

#[tokio::test]
async fn test_unavailable_source_is_skipped_and_reported() {
    let report = ReportLog::new();
    let scanner = SecurityScanner::new(
        vec![
            unavailable(EvidenceSource::InstalledPrograms),
            provider(EvidenceSource::RunningProcesses, &["MBAMService.exe", "Malwarebytes Tray"]),
            unavailable(EvidenceSource::RegisteredServices),
        ],
        report.clone(),
    );

    let matches = scanner.scan().await;

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].vendor, "Malwarebytes");
    let unavailable = report
        .issues()
        .into_iter()
        .filter(|(kind, _)| *kind == IssueKind::ScanSourceUnavailable)
        .count();
    assert_eq!(unavailable, 2);
}

#[tokio::test]
async fn test_admission_warning_lists_vendors_and_evidence() {
    let scanner = SecurityScanner::new(
        vec![provider(
            EvidenceSource::InstalledPrograms,
            &["Bitdefender GravityZone Agent"],
        )],
        ReportLog::new(),
    );
    let matches = scanner.scan().await;
    let warning = admission_warning(&matches);

    assert!(warning.starts_with("ENDPOINT SECURITY DETECTED"));
    assert!(warning.contains("  * Bitdefender\n"));
    assert!(warning.contains("      - Bitdefender GravityZone Agent (installed program)"));
}
