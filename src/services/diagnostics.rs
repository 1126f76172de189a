use crate::models::CommandResult;
use crate::services::executor::CommandExecutor;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use std::fmt::Write as _;
use thiserror::Error;

/// Read-only checks of the machine's domain membership, in report order
pub const DOMAIN_TRUST_CHECKS: &[(&str, &str)] = &[
    ("COMPUTER NAME", "hostname"),
    ("DOMAIN", "echo %USERDOMAIN%"),
    (
        "SECURE CHANNEL TEST",
        r#"powershell -Command "Test-ComputerSecureChannel -Verbose""#,
    ),
    ("NETLOGON SERVICE STATUS", "sc query netlogon"),
    ("DOMAIN CONTROLLER DISCOVERY", "nltest /dsgetdc:%USERDOMAIN%"),
    ("SECURE CHANNEL DETAILS", "nltest /sc_query:%USERDOMAIN%"),
    ("DNS CONFIGURATION", r#"ipconfig /all | findstr /i "dns""#),
    ("TIME SYNCHRONIZATION", "w32tm /query /status"),
    ("KERBEROS TICKETS", "klist"),
    ("NETWORK CONNECTIVITY", "ping -n 2 %USERDOMAIN%"),
];

const FALLBACK_FILE_NAME: &str = "DomainTrustStatus.log";

#[derive(Error, Debug)]
pub enum DiagnosticsError {
    #[error("Failed to write domain trust report to {primary} or {fallback}: {source}")]
    Write {
        primary: Utf8PathBuf,
        fallback: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Temporary directory is not valid UTF-8")]
    NonUtf8TempDir,
}

/// A finished domain trust report and where it was saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTrustReport {
    pub text: String,
    pub path: Utf8PathBuf,
}

/// Runs [`DOMAIN_TRUST_CHECKS`] and saves a sectioned report
pub struct DomainTrustDiagnostics {
    executor: CommandExecutor,
    log_path: Utf8PathBuf,
}

impl DomainTrustDiagnostics {
    pub fn new(executor: CommandExecutor, log_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            executor,
            log_path: log_path.into(),
        }
    }

    pub async fn verify(&self) -> Result<DomainTrustReport, DiagnosticsError> {
        tracing::info!("Verifying domain trust relationship");

        let mut results = Vec::with_capacity(DOMAIN_TRUST_CHECKS.len());
        for (title, command) in DOMAIN_TRUST_CHECKS {
            results.push((*title, self.executor.execute(command).await));
        }

        let text = render_report(&results);
        let path = self.save(&text).await?;
        tracing::info!("Domain trust report written to {}", path);

        Ok(DomainTrustReport { text, path })
    }

    async fn save(&self, text: &str) -> Result<Utf8PathBuf, DiagnosticsError> {
        let primary_error = match tokio::fs::write(&self.log_path, text).await {
            Ok(()) => return Ok(self.log_path.clone()),
            Err(e) => e,
        };
        tracing::warn!(
            "Cannot write {} ({}), falling back to the temp directory",
            self.log_path,
            primary_error
        );

        let fallback = Utf8PathBuf::from_path_buf(std::env::temp_dir())
            .map_err(|_| DiagnosticsError::NonUtf8TempDir)?
            .join(FALLBACK_FILE_NAME);
        tokio::fs::write(&fallback, text)
            .await
            .map_err(|source| DiagnosticsError::Write {
                primary: self.log_path.clone(),
                fallback: fallback.clone(),
                source,
            })?;
        Ok(fallback)
    }

    pub fn log_path(&self) -> &Utf8Path {
        &self.log_path
    }
}

fn render_report(results: &[(&str, CommandResult)]) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "=== DOMAIN TRUST STATUS CHECK ===");
    let _ = writeln!(text, "Timestamp: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    for (index, (title, result)) in results.iter().enumerate() {
        let _ = writeln!(text, "\n{}. {}:", index + 1, title);
        let _ = writeln!(text, "   > {}", result.command);
        let body = if result.is_success() {
            result.output.trim().to_string()
        } else {
            format!("{} ({})", result.outcome, result.diagnostic)
        };
        for line in body.lines() {
            let _ = writeln!(text, "   {}", line);
        }
    }
    text
}
