use std::fmt;

/// Where a piece of security-product evidence was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceSource {
    InstalledPrograms,
    RunningProcesses,
    RegisteredServices,
}

impl fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EvidenceSource::InstalledPrograms => "installed program",
            EvidenceSource::RunningProcesses => "running process",
            EvidenceSource::RegisteredServices => "registered service",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Evidence {
    pub source: EvidenceSource,
    pub detail: String,
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.detail, self.source)
    }
}

/// All evidence collected for one security vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    pub vendor: String,
    pub evidence: Vec<Evidence>,
}

/// Keyword aliases identifying one vendor's products
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorSignature {
    pub vendor: &'static str,
    pub aliases: &'static [&'static str],
}

impl VendorSignature {
    /// Case-insensitive substring match against any alias
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.aliases
            .iter()
            .any(|alias| text.contains(&alias.to_lowercase()))
    }
}
