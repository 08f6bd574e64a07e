//! Request and response models for the scan service and the report endpoint

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A URL queued for reputation analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub url: String,
}

impl ScanRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Result of a successful URL submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSubmission {
    /// Identifier used to fetch the analysis later
    pub analysis_id: String,
}

/// Lifecycle of a remote analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisStatus {
    Queued,
    InProgress,
    Completed,
    #[serde(other)]
    Unknown,
}

impl AnalysisStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, AnalysisStatus::Completed)
    }
}

/// Engine verdict counts for an analysed URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub malicious: u32,
    pub suspicious: u32,
    pub harmless: u32,
    #[serde(default)]
    pub undetected: u32,
    #[serde(default)]
    pub timeout: u32,
}

impl AnalysisStats {
    /// One-line verdict summary shown to the user
    pub fn summary(&self) -> String {
        format!(
            "Malicious: {}, Suspicious: {}, Harmless: {}",
            self.malicious, self.suspicious, self.harmless
        )
    }

    /// True when at least one engine flagged the URL
    pub fn is_flagged(&self) -> bool {
        self.malicious > 0 || self.suspicious > 0
    }
}

/// Analysis state and counts returned by the result fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub status: AnalysisStatus,
    pub stats: AnalysisStats,
}

/// `{ "data": ... }` envelope used by every VirusTotal v3 response
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
}

/// `data` object of a URL submission response
#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionData {
    pub id: Option<String>,
}

/// `data` object of an analysis response
#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisData {
    pub attributes: Option<AnalysisAttributes>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisAttributes {
    pub status: Option<AnalysisStatus>,
    pub stats: Option<AnalysisStats>,
}

/// Initiative types offered by the reporting site
pub const INITIATIVE_TYPES: [&str; 4] = ["federal", "state", "ngo", "other"];

/// Platforms offered by the reporting site
pub const PLATFORMS: [&str; 4] = ["whatsapp", "facebook", "email", "other"];

/// A scam report as sent to the report endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScamReport {
    pub initiative_type: String,
    pub reference: String,
    pub description: String,
    pub contact: String,
    #[serde(rename = "platform")]
    pub platforms: BTreeSet<String>,
}
