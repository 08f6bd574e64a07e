//! API clients for the link scanning service and the scam report endpoint

use async_trait::async_trait;

use crate::error::Result;

pub mod http;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod report;
pub mod virustotal;

pub use models::{
    AnalysisReport, AnalysisStats, AnalysisStatus, ScamReport, ScanRequest, ScanSubmission,
};
pub use report::ReportClient;
pub use virustotal::VirusTotalClient;

/// URL reputation scanning service
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// Submit a URL for analysis and return the analysis identifier
    async fn submit_url(&self, request: &ScanRequest) -> Result<ScanSubmission>;

    /// Fetch the current state of a previously submitted analysis.
    ///
    /// Fails with `InvalidResponse` when the stats object is missing.
    async fn get_analysis(&self, analysis_id: &str) -> Result<AnalysisReport>;
}

/// Remote scam report endpoint
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Send one report. Non-2xx responses and transport failures are errors.
    async fn submit_report(&self, report: &ScamReport) -> Result<()>;
}
