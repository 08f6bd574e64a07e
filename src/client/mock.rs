//! Mock API clients for testing
//!
//! Provide canned responses for the scan and report traits without making
//! real HTTP calls, and record what was asked of them.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::models::{
    AnalysisReport, AnalysisStats, AnalysisStatus, ScamReport, ScanRequest, ScanSubmission,
};
use super::{ReportApi, ScanApi};
use crate::error::{ApiError, Result};

/// Ordered log of requests and notifications shared between test doubles
pub type EventLog = Arc<std::sync::Mutex<Vec<String>>>;

/// Build completed stats for fixtures
pub fn stats(malicious: u32, suspicious: u32, harmless: u32) -> AnalysisStats {
    AnalysisStats {
        malicious,
        suspicious,
        harmless,
        undetected: 0,
        timeout: 0,
    }
}

/// Build a completed analysis report for fixtures
pub fn completed(malicious: u32, suspicious: u32, harmless: u32) -> AnalysisReport {
    AnalysisReport {
        status: AnalysisStatus::Completed,
        stats: stats(malicious, suspicious, harmless),
    }
}

/// Build a still-running analysis report for fixtures
pub fn queued() -> AnalysisReport {
    AnalysisReport {
        status: AnalysisStatus::Queued,
        stats: stats(0, 0, 0),
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub submit_url: usize,
    pub get_analysis: usize,
}

/// Mock scan client.
///
/// # Example
/// ```ignore
/// let mock = MockScanClient::new()
///     .with_analysis_id("abc")
///     .await
///     .with_analysis(Ok(completed(2, 1, 60)))
///     .await;
/// ```
pub struct MockScanClient {
    /// Analysis id returned by submit_url
    analysis_id: Arc<Mutex<String>>,
    /// Error returned by the next submit_url - consumed on first use
    submit_error: Arc<Mutex<Option<ApiError>>>,
    /// Responses for get_analysis, popped in order
    analyses: Arc<Mutex<VecDeque<std::result::Result<AnalysisReport, ApiError>>>>,
    call_count: Arc<Mutex<CallCounts>>,
    submitted_urls: Arc<Mutex<Vec<String>>>,
    fetched_ids: Arc<Mutex<Vec<String>>>,
    events: Option<EventLog>,
}

impl Default for MockScanClient {
    fn default() -> Self {
        Self {
            analysis_id: Arc::new(Mutex::new("analysis-1".to_string())),
            submit_error: Arc::new(Mutex::new(None)),
            analyses: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            submitted_urls: Arc::new(Mutex::new(Vec::new())),
            fetched_ids: Arc::new(Mutex::new(Vec::new())),
            events: None,
        }
    }
}

impl MockScanClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every request into a shared event log.
    pub fn with_events(mut self, events: EventLog) -> Self {
        self.events = Some(events);
        self
    }

    pub async fn with_analysis_id(self, id: &str) -> Self {
        *self.analysis_id.lock().await = id.to_string();
        self
    }

    /// Configure an error for the next submit_url call.
    pub async fn with_submit_error(self, error: ApiError) -> Self {
        *self.submit_error.lock().await = Some(error);
        self
    }

    /// Queue a response for get_analysis.
    pub async fn with_analysis(
        self,
        response: std::result::Result<AnalysisReport, ApiError>,
    ) -> Self {
        self.analyses.lock().await.push_back(response);
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn submitted_urls(&self) -> Vec<String> {
        self.submitted_urls.lock().await.clone()
    }

    pub async fn fetched_ids(&self) -> Vec<String> {
        self.fetched_ids.lock().await.clone()
    }

    fn record(&self, event: String) {
        if let Some(events) = &self.events {
            events.lock().expect("event log poisoned").push(event);
        }
    }
}

#[async_trait]
impl ScanApi for MockScanClient {
    async fn submit_url(&self, request: &ScanRequest) -> Result<ScanSubmission> {
        self.record(format!("request:submit_url:{}", request.url));
        self.call_count.lock().await.submit_url += 1;
        self.submitted_urls.lock().await.push(request.url.clone());

        if let Some(e) = self.submit_error.lock().await.take() {
            return Err(e.into());
        }

        Ok(ScanSubmission {
            analysis_id: self.analysis_id.lock().await.clone(),
        })
    }

    async fn get_analysis(&self, analysis_id: &str) -> Result<AnalysisReport> {
        self.record(format!("request:get_analysis:{}", analysis_id));
        self.call_count.lock().await.get_analysis += 1;
        self.fetched_ids.lock().await.push(analysis_id.to_string());

        match self.analyses.lock().await.pop_front() {
            Some(response) => response.map_err(Into::into),
            None => Err(ApiError::InvalidResponse("no analysis configured".to_string()).into()),
        }
    }
}

/// Mock report client.
#[derive(Default)]
pub struct MockReportClient {
    /// Error returned by the next submit_report - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    reports: Arc<Mutex<Vec<ScamReport>>>,
}

impl MockReportClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    pub async fn reports(&self) -> Vec<ScamReport> {
        self.reports.lock().await.clone()
    }
}

#[async_trait]
impl ReportApi for MockReportClient {
    async fn submit_report(&self, report: &ScamReport) -> Result<()> {
        self.reports.lock().await.push(report.clone());
        match self.error.lock().await.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_error_is_consumed_once() {
        let mock = MockScanClient::new()
            .with_submit_error(ApiError::Status(500))
            .await;
        let request = ScanRequest::new("https://example.com");

        assert!(mock.submit_url(&request).await.is_err());
        let second = mock.submit_url(&request).await.unwrap();
        assert_eq!(second.analysis_id, "analysis-1");
        assert_eq!(mock.call_counts().await.submit_url, 2);
    }

    #[tokio::test]
    async fn test_analyses_are_returned_in_order() {
        let mock = MockScanClient::new()
            .with_analysis(Ok(queued()))
            .await
            .with_analysis(Ok(completed(1, 0, 9)))
            .await;

        assert_eq!(mock.get_analysis("a").await.unwrap().status, AnalysisStatus::Queued);
        assert!(mock.get_analysis("a").await.unwrap().status.is_complete());
        assert!(mock.get_analysis("a").await.is_err());
        assert_eq!(mock.fetched_ids().await, vec!["a", "a", "a"]);
    }

    #[tokio::test]
    async fn test_events_are_recorded() {
        let events: EventLog = Default::default();
        let mock = MockScanClient::new().with_events(events.clone());
        mock.submit_url(&ScanRequest::new("https://x.test")).await.unwrap();

        let log = events.lock().unwrap();
        assert_eq!(log.as_slice(), ["request:submit_url:https://x.test"]);
    }
}
