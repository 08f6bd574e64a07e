//! VirusTotal v3 URL scanning client

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use super::ScanApi;
use super::http::{build_http_client, ensure_success};
use super::models::{
    AnalysisData, AnalysisReport, AnalysisStatus, Envelope, ScanRequest, ScanSubmission,
    SubmissionData,
};
use crate::config::Config;
use crate::error::{ApiError, Result};

/// Header carrying the VirusTotal API key
const API_KEY_HEADER: &str = "x-apikey";

/// VirusTotal API client
pub struct VirusTotalClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl VirusTotalClient {
    /// Create a client against a custom base URL
    pub fn with_host(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self> {
        Ok(Self {
            http: build_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate_scan_auth()?;
        let api_key = config.api_key.clone().unwrap_or_default();
        Self::with_host(api_key, config.scan_api_host(), config.request_timeout())
    }

    /// Analysis ids go into the URL path, so only id characters are allowed.
    fn check_analysis_id(analysis_id: &str) -> Result<()> {
        let valid = !analysis_id.is_empty()
            && analysis_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '='));
        if valid {
            Ok(())
        } else {
            Err(ApiError::BadRequest(format!("Invalid analysis id '{}'", analysis_id)).into())
        }
    }

    async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
        })
    }
}

#[async_trait]
impl ScanApi for VirusTotalClient {
    async fn submit_url(&self, request: &ScanRequest) -> Result<ScanSubmission> {
        let url = format!("{}/urls", self.base_url);
        log::debug!("POST {} for {}", url, request.url);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .form(&[("url", request.url.as_str())])
            .send()
            .await
            .map_err(ApiError::from)?;
        let response = ensure_success(response).await?;

        let body: Envelope<SubmissionData> = Self::parse_body(response).await?;
        let analysis_id = body
            .data
            .and_then(|d| d.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("Unexpected response structure".to_string()))?;

        Ok(ScanSubmission { analysis_id })
    }

    async fn get_analysis(&self, analysis_id: &str) -> Result<AnalysisReport> {
        Self::check_analysis_id(analysis_id)?;
        let url = format!("{}/analyses/{}", self.base_url, analysis_id);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(ApiError::from)?;
        let response = ensure_success(response).await?;

        let body: Envelope<AnalysisData> = Self::parse_body(response).await?;
        let attributes = body
            .data
            .and_then(|d| d.attributes)
            .ok_or_else(|| ApiError::InvalidResponse("Unexpected results structure".to_string()))?;
        let stats = attributes
            .stats
            .ok_or_else(|| ApiError::InvalidResponse("Unexpected results structure".to_string()))?;

        Ok(AnalysisReport {
            // Stats without a status are treated as a finished analysis
            status: attributes.status.unwrap_or(AnalysisStatus::Completed),
            stats,
        })
    }
}
