//! Scam report endpoint client

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use super::ReportApi;
use super::http::{build_http_client, ensure_success};
use super::models::ScamReport;
use crate::config::Config;
use crate::error::{ApiError, Result};

/// Client for the scam report endpoint
pub struct ReportClient {
    http: HttpClient,
    endpoint: String,
}

impl ReportClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<std::time::Duration>) -> Result<Self> {
        Ok(Self {
            http: build_http_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.report_endpoint(), config.request_timeout())
    }
}

#[async_trait]
impl ReportApi for ReportClient {
    async fn submit_report(&self, report: &ScamReport) -> Result<()> {
        log::debug!("POST {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(report)
            .send()
            .await
            .map_err(ApiError::from)?;
        let response = ensure_success(response).await?;

        log::debug!("Report accepted with status {}", response.status());
        Ok(())
    }
}
