//! Scam report submission
//!
//! One POST per submission, no retry, no offline queue. The outcome decides
//! both the status line shown to the user and whether the form is cleared.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::client::{ReportApi, ScamReport};
use crate::error::Error;

pub const SUCCESS_MESSAGE: &str = "✅ Report submitted successfully!";
pub const ERROR_MESSAGE: &str = "❌ Error submitting report. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "⚠️ Network error. Check your internet.";

/// Styling of the inline status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusStyle {
    Success,
    Error,
    Warning,
}

/// Result of one report submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// Endpoint answered 2xx
    Submitted,
    /// Endpoint answered with a non-success status
    Rejected { reason: String },
    /// The request never completed
    NetworkError { reason: String },
}

impl ReportOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ReportOutcome::Submitted => SUCCESS_MESSAGE,
            ReportOutcome::Rejected { .. } => ERROR_MESSAGE,
            ReportOutcome::NetworkError { .. } => NETWORK_ERROR_MESSAGE,
        }
    }

    pub fn style(&self) -> StatusStyle {
        match self {
            ReportOutcome::Submitted => StatusStyle::Success,
            ReportOutcome::Rejected { .. } => StatusStyle::Error,
            ReportOutcome::NetworkError { .. } => StatusStyle::Warning,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReportOutcome::Submitted)
    }
}

/// Editable report form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    pub initiative_type: String,
    pub reference: String,
    pub description: String,
    pub contact: String,
    pub platforms: BTreeSet<String>,
}

impl ReportForm {
    /// Snapshot the current field values as a report payload
    pub fn to_report(&self) -> ScamReport {
        ScamReport {
            initiative_type: self.initiative_type.clone(),
            reference: self.reference.clone(),
            description: self.description.clone(),
            contact: self.contact.clone(),
            platforms: self.platforms.clone(),
        }
    }

    /// Reset every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Sends report forms to the report endpoint
pub struct ReportSubmission<R: ReportApi> {
    client: Arc<R>,
}

impl<R: ReportApi> ReportSubmission<R> {
    pub fn new(client: Arc<R>) -> Self {
        Self { client }
    }

    /// Submit the form once. The form is cleared only on success.
    pub async fn submit(&self, form: &mut ReportForm) -> ReportOutcome {
        if form.is_empty() {
            log::debug!("Submitting a report with every field empty");
        }
        let report = form.to_report();
        log::debug!(
            "Submitting scam report: type={:?} platforms={:?}",
            report.initiative_type,
            report.platforms
        );

        let outcome = match self.client.submit_report(&report).await {
            Ok(()) => ReportOutcome::Submitted,
            Err(Error::Api(e)) if e.is_network() => {
                log::warn!("Report submission failed to reach endpoint: {}", e);
                ReportOutcome::NetworkError {
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                log::warn!("Report submission rejected: {}", e);
                ReportOutcome::Rejected {
                    reason: e.to_string(),
                }
            }
        };

        if outcome.is_success() {
            form.clear();
        }
        outcome
    }
}
