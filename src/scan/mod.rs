//! Link scan workflow
//!
//! `Idle → Submitting → AwaitingAnalysis → Reporting → Idle`, ending early in
//! `Failed` or `StillPending`. Every API error is turned into a notification
//! here and never propagated to the caller.
//!
//! A successful submission schedules the result fetch on a Tokio task after
//! the configured delay. The fetch polls a bounded number of times so a
//! queued analysis is reported as still pending rather than malformed.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::client::{AnalysisStats, ScanApi, ScanRequest};
use crate::config::PollingConfig;
use crate::error::ApiError;
use crate::host::{Notification, NotificationKind, Notifier};

pub const SCAN_TITLE: &str = "VirusTotal Scan";
pub const RESULTS_TITLE: &str = "VirusTotal Scan Results";
pub const SUBMITTED_MESSAGE: &str = "URL submitted. Retrieving results shortly...";

/// Workflow state, logged on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Submitting,
    AwaitingAnalysis,
    Reporting,
    Failed,
    StillPending,
}

/// What `submit` did with a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submitted; a result fetch is scheduled
    Scheduled { analysis_id: String },
    /// Empty URL, nothing sent
    Rejected,
    /// Same URL already being scanned, nothing sent
    AlreadyInFlight,
    /// Submission failed, nothing scheduled
    Failed { reason: String },
}

/// Terminal result of a scheduled fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    Completed { stats: AnalysisStats },
    StillPending { attempts: u32 },
    Failed { reason: String },
}

type InFlightSet = Arc<std::sync::Mutex<HashSet<String>>>;

struct Shared<C> {
    client: Arc<C>,
    notifier: Arc<dyn Notifier>,
    polling: PollingConfig,
    in_flight: InFlightSet,
}

/// Claim on an in-flight URL, released when dropped.
///
/// Owned by the scheduled fetch task; a panicking or aborted task frees the URL.
struct InFlightGuard {
    set: InFlightSet,
    url: String,
}

impl InFlightGuard {
    /// Mark a URL as in flight. Returns `None` if it already was.
    fn claim(set: &InFlightSet, url: &str) -> Option<Self> {
        let inserted = match set.lock() {
            Ok(mut urls) => urls.insert(url.to_string()),
            Err(poisoned) => poisoned.into_inner().insert(url.to_string()),
        };
        inserted.then(|| Self {
            set: Arc::clone(set),
            url: url.to_string(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        match self.set.lock() {
            Ok(mut urls) => urls.remove(&self.url),
            Err(poisoned) => poisoned.into_inner().remove(&self.url),
        };
    }
}

/// Submits URLs for reputation analysis and reports the verdict
pub struct ScanWorkflow<C: ScanApi + 'static> {
    shared: Arc<Shared<C>>,
    pending: Mutex<Vec<JoinHandle<ScanOutcome>>>,
}

impl<C: ScanApi + 'static> ScanWorkflow<C> {
    pub fn new(client: Arc<C>, notifier: Arc<dyn Notifier>, polling: PollingConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                client,
                notifier,
                polling,
                in_flight: Arc::new(std::sync::Mutex::new(HashSet::new())),
            }),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Submit a URL and schedule the result fetch on success.
    pub async fn submit(&self, url: &str) -> SubmitOutcome {
        let url = url.trim();
        if url.is_empty() {
            self.shared.notify(
                NotificationKind::Failure,
                SCAN_TITLE,
                "Failed to submit URL. Error: no URL to scan".to_string(),
            );
            return SubmitOutcome::Rejected;
        }

        let Some(claim) = InFlightGuard::claim(&self.shared.in_flight, url) else {
            log::info!("Scan already in flight for {}", url);
            self.shared.notify(
                NotificationKind::Info,
                SCAN_TITLE,
                "A scan for this link is already in progress.".to_string(),
            );
            return SubmitOutcome::AlreadyInFlight;
        };

        transition(url, ScanState::Idle, ScanState::Submitting);
        let submission = match self.shared.client.submit_url(&ScanRequest::new(url)).await {
            Ok(submission) => submission,
            Err(e) => {
                drop(claim);
                transition(url, ScanState::Submitting, ScanState::Failed);
                log::error!("Error submitting URL {}: {}", url, e);
                self.shared.notify(
                    NotificationKind::Failure,
                    SCAN_TITLE,
                    format!("Failed to submit URL. Error: {}", e),
                );
                return SubmitOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        log::debug!("Submission accepted, analysis id {}", submission.analysis_id);
        self.shared.notify(
            NotificationKind::Info,
            SCAN_TITLE,
            SUBMITTED_MESSAGE.to_string(),
        );
        transition(url, ScanState::Submitting, ScanState::AwaitingAnalysis);

        let shared = Arc::clone(&self.shared);
        let analysis_id = submission.analysis_id.clone();
        let handle = tokio::spawn(async move {
            let _claim = claim;
            tokio::time::sleep(shared.polling.initial_delay()).await;
            shared.fetch_result(&analysis_id).await
        });
        self.pending.lock().await.push(handle);

        SubmitOutcome::Scheduled {
            analysis_id: submission.analysis_id,
        }
    }

    /// Poll an analysis until it completes, fails, or runs out of attempts.
    pub async fn fetch_result(&self, analysis_id: &str) -> ScanOutcome {
        self.shared.fetch_result(analysis_id).await
    }

    /// Number of scheduled fetches not yet collected by `wait_pending`
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Wait for every scheduled fetch and return their outcomes.
    pub async fn wait_pending(&self) -> Vec<ScanOutcome> {
        let handles: Vec<_> = self.pending.lock().await.drain(..).collect();
        join_all(handles)
            .await
            .into_iter()
            .map(|joined| {
                joined.unwrap_or_else(|e| ScanOutcome::Failed {
                    reason: format!("scan task stopped: {}", e),
                })
            })
            .collect()
    }
}

impl<C: ScanApi> Shared<C> {
    fn notify(&self, kind: NotificationKind, title: &str, message: String) {
        self.notifier.notify(Notification::new(kind, title, message));
    }

    async fn fetch_result(&self, analysis_id: &str) -> ScanOutcome {
        let max_attempts = self.polling.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.client.get_analysis(analysis_id).await {
                Ok(report) if report.status.is_complete() => {
                    transition(analysis_id, ScanState::AwaitingAnalysis, ScanState::Reporting);
                    let kind = if report.stats.is_flagged() {
                        NotificationKind::Warning
                    } else {
                        NotificationKind::Success
                    };
                    self.notify(
                        kind,
                        RESULTS_TITLE,
                        format!("Scan complete. {}", report.stats.summary()),
                    );
                    transition(analysis_id, ScanState::Reporting, ScanState::Idle);
                    return ScanOutcome::Completed {
                        stats: report.stats,
                    };
                }
                Ok(report) => {
                    log::debug!(
                        "Analysis {} is {:?} (attempt {}/{})",
                        analysis_id,
                        report.status,
                        attempt,
                        max_attempts
                    );
                    if attempt < max_attempts {
                        tokio::time::sleep(self.polling.interval()).await;
                    }
                }
                Err(e) => {
                    transition(analysis_id, ScanState::AwaitingAnalysis, ScanState::Failed);
                    log::error!("Error fetching analysis {}: {}", analysis_id, e);
                    self.notify(
                        NotificationKind::Failure,
                        SCAN_TITLE,
                        format!("Failed to fetch results. Error: {}", e),
                    );
                    return ScanOutcome::Failed {
                        reason: e.to_string(),
                    };
                }
            }
        }

        transition(analysis_id, ScanState::AwaitingAnalysis, ScanState::StillPending);
        self.notify(
            NotificationKind::Warning,
            SCAN_TITLE,
            format!(
                "{}. Check again later with `scamwatch result {}`.",
                ApiError::StillPending(max_attempts),
                analysis_id
            ),
        );
        ScanOutcome::StillPending {
            attempts: max_attempts,
        }
    }
}

fn transition(subject: &str, from: ScanState, to: ScanState) {
    log::debug!("scan {}: {:?} -> {:?}", subject, from, to);
}
