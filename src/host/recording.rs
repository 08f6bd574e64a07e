//! Recording host doubles for testing

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{Notification, Notifier, ReportSurface};
use crate::client::mock::EventLog;
use crate::error::Result;

/// Notifier that keeps every notification it receives
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
    events: Option<EventLog>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append each notification to a shared event log.
    pub fn with_events(events: EventLog) -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            events: Some(events),
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Some(events) = &self.events {
            events
                .lock()
                .unwrap()
                .push(format!("notify:{}", notification.title));
        }
        self.notifications.lock().unwrap().push(notification);
    }
}

/// Report surface that only counts how often it was opened
#[derive(Default)]
pub struct RecordingSurface {
    opened: AtomicUsize,
}

impl RecordingSurface {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportSurface for RecordingSurface {
    async fn open_report_form(&self) -> Result<()> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
