//! Host environment seams
//!
//! The dispatcher and workflows reach the outside world through these traits:
//! - [`MenuHost`] - registry of user-invokable menu actions
//! - [`Notifier`] - user-visible notifications
//! - [`ReportSurface`] - the scam report form
//!
//! [`MenuRegistry`] is the in-memory menu used by the CLI, and [`terminal`]
//! renders notifications and the report form on the terminal.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;

pub mod menu;
#[cfg(test)]
pub mod recording;
pub mod terminal;

pub use menu::MenuRegistry;

/// Where a menu item is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuContext {
    /// Everywhere
    All,
    /// Only when the target is a hyperlink
    Link,
}

impl std::fmt::Display for MenuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuContext::All => write!(f, "all"),
            MenuContext::Link => write!(f, "link"),
        }
    }
}

/// A registered menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub context: MenuContext,
}

/// Host-managed menu state
pub trait MenuHost: Send + Sync {
    /// Add an item. Fails if an item with the same id already exists.
    fn create(&self, item: MenuItem) -> Result<()>;

    /// Remove an item by id. Removing a missing id is not an error.
    fn remove(&self, id: &str) -> Result<()>;

    /// Currently visible items, in creation order
    fn items(&self) -> Vec<MenuItem>;
}

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Failure,
}

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Displays notifications to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Opens the scam report form
#[async_trait]
pub trait ReportSurface: Send + Sync {
    async fn open_report_form(&self) -> Result<()>;
}
