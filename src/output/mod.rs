//! Terminal rendering for notifications, report outcomes and menus

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::host::{Notification, NotificationKind};
use crate::report::{ReportOutcome, StatusStyle};

pub mod json;
pub mod table;

/// Render one notification as a single line
pub fn render_notification(notification: &Notification, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(json::format_json_line(notification)?),
        OutputFormat::Pretty => {
            let title = format!("[{}]", notification.title).bold();
            let message = match notification.kind {
                NotificationKind::Info => notification.message.cyan(),
                NotificationKind::Success => notification.message.green(),
                NotificationKind::Warning => notification.message.yellow(),
                NotificationKind::Failure => notification.message.red(),
            };
            Ok(format!("{} {}", title, message))
        }
    }
}

/// Render the inline status line of a report submission
pub fn render_report_outcome(outcome: &ReportOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(json::format_json(outcome)?),
        OutputFormat::Pretty => {
            let message = outcome.message();
            let styled = match outcome.style() {
                StatusStyle::Success => message.green().bold(),
                StatusStyle::Error => message.red().bold(),
                StatusStyle::Warning => message.yellow().bold(),
            };
            Ok(styled.to_string())
        }
    }
}
