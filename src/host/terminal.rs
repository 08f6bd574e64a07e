//! Terminal implementations of the host seams

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};
use indicatif::ProgressBar;

use super::{Notification, Notifier, ReportSurface};
use crate::cli::OutputFormat;
use crate::client::ReportApi;
use crate::client::models::{INITIATIVE_TYPES, PLATFORMS};
use crate::error::Result;
use crate::output;
use crate::report::{ReportForm, ReportSubmission};

/// Prints notifications to stdout.
///
/// While a spinner is attached, lines are printed with the spinner suspended
/// so they never share its terminal line.
pub struct TerminalNotifier {
    format: OutputFormat,
    progress: Mutex<Option<ProgressBar>>,
}

impl TerminalNotifier {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            progress: Mutex::new(None),
        }
    }

    /// Route output around this spinner until [`detach_progress`](Self::detach_progress).
    pub fn attach_progress(&self, pb: ProgressBar) {
        *self.slot() = Some(pb);
    }

    pub fn detach_progress(&self) -> Option<ProgressBar> {
        self.slot().take()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn render(&self, notification: &Notification) -> Option<String> {
        match output::render_notification(notification, self.format) {
            Ok(line) => Some(line),
            Err(e) => {
                log::error!("Failed to render notification: {}", e);
                None
            }
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let Some(line) = self.render(&notification) else {
            return;
        };
        match self.slot().as_ref() {
            Some(pb) => pb.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }
}

/// Report form driven by interactive prompts.
///
/// Field values survive a failed submission so the user can edit and resend.
pub struct InteractiveReportSurface<R: ReportApi> {
    submission: ReportSubmission<R>,
    format: OutputFormat,
}

impl<R: ReportApi> InteractiveReportSurface<R> {
    pub fn new(client: Arc<R>, format: OutputFormat) -> Self {
        Self {
            submission: ReportSubmission::new(client),
            format,
        }
    }

    fn prompt(form: &mut ReportForm) -> Result<()> {
        let theme = ColorfulTheme::default();

        let current = INITIATIVE_TYPES
            .iter()
            .position(|t| *t == form.initiative_type)
            .unwrap_or(0);
        let selection = Select::with_theme(&theme)
            .with_prompt("Initiative type")
            .items(&INITIATIVE_TYPES)
            .default(current)
            .interact()?;
        form.initiative_type = INITIATIVE_TYPES[selection].to_string();

        form.reference = Input::with_theme(&theme)
            .with_prompt("Reference (link, phone number, order id)")
            .with_initial_text(form.reference.clone())
            .allow_empty(true)
            .interact_text()?;

        form.description = Input::with_theme(&theme)
            .with_prompt("What happened?")
            .with_initial_text(form.description.clone())
            .allow_empty(true)
            .interact_text()?;

        form.contact = Input::with_theme(&theme)
            .with_prompt("Contact (optional)")
            .with_initial_text(form.contact.clone())
            .allow_empty(true)
            .interact_text()?;

        let checked: Vec<bool> = PLATFORMS
            .iter()
            .map(|p| form.platforms.contains(*p))
            .collect();
        let chosen = MultiSelect::with_theme(&theme)
            .with_prompt("Where did you see it? (space to toggle)")
            .items(&PLATFORMS)
            .defaults(&checked)
            .interact()?;
        form.platforms = chosen.into_iter().map(|i| PLATFORMS[i].to_string()).collect();

        Ok(())
    }
}

#[async_trait]
impl<R: ReportApi + 'static> ReportSurface for InteractiveReportSurface<R> {
    async fn open_report_form(&self) -> Result<()> {
        let mut form = ReportForm::default();

        loop {
            Self::prompt(&mut form)?;

            let outcome = self.submission.submit(&mut form).await;
            println!("{}", output::render_report_outcome(&outcome, self.format)?);

            if outcome.is_success() {
                return Ok(());
            }

            let again = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Edit and submit again?")
                .default(false)
                .interact()?;
            if !again {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NotificationKind;

    fn verdict() -> Notification {
        Notification::new(
            NotificationKind::Warning,
            "VirusTotal Scan Results",
            "Scan complete. Malicious: 2, Suspicious: 1, Harmless: 60",
        )
    }

    #[test]
    fn test_rendered_line_has_no_spinner_text() {
        colored::control::set_override(false);
        let notifier = TerminalNotifier::new(OutputFormat::Pretty);
        let pb = ProgressBar::hidden();
        pb.set_message("Waiting for VirusTotal analysis...");
        notifier.attach_progress(pb);

        let line = notifier.render(&verdict()).unwrap();

        assert_eq!(
            line,
            "[VirusTotal Scan Results] Scan complete. Malicious: 2, Suspicious: 1, Harmless: 60"
        );
        assert!(!line.contains("Waiting"));
    }

    #[test]
    fn test_notify_while_spinner_attached_keeps_spinner() {
        let notifier = TerminalNotifier::new(OutputFormat::Json);
        let pb = ProgressBar::hidden();
        notifier.attach_progress(pb.clone());

        notifier.notify(verdict());

        assert!(!pb.is_finished());
        assert!(notifier.detach_progress().is_some());
        assert!(notifier.detach_progress().is_none());
    }
}
