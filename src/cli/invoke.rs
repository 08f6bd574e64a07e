//! Invoke and scan command implementations

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::ScanApi;
use crate::dispatch::{ActionContext, ActionId, Invocation};
use crate::error::{ConfigError, Result};
use crate::host::terminal::TerminalNotifier;
use crate::scan::{ScanOutcome, ScanWorkflow};

/// Send an action to the dispatcher, then wait for any scheduled scan.
pub async fn run(opts: &GlobalOptions, action: &str, link_url: Option<String>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let (dispatcher, _menu, workflow) = ctx.dispatcher()?;

    if workflow.is_none() && action.parse::<ActionId>().ok() == Some(ActionId::ScanLink) {
        return Err(ConfigError::MissingApiKey.into());
    }

    let context = link_url
        .map(ActionContext::for_link)
        .unwrap_or_default();
    match dispatcher.on_action_invoked(action, &context).await {
        Invocation::Handled(_) => {}
        Invocation::Unhandled(id) => log::warn!("No handler for {}", id),
        Invocation::Unknown => {
            if ctx.format == OutputFormat::Pretty {
                eprintln!("{} Unknown action '{}', nothing to do", "○".dimmed(), action);
            }
        }
    }

    if let Some(workflow) = workflow {
        let outcomes = wait_for_scans(&workflow, &ctx.notifier, ctx.format).await;
        log::debug!("{} scheduled scan(s) finished", outcomes.len());
    }
    Ok(())
}

/// Scan a single link through the `scan-link` action
pub async fn scan(opts: &GlobalOptions, url: String) -> Result<()> {
    run(opts, "scan-link", Some(url)).await
}

/// Keep the process alive until scheduled fetches have reported.
///
/// In pretty mode a spinner runs meanwhile; it is attached to the notifier so
/// verdict lines are printed with the spinner suspended.
pub async fn wait_for_scans<C: ScanApi + 'static>(
    workflow: &Arc<ScanWorkflow<C>>,
    notifier: &TerminalNotifier,
    format: OutputFormat,
) -> Vec<ScanOutcome> {
    if workflow.pending_count().await == 0 {
        return Vec::new();
    }

    let spinner = match format {
        OutputFormat::Pretty => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Waiting for VirusTotal analysis...");
            pb.enable_steady_tick(Duration::from_millis(120));
            notifier.attach_progress(pb.clone());
            Some(pb)
        }
        OutputFormat::Json => None,
    };

    let outcomes = workflow.wait_pending().await;

    if let Some(pb) = spinner {
        notifier.detach_progress();
        pb.finish_and_clear();
    }
    outcomes
}
