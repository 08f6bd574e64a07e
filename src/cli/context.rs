//! Command execution context
//!
//! Loads configuration once and builds the clients, host and workflows a
//! command needs.

use std::sync::Arc;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{ReportClient, VirusTotalClient};
use crate::config::Config;
use crate::dispatch::{ActionId, Dispatcher, ReportScamHandler, ScanLinkHandler};
use crate::error::{ConfigError, Error, Result};
use crate::host::MenuRegistry;
use crate::host::terminal::{InteractiveReportSurface, TerminalNotifier};
use crate::scan::ScanWorkflow;

/// Context for command execution containing config and runtime options.
pub struct CommandContext {
    /// Loaded configuration with environment overrides applied
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
    /// Terminal notifier shared by every workflow of this command
    pub notifier: Arc<TerminalNotifier>,
}

/// Dispatcher with its menu and, when an API key is configured, the scan workflow
pub type DispatcherParts = (
    Dispatcher,
    Arc<MenuRegistry>,
    Option<Arc<ScanWorkflow<VirusTotalClient>>>,
);

impl CommandContext {
    /// Load config from the given path (or default location) and environment.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        Ok(Self::with_config(config, opts.format))
    }

    pub fn with_config(config: Config, format: OutputFormat) -> Self {
        Self {
            config,
            format,
            notifier: Arc::new(TerminalNotifier::new(format)),
        }
    }

    /// Build the scan workflow. Fails at startup when no API key is set.
    pub fn scan_workflow(&self) -> Result<Arc<ScanWorkflow<VirusTotalClient>>> {
        let client = Arc::new(VirusTotalClient::from_config(&self.config)?);
        Ok(Arc::new(ScanWorkflow::new(
            client,
            self.notifier.clone(),
            self.config.polling,
        )))
    }

    pub fn report_client(&self) -> Result<Arc<ReportClient>> {
        Ok(Arc::new(ReportClient::from_config(&self.config)?))
    }

    /// Build a dispatcher with both actions registered.
    ///
    /// `report-scam` is always bound. `scan-link` is bound only when an API
    /// key is configured; other configuration errors still fail.
    pub fn dispatcher(&self) -> Result<DispatcherParts> {
        let workflow = match self.scan_workflow() {
            Ok(workflow) => Some(workflow),
            Err(Error::Config(ConfigError::MissingApiKey)) => {
                log::debug!("No API key configured, scan-link stays unbound");
                None
            }
            Err(e) => return Err(e),
        };
        let surface = Arc::new(InteractiveReportSurface::new(
            self.report_client()?,
            self.format,
        ));
        let menu = Arc::new(MenuRegistry::new());

        let mut dispatcher = Dispatcher::new(menu.clone());
        dispatcher.register_actions()?;
        dispatcher.register_handler(
            ActionId::ReportScam,
            Arc::new(ReportScamHandler::new(surface)),
        );
        if let Some(workflow) = &workflow {
            dispatcher.register_handler(
                ActionId::ScanLink,
                Arc::new(ScanLinkHandler::new(workflow.clone())),
            );
        }

        Ok((dispatcher, menu, workflow))
    }
}
