//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod context;
pub mod init;
pub mod invoke;
pub mod menu;
pub mod report;
pub mod result;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// scamwatch - report scams and scan suspicious links
#[derive(Parser, Debug)]
#[command(name = "scamwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "SCAMWATCH_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "SCAMWATCH_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SCAMWATCH_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store your VirusTotal API key
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Register the menu actions and list them
    Menu,

    /// Invoke a menu action by id (report-scam, scan-link). scan-link needs an API key.
    Invoke {
        /// Action id
        action: String,

        /// Target link for scan-link
        #[arg(long)]
        link_url: Option<String>,
    },

    /// Scan a link with VirusTotal and wait for the verdict
    Scan {
        /// URL to scan
        url: String,
    },

    /// Fetch the verdict of an earlier analysis
    Result {
        /// Analysis id printed when the scan was still pending
        analysis_id: String,
    },

    /// Submit a scam report
    Report(ReportArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Report fields; anything omitted is sent as an empty value
#[derive(Debug, Clone, Args, Default)]
pub struct ReportArgs {
    /// Initiative type (federal, state, ngo, other)
    #[arg(long, default_value = "")]
    pub initiative_type: String,

    /// Reference such as a link, phone number or order id
    #[arg(long, default_value = "")]
    pub reference: String,

    /// What happened
    #[arg(long, default_value = "")]
    pub description: String,

    /// How to reach you
    #[arg(long, default_value = "")]
    pub contact: String,

    /// Platform where the scam was seen (repeatable)
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Fill the form with interactive prompts
    #[arg(long, short = 'i')]
    pub interactive: bool,
}
