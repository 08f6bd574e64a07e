//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - coloured lines for people
    #[default]
    Pretty,
    /// JSON format - one JSON object per notification, for scripts
    Json,
}
