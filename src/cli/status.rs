//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::{Config, DEFAULT_REPORT_ENDPOINT, DEFAULT_SCAN_API_HOST};
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "scamwatch Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not created yet)".dimmed()
        );
    }

    let config = Config::load_at(opts.config_ref())?;
    println!();

    match config.validate_scan_auth() {
        Ok(()) => println!("{} VirusTotal API key configured", "✓".green()),
        Err(e) => {
            println!("{} {}", "✗".red(), e);
        }
    }

    let scan_host = config.scan_api_host();
    if scan_host == DEFAULT_SCAN_API_HOST {
        println!("{} Scan API: {}", "○".dimmed(), scan_host);
    } else {
        println!("{} Custom scan API: {}", "○".dimmed(), scan_host.cyan());
    }

    let endpoint = config.report_endpoint();
    if endpoint == DEFAULT_REPORT_ENDPOINT {
        println!("{} Report endpoint: {}", "○".dimmed(), endpoint);
    } else {
        println!("{} Custom report endpoint: {}", "○".dimmed(), endpoint.cyan());
    }

    let polling = config.polling;
    println!(
        "{} Results fetched {}s after submission, every {}s, up to {} times",
        "○".dimmed(),
        polling.initial_delay_secs,
        polling.interval_secs,
        polling.max_attempts
    );
    println!();

    Ok(())
}
