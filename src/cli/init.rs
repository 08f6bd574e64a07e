//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Prompt for the VirusTotal API key and store it in the config file.
///
/// Other keys already in the file are kept.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to scamwatch!".bold().green());
    println!("Get a free API key from https://www.virustotal.com/gui/my-apikey\n");

    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = if path.exists() {
        Config::load_from(path.clone())?
    } else {
        Config::default()
    };

    let api_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your VirusTotal API key")
        .interact()?;

    config.api_key = Some(api_key.trim().to_string());
    config.validate_scan_auth()?;
    config.save_to(path.clone())?;

    println!(
        "\n{} Configuration saved to {}",
        "✓".green(),
        path.display().to_string().cyan()
    );
    println!("Try it: {}", "scamwatch scan https://example.com".cyan());

    Ok(())
}
