//! scamwatch - report scams and scan suspicious links with VirusTotal

use clap::{CommandFactory, Parser};

mod cli;
mod client;
mod config;
mod dispatch;
mod error;
mod host;
mod output;
mod report;
mod scan;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("scamwatch version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Menu => cli::menu::run(&opts),
        Commands::Invoke { action, link_url } => cli::invoke::run(&opts, &action, link_url).await,
        Commands::Scan { url } => cli::invoke::scan(&opts, url).await,
        Commands::Result { analysis_id } => cli::result::run(&opts, &analysis_id).await,
        Commands::Report(args) => cli::report::run(&opts, args).await,
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "scamwatch",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
