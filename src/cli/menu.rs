//! Menu command implementation

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::host::MenuHost;
use crate::output::{json, table};

/// Register the actions and print the resulting menu
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let (_dispatcher, menu, _workflow) = ctx.dispatcher()?;
    let items = menu.items();

    match ctx.format {
        OutputFormat::Pretty => {
            let rows: Vec<table::MenuRow> = items.into_iter().map(Into::into).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&items)?),
    }

    Ok(())
}
