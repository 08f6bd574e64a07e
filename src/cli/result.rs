//! Result command implementation

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::Result;

/// Fetch the verdict of an analysis submitted earlier
pub async fn run(opts: &GlobalOptions, analysis_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let workflow = ctx.scan_workflow()?;

    let outcome = workflow.fetch_result(analysis_id).await;
    log::debug!("Result outcome for {}: {:?}", analysis_id, outcome);

    Ok(())
}
