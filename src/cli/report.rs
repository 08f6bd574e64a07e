//! Report command implementation

use crate::cli::{CommandContext, GlobalOptions, ReportArgs};
use crate::error::Result;
use crate::host::ReportSurface;
use crate::host::terminal::InteractiveReportSurface;
use crate::output;
use crate::report::{ReportForm, ReportSubmission};

/// Submit a scam report from flags, or through the interactive form
pub async fn run(opts: &GlobalOptions, args: ReportArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let client = ctx.report_client()?;

    if args.interactive {
        return InteractiveReportSurface::new(client, ctx.format)
            .open_report_form()
            .await;
    }

    let mut form = form_from_args(args);
    let outcome = ReportSubmission::new(client).submit(&mut form).await;
    println!("{}", output::render_report_outcome(&outcome, ctx.format)?);

    Ok(())
}

fn form_from_args(args: ReportArgs) -> ReportForm {
    ReportForm {
        initiative_type: args.initiative_type,
        reference: args.reference,
        description: args.description,
        contact: args.contact,
        platforms: args.platforms.into_iter().collect(),
    }
}
