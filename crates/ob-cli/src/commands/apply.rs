//! Apply command implementation

use anyhow::{bail, Result};

use ob_dispatch::ApplyReport;

use super::{ensure_roster, entered_keys, fetch_roster_or_report};
use crate::context::AppContext;
use crate::output::{
    format_outcomes, format_roster, print_error, print_success, print_warning, summarize_dispatch,
};

/// Save the entered keys and push them to every server
pub async fn apply_command(ctx: &AppContext, binds: &[String], unbinds: &[String]) -> Result<()> {
    let coordinator = ctx.coordinator();
    let roster = fetch_roster_or_report(ctx, &coordinator).await?;

    ensure_roster(&roster)?;

    let stored = coordinator.store().load();
    let entered = entered_keys(&roster, &stored, binds, unbinds)?;

    let report = coordinator
        .save_and_apply(&ctx.targets, &roster, &entered)
        .await?;

    println!("{}", format_roster(&roster, &report.bindings));
    finish(&report)
}

/// Print the outcome of a save-and-apply and fail if any server missed it
pub(crate) fn finish(report: &ApplyReport) -> Result<()> {
    if let Some(e) = &report.save_error {
        print_warning(&format!("Bindings were not saved: {}", e));
    }

    println!("{}", format_outcomes(&report.dispatch));

    let summary = summarize_dispatch(&report.dispatch);
    if report.dispatch.all_succeeded() {
        print_success(&summary);
        Ok(())
    } else {
        print_error(&summary);
        bail!("{}", summary)
    }
}
