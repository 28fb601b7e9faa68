//! Export command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use ob_core::export::{render_binds_file, write_binds_file};
use ob_core::merge;

use super::{ensure_roster, entered_keys, fetch_roster_or_report};
use crate::context::AppContext;
use crate::output::print_success;

/// Write the binds as a `.cfg` file instead of pushing them
///
/// The state file is left untouched.
pub async fn export_command(
    ctx: &AppContext,
    output: &Path,
    binds: &[String],
    unbinds: &[String],
) -> Result<()> {
    let coordinator = ctx.coordinator();
    let roster = fetch_roster_or_report(ctx, &coordinator).await?;

    ensure_roster(&roster)?;

    let entered = entered_keys(&roster, &coordinator.store().load(), binds, unbinds)?;
    let bindings = merge(&roster, &entered);

    let contents = render_binds_file(
        &roster,
        &bindings,
        &ctx.state.console.completion_message,
        Local::now().naive_local(),
    );
    write_binds_file(output, &contents)
        .with_context(|| format!("Could not write binds file {:?}", output))?;

    print_success(&format!(
        "Wrote {} binds to {}",
        bindings.len(),
        output.display()
    ));
    Ok(())
}
