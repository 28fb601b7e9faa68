//! Halftime swap command implementation

use anyhow::Result;

use ob_core::store::defaults_for_roster;

use super::apply::finish;
use super::{ensure_roster, fetch_roster_or_report};
use crate::context::AppContext;
use crate::output::{format_roster, print_info};

/// Rotate every player's key for the second half and push the result
pub async fn swap_command(ctx: &AppContext) -> Result<()> {
    let coordinator = ctx.coordinator();
    let roster = fetch_roster_or_report(ctx, &coordinator).await?;
    ensure_roster(&roster)?;

    let current = defaults_for_roster(&roster, &coordinator.store().load());
    print_info(&format!("Swapping keys for {} bound players", current.len()));

    let report = coordinator
        .rotate_and_apply(&ctx.targets, &roster, &current)
        .await?;

    println!("{}", format_roster(&roster, &report.bindings));
    finish(&report)
}
