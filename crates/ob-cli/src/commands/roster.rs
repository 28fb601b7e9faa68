//! Roster command implementation

use anyhow::Result;

use ob_core::store::defaults_for_roster;

use super::fetch_roster_or_report;
use crate::context::AppContext;
use crate::output::{format_roster, print_info, print_success};

/// Fetch and show the roster with each player's stored key
pub async fn roster_command(ctx: &AppContext, json: bool) -> Result<()> {
    let coordinator = ctx.coordinator();

    if !json {
        if let Some(source) = ctx.roster_source() {
            print_info(&format!("Fetching roster from {}...", source));
        }
    }

    let roster = fetch_roster_or_report(ctx, &coordinator).await?;
    let stored = defaults_for_roster(&roster, &coordinator.store().load());

    if json {
        println!("{}", serde_json::to_string_pretty(&roster)?);
        return Ok(());
    }

    println!("{}", format_roster(&roster, &stored));
    if !roster.is_empty() {
        print_success(&format!("Successfully fetched {} players.", roster.len()));
    }

    Ok(())
}
