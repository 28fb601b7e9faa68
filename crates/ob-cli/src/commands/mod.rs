//! CLI command implementations

mod apply;
mod config;
mod export;
mod roster;
mod swap;

pub use apply::apply_command;
pub use config::{config_get, config_init, config_path, config_set, config_show};
pub use export::export_command;
pub use roster::roster_command;
pub use swap::swap_command;

use anyhow::{bail, Result};

use ob_core::store::defaults_for_roster;
use ob_core::{BindingMap, ObError};
use ob_dispatch::{Coordinator, TcpConnector};
use ob_protocol::PlayerRecord;

use crate::context::AppContext;
use crate::output::{print_error, print_info, print_warning};

/// Fetch the roster from the first target, reporting failures to the operator
pub(crate) async fn fetch_roster_or_report(
    ctx: &AppContext,
    coordinator: &Coordinator<TcpConnector>,
) -> Result<Vec<PlayerRecord>> {
    let source = ctx
        .roster_source()
        .map(ToString::to_string)
        .unwrap_or_default();

    match coordinator.fetch_roster(&ctx.targets).await {
        Ok(roster) => Ok(roster),
        Err(e) => {
            print_error(&format!("Failed to fetch roster from {}: {}", source, e));
            if let ObError::Console(console) = &e {
                print_info(&console.remediation());
            }
            Err(e.into())
        }
    }
}

/// Refuse to go on without players: saving would erase every stored key
pub(crate) fn ensure_roster(roster: &[PlayerRecord]) -> Result<()> {
    if roster.is_empty() {
        print_error("Player list is empty. Refresh first.");
        print_info("Make sure you are in a server, then run 'obsbind roster'");
        bail!(ObError::EmptyRoster);
    }
    Ok(())
}

/// Split a `NAME=KEY` argument at its last `=`
pub fn parse_bind_arg(arg: &str) -> Result<(String, String)> {
    let Some((name, key)) = arg.rsplit_once('=') else {
        bail!("Expected NAME=KEY, got {:?}", arg);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing player name in {:?}", arg);
    }
    Ok((name.to_string(), key.trim().to_string()))
}

/// Keys entered for the current roster
///
/// Stored bindings are offered back for names that reappear, `--bind`
/// arguments override them and `--unbind` clears them.
pub fn entered_keys(
    roster: &[PlayerRecord],
    stored: &BindingMap,
    binds: &[String],
    unbinds: &[String],
) -> Result<BindingMap> {
    let mut entered = defaults_for_roster(roster, stored);

    for arg in binds {
        let (name, key) = parse_bind_arg(arg)?;
        if !roster.iter().any(|p| p.name == name) {
            print_warning(&format!("{} is not on the roster, ignoring", name));
            continue;
        }
        entered.insert(name, key);
    }

    for name in unbinds {
        if entered.remove(name.trim()).is_none() {
            print_warning(&format!("{} has no binding to remove", name.trim()));
        }
    }

    Ok(entered)
}
