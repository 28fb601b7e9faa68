//! Roster fetch from a single console

use std::time::Duration;

use ob_core::traits::ConsoleConnector;
use ob_protocol::{parse_roster, ConnectionTarget, ConsoleError, PlayerRecord, ROSTER_QUERY};

/// Ask one console for its connected players
///
/// The session is closed on every path. Records with an empty name are
/// dropped here; an empty roster is a valid answer, not an error.
pub async fn fetch_roster<C: ConsoleConnector + ?Sized>(
    connector: &C,
    target: &ConnectionTarget,
    timeout: Duration,
) -> Result<Vec<PlayerRecord>, ConsoleError> {
    let raw = match tokio::time::timeout(timeout, query(connector, target)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(ConsoleError::Connection {
                address: target.address(),
                reason: format!("roster fetch timed out after {}ms", timeout.as_millis()),
            })
        }
    };

    tracing::debug!(addr = %target, raw = %raw, "Raw roster output");

    let roster: Vec<PlayerRecord> = parse_roster(&raw)
        .into_iter()
        .filter(|p| !p.name.is_empty())
        .collect();

    tracing::info!(addr = %target, players = roster.len(), "Fetched roster");
    Ok(roster)
}

async fn query<C: ConsoleConnector + ?Sized>(
    connector: &C,
    target: &ConnectionTarget,
) -> Result<String, ConsoleError> {
    let mut conversation = connector.connect(target).await?;

    let result = async {
        conversation.send_command(ROSTER_QUERY).await?;
        conversation.drain_response().await
    }
    .await;

    conversation.close().await;
    result
}
