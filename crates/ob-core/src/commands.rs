//! Command batch construction

use std::collections::HashSet;

use ob_protocol::{bind_command, PlayerRecord, DISABLE_NUMBER_KEY_BINDS};

use crate::types::BindingMap;

/// A roster member paired with the key it will be bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedBind<'a> {
    pub player: &'a PlayerRecord,
    pub key: &'a str,
}

/// Roster members that get a bind command, in roster order
///
/// Records with an empty name are dropped, as are members without a
/// non-empty key. Bindings are keyed by name, so when two connected players
/// share a name only the first one gets the key.
pub fn planned_binds<'a>(roster: &'a [PlayerRecord], bindings: &'a BindingMap) -> Vec<PlannedBind<'a>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut planned = Vec::new();

    for player in roster.iter().filter(|p| !p.name.is_empty()) {
        if !seen.insert(player.name.as_str()) {
            tracing::warn!(
                name = %player.name,
                slot = player.slot,
                "Duplicate player name on roster, not binding this slot"
            );
            continue;
        }

        let Some(key) = bindings.get(&player.name).map(|k| k.trim()) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }

        planned.push(PlannedBind { player, key });
    }

    planned
}

/// Build the ordered console commands for a roster and its bindings
///
/// The batch always opens with the command that stops number keys from
/// picking observer targets on their own, so an empty roster still yields
/// exactly one command.
pub fn build_commands(roster: &[PlayerRecord], bindings: &BindingMap) -> Vec<String> {
    let planned = planned_binds(roster, bindings);

    let mut commands = Vec::with_capacity(planned.len() + 1);
    commands.push(DISABLE_NUMBER_KEY_BINDS.to_string());
    commands.extend(planned.iter().map(|b| bind_command(b.key, b.player.slot)));
    commands
}
