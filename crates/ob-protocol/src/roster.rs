//! Roster listing parser
//!
//! The console answers the roster query with free text. Player lines look
//! like `  3   Alice`: a 0-based index, whitespace, then the display name.
//! Everything else (headers, blank lines, log noise) is skipped.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A connected player as reported by the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// 1-based observer target index (`spec_player <slot>`)
    pub slot: u32,
    /// Display name; the stable identity across refreshes
    pub name: String,
}

impl PlayerRecord {
    /// Create a new record
    pub fn new(slot: u32, name: impl Into<String>) -> Self {
        Self {
            slot,
            name: name.into(),
        }
    }
}

fn roster_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)\s+(.+)$").expect("roster line pattern is valid"))
}

/// Parse raw console text into player records, in line order
///
/// Names are trimmed but not deduplicated or checked for emptiness here.
/// Indices too large for a slot number are treated as noise.
pub fn parse_roster(raw: &str) -> Vec<PlayerRecord> {
    raw.lines()
        .filter_map(|line| {
            let caps = roster_line().captures(line)?;
            let index: u32 = caps[1].parse().ok()?;
            let slot = index.checked_add(1)?;
            Some(PlayerRecord::new(slot, caps[2].trim()))
        })
        .collect()
}
