//! Output formatting utilities for the CLI
//!
//! Tables for rosters, bindings and dispatch outcomes, plus colored status
//! lines.

use std::io::Write;

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use tabled::{settings::Style, Table, Tabled};

use ob_core::{BindingMap, DispatchReport, DispatchStatus};
use ob_protocol::PlayerRecord;

/// Format the roster with each player's key as an ASCII table
///
/// Returns a hint instead of a table when nobody is connected.
pub fn format_roster(roster: &[PlayerRecord], bindings: &BindingMap) -> String {
    if roster.is_empty() {
        return "No players found. Make sure you are in a server.".to_string();
    }

    #[derive(Tabled)]
    struct RosterRow {
        #[tabled(rename = "SLOT")]
        slot: u32,
        #[tabled(rename = "PLAYER")]
        name: String,
        #[tabled(rename = "KEY")]
        key: String,
    }

    let rows: Vec<RosterRow> = roster
        .iter()
        .map(|p| RosterRow {
            slot: p.slot,
            name: p.name.clone(),
            key: bindings
                .get(&p.name)
                .filter(|k| !k.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format per-target dispatch outcomes as an ASCII table
pub fn format_outcomes(report: &DispatchReport) -> String {
    #[derive(Tabled)]
    struct OutcomeRow {
        #[tabled(rename = "TARGET")]
        target: String,
        #[tabled(rename = "RESULT")]
        result: String,
        #[tabled(rename = "DETAIL")]
        detail: String,
    }

    let rows: Vec<OutcomeRow> = report
        .outcomes
        .iter()
        .map(|o| match o.error() {
            None => OutcomeRow {
                target: o.target.to_string(),
                result: "ok".to_string(),
                detail: "-".to_string(),
            },
            Some(e) => OutcomeRow {
                target: o.target.to_string(),
                result: "failed".to_string(),
                detail: format!("{} ({})", e, e.remediation()),
            },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// One-line summary of a dispatch
pub fn summarize_dispatch(report: &DispatchReport) -> String {
    let total = report.outcomes.len();
    match report.status() {
        DispatchStatus::AllSucceeded => format!("Binds applied on {} of {} servers", total, total),
        DispatchStatus::PartialFailure => format!(
            "Binds applied on {} of {} servers; failed: {}",
            report.succeeded_count(),
            total,
            report
                .failed()
                .map(|o| o.target.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        DispatchStatus::TotalFailure => format!("Binds could not be applied on any of {} servers", total),
    }
}

fn print_tagged<W: Write>(mut out: W, color: Color, tag: &str, msg: &str) {
    let _ = crossterm::execute!(
        out,
        SetForegroundColor(color),
        Print(tag),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a success message in green with a checkmark prefix
pub fn print_success(msg: &str) {
    print_tagged(std::io::stdout(), Color::Green, "✓ ", msg);
}

/// Print an error message in red to stderr
pub fn print_error(msg: &str) {
    print_tagged(std::io::stderr(), Color::Red, "✗ ", msg);
}

/// Print a warning message in yellow to stderr
pub fn print_warning(msg: &str) {
    print_tagged(std::io::stderr(), Color::Yellow, "⚠ ", msg);
}

/// Print an informational message in cyan
pub fn print_info(msg: &str) {
    print_tagged(std::io::stdout(), Color::Cyan, "ℹ ", msg);
}
