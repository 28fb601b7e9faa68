//! obsbind: Command-line shell for observer bind management
//!
//! Loads the state file, fetches the roster, collects keys from the command
//! line and hands everything to the dispatch coordinator.

pub mod commands;
pub mod context;
pub mod output;
