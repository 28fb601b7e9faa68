//! ob-dispatch: Pushes observer binds to running servers
//!
//! Reads are single-sourced: the roster always comes from the first
//! configured target so the operator sees one consistent list. Writes fan
//! out to every target, each in its own task, and every target reports its
//! own outcome.

pub mod connector;
pub mod coordinator;
pub mod dispatcher;
pub mod roster;

#[cfg(test)]
mod testing;

pub use connector::TcpConnector;
pub use coordinator::{ApplyReport, Coordinator};
pub use dispatcher::{DispatchOptions, MultiHostDispatcher};
pub use roster::fetch_roster;
