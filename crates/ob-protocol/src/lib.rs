//! ob-protocol: Remote console wire protocol for obsbind
//!
//! This crate speaks the game server's line-oriented console: it opens a
//! stream connection, writes newline-terminated commands and drains the
//! unframed text that comes back. It also knows the two text shapes that
//! cross the wire: the roster listing and the commands we emit.

pub mod command;
pub mod error;
pub mod roster;
pub mod session;
pub mod target;

pub use command::{bind_command, echo_command, DISABLE_NUMBER_KEY_BINDS, ROSTER_QUERY};
pub use error::ConsoleError;
pub use roster::{parse_roster, PlayerRecord};
pub use session::{ConsoleSession, SessionOptions, MAX_RESPONSE_BYTES};
pub use target::ConnectionTarget;
