//! Core traits for obsbind abstractions

mod console;

pub use console::{ConsoleConnector, ConsoleConversation};
