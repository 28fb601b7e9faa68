//! ob-core: Core abstractions and configuration for obsbind
//!
//! This crate holds the pure pieces of the tool: the binding store and its
//! merge rule, the command builder, the halftime key rotation, the persisted
//! state file, and the console traits the dispatcher is written against.

pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod remap;
pub mod store;
pub mod traits;
pub mod types;

pub use commands::build_commands;
pub use error::{ConfigError, ObError};
pub use remap::rotate;
pub use store::{merge, BindingStore};
pub use types::{BindingMap, DispatchOutcome, DispatchReport, DispatchStatus};
