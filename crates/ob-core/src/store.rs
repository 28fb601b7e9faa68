//! Durable player name to key bindings
//!
//! Bindings are keyed by display name because slots shift whenever someone
//! connects or leaves. Saving is a full replace: whatever is bound for the
//! current roster is the whole truth, so players who left drop out instead
//! of piling up.

use std::path::{Path, PathBuf};

use ob_protocol::PlayerRecord;

use crate::config::{self, StateFile};
use crate::error::ConfigError;
use crate::types::BindingMap;

/// Binding storage inside the state file
#[derive(Debug, Clone)]
pub struct BindingStore {
    path: PathBuf,
}

impl BindingStore {
    /// Store backed by the state file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the default state file
    pub fn at_default_location() -> Self {
        Self::new(config::default_state_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored bindings; any read or parse failure yields an empty mapping
    pub fn load(&self) -> BindingMap {
        StateFile::load_or_default(&self.path).bindings
    }

    /// Replace the stored bindings with `bindings`
    ///
    /// The rest of the state file is preserved. Failures are logged at warn
    /// level and returned so the caller can surface them; they never undo
    /// anything the caller already holds in memory.
    pub fn save(&self, bindings: &BindingMap) -> Result<(), ConfigError> {
        let mut state = StateFile::load_or_default(&self.path);
        state.bindings = bindings.clone();

        match state.save(&self.path) {
            Ok(()) => {
                tracing::debug!(path = ?self.path, count = bindings.len(), "Saved bindings");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Failed to save bindings");
                Err(e)
            }
        }
    }
}

/// Compute the mapping to persist from the roster and the entered keys
///
/// Exactly the roster members with a non-empty (trimmed) key end up in the
/// result; everything else, including previously stored names, is dropped.
pub fn merge(roster: &[PlayerRecord], entered: &BindingMap) -> BindingMap {
    roster
        .iter()
        .filter(|p| !p.name.is_empty())
        .filter_map(|p| {
            let key = entered.get(&p.name)?.trim();
            (!key.is_empty()).then(|| (p.name.clone(), key.to_string()))
        })
        .collect()
}

/// Stored bindings offered back as defaults for names on the roster
pub fn defaults_for_roster(roster: &[PlayerRecord], stored: &BindingMap) -> BindingMap {
    roster
        .iter()
        .filter_map(|p| stored.get(&p.name).map(|key| (p.name.clone(), key.clone())))
        .collect()
}
