//! Persisted state file
//!
//! One TOML document carries the target hosts, the shared console port,
//! console timings and the stored key bindings.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use ob_protocol::{ConnectionTarget, SessionOptions};
use serde::{Deserialize, Serialize};

use super::serde_utils::duration_millis;
use crate::error::ConfigError;

/// Console port used when nothing else is configured
pub const DEFAULT_PORT: u16 = 2121;

/// Everything obsbind remembers between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateFile {
    /// Target hosts, delimited by commas, semicolons or whitespace
    #[serde(default)]
    pub hosts: String,

    /// Single-host field written by older versions; folded into `hosts` on load
    #[serde(skip_serializing)]
    pub host: Option<String>,

    /// Console port shared by every host
    pub port: u16,

    /// Console timings
    pub console: ConsoleSettings,

    /// Stored player name to key bindings
    pub bindings: BTreeMap<String, String>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            hosts: "127.0.0.1".to_string(),
            host: None,
            port: DEFAULT_PORT,
            console: ConsoleSettings::default(),
            bindings: BTreeMap::new(),
        }
    }
}

impl StateFile {
    /// Load and migrate the state file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut state: StateFile = super::load_config(path)?;
        state.migrate_legacy_host();
        Ok(state)
    }

    /// Load the state file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = ?path, "No state file yet, using defaults");
            return Self::default();
        }

        match Self::load(path) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Failed to load state file, using defaults");
                Self::default()
            }
        }
    }

    /// Write the state file atomically
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        super::save_config(path, self)
    }

    /// Fold the legacy single `host` field into `hosts`
    ///
    /// Only applies when `hosts` is absent or blank; an explicit list wins.
    pub fn migrate_legacy_host(&mut self) {
        if let Some(legacy) = self.host.take() {
            if parse_host_list(&self.hosts).is_empty() && !legacy.trim().is_empty() {
                tracing::info!(host = %legacy.trim(), "Migrating legacy host field");
                self.hosts = legacy.trim().to_string();
            }
        }
    }

    /// Hosts as a list
    pub fn host_list(&self) -> Vec<String> {
        parse_host_list(&self.hosts)
    }

    /// One target per host, all on the shared port
    pub fn targets(&self) -> Result<Vec<ConnectionTarget>, ConfigError> {
        build_targets(&self.host_list(), self.port)
    }
}

/// Console timing knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// TCP connect timeout
    #[serde(rename = "connect_timeout_ms", with = "duration_millis")]
    pub connect_timeout: Duration,

    /// Quiet period that ends a response
    #[serde(rename = "idle_timeout_ms", with = "duration_millis")]
    pub idle_timeout: Duration,

    /// Pause after connecting before the first command is written
    #[serde(rename = "settle_delay_ms", with = "duration_millis")]
    pub settle_delay: Duration,

    /// Ceiling on one whole per-target conversation
    #[serde(rename = "target_timeout_ms", with = "duration_millis")]
    pub target_timeout: Duration,

    /// Text echoed on the console after a batch is applied
    pub completion_message: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_millis(200),
            settle_delay: Duration::from_millis(100),
            target_timeout: Duration::from_secs(10),
            completion_message: ">>> Custom observer binds loaded.".to_string(),
        }
    }
}

impl ConsoleSettings {
    /// Session options for the console transport
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            connect_timeout: self.connect_timeout,
            idle_timeout: self.idle_timeout,
        }
    }
}

/// Split a host list on commas, semicolons and whitespace
///
/// Empty pieces are dropped and repeats keep their first position.
pub fn parse_host_list(raw: &str) -> Vec<String> {
    let mut hosts: Vec<String> = Vec::new();
    for piece in raw.split(|c: char| c == ',' || c == ';' || c.is_whitespace()) {
        if !piece.is_empty() && !hosts.iter().any(|h| h == piece) {
            hosts.push(piece.to_string());
        }
    }
    hosts
}

/// Parse a console port given as text
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(0) => Err(ConfigError::Invalid("port must be between 1 and 65535".to_string())),
        Ok(port) => Ok(port),
        Err(_) => Err(ConfigError::Invalid(format!(
            "port must be a number between 1 and 65535, got {:?}",
            raw.trim()
        ))),
    }
}

/// Pair every host with the shared port
pub fn build_targets(hosts: &[String], port: u16) -> Result<Vec<ConnectionTarget>, ConfigError> {
    if hosts.is_empty() {
        return Err(ConfigError::Invalid("no hosts configured".to_string()));
    }
    if port == 0 {
        return Err(ConfigError::Invalid("port must be between 1 and 65535".to_string()));
    }

    Ok(hosts
        .iter()
        .map(|host| ConnectionTarget::new(host.clone(), port))
        .collect())
}
