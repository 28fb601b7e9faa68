//! Per-invocation context: state file plus command-line overrides

use std::path::{Path, PathBuf};

use anyhow::Result;

use ob_core::config::{self, build_targets, parse_host_list, parse_port, StateFile};
use ob_core::BindingStore;
use ob_dispatch::{Coordinator, DispatchOptions, TcpConnector};
use ob_protocol::ConnectionTarget;

/// Everything a command needs to talk to the servers
pub struct AppContext {
    pub state_path: PathBuf,
    pub state: StateFile,
    pub targets: Vec<ConnectionTarget>,
}

impl AppContext {
    /// Load the state file and apply `--hosts` / `--port` overrides
    ///
    /// Invalid host lists and ports are rejected here, before any network
    /// attempt. Overrides are not written back to the state file.
    pub fn load(config_path: Option<&Path>, hosts: Option<&str>, port: Option<&str>) -> Result<Self> {
        let state_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config::default_state_path);
        let state = StateFile::load_or_default(&state_path);

        let host_list = match hosts {
            Some(raw) => parse_host_list(raw),
            None => state.host_list(),
        };
        let port = match port {
            Some(raw) => parse_port(raw)?,
            None => state.port,
        };
        let targets = build_targets(&host_list, port)?;

        tracing::debug!(
            path = ?state_path,
            targets = ?targets.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Loaded context"
        );

        Ok(Self {
            state_path,
            state,
            targets,
        })
    }

    /// Coordinator wired to TCP consoles and this context's state file
    pub fn coordinator(&self) -> Coordinator<TcpConnector> {
        Coordinator::new(
            TcpConnector::new(self.state.console.session_options()),
            DispatchOptions::from(&self.state.console),
            BindingStore::new(&self.state_path),
        )
    }

    /// The target rosters are read from
    pub fn roster_source(&self) -> Option<&ConnectionTarget> {
        self.targets.first()
    }
}
