//! Console error types

use thiserror::Error;

/// Errors that can occur while talking to a remote console
///
/// The two variants map to different remediations: a refused connection
/// means nothing is listening on the console port, anything else points at
/// the address or the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// The peer actively refused the connection
    #[error("Connection refused by {address}")]
    ConnectionRefused { address: String },

    /// Any other transport failure (unreachable, timed out, reset)
    #[error("Connection error with {address}: {reason}")]
    Connection { address: String, reason: String },
}

impl ConsoleError {
    /// Build an error from an I/O failure against `address`
    pub fn from_io(address: &str, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::ConnectionRefused => Self::ConnectionRefused {
                address: address.to_string(),
            },
            _ => Self::Connection {
                address: address.to_string(),
                reason: err.to_string(),
            },
        }
    }

    /// Whether the peer refused the connection outright
    pub fn is_refused(&self) -> bool {
        matches!(self, Self::ConnectionRefused { .. })
    }

    /// The address the failing operation was aimed at
    pub fn address(&self) -> &str {
        match self {
            Self::ConnectionRefused { address } | Self::Connection { address, .. } => address,
        }
    }

    /// Operator-facing hint for fixing the failure
    pub fn remediation(&self) -> String {
        match self {
            Self::ConnectionRefused { address } => {
                let port = address.rsplit(':').next().unwrap_or("<port>");
                format!("Is the game running with '-netconport {}'?", port)
            }
            Self::Connection { .. } => "Check the host address and that it is reachable".to_string(),
        }
    }
}
