//! One-shot console conversation
//!
//! A session connects, writes newline-terminated commands, drains whatever
//! text the console prints, and closes. The console never frames its
//! replies, so a response is considered complete once a single read yields
//! nothing for `idle_timeout`. A peer that pauses mid-reply for longer than
//! that window is misread as finished; callers accept that race in exchange
//! for not needing a terminator. End-of-stream ends the drain the same way.

use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::ConsoleError;
use crate::target::ConnectionTarget;

/// Upper bound on the text accepted for a single drained response
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Read buffer increment, matches what the console typically flushes at once
const READ_CHUNK: usize = 4096;

/// Timing knobs for a console session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// How long to wait for the TCP handshake
    pub connect_timeout: Duration,
    /// Quiet period that marks the end of a response
    pub idle_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_millis(200),
        }
    }
}

/// An open conversation with one console
pub struct ConsoleSession {
    stream: TcpStream,
    address: String,
    options: SessionOptions,
}

impl ConsoleSession {
    /// Connect to the console at `target`
    ///
    /// Returns `ConsoleError::ConnectionRefused` when nothing listens on the
    /// port and `ConsoleError::Connection` for every other failure, including
    /// the connect timeout.
    pub async fn connect(
        target: &ConnectionTarget,
        options: SessionOptions,
    ) -> Result<Self, ConsoleError> {
        let address = target.address();
        tracing::debug!(addr = %address, "Connecting to console");

        let connect = TcpStream::connect((target.host.as_str(), target.port));
        let stream = match tokio::time::timeout(options.connect_timeout, connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(ConsoleError::from_io(&address, &e)),
            Err(_) => {
                return Err(ConsoleError::Connection {
                    address,
                    reason: format!(
                        "connect timed out after {}ms",
                        options.connect_timeout.as_millis()
                    ),
                })
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(addr = %address, error = %e, "Could not disable Nagle");
        }

        Ok(Self {
            stream,
            address,
            options,
        })
    }

    /// The `host:port` this session talks to
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Write one command followed by a newline
    ///
    /// Embedded line breaks are stripped so a command is always one line.
    pub async fn send_command(&mut self, command: &str) -> Result<(), ConsoleError> {
        let mut line: String = command
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n'))
            .collect();
        line.push('\n');

        tracing::trace!(addr = %self.address, command = %line.trim_end(), "Sending command");

        self.stream
            .write_all(line.as_bytes())
            .await
            .map_err(|e| ConsoleError::from_io(&self.address, &e))?;
        self.stream
            .flush()
            .await
            .map_err(|e| ConsoleError::from_io(&self.address, &e))
    }

    /// Read until the console goes quiet for one idle window or hangs up
    pub async fn drain_response(&mut self) -> Result<String, ConsoleError> {
        let mut buf = BytesMut::with_capacity(READ_CHUNK);

        loop {
            if buf.len() >= MAX_RESPONSE_BYTES {
                tracing::warn!(
                    addr = %self.address,
                    bytes = buf.len(),
                    "Response exceeded size cap, truncating"
                );
                buf.truncate(MAX_RESPONSE_BYTES);
                break;
            }

            buf.reserve(READ_CHUNK);
            match tokio::time::timeout(self.options.idle_timeout, self.stream.read_buf(&mut buf))
                .await
            {
                // Quiet for a whole window: the normal way a response ends
                Err(_) => break,
                Ok(Ok(0)) => {
                    tracing::debug!(addr = %self.address, "Console closed the stream");
                    break;
                }
                Ok(Ok(_)) => continue,
                Ok(Err(e)) => return Err(ConsoleError::from_io(&self.address, &e)),
            }
        }

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Shut the connection down
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(addr = %self.address, error = %e, "Error shutting down console stream");
        }
    }
}
