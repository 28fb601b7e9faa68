//! Console transport traits
//!
//! The dispatcher only needs to open a conversation, push lines and read a
//! reply. Keeping the idle-timeout completion rule behind these traits lets
//! a framed transport replace the TCP one without touching callers.

use async_trait::async_trait;

use ob_protocol::{ConnectionTarget, ConsoleError, ConsoleSession};

/// One open conversation with a console
#[async_trait]
pub trait ConsoleConversation: Send {
    /// Write one command line
    async fn send_command(&mut self, command: &str) -> Result<(), ConsoleError>;

    /// Read the reply to what was sent so far
    async fn drain_response(&mut self) -> Result<String, ConsoleError>;

    /// End the conversation
    async fn close(self: Box<Self>);
}

/// Opens conversations with consoles
#[async_trait]
pub trait ConsoleConnector: Send + Sync {
    async fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> Result<Box<dyn ConsoleConversation>, ConsoleError>;
}

#[async_trait]
impl ConsoleConversation for ConsoleSession {
    async fn send_command(&mut self, command: &str) -> Result<(), ConsoleError> {
        ConsoleSession::send_command(self, command).await
    }

    async fn drain_response(&mut self) -> Result<String, ConsoleError> {
        ConsoleSession::drain_response(self).await
    }

    async fn close(self: Box<Self>) {
        ConsoleSession::close(*self).await
    }
}
