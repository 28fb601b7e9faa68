//! TCP console connector

use async_trait::async_trait;

use ob_core::traits::{ConsoleConnector, ConsoleConversation};
use ob_protocol::{ConnectionTarget, ConsoleError, ConsoleSession, SessionOptions};

/// Opens plain TCP console sessions
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    options: SessionOptions,
}

impl TcpConnector {
    /// Create a connector with the given session timings
    pub fn new(options: SessionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

#[async_trait]
impl ConsoleConnector for TcpConnector {
    async fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> Result<Box<dyn ConsoleConversation>, ConsoleError> {
        let session = ConsoleSession::connect(target, self.options).await?;
        Ok(Box::new(session))
    }
}
