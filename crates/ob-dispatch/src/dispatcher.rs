//! Multi-host command dispatch
//!
//! Every target gets its own task: connect, let the console settle, write
//! the batch, write the completion echo, close. A failing or hanging target
//! only affects its own outcome; the report lists outcomes in target order.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::Instant;

use ob_core::config::ConsoleSettings;
use ob_core::traits::{ConsoleConnector, ConsoleConversation};
use ob_core::{DispatchOutcome, DispatchReport};
use ob_protocol::{echo_command, ConnectionTarget, ConsoleError};

/// Per-target dispatch behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Pause after connecting before writing
    pub settle_delay: Duration,
    /// Ceiling on one whole per-target conversation
    pub target_timeout: Duration,
    /// Message echoed after the batch
    pub completion_message: String,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self::from(&ConsoleSettings::default())
    }
}

impl From<&ConsoleSettings> for DispatchOptions {
    fn from(settings: &ConsoleSettings) -> Self {
        Self {
            settle_delay: settings.settle_delay,
            target_timeout: settings.target_timeout,
            completion_message: settings.completion_message.clone(),
        }
    }
}

/// Runs one command batch against many targets
pub struct MultiHostDispatcher<C> {
    connector: Arc<C>,
    options: DispatchOptions,
}

impl<C: ConsoleConnector + 'static> MultiHostDispatcher<C> {
    /// Create a dispatcher over `connector`
    pub fn new(connector: Arc<C>, options: DispatchOptions) -> Self {
        Self { connector, options }
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Push `commands` to every target and gather one outcome per target
    pub async fn dispatch(
        &self,
        targets: &[ConnectionTarget],
        commands: &[String],
    ) -> DispatchReport {
        let commands: Arc<[String]> = Arc::from(commands);

        let handles: Vec<_> = targets
            .iter()
            .cloned()
            .map(|target| {
                let connector = Arc::clone(&self.connector);
                let commands = Arc::clone(&commands);
                let options = self.options.clone();
                tokio::spawn(async move {
                    let result = dispatch_one(connector.as_ref(), &target, &commands, &options).await;
                    (target, result)
                })
            })
            .collect();

        let joined = join_all(handles).await;

        let outcomes = joined
            .into_iter()
            .zip(targets)
            .map(|(joined, target)| match joined {
                Ok((target, Ok(()))) => {
                    tracing::info!(addr = %target, "Binds applied");
                    DispatchOutcome::success(target)
                }
                Ok((target, Err(e))) => {
                    tracing::warn!(addr = %target, error = %e, "Dispatch failed");
                    DispatchOutcome::failure(target, e)
                }
                Err(e) => {
                    tracing::error!(addr = %target, error = %e, "Dispatch task failed");
                    DispatchOutcome::failure(
                        target.clone(),
                        ConsoleError::Connection {
                            address: target.address(),
                            reason: format!("dispatch task failed: {}", e),
                        },
                    )
                }
            })
            .collect();

        DispatchReport::new(outcomes)
    }
}

/// Longest wait for the console's reply once the whole batch is written
///
/// Consoles that stream their log never go quiet, so this window ends the
/// drain instead of the idle timeout.
pub const REPLY_WINDOW: Duration = Duration::from_millis(500);

/// One target's conversation
///
/// Connecting and writing share the per-target deadline. Once the last
/// command is flushed the target counts as applied: the reply is only read
/// for diagnostics, under its own short window.
async fn dispatch_one<C: ConsoleConnector + ?Sized>(
    connector: &C,
    target: &ConnectionTarget,
    commands: &[String],
    options: &DispatchOptions,
) -> Result<(), ConsoleError> {
    let deadline = Instant::now() + options.target_timeout;
    let timed_out = || ConsoleError::Connection {
        address: target.address(),
        reason: format!(
            "dispatch timed out after {}ms",
            options.target_timeout.as_millis()
        ),
    };

    let mut conversation = tokio::time::timeout_at(deadline, connector.connect(target))
        .await
        .map_err(|_| timed_out())??;

    let written = match tokio::time::timeout_at(
        deadline,
        write_batch(conversation.as_mut(), commands, options),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(timed_out()),
    };

    if written.is_ok() {
        match tokio::time::timeout(REPLY_WINDOW, conversation.drain_response()).await {
            Ok(Ok(text)) => tracing::debug!(addr = %target, response = %text.trim_end(), "Console replied"),
            Ok(Err(e)) => tracing::debug!(addr = %target, error = %e, "No reply after batch"),
            Err(_) => tracing::debug!(addr = %target, "Console still talking, not waiting for it"),
        }
    }

    conversation.close().await;
    written
}

async fn write_batch(
    conversation: &mut dyn ConsoleConversation,
    commands: &[String],
    options: &DispatchOptions,
) -> Result<(), ConsoleError> {
    if !options.settle_delay.is_zero() {
        tokio::time::sleep(options.settle_delay).await;
    }

    for command in commands {
        conversation.send_command(command).await?;
    }
    conversation
        .send_command(&echo_command(&options.completion_message))
        .await
}
