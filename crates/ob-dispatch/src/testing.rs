//! In-memory console fakes for unit tests

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use ob_core::traits::{ConsoleConnector, ConsoleConversation};
use ob_protocol::{ConnectionTarget, ConsoleError};

#[derive(Default)]
struct Shared {
    sent: HashMap<String, Vec<String>>,
    closed: HashSet<String>,
    connects: Vec<String>,
}

/// Connector whose consoles record what they are sent
#[derive(Default)]
pub struct FakeConnector {
    shared: Arc<Mutex<Shared>>,
    refusing: HashSet<String>,
    failing_writes: HashSet<String>,
    hanging: HashSet<String>,
    chatty: HashSet<String>,
    replies: HashMap<String, String>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(mut self, host: &str) -> Self {
        self.refusing.insert(host.to_string());
        self
    }

    pub fn failing_writes(mut self, host: &str) -> Self {
        self.failing_writes.insert(host.to_string());
        self
    }

    pub fn hanging(mut self, host: &str) -> Self {
        self.hanging.insert(host.to_string());
        self
    }

    /// Consoles that never stop printing after a batch
    pub fn chatty(mut self, host: &str) -> Self {
        self.chatty.insert(host.to_string());
        self
    }

    pub fn replying(mut self, host: &str, text: &str) -> Self {
        self.replies.insert(host.to_string(), text.to_string());
        self
    }

    pub fn sent_to(&self, host: &str) -> Vec<String> {
        let shared = self.shared.lock().unwrap();
        shared.sent.get(host).cloned().unwrap_or_default()
    }

    pub fn was_closed(&self, host: &str) -> bool {
        self.shared.lock().unwrap().closed.contains(host)
    }

    pub fn connects(&self) -> Vec<String> {
        self.shared.lock().unwrap().connects.clone()
    }
}

#[async_trait]
impl ConsoleConnector for FakeConnector {
    async fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> Result<Box<dyn ConsoleConversation>, ConsoleError> {
        self.shared.lock().unwrap().connects.push(target.host.clone());

        if self.hanging.contains(&target.host) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.refusing.contains(&target.host) {
            return Err(ConsoleError::ConnectionRefused {
                address: target.address(),
            });
        }

        Ok(Box::new(FakeConversation {
            target: target.clone(),
            shared: Arc::clone(&self.shared),
            fail_writes: self.failing_writes.contains(&target.host),
            chatty: self.chatty.contains(&target.host),
            reply: self.replies.get(&target.host).cloned().unwrap_or_default(),
        }))
    }
}

struct FakeConversation {
    target: ConnectionTarget,
    shared: Arc<Mutex<Shared>>,
    fail_writes: bool,
    chatty: bool,
    reply: String,
}

#[async_trait]
impl ConsoleConversation for FakeConversation {
    async fn send_command(&mut self, command: &str) -> Result<(), ConsoleError> {
        if self.fail_writes {
            return Err(ConsoleError::Connection {
                address: self.target.address(),
                reason: "broken pipe".to_string(),
            });
        }
        let mut shared = self.shared.lock().unwrap();
        shared
            .sent
            .entry(self.target.host.clone())
            .or_default()
            .push(command.to_string());
        Ok(())
    }

    async fn drain_response(&mut self) -> Result<String, ConsoleError> {
        if self.chatty {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(std::mem::take(&mut self.reply))
    }

    async fn close(self: Box<Self>) {
        self.shared
            .lock()
            .unwrap()
            .closed
            .insert(self.target.host.clone());
    }
}
