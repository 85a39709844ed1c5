//! Popup → background messaging
//!
//! Delivery is at-most-once and never blocks the sender. A full or closed
//! channel drops the message with a warning; receivers must not depend on
//! seeing every notification.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::shortcut::Shortcut;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RuntimeMessage {
    /// Shortcut bindings changed in storage
    RefreshShortcuts {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shortcut: Option<Shortcut>,
    },
    /// Open the URL bound to `key`
    OpenShortcut { key: u32 },
}

impl RuntimeMessage {
    pub fn action(&self) -> &'static str {
        match self {
            RuntimeMessage::RefreshShortcuts { .. } => "refreshShortcuts",
            RuntimeMessage::OpenShortcut { .. } => "openShortcut",
        }
    }
}

/// Sending half. Cloneable; a disconnected notifier silently drops.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    tx: Option<mpsc::Sender<RuntimeMessage>>,
}

impl Notifier {
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Queue `message` without waiting. Returns whether it was queued.
    pub fn notify(&self, message: RuntimeMessage) -> bool {
        let Some(tx) = &self.tx else {
            tracing::debug!(action = message.action(), "No listener attached, dropping message");
            return false;
        };

        match tx.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => {
                tracing::warn!(action = message.action(), "Listener inbox full, dropping message");
                false
            }
            Err(TrySendError::Closed(message)) => {
                tracing::warn!(action = message.action(), "Listener gone, dropping message");
                false
            }
        }
    }
}

/// Receiving half, owned by the background listener.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::Receiver<RuntimeMessage>,
}

impl Inbox {
    /// Wait for the next message; `None` once every notifier is dropped.
    pub async fn recv(&mut self) -> Option<RuntimeMessage> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<RuntimeMessage> {
        self.rx.try_recv().ok()
    }
}

pub fn message_channel(capacity: usize) -> (Notifier, Inbox) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (Notifier { tx: Some(tx) }, Inbox { rx })
}
