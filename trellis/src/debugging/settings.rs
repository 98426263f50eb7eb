//! Shared debugging settings with a change signal.
//!
//! Any number of subscribers receive a payload-free [`DebuggingChanged`]
//! whenever the configuration actually changes, and re-read the current
//! value from the settings.

use std::cell::Cell;
use std::rc::Rc;

use tokio::sync::broadcast;

use super::config::DebuggingConfig;

const CHANNEL_CAPACITY: usize = 16;

/// Signal fired when the debugging configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebuggingChanged;

struct Inner {
    config: Cell<DebuggingConfig>,
    changed: broadcast::Sender<DebuggingChanged>,
}

/// Cheaply clonable handle; clones share the same configuration.
#[derive(Clone)]
pub struct DebuggingSettings {
    inner: Rc<Inner>,
}

impl DebuggingSettings {
    pub fn new(config: DebuggingConfig) -> Self {
        let (changed, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Rc::new(Inner {
                config: Cell::new(config),
                changed,
            }),
        }
    }

    pub fn config(&self) -> DebuggingConfig {
        self.inner.config.get()
    }

    /// Replace the configuration, notifying subscribers if it changed.
    pub fn set(&self, config: DebuggingConfig) {
        if self.inner.config.replace(config) == config {
            return;
        }
        tracing::debug!(?config, "debugging configuration changed");
        // No subscribers is fine.
        let _ = self.inner.changed.send(DebuggingChanged);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DebuggingChanged> {
        self.inner.changed.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.changed.receiver_count()
    }
}

impl Default for DebuggingSettings {
    fn default() -> Self {
        Self::new(DebuggingConfig::default())
    }
}

impl std::fmt::Debug for DebuggingSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebuggingSettings")
            .field("config", &self.config())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Drain pending signals; true if at least one arrived (lagging counts).
pub fn drain_changes(receiver: &mut broadcast::Receiver<DebuggingChanged>) -> bool {
    let mut changed = false;
    loop {
        match receiver.try_recv() {
            Ok(DebuggingChanged) | Err(broadcast::error::TryRecvError::Lagged(_)) => changed = true,
            Err(broadcast::error::TryRecvError::Empty) | Err(broadcast::error::TryRecvError::Closed) => {
                return changed;
            }
        }
    }
}
