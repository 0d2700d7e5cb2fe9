//! Change notifications for the `recipes` table.

use tokio::sync::broadcast;
use tracing::debug;

/// Broadcast channel capacity for change notifications
pub(crate) const CHANNEL_CAPACITY: usize = 64;

/// A committed mutation of the `recipes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeChange {
    Inserted(String),
    Updated(String),
    Deleted(String),
}

/// Fan-out of committed recipe mutations.
pub struct RecipeChangeNotifier {
    sender: broadcast::Sender<RecipeChange>,
}

impl RecipeChangeNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish a change to all subscribers.
    pub fn notify(&self, change: RecipeChange) {
        if self.sender.receiver_count() > 0 {
            debug!(?change, "Broadcasting recipe change");
            let _ = self.sender.send(change);
        }
    }

    /// Subscribe to future changes.
    pub fn subscribe(&self) -> broadcast::Receiver<RecipeChange> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for RecipeChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
