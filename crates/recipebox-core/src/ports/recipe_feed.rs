//! Live recipe snapshots.
//!
//! A feed pushes the full, ordered recipe list to a listener once on
//! subscription and again after every change to the store.

use std::fmt;
use std::sync::Arc;

use super::RepositoryError;
use crate::domain::Recipe;

/// Callback invoked with each ordered snapshot (newest first).
pub type SnapshotListener = Arc<dyn Fn(Vec<Recipe>) + Send + Sync>;

/// Cancellation handle for a feed subscription.
///
/// Dropping the handle cancels the subscription.
pub struct FeedSubscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl FeedSubscription {
    /// Wrap a cancellation closure.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop delivering snapshots.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for FeedSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedSubscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Source of live recipe snapshots.
pub trait RecipeFeed: Send + Sync {
    /// Register `listener` and deliver the current snapshot.
    fn subscribe(&self, listener: SnapshotListener) -> Result<FeedSubscription, RepositoryError>;
}
