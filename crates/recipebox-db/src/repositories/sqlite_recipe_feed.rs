//! Live recipe snapshots over the `SQLite` store.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use recipebox_core::{
    FeedSubscription, RecipeFeed, RecipeRepository, RepositoryError, SnapshotListener,
};

use super::sqlite_recipe_repository::SqliteRecipeRepository;

/// `RecipeFeed` backed by the repository's change notifier.
///
/// Each subscription runs one task that sends the ordered list once, then
/// re-queries and sends it again after every committed change.
pub struct SqliteRecipeFeed {
    repo: Arc<SqliteRecipeRepository>,
}

impl SqliteRecipeFeed {
    pub fn new(repo: Arc<SqliteRecipeRepository>) -> Self {
        Self { repo }
    }
}

async fn deliver(repo: &SqliteRecipeRepository, listener: &SnapshotListener) {
    match repo.list_ordered().await {
        Ok(recipes) => listener(recipes),
        Err(e) => warn!(error = %e, "Failed to load recipe snapshot"),
    }
}

impl RecipeFeed for SqliteRecipeFeed {
    fn subscribe(&self, listener: SnapshotListener) -> Result<FeedSubscription, RepositoryError> {
        let runtime = Handle::try_current()
            .map_err(|e| RepositoryError::Unavailable(format!("no async runtime: {e}")))?;

        // Subscribe before the first query so no change is missed in between.
        let mut changes = self.repo.notifier().subscribe();
        let repo = Arc::clone(&self.repo);

        let task = runtime.spawn(async move {
            deliver(&repo, &listener).await;
            loop {
                match changes.recv().await {
                    Ok(change) => {
                        debug!(?change, "Refreshing recipe snapshot");
                        deliver(&repo, &listener).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Recipe feed lagged behind changes");
                        deliver(&repo, &listener).await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Ok(FeedSubscription::new(move || task.abort()))
    }
}
