use crate::models::StoredDraft;
use crate::store::DraftStore;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Debounced autosave: each call to [`Autosaver::schedule`] cancels the
/// pending save and schedules a new one, so only the last edit inside a
/// quiet period is persisted. At most one save per editing session is
/// pending at any time, and the pending task is the only cancellable unit;
/// once the delay elapses the write itself runs to completion.
pub struct Autosaver {
    store: Arc<DraftStore>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Autosaver {
    pub fn new(store: Arc<DraftStore>, delay_ms: u64) -> Self {
        Self {
            store,
            delay: Duration::from_millis(delay_ms),
            pending: Mutex::new(None),
        }
    }

    /// Schedules `draft` to be persisted after the debounce delay,
    /// cancelling any previously scheduled save.
    pub fn schedule(&self, draft: StoredDraft) {
        let store = self.store.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(error) = store.save_draft(&draft).await {
                tracing::warn!(draft_id = %draft.id, error = %error, "autosave failed");
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(prior) = pending.replace(handle) {
            prior.abort();
        }
    }

    /// Cancels any outstanding scheduled save. Called on editing-view
    /// teardown so no write lands after the view is gone.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(prior) = pending.take() {
            prior.abort();
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.cancel();
    }
}
