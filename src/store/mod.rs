mod blob;
mod sqlite;

pub use blob::BlobBackend;
pub use sqlite::SqliteBackend;

use crate::config::StoreConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{DraftSummary, StoredDraft};
use async_trait::async_trait;
use std::fs;

const DB_FILENAME: &str = "soap-note-local.db";
const FALLBACK_FILENAME: &str = "soap-note-drafts-fallback.json";

/// Persistence substrate for draft envelopes. Both implementations present
/// identical external behavior: upsert by id, summaries sorted by
/// `updated_at` descending, `get` returns `None` for absent ids, `delete`
/// of an absent id is a no-op.
#[async_trait]
pub trait DraftBackend: Send + Sync {
    async fn save_draft(&self, draft: &StoredDraft) -> AppResult<()>;
    async fn list_drafts(&self) -> AppResult<Vec<DraftSummary>>;
    async fn get_draft(&self, id: &str) -> AppResult<Option<StoredDraft>>;
    async fn delete_draft(&self, id: &str) -> AppResult<()>;
    async fn clear_all_drafts(&self) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Blob,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Blob => "blob",
        }
    }
}

/// Draft store facade. The backend is probed once at open time; nothing
/// outside [`DraftStore::open`] branches on which backend is active.
pub struct DraftStore {
    backend: Box<dyn DraftBackend>,
    kind: StoreKind,
}

impl DraftStore {
    /// Opens the preferred transactional backend, falling back to the
    /// whole-blob file backend when the database cannot be opened in this
    /// environment. The choice is made once and held for the session.
    pub fn open(config: &StoreConfig) -> AppResult<Self> {
        fs::create_dir_all(&config.data_dir)
            .map_err(|err| AppError::StorageOpen(err.to_string()))?;

        match SqliteBackend::new(&config.data_dir.join(DB_FILENAME)) {
            Ok(backend) => {
                tracing::info!(backend = StoreKind::Sqlite.as_str(), "draft store opened");
                Ok(Self {
                    backend: Box::new(backend),
                    kind: StoreKind::Sqlite,
                })
            }
            Err(error) => {
                tracing::warn!(error = %error, "sqlite backend unavailable, using blob fallback");
                let backend = BlobBackend::new(config.data_dir.join(FALLBACK_FILENAME));
                Ok(Self {
                    backend: Box::new(backend),
                    kind: StoreKind::Blob,
                })
            }
        }
    }

    /// Forces the blob fallback regardless of environment capability.
    pub fn open_fallback(config: &StoreConfig) -> AppResult<Self> {
        fs::create_dir_all(&config.data_dir)
            .map_err(|err| AppError::StorageOpen(err.to_string()))?;
        Ok(Self {
            backend: Box::new(BlobBackend::new(config.data_dir.join(FALLBACK_FILENAME))),
            kind: StoreKind::Blob,
        })
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    /// Upsert by id: an existing draft with the same id is fully replaced,
    /// last-writer-wins.
    pub async fn save_draft(&self, draft: &StoredDraft) -> AppResult<()> {
        self.backend.save_draft(draft).await
    }

    /// All summaries, most recently touched first, consistent with the full
    /// records at call time.
    pub async fn list_drafts(&self) -> AppResult<Vec<DraftSummary>> {
        self.backend.list_drafts().await
    }

    /// `None` when absent; absence is not an error.
    pub async fn get_draft(&self, id: &str) -> AppResult<Option<StoredDraft>> {
        self.backend.get_draft(id).await
    }

    pub async fn delete_draft(&self, id: &str) -> AppResult<()> {
        self.backend.delete_draft(id).await
    }

    /// Removes every draft. Irreversible; confirmation is the caller's job.
    pub async fn clear_all_drafts(&self) -> AppResult<()> {
        self.backend.clear_all_drafts().await
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftStore, StoreKind};
    use crate::config::StoreConfig;
    use crate::factory::{create_new_note, CreateNoteArgs};
    use crate::models::StoredDraft;

    fn draft(client_key: &str, updated_at: &str) -> StoredDraft {
        let note = create_new_note(&CreateNoteArgs {
            date_of_session: "2024-01-05".to_string(),
            session_number: 1,
            client_key: client_key.to_string(),
            client_name: None,
            student_clinician: String::new(),
            supervisor: String::new(),
        });
        StoredDraft {
            id: note.metadata.note_id.clone(),
            updated_at: updated_at.to_string(),
            note,
        }
    }

    async fn exercise_contract(store: DraftStore) {
        let older = draft("CL-old", "2024-01-01T10:00:00+00:00");
        let newer = draft("CL-new", "2024-02-01T10:00:00+00:00");
        store.save_draft(&older).await.expect("save older");
        store.save_draft(&newer).await.expect("save newer");

        let summaries = store.list_drafts().await.expect("list");
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, newer.id);
        assert_eq!(summaries[1].id, older.id);
        assert_eq!(summaries[0].client_key.as_deref(), Some("CL-new"));

        let loaded = store
            .get_draft(&older.id)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(loaded, older);

        // Upsert fully replaces the record under the same id.
        let mut replaced = older.clone();
        replaced.note.header.client_key = "CL-renamed".to_string();
        replaced.updated_at = "2024-03-01T10:00:00+00:00".to_string();
        store.save_draft(&replaced).await.expect("upsert");
        let summaries = store.list_drafts().await.expect("list after upsert");
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, replaced.id);
        assert_eq!(summaries[0].client_key.as_deref(), Some("CL-renamed"));

        // Deleting an absent id succeeds quietly.
        store.delete_draft("no-such-id").await.expect("noop delete");
        store.delete_draft(&newer.id).await.expect("delete");
        assert!(store.get_draft(&newer.id).await.expect("get").is_none());

        store.clear_all_drafts().await.expect("clear");
        assert!(store.list_drafts().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn sqlite_backend_honors_store_contract() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DraftStore::open(&StoreConfig::new(dir.path())).expect("open");
        assert_eq!(store.kind(), StoreKind::Sqlite);
        exercise_contract(store).await;
    }

    #[tokio::test]
    async fn blob_backend_honors_store_contract() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DraftStore::open_fallback(&StoreConfig::new(dir.path())).expect("open");
        assert_eq!(store.kind(), StoreKind::Blob);
        exercise_contract(store).await;
    }

    #[tokio::test]
    async fn corrupt_blob_reads_as_empty_collection() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("soap-note-drafts-fallback.json"),
            "{{{ not json",
        )
        .expect("write corrupt blob");

        let store = DraftStore::open_fallback(&StoreConfig::new(dir.path())).expect("open");
        assert!(store.list_drafts().await.expect("list").is_empty());

        // A save over a corrupt blob starts a fresh collection.
        let fresh = draft("CL1", "2024-01-01T00:00:00+00:00");
        store.save_draft(&fresh).await.expect("save");
        assert_eq!(store.list_drafts().await.expect("list").len(), 1);
    }
}
