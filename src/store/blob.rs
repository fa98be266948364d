use crate::errors::{AppError, AppResult};
use crate::models::{DraftSummary, StoredDraft};
use crate::store::DraftBackend;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

/// Whole-blob fallback backend: the entire draft collection lives as one
/// JSON array in a single file, and every operation read-modify-writes that
/// blob. Single-writer, last-write-wins, no partial-update path — a known
/// scalability ceiling, acceptable for the small collections this tool
/// holds. A blob that fails to parse reads as an empty collection rather
/// than surfacing corruption to the caller.
#[derive(Debug)]
pub struct BlobBackend {
    path: PathBuf,
}

impl BlobBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> AppResult<Vec<StoredDraft>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|err| AppError::StorageRead(err.to_string()))?;
        match serde_json::from_str(&raw) {
            Ok(list) => Ok(list),
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "fallback blob unparsable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, list: &[StoredDraft], fault: fn(String) -> AppError) -> AppResult<()> {
        let raw = serde_json::to_string(list).map_err(|err| fault(err.to_string()))?;
        fs::write(&self.path, raw).map_err(|err| fault(err.to_string()))
    }
}

#[async_trait]
impl DraftBackend for BlobBackend {
    async fn save_draft(&self, draft: &StoredDraft) -> AppResult<()> {
        let mut list = self.read_all()?;
        list.retain(|entry| entry.id != draft.id);
        list.push(draft.clone());
        self.write_all(&list, AppError::StorageWrite)
    }

    async fn list_drafts(&self) -> AppResult<Vec<DraftSummary>> {
        let mut list = self.read_all()?;
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(list.iter().map(StoredDraft::summarize).collect())
    }

    async fn get_draft(&self, id: &str) -> AppResult<Option<StoredDraft>> {
        Ok(self.read_all()?.into_iter().find(|entry| entry.id == id))
    }

    async fn delete_draft(&self, id: &str) -> AppResult<()> {
        let mut list = self.read_all()?;
        let before = list.len();
        list.retain(|entry| entry.id != id);
        if list.len() == before {
            // Deleting an absent draft is a no-op.
            return Ok(());
        }
        self.write_all(&list, AppError::StorageDelete)
    }

    async fn clear_all_drafts(&self) -> AppResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|err| AppError::StorageClear(err.to_string()))
    }
}
