use crate::autosave::Autosaver;
use crate::codec::{read_draft_file, write_draft_file};
use crate::config::StoreConfig;
use crate::errors::AppResult;
use crate::factory::{create_new_note, prepare_for_save, CreateNoteArgs};
use crate::models::{DraftSummary, SoapNoteRecord, StoredDraft};
use crate::store::DraftStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn envelope(note: &SoapNoteRecord) -> StoredDraft {
    StoredDraft {
        id: note.metadata.note_id.clone(),
        updated_at: note.metadata.updated_at.clone(),
        note: note.clone(),
    }
}

/// Orchestration facade the UI shell drives: factory, derived-field
/// stamping, store, codec, and the debounced autosave path behind one
/// handle. The editing state itself stays with the caller; it only becomes
/// durable through the save paths here.
pub struct NoteService {
    store: Arc<DraftStore>,
    autosaver: Autosaver,
    author: String,
}

impl NoteService {
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let store = Arc::new(DraftStore::open(config)?);
        let autosaver = Autosaver::new(store.clone(), config.autosave_delay_ms);
        Ok(Self {
            store,
            autosaver,
            author: config.author.clone(),
        })
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    /// Creates a new note, persists its first revision, and returns the
    /// prepared record for editing.
    pub async fn create_draft(&self, args: &CreateNoteArgs) -> AppResult<SoapNoteRecord> {
        let mut note = create_new_note(args);
        prepare_for_save(&mut note, &self.author);
        self.store.save_draft(&envelope(&note)).await?;
        Ok(note)
    }

    /// Stamps a new revision and persists it immediately.
    pub async fn save_now(&self, note: &SoapNoteRecord) -> AppResult<SoapNoteRecord> {
        let mut prepared = note.clone();
        prepare_for_save(&mut prepared, &self.author);
        self.store.save_draft(&envelope(&prepared)).await?;
        Ok(prepared)
    }

    /// Stamps a new revision and schedules it on the debounce timer. A later
    /// edit within the quiet period supersedes this one.
    pub fn schedule_autosave(&self, note: &SoapNoteRecord) {
        let mut prepared = note.clone();
        prepare_for_save(&mut prepared, &self.author);
        self.autosaver.schedule(envelope(&prepared));
    }

    pub async fn list_drafts(&self) -> AppResult<Vec<DraftSummary>> {
        self.store.list_drafts().await
    }

    pub async fn open_draft(&self, id: &str) -> AppResult<Option<SoapNoteRecord>> {
        Ok(self.store.get_draft(id).await?.map(|draft| draft.note))
    }

    pub async fn delete_draft(&self, id: &str) -> AppResult<()> {
        self.store.delete_draft(id).await
    }

    pub async fn clear_all_drafts(&self) -> AppResult<()> {
        self.store.clear_all_drafts().await
    }

    /// Imports a draft file: validate, stamp a new revision, persist under
    /// the imported note's own id. On validation failure nothing is
    /// persisted and the caller's editing state is untouched.
    pub async fn import_draft(&self, path: &Path) -> AppResult<SoapNoteRecord> {
        let parsed = read_draft_file(path)?;
        self.save_now(&parsed).await
    }

    /// Exports the record as a draft file into `dir`; returns the path.
    pub async fn export_draft(&self, note: &SoapNoteRecord, dir: &Path) -> AppResult<PathBuf> {
        write_draft_file(note, dir)
    }

    /// Cancels any pending autosave. Call when the editing view closes.
    pub fn teardown(&self) {
        self.autosaver.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::NoteService;
    use crate::config::StoreConfig;
    use crate::errors::AppError;
    use crate::factory::CreateNoteArgs;

    fn args() -> CreateNoteArgs {
        CreateNoteArgs {
            date_of_session: "2024-01-05".to_string(),
            session_number: 3,
            client_key: "CL1".to_string(),
            client_name: None,
            student_clinician: "S. Clinician".to_string(),
            supervisor: "Dr. Supervisor".to_string(),
        }
    }

    #[tokio::test]
    async fn create_persists_first_revision() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = NoteService::new(&StoreConfig::new(dir.path())).expect("service");

        let note = service.create_draft(&args()).await.expect("create");
        assert_eq!(note.metadata.version, 2); // factory v1 + save stamp

        let opened = service
            .open_draft(&note.metadata.note_id)
            .await
            .expect("open")
            .expect("present");
        assert_eq!(opened, note);
    }

    #[tokio::test]
    async fn opening_an_absent_draft_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = NoteService::new(&StoreConfig::new(dir.path())).expect("service");
        assert!(service.open_draft("missing").await.expect("open").is_none());
    }

    #[tokio::test]
    async fn import_of_invalid_file_persists_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = NoteService::new(&StoreConfig::new(dir.path())).expect("service");

        let bogus = dir.path().join("bogus.soap.json");
        std::fs::write(&bogus, r#"{"foo": "bar"}"#).expect("write");

        let err = service.import_draft(&bogus).await.expect_err("must fail");
        assert!(matches!(err, AppError::Validation(_)));
        assert!(service.list_drafts().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn export_then_import_updates_the_same_draft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = NoteService::new(&StoreConfig::new(dir.path())).expect("service");

        let note = service.create_draft(&args()).await.expect("create");
        let export_dir = tempfile::tempdir().expect("export dir");
        let path = service
            .export_draft(&note, export_dir.path())
            .await
            .expect("export");

        let imported = service.import_draft(&path).await.expect("import");
        assert_eq!(imported.metadata.note_id, note.metadata.note_id);
        assert_eq!(imported.metadata.version, note.metadata.version + 1);
        assert_eq!(service.list_drafts().await.expect("list").len(), 1);
    }
}
