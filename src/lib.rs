pub mod autosave;
pub mod codec;
pub mod config;
pub mod derived;
pub mod errors;
pub mod factory;
pub mod filename;
pub mod models;
pub mod phi;
pub mod service;
pub mod store;

pub use autosave::Autosaver;
pub use codec::{parse_draft_text, read_draft_file, write_draft_file};
pub use config::StoreConfig;
pub use derived::{apply_derived_fields, compute_accuracy};
pub use errors::{AppError, AppResult};
pub use factory::{create_new_note, prepare_for_save, CreateNoteArgs};
pub use filename::build_draft_filename;
pub use models::{
    CueingLevel, DataRow, DraftSummary, NoteHeader, NoteMetadata, Objective, SoapNoteRecord,
    SoapSection, StoredDraft, SupervisorReview, TherapyPlan,
};
pub use phi::header_phi_warnings;
pub use service::NoteService;
pub use store::{DraftBackend, DraftStore, StoreKind};

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Installs the JSON file logger under `data_dir/logs`. Safe to call once
/// per process; the appender guard lives for the process lifetime.
pub fn init_tracing(data_dir: &Path) -> Result<(), String> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "soap-note-core.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}
