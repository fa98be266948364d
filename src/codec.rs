use crate::errors::{AppError, AppResult};
use crate::filename::build_draft_filename;
use crate::models::SoapNoteRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Serializes the full record as pretty-printed JSON into `dir`, named by
/// the filename contract. Returns the path written. Export only; derived
/// fields are whatever the record currently carries.
pub fn write_draft_file(note: &SoapNoteRecord, dir: &Path) -> AppResult<PathBuf> {
    let filename = build_draft_filename(
        &note.header.date_of_session,
        &note.header.client_key,
        note.header.session_number,
    );
    let path = dir.join(filename);
    let content = serde_json::to_string_pretty(note)?;
    fs::write(&path, content).map_err(|err| AppError::Io(err.to_string()))?;
    tracing::debug!(path = %path.display(), "exported draft file");
    Ok(path)
}

/// Reads and validates a draft file. See [`parse_draft_text`] for the
/// validation contract.
pub fn read_draft_file(path: &Path) -> AppResult<SoapNoteRecord> {
    let text = fs::read_to_string(path).map_err(|err| AppError::Io(err.to_string()))?;
    parse_draft_text(&text)
}

/// Parses draft file text and enforces minimal structural integrity:
/// `metadata.noteId`, `header.clientKey`, `therapyPlan`, and `soap` must all
/// be present and non-empty. Payloads that parse as JSON but fail the shape
/// check are a validation fault, not a parse fault; unknown extra fields are
/// accepted. The record is returned as parsed — version bumps and derived
/// recomputation happen at the save call site.
pub fn parse_draft_text(text: &str) -> AppResult<SoapNoteRecord> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|err| AppError::Validation(format!("draft file is not valid JSON: {}", err)))?;

    let note_id = value
        .get("metadata")
        .and_then(|m| m.get("noteId"))
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let client_key = value
        .get("header")
        .and_then(|h| h.get("clientKey"))
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let has_plan = value.get("therapyPlan").map_or(false, |v| !v.is_null());
    let has_soap = value.get("soap").map_or(false, |v| !v.is_null());

    if note_id.is_empty() || client_key.is_empty() || !has_plan || !has_soap {
        return Err(AppError::Validation(
            "file parsed as JSON but is not a SOAP draft (missing metadata.noteId, header.clientKey, therapyPlan, or soap)"
                .to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|err| AppError::Validation(format!("draft file has malformed fields: {}", err)))
}
