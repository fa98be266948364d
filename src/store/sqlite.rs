use crate::errors::{AppError, AppResult};
use crate::models::{DraftSummary, StoredDraft};
use crate::store::DraftBackend;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Transactional backend over SQLite. The full record is stored as JSON in
/// `note_json`; summary columns are projected out in the same statement as
/// the write, so the list view can never observe a summary that disagrees
/// with its record.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    pub fn new(path: &Path) -> AppResult<Self> {
        let conn =
            Connection::open(path).map_err(|err| AppError::StorageOpen(err.to_string()))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|err| AppError::StorageOpen(err.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self, on_poison: fn(String) -> AppError) -> AppResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| on_poison("database mutex poisoned".to_string()))
    }
}

#[async_trait]
impl DraftBackend for SqliteBackend {
    async fn save_draft(&self, draft: &StoredDraft) -> AppResult<()> {
        let note_json = serde_json::to_string(&draft.note)
            .map_err(|err| AppError::StorageWrite(err.to_string()))?;
        let conn = self.lock(AppError::StorageWrite)?;
        conn.execute(
            "INSERT OR REPLACE INTO drafts (
               id, updated_at, date_of_session, client_key, session_number,
               plan_complete, soap_complete, note_json
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                draft.id,
                draft.updated_at,
                draft.note.header.date_of_session,
                draft.note.header.client_key,
                draft.note.header.session_number,
                draft.note.therapy_plan.plan_complete,
                draft.note.soap.soap_complete,
                note_json,
            ],
        )
        .map_err(|err| AppError::StorageWrite(err.to_string()))?;
        Ok(())
    }

    async fn list_drafts(&self) -> AppResult<Vec<DraftSummary>> {
        let conn = self.lock(AppError::StorageRead)?;
        let mut statement = conn
            .prepare(
                "SELECT id, updated_at, date_of_session, client_key, session_number,
                        plan_complete, soap_complete
                 FROM drafts ORDER BY updated_at DESC",
            )
            .map_err(|err| AppError::StorageRead(err.to_string()))?;

        let rows = statement
            .query_map([], |row| {
                Ok(DraftSummary {
                    id: row.get(0)?,
                    updated_at: row.get(1)?,
                    date_of_session: row.get(2)?,
                    client_key: row.get(3)?,
                    session_number: row.get(4)?,
                    plan_complete: row.get(5)?,
                    soap_complete: row.get(6)?,
                })
            })
            .map_err(|err| AppError::StorageRead(err.to_string()))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|err| AppError::StorageRead(err.to_string()))?);
        }
        Ok(result)
    }

    async fn get_draft(&self, id: &str) -> AppResult<Option<StoredDraft>> {
        let conn = self.lock(AppError::StorageRead)?;
        let row: Option<(String, String, String)> = conn
            .query_row(
                "SELECT id, updated_at, note_json FROM drafts WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
            .map_err(|err| AppError::StorageRead(err.to_string()))?;

        match row {
            Some((id, updated_at, note_json)) => {
                let note = serde_json::from_str(&note_json)
                    .map_err(|err| AppError::StorageRead(err.to_string()))?;
                Ok(Some(StoredDraft {
                    id,
                    updated_at,
                    note,
                }))
            }
            None => Ok(None),
        }
    }

    async fn delete_draft(&self, id: &str) -> AppResult<()> {
        let conn = self.lock(AppError::StorageDelete)?;
        conn.execute("DELETE FROM drafts WHERE id = ?1", [id])
            .map_err(|err| AppError::StorageDelete(err.to_string()))?;
        Ok(())
    }

    async fn clear_all_drafts(&self) -> AppResult<()> {
        let conn = self.lock(AppError::StorageClear)?;
        conn.execute("DELETE FROM drafts", [])
            .map_err(|err| AppError::StorageClear(err.to_string()))?;
        Ok(())
    }
}
