use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("STORAGE_OPEN_FAILED: {0}")]
    StorageOpen(String),
    #[error("STORAGE_READ_FAILED: {0}")]
    StorageRead(String),
    #[error("STORAGE_WRITE_FAILED: {0}")]
    StorageWrite(String),
    #[error("STORAGE_DELETE_FAILED: {0}")]
    StorageDelete(String),
    #[error("STORAGE_CLEAR_FAILED: {0}")]
    StorageClear(String),
    #[error("VALIDATION_FAILED: {0}")]
    Validation(String),
    #[error("IO_FAILURE: {0}")]
    Io(String),
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl AppError {
    /// True for faults raised by the persistence backends; callers treat
    /// these as recoverable (retry or show a dismissible banner).
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            Self::StorageOpen(_)
                | Self::StorageRead(_)
                | Self::StorageWrite(_)
                | Self::StorageDelete(_)
                | Self::StorageClear(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
