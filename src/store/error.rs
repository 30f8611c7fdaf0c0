use thiserror::Error;

use crate::lock::LockError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store lock poisoned during {0}")]
    Poisoned(&'static str),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("database not found: {0}")]
    DatabaseNotFound(String),
    #[error("record not found: {0}")]
    RecordNotFound(String),
    #[error("concurrent edit on {record} (expected revision {expected}, found {actual})")]
    Conflict {
        record: String,
        expected: u64,
        actual: u64,
    },
    #[error("record serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}
