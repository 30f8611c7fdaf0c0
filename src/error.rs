use thiserror::Error;

use crate::audit::AuditError;
use crate::store::{ItemId, StoreError, VersionKey};

/// Errors from opening or confirming the archive date dialog.
///
/// Only `InvalidDateFormat` is meant for the operator; everything else is an
/// environment or programming error and aborts the request.
#[derive(Debug, Error)]
pub enum DialogError {
    #[error("access denied")]
    AccessDenied,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("item {id} not found in database {database}")]
    NotFound { database: String, id: ItemId },
    #[error("failed to parse date {value:?}")]
    InvalidDateFormat {
        value: String,
        /// The version whose input failed, or `None` for the item date.
        version: Option<VersionKey>,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl DialogError {
    pub fn is_user_error(&self) -> bool {
        matches!(self, DialogError::InvalidDateFormat { .. })
    }

    /// Text of the alert shown to the operator, for user errors.
    pub fn alert_message(&self) -> Option<String> {
        match self {
            DialogError::InvalidDateFormat { value, .. } => Some(format!(
                "Failed to parse date {}. No changes have been made.",
                value
            )),
            _ => None,
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            DialogError::AccessDenied => 403,
            DialogError::InvalidRequest(_) => 400,
            DialogError::NotFound { .. } => 404,
            DialogError::InvalidDateFormat { .. } => 422,
            DialogError::Store(StoreError::Conflict { .. }) => 409,
            DialogError::Store(_) => 500,
            DialogError::Audit(_) => 500,
        }
    }
}
