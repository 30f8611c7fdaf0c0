//! Audit records for archive date changes.
//!
//! Each set or clear of an archive date produces one [`AuditRecord`], handed
//! to an [`AuditSink`] before the field is written.

mod log_sink;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{Item, VersionKey};

pub use log_sink::LogAuditSink;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("audit buffer poisoned")]
    BufferPoisoned,
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    SetItem,
    ClearItem,
    SetVersion,
    ClearVersion,
}

/// One audited change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub actor: String,
    pub action: AuditAction,
    /// Formatted item or version descriptor.
    pub subject: String,
    /// Formatted date for set actions.
    pub value: Option<String>,
}

impl AuditRecord {
    pub fn message(&self) -> String {
        let value = self.value.as_deref().unwrap_or("");
        match self.action {
            AuditAction::SetItem => {
                format!("Set Item Archive date: {}, date: {}", self.subject, value)
            }
            AuditAction::ClearItem => format!("Clear Item Archive date: {}", self.subject),
            AuditAction::SetVersion => {
                format!("Set Version Archive date: {}, date: {}", self.subject, value)
            }
            AuditAction::ClearVersion => format!("Clear Version Archive date: {}", self.subject),
        }
    }
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AUDIT ({}): {}", self.actor, self.message())
    }
}

/// Receives audit records.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// `master:/sitecore/content/home, id: {ID}`
pub fn format_item(item: &Item) -> String {
    format!("{}:{}, id: {}", item.database, item.path, item.id)
}

/// `master:/sitecore/content/home, language: en, version: 1, id: {ID}`
pub fn format_version(item: &Item, key: &VersionKey) -> String {
    format!(
        "{}:{}, language: {}, version: {}, id: {}",
        item.database, item.path, key.language, key.number, item.id
    )
}
