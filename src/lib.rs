//! Archive date dialog for content items.
//!
//! Lets an operator set or clear the archive date of an item and of each of
//! its language versions. The item store, the access policy and the audit
//! sink are collaborators behind traits; in-memory implementations are
//! provided for tests and development.

pub mod access;
pub mod audit;
pub mod config;
pub mod dates;
pub mod dialog;
mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod lock;
pub mod store;

pub use access::{AccessPolicy, AllowAll, RolePolicy, Session};
pub use audit::{AuditAction, AuditError, AuditRecord, AuditSink, LogAuditSink};
pub use config::{ConfigError, DialogConfig};
pub use dates::{DateError, DateInput, DisplayZone, ValidationPolicy};
pub use dialog::{
    ArchiveDateDialog, ConfirmForm, ConfirmReport, DialogRequest, DialogResponse, DialogView,
    FieldChange, VersionChange, VersionRow,
};
pub use error::DialogError;
pub use store::{
    EditContext, InMemoryItemStore, Item, ItemId, ItemStore, RecordRef, StoreError, Version,
    VersionKey, ARCHIVE_DATE_FIELD, ARCHIVE_VERSION_DATE_FIELD,
};
