//! The archive date dialog.
//!
//! Opening resolves the item named by the request and shows its archive date
//! and one date per version. Confirming validates the submitted dates, audits
//! each change and writes every field under its own [`EditContext`].
//!
//! ## Example
//!
//! ```ignore
//! use archive_date_dialog::{ArchiveDateDialog, DialogConfig, DialogRequest, InMemoryItemStore, LogAuditSink, Session};
//!
//! let dialog = ArchiveDateDialog::from_config(InMemoryItemStore::new(), LogAuditSink::new(), DialogConfig::default())?;
//! let session = Session::for_user("sitecore\\admin", &["admin"]);
//! let request = DialogRequest::new("{110D559F-DEA5-42EA-9C1C-8A5DF7E70EF9}", "master");
//!
//! let view = dialog.open(&request, &session)?;
//! let mut form = view.form();
//! form.item_date = "2024-01-15".into();
//! match dialog.submit(&request, &session, &form)? {
//!     DialogResponse::Close(report) => { /* saved */ }
//!     DialogResponse::Alert(message) => { /* show message, nothing written */ }
//! }
//! ```
//!
//! [`EditContext`]: crate::store::EditContext

mod dialog;
mod render;
mod request;
mod view;

pub use dialog::ArchiveDateDialog;
pub use render::ITEM_DATE_INPUT;
pub use request::DialogRequest;
pub use view::{
    ConfirmForm, ConfirmReport, DialogResponse, DialogView, FieldChange, VersionChange,
    VersionRow,
};
