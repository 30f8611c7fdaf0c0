//! Item/version store contract used by the archive date dialog.
//!
//! The store owns items and their language versions. The dialog only reads
//! records and applies field edits through an [`EditContext`], which holds the
//! record's lock and applies its staged changes as one revision-checked write.

mod edit;
mod error;
mod in_memory;
mod item;

use std::collections::BTreeMap;

use crate::lock::LockManager;

pub use edit::EditContext;
pub use error::StoreError;
pub use in_memory::InMemoryItemStore;
pub use item::{
    Item, ItemId, RecordRef, Version, VersionKey, ARCHIVE_DATE_FIELD, ARCHIVE_VERSION_DATE_FIELD,
};

pub trait ItemStore: Send + Sync {
    type Locks: LockManager;

    fn database_exists(&self, database: &str) -> Result<bool, StoreError>;

    /// Fetch an item with all of its versions, in the store's native order.
    fn get_item(&self, database: &str, id: &ItemId) -> Result<Option<Item>, StoreError>;

    fn locks(&self) -> &Self::Locks;

    /// Apply field changes to one record if its revision still matches.
    ///
    /// An empty value removes the field. Returns the new revision.
    fn apply_edit(
        &self,
        record: &RecordRef,
        changes: &BTreeMap<String, String>,
        expected_revision: u64,
    ) -> Result<u64, StoreError>;
}
