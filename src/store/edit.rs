use std::collections::BTreeMap;

use crate::lock::{LockGuard, LockManager};

use super::{ItemStore, RecordRef, StoreError};

type StoreLock<S> = <<S as ItemStore>::Locks as LockManager>::Lock;

/// A scoped edit of one record.
///
/// Holds the record's lock from `begin` until the context is committed or
/// dropped. Changes are staged and reach the store in a single `apply_edit`
/// call on `commit`; dropping the context without committing discards them.
pub struct EditContext<'a, S: ItemStore> {
    store: &'a S,
    record: RecordRef,
    revision: u64,
    changes: BTreeMap<String, String>,
    committed: bool,
    _guard: LockGuard<StoreLock<S>>,
}

impl<'a, S: ItemStore> EditContext<'a, S> {
    /// Lock `record` for editing. `revision` is the revision the caller read.
    pub fn begin(store: &'a S, record: RecordRef, revision: u64) -> Result<Self, StoreError> {
        let key = record.lock_key();
        let lock = store.locks().get_lock(&key)?;
        let guard = LockGuard::acquire(lock, key)?;
        Ok(Self {
            store,
            record,
            revision,
            changes: BTreeMap::new(),
            committed: false,
            _guard: guard,
        })
    }

    pub fn record(&self) -> &RecordRef {
        &self.record
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> &mut Self {
        self.changes.insert(field.to_string(), value.into());
        self
    }

    /// Write the staged changes and release the lock. Returns the record's
    /// revision after the write.
    pub fn commit(mut self) -> Result<u64, StoreError> {
        if self.changes.is_empty() {
            self.committed = true;
            return Ok(self.revision);
        }
        let revision = self
            .store
            .apply_edit(&self.record, &self.changes, self.revision)?;
        self.committed = true;
        tracing::info!(record = %self.record, revision, "edit committed");
        Ok(revision)
    }
}

impl<S: ItemStore> Drop for EditContext<'_, S> {
    fn drop(&mut self) {
        if !self.committed && !self.changes.is_empty() {
            tracing::debug!(
                record = %self.record,
                fields = self.changes.len(),
                "edit discarded"
            );
        }
    }
}
