//! HashMap-backed item store for tests and development.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::lock::InMemoryLockManager;

use super::item::set_field;
use super::{Item, ItemId, ItemStore, RecordRef, StoreError};

type Databases = HashMap<String, HashMap<ItemId, Vec<u8>>>;

/// In-memory item store.
///
/// Items are kept serialized, so every read hands out an independent copy.
/// Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryItemStore {
    databases: Arc<RwLock<Databases>>,
    locks: Arc<InMemoryLockManager>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_database(&self, name: &str) -> Result<(), StoreError> {
        let mut databases = self
            .databases
            .write()
            .map_err(|_| StoreError::Poisoned("add database"))?;
        databases.entry(name.to_string()).or_default();
        Ok(())
    }

    /// Insert or replace an item, creating its database if needed.
    pub fn insert(&self, item: &Item) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(item)?;
        let mut databases = self
            .databases
            .write()
            .map_err(|_| StoreError::Poisoned("insert"))?;
        databases
            .entry(item.database.clone())
            .or_default()
            .insert(item.id, bytes);
        Ok(())
    }
}

impl ItemStore for InMemoryItemStore {
    type Locks = InMemoryLockManager;

    fn database_exists(&self, database: &str) -> Result<bool, StoreError> {
        let databases = self
            .databases
            .read()
            .map_err(|_| StoreError::Poisoned("read"))?;
        Ok(databases.contains_key(database))
    }

    fn get_item(&self, database: &str, id: &ItemId) -> Result<Option<Item>, StoreError> {
        let databases = self
            .databases
            .read()
            .map_err(|_| StoreError::Poisoned("read"))?;
        let items = databases
            .get(database)
            .ok_or_else(|| StoreError::DatabaseNotFound(database.to_string()))?;
        match items.get(id) {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }

    fn locks(&self) -> &InMemoryLockManager {
        &self.locks
    }

    fn apply_edit(
        &self,
        record: &RecordRef,
        changes: &BTreeMap<String, String>,
        expected_revision: u64,
    ) -> Result<u64, StoreError> {
        let mut databases = self
            .databases
            .write()
            .map_err(|_| StoreError::Poisoned("write"))?;
        let bytes = databases
            .get_mut(&record.database)
            .ok_or_else(|| StoreError::DatabaseNotFound(record.database.clone()))?
            .get_mut(&record.item_id)
            .ok_or_else(|| StoreError::RecordNotFound(record.to_string()))?;

        let mut item: Item = serde_json::from_slice(bytes.as_slice())?;
        let (fields, revision) = match &record.version {
            None => (&mut item.fields, &mut item.revision),
            Some(key) => {
                let version = item
                    .versions
                    .iter_mut()
                    .find(|v| &v.key == key)
                    .ok_or_else(|| StoreError::RecordNotFound(record.to_string()))?;
                (&mut version.fields, &mut version.revision)
            }
        };

        if *revision != expected_revision {
            return Err(StoreError::Conflict {
                record: record.to_string(),
                expected: expected_revision,
                actual: *revision,
            });
        }

        for (name, value) in changes {
            set_field(fields, name, value.clone());
        }
        *revision += 1;
        let new_revision = *revision;

        *bytes = serde_json::to_vec(&item)?;
        Ok(new_revision)
    }
}
