use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DialogError;
use crate::store::ItemId;

/// Request parameters naming the item the dialog edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogRequest {
    pub id: String,
    pub db: String,
}

impl DialogRequest {
    pub fn new(id: impl Into<String>, db: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            db: db.into(),
        }
    }

    pub fn for_item(id: &ItemId, db: impl Into<String>) -> Self {
        Self::new(id.to_string(), db)
    }

    /// Read `id` and `db` from query parameters.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, DialogError> {
        let id = query
            .get("id")
            .ok_or_else(|| DialogError::InvalidRequest("missing item id".into()))?;
        let db = query
            .get("db")
            .ok_or_else(|| DialogError::InvalidRequest("missing database".into()))?;
        Ok(Self::new(id.as_str(), db.as_str()))
    }

    pub fn item_id(&self) -> Result<ItemId, DialogError> {
        self.id
            .parse()
            .map_err(|_| DialogError::InvalidRequest(format!("item id {:?}", self.id)))
    }
}
