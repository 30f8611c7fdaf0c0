use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::{ItemId, VersionKey};

/// What the dialog shows after opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogView {
    pub item_id: ItemId,
    pub database: String,
    pub path: String,
    /// Item archive date in display form, or empty.
    pub item_date: String,
    /// One row per version, ordered by language then version number.
    pub rows: Vec<VersionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRow {
    pub key: VersionKey,
    /// Version archive date in display form, or empty.
    pub date: String,
}

impl DialogView {
    /// A form pre-filled with the values the dialog opened with.
    pub fn form(&self) -> ConfirmForm {
        ConfirmForm {
            item_date: self.item_date.clone(),
            version_dates: self
                .rows
                .iter()
                .map(|row| (row.key.clone(), row.date.clone()))
                .collect(),
        }
    }
}

/// Inputs submitted on confirm.
///
/// Version inputs are keyed by the version they were rendered for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub item_date: String,
    #[serde(default, with = "version_dates")]
    pub version_dates: BTreeMap<VersionKey, String>,
}

impl ConfirmForm {
    pub fn new(item_date: impl Into<String>) -> Self {
        Self {
            item_date: item_date.into(),
            version_dates: BTreeMap::new(),
        }
    }

    pub fn with_version_date(mut self, key: VersionKey, date: impl Into<String>) -> Self {
        self.version_dates.insert(key, date.into());
        self
    }

    pub fn set_version_date(&mut self, key: &VersionKey, date: impl Into<String>) {
        self.version_dates.insert(key.clone(), date.into());
    }

    pub fn version_date(&self, key: &VersionKey) -> Option<&str> {
        self.version_dates.get(key).map(String::as_str)
    }
}

/// Outcome of confirm for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", content = "value", rename_all = "snake_case")]
pub enum FieldChange {
    /// Set to this canonical value.
    Set(String),
    /// A previously set date was cleared.
    Cleared,
    /// Cleared a field that was already empty.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChange {
    pub key: VersionKey,
    pub change: FieldChange,
}

/// Everything a successful confirm did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmReport {
    pub item: FieldChange,
    pub versions: Vec<VersionChange>,
    /// Versions with no matching input; left untouched.
    pub skipped: Vec<VersionKey>,
}

impl ConfirmReport {
    pub fn version(&self, key: &VersionKey) -> Option<&FieldChange> {
        self.versions
            .iter()
            .find(|v| &v.key == key)
            .map(|v| &v.change)
    }
}

/// How the dialog answers a confirm: close on success, alert on bad input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogResponse {
    Close(ConfirmReport),
    Alert(String),
}

/// JSON maps need string keys, so version dates travel as a list.
mod version_dates {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::store::VersionKey;

    #[derive(Serialize, Deserialize)]
    struct Entry {
        language: String,
        number: u32,
        #[serde(default)]
        date: String,
    }

    pub fn serialize<S: Serializer>(
        dates: &BTreeMap<VersionKey, String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(dates.iter().map(|(key, date)| Entry {
            language: key.language.clone(),
            number: key.number,
            date: date.clone(),
        }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<VersionKey, String>, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|e| (VersionKey::new(e.language, e.number), e.date))
            .collect())
    }
}
