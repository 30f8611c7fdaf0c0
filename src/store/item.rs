use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Item-level archive date.
pub const ARCHIVE_DATE_FIELD: &str = "__Archive date";

/// Per-version archive date.
pub const ARCHIVE_VERSION_DATE_FIELD: &str = "__Archive Version date";

/// Item identifier. Accepts plain, hyphenated and braced GUIDs; displays
/// braced upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Uuid::encode_buffer();
        write!(f, "{{{}}}", self.0.hyphenated().encode_upper(&mut buf))
    }
}

/// Identity of a version within its item. Orders by language, then number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionKey {
    pub language: String,
    pub number: u32,
}

impl VersionKey {
    pub fn new(language: impl Into<String>, number: u32) -> Self {
        Self {
            language: language.into(),
            number,
        }
    }

    /// Name of the rendered date input for this version.
    ///
    /// The number is always the part after the last `_`, so distinct keys
    /// never share a name even when the language contains digits or `_`.
    pub fn input_name(&self) -> String {
        format!("archive_{}_{}", self.language, self.number)
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.language, self.number)
    }
}

/// Address of an editable record: an item, or one of its versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordRef {
    pub database: String,
    pub item_id: ItemId,
    pub version: Option<VersionKey>,
}

impl RecordRef {
    pub fn lock_key(&self) -> String {
        match &self.version {
            Some(version) => format!("{}:{}#{}", self.database, self.item_id, version),
            None => format!("{}:{}", self.database, self.item_id),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lock_key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub key: VersionKey,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub revision: u64,
}

impl Version {
    pub fn new(language: impl Into<String>, number: u32) -> Self {
        Self {
            key: VersionKey::new(language, number),
            fields: BTreeMap::new(),
            revision: 0,
        }
    }

    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn archive_version_date(&self) -> &str {
        self.field(ARCHIVE_VERSION_DATE_FIELD)
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        set_field(&mut self.fields, name, value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub database: String,
    pub path: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub revision: u64,
    #[serde(default)]
    pub versions: Vec<Version>,
}

impl Item {
    pub fn new(database: impl Into<String>, id: ItemId, path: impl Into<String>) -> Self {
        Self {
            id,
            database: database.into(),
            path: path.into(),
            fields: BTreeMap::new(),
            revision: 0,
            versions: Vec::new(),
        }
    }

    /// Field value, or an empty string when the field is unset.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn archive_date(&self) -> &str {
        self.field(ARCHIVE_DATE_FIELD)
    }

    pub fn version(&self, key: &VersionKey) -> Option<&Version> {
        self.versions.iter().find(|v| &v.key == key)
    }

    pub fn record(&self) -> RecordRef {
        RecordRef {
            database: self.database.clone(),
            item_id: self.id,
            version: None,
        }
    }

    pub fn version_record(&self, key: &VersionKey) -> RecordRef {
        RecordRef {
            version: Some(key.clone()),
            ..self.record()
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        set_field(&mut self.fields, name, value.into());
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.versions.push(version);
        self
    }
}

/// Store `value` under `name`; an empty value removes the field.
pub(crate) fn set_field(fields: &mut BTreeMap<String, String>, name: &str, value: String) {
    if value.is_empty() {
        fields.remove(name);
    } else {
        fields.insert(name.to_string(), value);
    }
}
