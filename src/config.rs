//! Dialog configuration, loaded from TOML.
//!
//! ```toml
//! display_utc_offset_minutes = 60
//! item_date_policy = "strict"
//! version_date_policy = "lenient"
//! allowed_roles = ["admin", "Archive Editor"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::access::RolePolicy;
use crate::dates::{DisplayZone, ValidationPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("display offset out of range: {0} minutes")]
    InvalidOffset(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Offset of the display zone from UTC, in minutes.
    pub display_utc_offset_minutes: i32,
    /// Unparsable item date: `strict` aborts the whole confirm.
    pub item_date_policy: ValidationPolicy,
    /// Unparsable version date: `lenient` treats it as a clear.
    pub version_date_policy: ValidationPolicy,
    /// Roles accepted by [`RolePolicy`].
    pub allowed_roles: Vec<String>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            display_utc_offset_minutes: 0,
            item_date_policy: ValidationPolicy::Strict,
            version_date_policy: ValidationPolicy::Lenient,
            allowed_roles: vec!["admin".to_string()],
        }
    }
}

impl DialogConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: DialogConfig = toml::from_str(source)?;
        config.display_zone()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn display_zone(&self) -> Result<DisplayZone, ConfigError> {
        DisplayZone::from_offset_minutes(self.display_utc_offset_minutes)
            .ok_or(ConfigError::InvalidOffset(self.display_utc_offset_minutes))
    }

    pub fn role_policy(&self) -> RolePolicy {
        RolePolicy::new(self.allowed_roles.iter().cloned())
    }
}
