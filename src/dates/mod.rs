//! Date handling for archive date fields.
//!
//! Stored values are canonical UTC strings (`yyyyMMddTHHmmssZ`); an empty
//! string means "no archive date". Operators see and type values in the
//! display zone, which `DisplayZone` converts to and from.

mod policy;
mod zone;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

pub use policy::ValidationPolicy;
pub use zone::DisplayZone;

/// Canonical storage form, always UTC.
pub const STORAGE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Form shown in date inputs, in the display zone.
pub const DISPLAY_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Fixed form used for the date in audit messages (UTC).
pub const AUDIT_FORMAT: &str = "%Y%m%dT%H%M%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y%m%d", "%Y-%m-%d"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("unrecognized date: {0:?}")]
    Unrecognized(String),
    #[error("date cannot be placed in the display zone: {0:?}")]
    Ambiguous(String),
}

/// A parsed date input: either a request to clear the field or an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    Clear,
    Set(DateTime<Utc>),
}

impl DateInput {
    pub fn instant(self) -> Option<DateTime<Utc>> {
        match self {
            DateInput::Clear => None,
            DateInput::Set(at) => Some(at),
        }
    }

    /// The value written to the store: canonical form, or empty for `Clear`.
    pub fn to_storage(self) -> String {
        match self {
            DateInput::Clear => String::new(),
            DateInput::Set(at) => to_storage(at),
        }
    }
}

pub fn to_storage(at: DateTime<Utc>) -> String {
    at.format(STORAGE_FORMAT).to_string()
}

pub fn audit_format(at: DateTime<Utc>) -> String {
    at.format(AUDIT_FORMAT).to_string()
}

/// Read a stored field value. Values without an explicit zone are UTC.
pub fn parse_stored(value: &str) -> Result<Option<DateTime<Utc>>, DateError> {
    DisplayZone::utc().parse_input(value).map(DateInput::instant)
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}
