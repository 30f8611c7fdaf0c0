use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

use super::{parse_naive, DateError, DateInput, DISPLAY_FORMAT};

const MAX_OFFSET_MINUTES: u32 = 18 * 60;

/// The time zone operators read and type dates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayZone {
    offset: FixedOffset,
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl DisplayZone {
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Zone at `minutes` east of UTC; `None` outside +/-18h.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        if minutes.unsigned_abs() > MAX_OFFSET_MINUTES {
            return None;
        }
        FixedOffset::east_opt(minutes * 60).map(|offset| Self { offset })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// Parse operator input.
    ///
    /// Blank input clears. Values carrying `Z` or an RFC 3339 offset are taken
    /// as-is; everything else is read as display-zone wall time.
    pub fn parse_input(&self, raw: &str) -> Result<DateInput, DateError> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(DateInput::Clear);
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(value) {
            return Ok(DateInput::Set(at.with_timezone(&Utc)));
        }

        if let Some(body) = value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
            let naive =
                parse_naive(body).ok_or_else(|| DateError::Unrecognized(raw.to_string()))?;
            return Ok(DateInput::Set(Utc.from_utc_datetime(&naive)));
        }

        let naive = parse_naive(value).ok_or_else(|| DateError::Unrecognized(raw.to_string()))?;
        self.offset
            .from_local_datetime(&naive)
            .single()
            .map(|local| DateInput::Set(local.with_timezone(&Utc)))
            .ok_or_else(|| DateError::Ambiguous(raw.to_string()))
    }

    /// Format an instant for a date input.
    pub fn display(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset).format(DISPLAY_FORMAT).to_string()
    }

    /// Convert a stored field value to its display form. Empty stays empty.
    pub fn to_display(&self, stored: &str) -> Result<String, DateError> {
        Ok(super::parse_stored(stored)?
            .map(|at| self.display(at))
            .unwrap_or_default())
    }
}
