use serde::{Deserialize, Serialize};

use super::{DateError, DateInput};

/// What to do with a date input that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Reject the input; the caller aborts before writing anything.
    #[default]
    Strict,
    /// Treat the input as a request to clear the field.
    Lenient,
}

impl ValidationPolicy {
    pub fn apply(self, parsed: Result<DateInput, DateError>) -> Result<DateInput, DateError> {
        match (self, parsed) {
            (_, Ok(input)) => Ok(input),
            (ValidationPolicy::Strict, Err(err)) => Err(err),
            (ValidationPolicy::Lenient, Err(err)) => {
                tracing::warn!(error = %err, "unparsable date treated as clear");
                Ok(DateInput::Clear)
            }
        }
    }
}
