use std::sync::{Arc, Mutex};

use super::{AuditError, AuditRecord, AuditSink};

/// Writes audit records to the `audit` tracing target, or into a buffer.
#[derive(Debug, Clone, Default)]
pub struct LogAuditSink {
    buffer: Option<Arc<Mutex<Vec<AuditRecord>>>>,
}

impl LogAuditSink {
    pub fn new() -> Self {
        LogAuditSink { buffer: None }
    }

    pub fn with_buffer(buffer: Arc<Mutex<Vec<AuditRecord>>>) -> Self {
        LogAuditSink {
            buffer: Some(buffer),
        }
    }

    /// Records captured so far; empty when writing to tracing.
    pub fn records(&self) -> Result<Vec<AuditRecord>, AuditError> {
        match &self.buffer {
            Some(buffer) => Ok(buffer
                .lock()
                .map_err(|_| AuditError::BufferPoisoned)?
                .clone()),
            None => Ok(Vec::new()),
        }
    }
}

impl AuditSink for LogAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        match &self.buffer {
            Some(buffer) => {
                buffer
                    .lock()
                    .map_err(|_| AuditError::BufferPoisoned)?
                    .push(record.clone());
            }
            None => {
                tracing::info!(
                    target: "audit",
                    actor = %record.actor,
                    action = ?record.action,
                    "{}",
                    record.message()
                );
            }
        }
        Ok(())
    }
}
