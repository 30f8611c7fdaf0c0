use std::sync::Arc;

use super::{Lock, LockError};

/// Factory for per-record locks.
///
/// Repeated calls with the same key must return the same logical lock.
pub trait LockManager: Send + Sync {
    type Lock: Lock;

    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError>;
}
