use std::sync::Arc;

use super::{Lock, LockError};

/// An acquired lock. Dropping the guard releases it.
pub struct LockGuard<L: Lock> {
    lock: Arc<L>,
    key: String,
}

impl<L: Lock> LockGuard<L> {
    /// Block until `lock` is acquired and wrap it in a guard.
    pub fn acquire(lock: Arc<L>, key: impl Into<String>) -> Result<Self, LockError> {
        let key = key.into();
        lock.lock()?;
        tracing::trace!(%key, "record lock acquired");
        Ok(Self { lock, key })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<L: Lock> Drop for LockGuard<L> {
    fn drop(&mut self) {
        if let Err(err) = self.lock.unlock() {
            tracing::warn!(key = %self.key, error = %err, "failed to release record lock");
        } else {
            tracing::trace!(key = %self.key, "record lock released");
        }
    }
}
