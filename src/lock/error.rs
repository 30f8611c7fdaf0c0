use thiserror::Error;

/// Error type for record lock operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The underlying primitive was poisoned (a thread panicked while holding it).
    #[error("lock poisoned: {0}")]
    Poisoned(String),
    /// The lock could not be acquired.
    #[error("lock acquire failed: {0}")]
    AcquireFailed(String),
}
