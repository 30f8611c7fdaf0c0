//! Per-record locks held for the lifetime of an edit.
//!
//! A `LockManager` hands out one lock per record key; `LockGuard` holds an
//! acquired lock and releases it when dropped, so an edit scope cannot leak
//! its lock on an early return or a panic.

mod error;
mod guard;
mod in_memory;
mod lock;
mod lock_manager;

pub use error::LockError;
pub use guard::LockGuard;
pub use in_memory::{InMemoryLock, InMemoryLockManager};
pub use lock::Lock;
pub use lock_manager::LockManager;
