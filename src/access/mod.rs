//! Caller identity and the permission gate in front of the dialog.

mod policy;
mod session;

pub use policy::{AccessPolicy, AllowAll, RolePolicy};
pub use session::Session;
