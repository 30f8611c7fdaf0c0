//! Session variables describing the caller.

use std::collections::HashMap;

pub const USER_KEY: &str = "user";
pub const ROLES_KEY: &str = "roles";

/// Caller identity for one request.
///
/// Built from request variables: `user` holds the account name and `roles`
/// a comma-separated role list.
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Session for `user` with the given roles.
    pub fn for_user(user: impl Into<String>, roles: &[&str]) -> Self {
        let mut session = Self::new();
        session.set(USER_KEY, user);
        if !roles.is_empty() {
            session.set(ROLES_KEY, roles.join(","));
        }
        session
    }

    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_KEY).filter(|user| !user.is_empty())
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.get(ROLES_KEY)
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles().any(|r| r.eq_ignore_ascii_case(role))
    }

    /// Name recorded as the actor in audit entries.
    pub fn actor(&self) -> &str {
        self.user_id().unwrap_or("anonymous")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }
}
