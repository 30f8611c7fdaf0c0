use super::Session;

/// Decides whether a caller may open and confirm the archive date dialog.
pub trait AccessPolicy: Send + Sync {
    fn can_access_archive_dialog(&self, session: &Session) -> bool;
}

impl<F> AccessPolicy for F
where
    F: Fn(&Session) -> bool + Send + Sync,
{
    fn can_access_archive_dialog(&self, session: &Session) -> bool {
        self(session)
    }
}

/// Grants access to any signed-in caller holding one of `roles`.
#[derive(Debug, Clone)]
pub struct RolePolicy {
    roles: Vec<String>,
}

impl RolePolicy {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

impl AccessPolicy for RolePolicy {
    fn can_access_archive_dialog(&self, session: &Session) -> bool {
        session.user_id().is_some() && self.roles.iter().any(|role| session.has_role(role))
    }
}

/// Grants access to everyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn can_access_archive_dialog(&self, _session: &Session) -> bool {
        true
    }
}
