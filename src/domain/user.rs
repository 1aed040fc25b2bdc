//! Actor passed to every service call.

use serde::Serialize;

/// The user on whose behalf a service operation runs.
///
/// Only the anonymous placeholder is produced today; services receive the actor
/// so an authorization layer can be added without changing their signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<i64>,
    pub email: String,
}

impl User {
    /// User who is not logged into the system.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_user() {
        let user = User::anonymous();
        assert!(user.id.is_none());
        assert!(user.email.is_empty());
    }
}
