//! Records of the `users` collection and the payloads that write them.

use crate::role::Role;

/// A persisted `users` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDocument {
    /// Document id
    pub id: String,
    /// Login email
    pub email: String,
    /// Protected privilege level
    pub role: Role,
}

/// Fields submitted by a create or update request.
///
/// On update, `None` leaves the stored value untouched. On create, a missing
/// `role` counts as a submitted [`Role::User`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserWrite {
    /// New login email
    pub email: Option<String>,
    /// Requested privilege level
    pub role: Option<Role>,
}

impl UserWrite {
    /// Creates an empty write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the email field.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the role field.
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}
