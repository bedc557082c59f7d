//! Privilege levels for members of the `users` collection.

use std::fmt;
use std::str::FromStr;

use crate::error::{Violation, ViolationKind};

/// Privilege level carried by a `users` principal and stored on every
/// user document.
///
/// Only two levels exist. The default is [`Role::User`], which is what a
/// newly created account receives unless an administrator says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Full control, including assigning roles to other users
    Admin,
    /// Regular account
    #[default]
    User,
}

impl Role {
    /// Returns the lowercase name stored in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Returns `true` for [`Role::Admin`].
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Violation;

    /// Parses a role name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns a violation of kind [`ViolationKind::InvalidRole`] for any
    /// value other than `admin` or `user`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(Violation::new(
                ViolationKind::InvalidRole,
                format!("unknown role '{}', expected 'admin' or 'user'", other),
            )),
        }
    }
}
