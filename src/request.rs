use crate::role::Role;

/// Slug of the collection whose members carry a [`Role`].
pub const USERS_COLLECTION: &str = "users";

/// Metadata about an incoming request or operation.
///
/// Contains the request identifier and optional principal. An anonymous
/// request has `principal: None`.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Unique identifier for this request
    pub request_id: String,
    /// Authenticated principal, if any
    pub principal: Option<Principal>,
}

impl RequestMeta {
    /// Creates metadata for an anonymous request.
    pub fn anonymous(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            principal: None,
        }
    }

    /// Creates metadata for a request made by `principal`.
    pub fn for_principal(request_id: impl Into<String>, principal: Principal) -> Self {
        Self {
            request_id: request_id.into(),
            principal: Some(principal),
        }
    }
}

/// The identity a request is attributed to.
///
/// Privilege checks match on the variant. A role only exists on
/// [`Principal::User`], so "role present but collection absent" cannot be
/// represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// A member of the `users` collection
    User {
        /// Document id of the user
        id: String,
        /// Privilege level of the user
        role: Role,
    },
    /// Any other identity class, e.g. an API key
    Other {
        /// Identifier within its collection
        id: String,
        /// Collection slug the identity belongs to
        collection: String,
    },
}

impl Principal {
    /// Shorthand for a `users` principal.
    pub fn user(id: impl Into<String>, role: Role) -> Self {
        Principal::User {
            id: id.into(),
            role,
        }
    }

    /// Shorthand for a principal from another collection.
    pub fn other(id: impl Into<String>, collection: impl Into<String>) -> Self {
        Principal::Other {
            id: id.into(),
            collection: collection.into(),
        }
    }

    /// Returns the identifier of this principal.
    pub fn id(&self) -> &str {
        match self {
            Principal::User { id, .. } | Principal::Other { id, .. } => id,
        }
    }

    /// Returns the collection slug this principal belongs to.
    pub fn collection(&self) -> &str {
        match self {
            Principal::User { .. } => USERS_COLLECTION,
            Principal::Other { collection, .. } => collection,
        }
    }

    /// Returns the privilege level, present only for `users` principals.
    pub fn role(&self) -> Option<Role> {
        match self {
            Principal::User { role, .. } => Some(*role),
            Principal::Other { .. } => None,
        }
    }

    /// Returns `true` for a `users` principal whose role is admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::User { role: Role::Admin, .. })
    }
}

/// Maps a backend's own request type into [`RequestMeta`].
///
/// Implementations only translate identity; they do not decide access.
///
/// # Examples
///
/// ```
/// use catalog_authz::{ExtractMetadata, Principal, RequestMeta, Role};
///
/// struct Session {
///     id: String,
///     user: Option<(String, String)>,
/// }
///
/// impl ExtractMetadata for Session {
///     fn extract_metadata(&self) -> RequestMeta {
///         RequestMeta {
///             request_id: self.id.clone(),
///             principal: self.user.as_ref().and_then(|(id, role)| {
///                 role.parse::<Role>().ok().map(|role| Principal::user(id.clone(), role))
///             }),
///         }
///     }
/// }
///
/// let session = Session { id: "req-9".into(), user: Some(("u1".into(), "admin".into())) };
/// assert!(session.extract_metadata().principal.unwrap().is_admin());
/// ```
pub trait ExtractMetadata {
    /// Extracts request metadata for access checks.
    fn extract_metadata(&self) -> RequestMeta;
}

impl ExtractMetadata for RequestMeta {
    fn extract_metadata(&self) -> RequestMeta {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_principal_reports_users_collection() {
        let p = Principal::user("u1", Role::User);
        assert_eq!(p.collection(), "users");
        assert_eq!(p.role(), Some(Role::User));
        assert_eq!(p.id(), "u1");
        assert!(!p.is_admin());
    }

    #[test]
    fn other_principal_has_no_role() {
        let p = Principal::other("key-1", "apiKeys");
        assert_eq!(p.collection(), "apiKeys");
        assert_eq!(p.role(), None);
        assert!(!p.is_admin());
    }

    #[test]
    fn other_principal_named_users_is_still_not_admin() {
        let p = Principal::other("x", USERS_COLLECTION);
        assert!(!p.is_admin());
    }

    #[test]
    fn admin_user_is_admin() {
        assert!(Principal::user("root", Role::Admin).is_admin());
    }

    #[test]
    fn anonymous_meta_has_no_principal() {
        let meta = RequestMeta::anonymous("req-1");
        assert_eq!(meta.request_id, "req-1");
        assert!(meta.principal.is_none());
    }
}
