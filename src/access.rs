//! Collection-level access predicates.
//!
//! The backend asks one question per operation: may this request touch the
//! collection at all? The answer depends only on the request metadata.
//! Finer-grained rules live in field guards (see [`crate::guard`]).

use std::fmt;

use crate::error::{Violation, ViolationKind};
use crate::request::RequestMeta;

/// Operation classes a collection rule can gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Creating a document
    Create,
    /// Reading one or more documents
    Read,
    /// Updating an existing document
    Update,
    /// Deleting a document
    Delete,
}

impl Operation {
    /// All operations, in the order a rule table lists them.
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Signature of an access predicate.
pub type AccessFn = fn(&RequestMeta) -> bool;

/// Returns `true` if the request carries a principal of any kind.
///
/// This is authentication-only gating. It never fails: an anonymous request
/// is a valid input that maps to `false`.
///
/// # Examples
///
/// ```
/// use catalog_authz::{authenticated, Principal, RequestMeta};
///
/// assert!(!authenticated(&RequestMeta::anonymous("req-1")));
///
/// let meta = RequestMeta::for_principal("req-2", Principal::other("k1", "apiKeys"));
/// assert!(authenticated(&meta));
/// ```
pub fn authenticated(meta: &RequestMeta) -> bool {
    meta.principal.is_some()
}

/// Predicate that allows every request, including anonymous ones.
pub fn anyone(_meta: &RequestMeta) -> bool {
    true
}

/// Per-operation access rules for one collection.
///
/// Every operation defaults to [`authenticated`].
///
/// # Examples
///
/// ```
/// use catalog_authz::{anyone, CollectionAccess, Operation, RequestMeta};
///
/// // A media collection browsable by visitors but editable only when logged in.
/// let access = CollectionAccess::new("media").with_read(anyone);
/// let visitor = RequestMeta::anonymous("req-1");
///
/// assert!(access.allows(Operation::Read, &visitor));
/// assert!(access.check(Operation::Update, &visitor).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CollectionAccess {
    collection: String,
    create: AccessFn,
    read: AccessFn,
    update: AccessFn,
    delete: AccessFn,
}

impl CollectionAccess {
    /// Creates rules for `collection` with every operation requiring authentication.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            create: authenticated,
            read: authenticated,
            update: authenticated,
            delete: authenticated,
        }
    }

    /// Returns the collection these rules apply to.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Overrides the rule for creation.
    pub fn with_create(mut self, rule: AccessFn) -> Self {
        self.create = rule;
        self
    }

    /// Overrides the rule for reads.
    pub fn with_read(mut self, rule: AccessFn) -> Self {
        self.read = rule;
        self
    }

    /// Overrides the rule for updates.
    pub fn with_update(mut self, rule: AccessFn) -> Self {
        self.update = rule;
        self
    }

    /// Overrides the rule for deletion.
    pub fn with_delete(mut self, rule: AccessFn) -> Self {
        self.delete = rule;
        self
    }

    fn rule(&self, operation: Operation) -> AccessFn {
        match operation {
            Operation::Create => self.create,
            Operation::Read => self.read,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }

    /// Evaluates the rule for `operation`.
    pub fn allows(&self, operation: Operation, meta: &RequestMeta) -> bool {
        (self.rule(operation))(meta)
    }

    /// Evaluates the rule for `operation`, turning a denial into a violation.
    ///
    /// # Errors
    ///
    /// Returns [`ViolationKind::Unauthenticated`] when an anonymous request is
    /// denied and [`ViolationKind::Forbidden`] when a principal is denied.
    pub fn check(&self, operation: Operation, meta: &RequestMeta) -> Result<(), Violation> {
        if self.allows(operation, meta) {
            return Ok(());
        }

        tracing::debug!(
            request_id = %meta.request_id,
            collection = %self.collection,
            operation = %operation,
            principal = ?meta.principal.as_ref().map(|p| p.id()),
            "collection access denied"
        );

        match meta.principal {
            None => Err(Violation::new(
                ViolationKind::Unauthenticated,
                format!(
                    "authentication required to {} '{}'",
                    operation, self.collection
                ),
            )),
            Some(_) => Err(Violation::new(
                ViolationKind::Forbidden { operation },
                format!("{} on '{}' denied", operation, self.collection),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Principal;
    use crate::role::Role;

    fn nobody(_meta: &RequestMeta) -> bool {
        false
    }

    #[test]
    fn authenticated_rejects_anonymous() {
        assert!(!authenticated(&RequestMeta::anonymous("req-anon")));
    }

    #[test]
    fn authenticated_accepts_any_principal_kind() {
        let user = RequestMeta::for_principal("r1", Principal::user("u1", Role::User));
        let key = RequestMeta::for_principal("r2", Principal::other("k1", "apiKeys"));
        assert!(authenticated(&user));
        assert!(authenticated(&key));
    }

    #[test]
    fn default_rules_follow_authentication() {
        let access = CollectionAccess::new("users");
        let anon = RequestMeta::anonymous("r1");
        let user = RequestMeta::for_principal("r2", Principal::user("u1", Role::User));

        for op in Operation::ALL {
            assert!(!access.allows(op, &anon));
            assert!(access.allows(op, &user));
        }
    }

    #[test]
    fn check_reports_unauthenticated_for_anonymous() {
        let access = CollectionAccess::new("users");
        let err = access
            .check(Operation::Create, &RequestMeta::anonymous("r1"))
            .unwrap_err();
        assert_eq!(err.kind, ViolationKind::Unauthenticated);
        assert!(err.message.contains("users"));
    }

    #[test]
    fn check_reports_forbidden_for_principal() {
        let access = CollectionAccess::new("users").with_delete(nobody);
        let meta = RequestMeta::for_principal("r1", Principal::user("u1", Role::Admin));
        let err = access.check(Operation::Delete, &meta).unwrap_err();
        assert_eq!(
            err.kind,
            ViolationKind::Forbidden {
                operation: Operation::Delete
            }
        );
        assert!(access.check(Operation::Read, &meta).is_ok());
    }

    #[test]
    fn overrides_touch_only_their_operation() {
        let access = CollectionAccess::new("films").with_read(anyone);
        let anon = RequestMeta::anonymous("r1");
        assert!(access.allows(Operation::Read, &anon));
        assert!(!access.allows(Operation::Create, &anon));
        assert!(!access.allows(Operation::Update, &anon));
        assert!(!access.allows(Operation::Delete, &anon));
    }
}
