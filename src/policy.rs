use crate::access::{CollectionAccess, Operation};

/// A policy requirement that must be satisfied.
///
/// Policies are evaluated during `PolicyGate::build()`.
#[derive(Debug, Clone)]
pub enum PolicyReq {
    /// Requires an authenticated principal
    Authenticated,
    /// Requires a collection rule to allow an operation
    Allowed {
        /// Rules of the target collection
        access: CollectionAccess,
        /// Operation being attempted
        operation: Operation,
    },
}

/// Policy requiring authentication.
///
/// Use this to require that a principal is present in the request metadata.
pub struct Authenticated;

/// Policy requiring a collection's access rule to allow an operation.
pub struct Allowed {
    access: CollectionAccess,
    operation: Operation,
}

impl Allowed {
    /// Requires `access` to allow `operation`.
    pub fn to(access: &CollectionAccess, operation: Operation) -> Self {
        Self {
            access: access.clone(),
            operation,
        }
    }
}

// Conversions to PolicyReq
impl From<Authenticated> for PolicyReq {
    fn from(_: Authenticated) -> Self {
        PolicyReq::Authenticated
    }
}

impl From<Allowed> for PolicyReq {
    fn from(allowed: Allowed) -> Self {
        PolicyReq::Allowed {
            access: allowed.access,
            operation: allowed.operation,
        }
    }
}
