use std::fmt;

use crate::access::Operation;

/// A policy violation with details about what failed.
#[derive(Debug)]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Violation {}

/// The kind of policy violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Authentication is required but missing
    Unauthenticated,
    /// A principal is present but the collection rule denied the operation
    Forbidden {
        /// The operation that was denied
        operation: Operation,
    },
    /// A role value outside `{admin, user}` was supplied
    InvalidRole,
    /// A write was missing a field required on creation
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Unauthenticated => write!(f, "Unauthenticated"),
            ViolationKind::Forbidden { operation } => write!(f, "Forbidden for '{}'", operation),
            ViolationKind::InvalidRole => write!(f, "Invalid role"),
            ViolationKind::MissingField { field } => write!(f, "Missing field '{}'", field),
        }
    }
}
