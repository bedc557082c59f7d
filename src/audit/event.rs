//! Audit event schema and types.

use std::fmt;

use crate::access::Operation;
use crate::role::Role;

/// Kind of audit event being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEventKind {
    /// A collection-level access check
    CollectionAccess,
    /// An administrator assigned a role
    RoleAssignment,
    /// A non-admin write to `role` was clamped
    PrivilegeEscalationBlocked,
}

impl fmt::Display for AuditEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEventKind::CollectionAccess => write!(f, "collection_access"),
            AuditEventKind::RoleAssignment => write!(f, "role_assignment"),
            AuditEventKind::PrivilegeEscalationBlocked => {
                write!(f, "privilege_escalation_blocked")
            }
        }
    }
}

/// Outcome of an audited decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// The request went through as submitted
    Success,
    /// The request, or part of it, was refused or overridden
    Denied,
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::Success => write!(f, "success"),
            AuditOutcome::Denied => write!(f, "denied"),
        }
    }
}

/// A structured audit event.
///
/// # Example
///
/// ```
/// use catalog_authz::audit::{AuditEvent, AuditEventKind, AuditOutcome};
/// use catalog_authz::Role;
///
/// let event = AuditEvent::new(
///     "req-123",
///     Some("user-7"),
///     AuditEventKind::PrivilegeEscalationBlocked,
///     AuditOutcome::Denied,
/// )
/// .with_collection("users")
/// .with_roles(Role::Admin, Role::User);
///
/// assert_eq!(event.submitted_role(), Some(Role::Admin));
/// assert_eq!(event.committed_role(), Some(Role::User));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    request_id: String,
    /// None for anonymous requests
    principal: Option<String>,
    kind: AuditEventKind,
    outcome: AuditOutcome,
    collection: Option<String>,
    operation: Option<Operation>,
    document_id: Option<String>,
    submitted_role: Option<Role>,
    committed_role: Option<Role>,
}

impl AuditEvent {
    /// Creates a new audit event with required fields.
    pub fn new(
        request_id: impl Into<String>,
        principal: Option<impl Into<String>>,
        kind: AuditEventKind,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            principal: principal.map(Into::into),
            kind,
            outcome,
            collection: None,
            operation: None,
            document_id: None,
            submitted_role: None,
            committed_role: None,
        }
    }

    /// Sets the collection slug.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Sets the operation class.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Sets the id of the affected document.
    pub fn with_document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }

    /// Sets the submitted and committed role values.
    pub fn with_roles(mut self, submitted: Role, committed: Role) -> Self {
        self.submitted_role = Some(submitted);
        self.committed_role = Some(committed);
        self
    }

    /// Returns the request identifier.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal id, if authenticated.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    /// Returns the event kind.
    pub fn kind(&self) -> AuditEventKind {
        self.kind
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> AuditOutcome {
        self.outcome
    }

    /// Returns the collection slug, if set.
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Returns the operation, if set.
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Returns the document id, if set.
    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// Returns the role that was submitted, if set.
    pub fn submitted_role(&self) -> Option<Role> {
        self.submitted_role
    }

    /// Returns the role that was committed, if set.
    pub fn committed_role(&self) -> Option<Role> {
        self.committed_role
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[kind={}, outcome={}, request_id={}, principal={}",
            self.kind,
            self.outcome,
            self.request_id,
            self.principal.as_deref().unwrap_or("<none>")
        )?;

        if let Some(collection) = &self.collection {
            write!(f, ", collection={}", collection)?;
        }
        if let Some(operation) = self.operation {
            write!(f, ", operation={}", operation)?;
        }
        if let Some(id) = &self.document_id {
            write!(f, ", document_id={}", id)?;
        }
        if let (Some(submitted), Some(committed)) = (self.submitted_role, self.committed_role) {
            write!(f, ", role={}->{}", submitted, committed)?;
        }

        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_outcome_display() {
        assert_eq!(
            AuditEventKind::PrivilegeEscalationBlocked.to_string(),
            "privilege_escalation_blocked"
        );
        assert_eq!(AuditEventKind::CollectionAccess.to_string(), "collection_access");
        assert_eq!(AuditOutcome::Denied.to_string(), "denied");
    }

    #[test]
    fn minimal_event_has_no_optional_fields() {
        let event = AuditEvent::new(
            "req-1",
            Some("u1"),
            AuditEventKind::RoleAssignment,
            AuditOutcome::Success,
        );
        assert_eq!(event.request_id(), "req-1");
        assert_eq!(event.principal(), Some("u1"));
        assert!(event.collection().is_none());
        assert!(event.operation().is_none());
        assert!(event.submitted_role().is_none());
    }

    #[test]
    fn display_includes_role_transition() {
        let event = AuditEvent::new(
            "req-2",
            Some("u2"),
            AuditEventKind::PrivilegeEscalationBlocked,
            AuditOutcome::Denied,
        )
        .with_collection("users")
        .with_operation(Operation::Update)
        .with_document_id("u2")
        .with_roles(Role::Admin, Role::User);

        let display = event.to_string();
        assert!(display.contains("collection=users"));
        assert!(display.contains("operation=update"));
        assert!(display.contains("document_id=u2"));
        assert!(display.contains("role=admin->user"));
    }

    #[test]
    fn anonymous_event_displays_placeholder() {
        let event = AuditEvent::new(
            "req-anon",
            None::<String>,
            AuditEventKind::CollectionAccess,
            AuditOutcome::Denied,
        );
        assert!(event.principal().is_none());
        assert!(event.to_string().contains("<none>"));
    }
}
