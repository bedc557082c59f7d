//! PolicyAudit wrapper for emitting audit events through tracing.

use super::{AuditEvent, AuditOutcome, AuditTrail};

/// Audit event emitter.
///
/// Every event is logged on the `catalog_audit` tracing target. When built
/// with [`PolicyAudit::with_trail`], events are also recorded to the trail.
///
/// # Example
///
/// ```
/// use catalog_authz::audit::{AuditEvent, AuditEventKind, AuditOutcome, AuditTrail, PolicyAudit};
///
/// let trail = AuditTrail::new();
/// let audit = PolicyAudit::with_trail(&trail);
///
/// audit.emit(&AuditEvent::new(
///     "req-123",
///     Some("user-1"),
///     AuditEventKind::PrivilegeEscalationBlocked,
///     AuditOutcome::Denied,
/// ));
///
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyAudit<'a> {
    trail: Option<&'a AuditTrail>,
}

impl<'a> PolicyAudit<'a> {
    /// Creates an emitter that only logs.
    pub fn new() -> Self {
        Self { trail: None }
    }

    /// Creates an emitter that logs and records to `trail`.
    pub fn with_trail(trail: &'a AuditTrail) -> Self {
        Self { trail: Some(trail) }
    }

    /// Returns the attached trail, if any.
    pub fn trail(&self) -> Option<&'a AuditTrail> {
        self.trail
    }

    /// Emits an audit event.
    ///
    /// Denied outcomes log at `warn`, everything else at `info`.
    pub fn emit(&self, event: &AuditEvent) {
        match event.outcome() {
            AuditOutcome::Denied => tracing::warn!(
                target: "catalog_audit",
                request_id = %event.request_id(),
                principal = ?event.principal(),
                kind = %event.kind(),
                outcome = %event.outcome(),
                collection = ?event.collection(),
                operation = ?event.operation(),
                document_id = ?event.document_id(),
                submitted_role = ?event.submitted_role(),
                committed_role = ?event.committed_role(),
                "audit event"
            ),
            AuditOutcome::Success => tracing::info!(
                target: "catalog_audit",
                request_id = %event.request_id(),
                principal = ?event.principal(),
                kind = %event.kind(),
                outcome = %event.outcome(),
                collection = ?event.collection(),
                operation = ?event.operation(),
                document_id = ?event.document_id(),
                submitted_role = ?event.submitted_role(),
                committed_role = ?event.committed_role(),
                "audit event"
            ),
        }

        if let Some(trail) = self.trail {
            trail.record(event.clone());
        }
    }
}
