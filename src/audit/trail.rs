//! In-memory audit trail recorder.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::AuditEvent;

/// In-memory recorder for audit events.
///
/// Shareable across request handlers; recording takes a short lock.
///
/// # Example
///
/// ```
/// use catalog_authz::audit::{AuditTrail, AuditEvent, AuditEventKind, AuditOutcome};
///
/// let trail = AuditTrail::new();
/// trail.record(AuditEvent::new(
///     "req-123",
///     Some("user-1"),
///     AuditEventKind::PrivilegeEscalationBlocked,
///     AuditOutcome::Denied,
/// ));
///
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct AuditTrail {
    events: Mutex<Vec<AuditEvent>>,
}

impl AuditTrail {
    /// Creates a new empty audit trail.
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-pushed Vec behind.
    fn lock(&self) -> MutexGuard<'_, Vec<AuditEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records an audit event.
    pub fn record(&self, event: AuditEvent) {
        self.lock().push(event);
    }

    /// Returns a snapshot of all recorded events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.lock().clone()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditEventKind, AuditOutcome};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_empty() {
        let trail = AuditTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.len(), 0);
    }

    #[test]
    fn records_in_order() {
        let trail = AuditTrail::new();
        for id in ["req-1", "req-2"] {
            trail.record(AuditEvent::new(
                id,
                None::<String>,
                AuditEventKind::CollectionAccess,
                AuditOutcome::Denied,
            ));
        }

        let events = trail.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].request_id(), "req-1");
        assert_eq!(events[1].request_id(), "req-2");
    }

    #[test]
    fn can_be_cleared() {
        let trail = AuditTrail::new();
        trail.record(AuditEvent::new(
            "req-1",
            Some("u1"),
            AuditEventKind::RoleAssignment,
            AuditOutcome::Success,
        ));
        trail.clear();
        assert!(trail.is_empty());
    }

    #[test]
    fn shared_across_threads() {
        let trail = Arc::new(AuditTrail::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let trail = Arc::clone(&trail);
                thread::spawn(move || {
                    trail.record(AuditEvent::new(
                        format!("req-{i}"),
                        None::<String>,
                        AuditEventKind::CollectionAccess,
                        AuditOutcome::Denied,
                    ));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(trail.len(), 4);
    }
}
