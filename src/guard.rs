//! Field guard for the protected `role` attribute.
//!
//! Whatever a request submits for `role`, the value that gets persisted is
//! decided here. Only an admin user may choose it freely. Everyone else gets
//! the default on creation and keeps the stored value on update. A disallowed
//! attempt is clamped rather than rejected, so the rest of the write still
//! goes through.
//!
//! ```text
//! admin user principal     -> submitted value
//! no prior document        -> creation default (user)
//! otherwise                -> prior document's role
//! ```

use std::fmt;

use crate::audit::{AuditEvent, AuditEventKind, AuditOutcome, PolicyAudit};
use crate::document::UserDocument;
use crate::request::{Principal, RequestMeta, USERS_COLLECTION};
use crate::role::Role;

/// Which branch of the guard produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRule {
    /// Admin user: submitted value kept
    AdminPassthrough,
    /// Creation by a non-admin: default role forced
    CreateDefault,
    /// Update by a non-admin: stored role kept
    UpdatePreserved,
}

impl fmt::Display for RoleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleRule::AdminPassthrough => write!(f, "admin_passthrough"),
            RoleRule::CreateDefault => write!(f, "create_default"),
            RoleRule::UpdatePreserved => write!(f, "update_preserved"),
        }
    }
}

/// Result of evaluating the role guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDecision {
    /// Value the backend must persist
    pub value: Role,
    /// Value the request asked for
    pub submitted: Role,
    /// Branch that decided
    pub rule: RoleRule,
}

impl RoleDecision {
    /// Returns `true` if the persisted value differs from the submitted one.
    pub fn overridden(&self) -> bool {
        self.value != self.submitted
    }
}

fn decide(
    principal: Option<&Principal>,
    submitted: Role,
    prior: Option<&UserDocument>,
) -> RoleDecision {
    let (value, rule) = match (principal, prior) {
        (Some(Principal::User { role: Role::Admin, .. }), _) => {
            (submitted, RoleRule::AdminPassthrough)
        }
        (_, None) => (Role::default(), RoleRule::CreateDefault),
        (_, Some(doc)) => (doc.role, RoleRule::UpdatePreserved),
    };

    RoleDecision {
        value,
        submitted,
        rule,
    }
}

/// Computes the `role` value to persist for a `users` document write.
///
/// `prior` is `None` for a creation. Never fails and carries no state, so
/// the same inputs always give the same output.
///
/// # Examples
///
/// ```
/// use catalog_authz::{protect_role, Principal, Role, UserDocument};
///
/// let admin = Principal::user("root", Role::Admin);
/// let member = Principal::user("u1", Role::User);
/// let stored = UserDocument { id: "u1".into(), email: "a@b.c".into(), role: Role::User };
///
/// assert_eq!(protect_role(Some(&admin), Role::Admin, None), Role::Admin);
/// assert_eq!(protect_role(Some(&member), Role::Admin, None), Role::User);
/// assert_eq!(protect_role(Some(&member), Role::Admin, Some(&stored)), Role::User);
/// ```
pub fn protect_role(
    principal: Option<&Principal>,
    submitted: Role,
    prior: Option<&UserDocument>,
) -> Role {
    decide(principal, submitted, prior).value
}

/// Configurable role guard with audit reporting.
///
/// `RoleGuard::default()` behaves exactly like [`protect_role`].
#[derive(Debug, Clone)]
pub struct RoleGuard {
    collection: String,
}

impl Default for RoleGuard {
    fn default() -> Self {
        Self {
            collection: USERS_COLLECTION.to_string(),
        }
    }
}

impl RoleGuard {
    /// Creates a guard with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the collection slug reported in audit events.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Returns the collection slug reported in audit events.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Evaluates the guard without side effects.
    pub fn evaluate(
        &self,
        principal: Option<&Principal>,
        submitted: Role,
        prior: Option<&UserDocument>,
    ) -> RoleDecision {
        decide(principal, submitted, prior)
    }

    /// Evaluates the guard and reports the decision through `audit`.
    ///
    /// A clamped write emits [`AuditEventKind::PrivilegeEscalationBlocked`].
    /// An admin changing a role emits [`AuditEventKind::RoleAssignment`].
    /// The returned decision is the same as [`RoleGuard::evaluate`].
    pub fn evaluate_audited(
        &self,
        meta: &RequestMeta,
        submitted: Role,
        prior: Option<&UserDocument>,
        document_id: Option<&str>,
        audit: &PolicyAudit<'_>,
    ) -> RoleDecision {
        let decision = self.evaluate(meta.principal.as_ref(), submitted, prior);

        let event = if decision.overridden() {
            Some((
                AuditEventKind::PrivilegeEscalationBlocked,
                AuditOutcome::Denied,
            ))
        } else if decision.rule == RoleRule::AdminPassthrough
            && prior.map_or(decision.value != Role::default(), |doc| {
                doc.role != decision.value
            })
        {
            Some((AuditEventKind::RoleAssignment, AuditOutcome::Success))
        } else {
            None
        };

        if let Some((kind, outcome)) = event {
            let mut event = AuditEvent::new(
                meta.request_id.as_str(),
                meta.principal.as_ref().map(Principal::id),
                kind,
                outcome,
            )
            .with_collection(self.collection.as_str())
            .with_roles(decision.submitted, decision.value);
            if let Some(id) = document_id.or_else(|| prior.map(|doc| doc.id.as_str())) {
                event = event.with_document_id(id);
            }
            audit.emit(&event);
        }

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditTrail;

    fn doc(role: Role) -> UserDocument {
        UserDocument {
            id: "doc-1".to_string(),
            email: "viewer@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn scenario_admin_creates_admin() {
        let admin = Principal::user("root", Role::Admin);
        assert_eq!(protect_role(Some(&admin), Role::Admin, None), Role::Admin);
    }

    #[test]
    fn scenario_user_self_registers_as_admin() {
        let member = Principal::user("u1", Role::User);
        assert_eq!(protect_role(Some(&member), Role::Admin, None), Role::User);
    }

    #[test]
    fn scenario_user_promotes_self() {
        let member = Principal::user("u1", Role::User);
        let prior = doc(Role::User);
        assert_eq!(
            protect_role(Some(&member), Role::Admin, Some(&prior)),
            Role::User
        );
    }

    #[test]
    fn scenario_api_key_cannot_promote() {
        let key = Principal::other("key-1", "apiKeys");
        let prior = doc(Role::User);
        assert_eq!(protect_role(Some(&key), Role::Admin, Some(&prior)), Role::User);
    }

    #[test]
    fn anonymous_creation_gets_default() {
        assert_eq!(protect_role(None, Role::Admin, None), Role::User);
    }

    #[test]
    fn non_admin_cannot_demote_admin() {
        let member = Principal::user("u1", Role::User);
        let prior = doc(Role::Admin);
        assert_eq!(
            protect_role(Some(&member), Role::User, Some(&prior)),
            Role::Admin
        );
    }

    #[test]
    fn admin_can_demote() {
        let admin = Principal::user("root", Role::Admin);
        let prior = doc(Role::Admin);
        assert_eq!(
            protect_role(Some(&admin), Role::User, Some(&prior)),
            Role::User
        );
    }

    #[test]
    fn decision_reports_rule_and_override() {
        let guard = RoleGuard::new();
        let member = Principal::user("u1", Role::User);

        let created = guard.evaluate(Some(&member), Role::Admin, None);
        assert_eq!(created.rule, RoleRule::CreateDefault);
        assert!(created.overridden());

        let kept = guard.evaluate(Some(&member), Role::User, Some(&doc(Role::User)));
        assert_eq!(kept.rule, RoleRule::UpdatePreserved);
        assert!(!kept.overridden());
    }

    #[test]
    fn collection_slug_is_configurable() {
        let guard = RoleGuard::new().with_collection("staff");
        assert_eq!(guard.collection(), "staff");
        let admin = Principal::user("root", Role::Admin);
        assert_eq!(guard.evaluate(Some(&admin), Role::Admin, None).value, Role::Admin);
    }

    #[test]
    fn clamp_is_audited() {
        let trail = AuditTrail::new();
        let audit = PolicyAudit::with_trail(&trail);
        let meta = RequestMeta::for_principal("req-7", Principal::user("u1", Role::User));

        let decision = RoleGuard::new().evaluate_audited(
            &meta,
            Role::Admin,
            Some(&doc(Role::User)),
            None,
            &audit,
        );

        assert_eq!(decision.value, Role::User);
        let events = trail.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), AuditEventKind::PrivilegeEscalationBlocked);
        assert_eq!(events[0].outcome(), AuditOutcome::Denied);
        assert_eq!(events[0].principal(), Some("u1"));
        assert_eq!(events[0].document_id(), Some("doc-1"));
        assert_eq!(events[0].collection(), Some("users"));
    }

    #[test]
    fn admin_promotion_is_audited_as_assignment() {
        let trail = AuditTrail::new();
        let audit = PolicyAudit::with_trail(&trail);
        let meta = RequestMeta::for_principal("req-8", Principal::user("root", Role::Admin));

        RoleGuard::new().evaluate_audited(&meta, Role::Admin, Some(&doc(Role::User)), None, &audit);

        let events = trail.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), AuditEventKind::RoleAssignment);
        assert_eq!(events[0].outcome(), AuditOutcome::Success);
    }

    #[test]
    fn unchanged_role_is_not_audited() {
        let trail = AuditTrail::new();
        let audit = PolicyAudit::with_trail(&trail);
        let meta = RequestMeta::for_principal("req-9", Principal::user("u1", Role::User));

        RoleGuard::new().evaluate_audited(&meta, Role::User, None, Some("new-doc"), &audit);
        RoleGuard::new().evaluate_audited(&meta, Role::User, Some(&doc(Role::User)), None, &audit);

        assert!(trail.is_empty());
    }
}
