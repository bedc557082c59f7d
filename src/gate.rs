use crate::{
    audit::{AuditEvent, AuditEventKind, AuditOutcome, AuditTrail, PolicyAudit},
    context::Ctx,
    error::{Violation, ViolationKind},
    guard::RoleGuard,
    policy::PolicyReq,
    request::RequestMeta,
};

/// The policy enforcement gate.
///
/// `PolicyGate` is the only way to construct a `Ctx`. It validates policy
/// requirements before handing out a context that can perform writes.
///
/// # Examples
///
/// ```
/// use catalog_authz::{Allowed, Authenticated, CollectionAccess, Operation, PolicyGate};
/// use catalog_authz::{Principal, RequestMeta, Role};
///
/// let users = CollectionAccess::new("users");
/// let meta = RequestMeta::for_principal("req-123", Principal::user("u1", Role::User));
///
/// let ctx = PolicyGate::new(meta)
///     .require(Authenticated)
///     .require(Allowed::to(&users, Operation::Update))
///     .build()
///     .expect("policies should pass");
///
/// assert_eq!(ctx.request_id(), "req-123");
/// ```
pub struct PolicyGate<'a> {
    meta: RequestMeta,
    requirements: Vec<PolicyReq>,
    guard: RoleGuard,
    trail: Option<&'a AuditTrail>,
}

impl<'a> PolicyGate<'a> {
    /// Creates a new policy gate with the given request metadata.
    pub fn new(meta: RequestMeta) -> Self {
        Self {
            meta,
            requirements: Vec::new(),
            guard: RoleGuard::default(),
            trail: None,
        }
    }

    /// Adds a policy requirement to the gate.
    ///
    /// Repeated `Authenticated` requirements collapse into one. Every
    /// `Allowed` requirement is kept and evaluated, even when another one
    /// names the same collection and operation.
    pub fn require(mut self, policy: impl Into<PolicyReq>) -> Self {
        let req = policy.into();

        if !self
            .requirements
            .iter()
            .any(|r| self.same_requirement(r, &req))
        {
            self.requirements.push(req);
        }

        self
    }

    /// Replaces the role guard handed to the built context.
    pub fn with_guard(mut self, guard: RoleGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Records denials, and the context's role decisions, to `trail`.
    pub fn with_audit_trail(mut self, trail: &'a AuditTrail) -> Self {
        self.trail = Some(trail);
        self
    }

    /// Returns the number of requirements the gate will evaluate.
    pub fn requirement_count(&self) -> usize {
        self.requirements.len()
    }

    /// Builds a `Ctx` after validating accumulated policy requirements.
    ///
    /// # Errors
    ///
    /// Returns the `Violation` of the first requirement that fails. The
    /// denial is audited before returning.
    pub fn build(self) -> Result<Ctx<'a>, Violation> {
        let audit = self.trail.map_or_else(PolicyAudit::new, PolicyAudit::with_trail);

        if let Err((violation, req)) = self.validate_all() {
            let mut event = AuditEvent::new(
                self.meta.request_id.as_str(),
                self.meta.principal.as_ref().map(|p| p.id()),
                AuditEventKind::CollectionAccess,
                AuditOutcome::Denied,
            );
            if let PolicyReq::Allowed { access, operation } = req {
                event = event
                    .with_collection(access.collection())
                    .with_operation(*operation);
            }
            audit.emit(&event);
            return Err(violation);
        }

        Ok(Ctx::new(self.meta, self.guard, audit))
    }

    /// Checks every requirement, stopping at the first failure.
    fn validate_all(&self) -> Result<(), (Violation, &PolicyReq)> {
        for req in &self.requirements {
            self.validate_one(req).map_err(|v| (v, req))?;
        }
        Ok(())
    }

    /// Validates a single policy requirement.
    fn validate_one(&self, req: &PolicyReq) -> Result<(), Violation> {
        match req {
            PolicyReq::Authenticated => {
                if self.meta.principal.is_none() {
                    return Err(Violation::new(
                        ViolationKind::Unauthenticated,
                        "Authentication required",
                    ));
                }
                Ok(())
            }
            PolicyReq::Allowed { access, operation } => access.check(*operation, &self.meta),
        }
    }

    // Collection rules are opaque fn pointers and never merged.
    fn same_requirement(&self, a: &PolicyReq, b: &PolicyReq) -> bool {
        matches!(
            (a, b),
            (PolicyReq::Authenticated, PolicyReq::Authenticated)
        )
    }
}
