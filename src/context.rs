use crate::audit::PolicyAudit;
use crate::document::{UserDocument, UserWrite};
use crate::error::{Violation, ViolationKind};
use crate::guard::{RoleDecision, RoleGuard};
use crate::request::{Principal, RequestMeta};
use crate::role::Role;

/// Execution context for a request that has passed its access checks.
///
/// Holds the request metadata, the role guard, and the audit emitter.
/// Writes to `users` documents go through [`Ctx::create_user`] and
/// [`Ctx::update_user`], which compute the document the backend must
/// persist.
///
/// # Construction
///
/// `Ctx` cannot be constructed by user code. Use `PolicyGate`.
///
/// # Examples
///
/// ```
/// use catalog_authz::{Authenticated, PolicyGate, Principal, RequestMeta, Role, UserWrite};
///
/// let meta = RequestMeta::for_principal("req-1", Principal::user("u1", Role::User));
/// let ctx = PolicyGate::new(meta).require(Authenticated).build().unwrap();
///
/// let doc = ctx
///     .create_user("u2", UserWrite::new().email("new@example.com").role(Role::Admin))
///     .unwrap();
/// assert_eq!(doc.role, Role::User);
/// ```
#[derive(Debug, Clone)]
pub struct Ctx<'a> {
    meta: RequestMeta,
    guard: RoleGuard,
    audit: PolicyAudit<'a>,
}

impl<'a> Ctx<'a> {
    /// This is `pub(crate)` so only the gate can create it.
    pub(crate) fn new(meta: RequestMeta, guard: RoleGuard, audit: PolicyAudit<'a>) -> Self {
        Self { meta, guard, audit }
    }

    /// Returns the request ID for this context.
    pub fn request_id(&self) -> &str {
        &self.meta.request_id
    }

    /// Returns the principal if present.
    pub fn principal(&self) -> Option<&Principal> {
        self.meta.principal.as_ref()
    }

    /// Returns the request metadata.
    pub fn meta(&self) -> &RequestMeta {
        &self.meta
    }

    /// Computes the role to persist for a write, auditing any clamp.
    ///
    /// `prior` must be the freshest snapshot of the document the backend
    /// holds for this write, or `None` on creation.
    pub fn guard_role(
        &self,
        submitted: Role,
        prior: Option<&UserDocument>,
        document_id: Option<&str>,
    ) -> RoleDecision {
        self.guard
            .evaluate_audited(&self.meta, submitted, prior, document_id, &self.audit)
    }

    /// Builds a new `users` document from a create payload.
    ///
    /// # Errors
    ///
    /// Returns [`ViolationKind::MissingField`] if `email` is absent.
    pub fn create_user(
        &self,
        id: impl Into<String>,
        write: UserWrite,
    ) -> Result<UserDocument, Violation> {
        let id = id.into();
        let email = write.email.ok_or_else(|| {
            Violation::new(
                ViolationKind::MissingField { field: "email" },
                "email is required to create a user",
            )
        })?;
        let submitted = write.role.unwrap_or_default();
        let decision = self.guard_role(submitted, None, Some(&id));

        tracing::debug!(
            request_id = %self.meta.request_id,
            document_id = %id,
            role = %decision.value,
            rule = %decision.rule,
            "user created"
        );

        Ok(UserDocument {
            id,
            email,
            role: decision.value,
        })
    }

    /// Merges an update payload over `prior`.
    ///
    /// Fields absent from the payload keep their stored values. A submitted
    /// role is passed through the guard; an absent one leaves the stored
    /// role untouched without an audit event.
    pub fn update_user(&self, write: UserWrite, prior: &UserDocument) -> UserDocument {
        let role = match write.role {
            Some(submitted) => self.guard_role(submitted, Some(prior), None).value,
            None => prior.role,
        };

        UserDocument {
            id: prior.id.clone(),
            email: write.email.unwrap_or_else(|| prior.email.clone()),
            role,
        }
    }
}
