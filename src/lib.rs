//! Authorization hooks for a media catalog's content backend.
//!
//! The backend resolves who is making a request, then consults this crate
//! twice:
//! - **Collection access**: may this request perform an operation on a
//!   collection at all? By default only authenticated requests may.
//! - **Role guard**: which value of a `users` document's `role` field may be
//!   persisted? Only admin users may set it freely; everyone else is clamped.
//!
//! # Core Types
//!
//! - [`Principal`]: Tagged identity (`users` member with a [`Role`], or another collection)
//! - [`RequestMeta`]: Request id plus optional principal
//! - [`CollectionAccess`]: Per-operation access predicates for one collection
//! - [`protect_role`] / [`RoleGuard`]: The role field guard
//! - [`PolicyGate`]: Builder validating requirements and producing a [`Ctx`]
//! - [`audit`]: Structured events for denials and clamped role writes
//!
//! # Examples
//!
//! ```
//! use catalog_authz::{
//!     Allowed, Authenticated, CollectionAccess, Operation, PolicyGate, Principal, RequestMeta,
//!     Role, UserDocument, UserWrite,
//! };
//!
//! let users = CollectionAccess::new("users");
//! let meta = RequestMeta::for_principal("req-123", Principal::user("u1", Role::User));
//!
//! let ctx = PolicyGate::new(meta)
//!     .require(Authenticated)
//!     .require(Allowed::to(&users, Operation::Update))
//!     .build()
//!     .expect("policies satisfied");
//!
//! let stored = UserDocument {
//!     id: "u1".to_string(),
//!     email: "u1@example.com".to_string(),
//!     role: Role::User,
//! };
//!
//! // A member trying to promote themselves keeps their stored role.
//! let next = ctx.update_user(UserWrite::new().role(Role::Admin), &stored);
//! assert_eq!(next.role, Role::User);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
pub mod audit;
mod context;
mod document;
mod error;
mod gate;
mod guard;
mod policy;
mod request;
mod role;

pub use access::{anyone, authenticated, AccessFn, CollectionAccess, Operation};
pub use context::Ctx;
pub use document::{UserDocument, UserWrite};
pub use error::{Violation, ViolationKind};
pub use gate::PolicyGate;
pub use guard::{protect_role, RoleDecision, RoleGuard, RoleRule};
pub use policy::{Allowed, Authenticated, PolicyReq};
pub use request::{ExtractMetadata, Principal, RequestMeta, USERS_COLLECTION};
pub use role::Role;
