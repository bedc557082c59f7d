//! Audit signals for authorization decisions.
//!
//! This module provides:
//! - `AuditEvent`: Structured record of an access denial or a clamped role write
//! - `AuditTrail`: In-memory, thread-safe event recorder
//! - `PolicyAudit`: Emitter that logs events through `tracing` and optionally records them
//!
//! Events carry identifiers and role names only, never document bodies.

mod event;
mod policy_audit;
mod trail;

pub use event::{AuditEvent, AuditEventKind, AuditOutcome};
pub use policy_audit::PolicyAudit;
pub use trail::AuditTrail;
