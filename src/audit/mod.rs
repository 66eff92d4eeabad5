//! Audit log for budget-split
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` as one JSON object per line, together with the acting user and
//! the before/after state. `split audit` reads it back.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
