//! Audit logging for Spendboard
//!
//! Every expense creation and deletion and every budget replacement is
//! appended to `audit.log` as one JSON object per line (JSONL), with the
//! record before and/or after the change.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::{AuditLogger, History};
