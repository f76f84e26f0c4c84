//! Append-only audit log
//!
//! Every create and update against the ledger is recorded as one JSON line
//! in `audit.log`, carrying before/after snapshots of the record.
//!
//! - `AuditEntry`: one operation on one record.
//! - `AuditLogger`: appends entries to the log and reads them back.
//! - `generate_diff`: summarizes which top-level fields changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
