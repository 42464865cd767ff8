//! Audit trail for routed operations: records, sinks, and the middleware
//! that reports to them.

mod jsonl;
mod middleware;
mod record;
mod sink;

pub use jsonl::{DEFAULT_AUDIT_LOG, JsonlAuditLog, RetryPolicy};
pub use middleware::{Audited, Invocation};
pub use record::{AuditRecord, Outcome};
pub use sink::{AuditSink, MemoryAuditSink};
