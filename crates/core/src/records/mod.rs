pub mod service;

pub use service::{today, AuditAction, RecordService};
