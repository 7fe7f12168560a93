//! Observability for validation runs
//!
//! - Structured logging (JSON lines)
//! - Atomic outcome counters
//!
//! Observability is read-only: it never changes a validation outcome.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{LogSink, Logger, Severity};
pub use metrics::{MetricsSnapshot, ValidationMetrics};
