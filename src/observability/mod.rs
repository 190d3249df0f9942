//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! fetch / store / cache seams
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters by outcome and source)
//! ```
//!
//! Metric updates are cheap counter increments; whether anything collects
//! them is up to the embedding application's recorder.

pub mod logging;
pub mod metrics;
