//! In-process observability.
//!
//! Metrics live in atomics behind `DashMap`s and are rendered in Prometheus
//! text format by the `/metrics` handler.

pub mod metrics;

pub use metrics::{AiOutcome, HttpLabels, InFlight, ServiceMetrics};
