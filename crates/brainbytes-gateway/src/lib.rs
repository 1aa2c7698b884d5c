//! BrainBytes gateway library entry.
//!
//! Wires configuration, the AI proxy service, the metrics registry and the
//! operational endpoints into one axum router. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod middleware;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
