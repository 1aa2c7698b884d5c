//! BrainBytes core: error surface and JSON wire types shared by the gateway,
//! the verification tool, and tests.
//!
//! Carries no transport or runtime dependencies.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here; every fallible path
//! surfaces as `BrainBytesError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{BrainBytesError, Result};
