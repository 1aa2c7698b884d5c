//! Top-level facade crate for BrainBytes.
//!
//! Re-exports the core types, the gateway library and the deployment verifier
//! so users can depend on a single crate.

pub mod core {
    pub use brainbytes_core::*;
}

pub mod gateway {
    pub use brainbytes_gateway::*;
}

pub mod verify {
    pub use brainbytes_verify::*;
}
