//! Top-level facade crate for federator.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use federator_core::*;
}

pub mod gateway {
    pub use federator_gateway::*;
}
