//! Top-level facade crate for gatehouse.
//!
//! Re-exports the core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use gatehouse_core::*;
}

pub mod gateway {
    pub use gatehouse_gateway::*;
}
