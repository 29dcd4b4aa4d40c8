//! Top-level facade crate for worldstat.
//!
//! Re-exports core types and the agent library so users can depend on a single crate.

pub mod core {
    pub use worldstat_core::*;
}

pub mod agent {
    pub use worldstat_agent::*;
}
