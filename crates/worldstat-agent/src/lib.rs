//! worldstat agent library entry.
//!
//! This crate wires the host seam, the metric registry, and the built-in
//! producers (tick time, players, entities, block entities, chunks) into
//! a registry a management client can query by name. It is consumed by
//! the embedding server, the `worldstat-dump` binary, and integration
//! tests.

pub mod agent;
pub mod catalog;
pub mod config;
pub mod host;
pub mod producers;
pub mod registry;

pub use agent::Agent;
pub use registry::{MetricInfo, MetricRegistry, Producer};
