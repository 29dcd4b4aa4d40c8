//! Built-in metric producers.
//!
//! Scalars read host counters directly. Tables enumerate the host's level
//! keys, skip any key that does not resolve to a live level, and emit rows
//! from owned snapshots. Rows of one table may reflect slightly different
//! instants; no lock is taken across a build.

pub mod block_entities;
pub mod chunks;
pub mod entities;
pub mod scalar;

use std::sync::Arc;

use worldstat_core::error::{MetricsError, Result};

use crate::host::{Level, ServerHost};

/// Resolve every known level key, dropping the ones that are not loaded.
pub(crate) fn resolved_levels(server: &dyn ServerHost) -> Vec<(String, Arc<dyn Level>)> {
    server
        .level_keys()
        .into_iter()
        .filter_map(|key| match server.level(&key) {
            Some(level) => Some((key, level)),
            None => {
                tracing::debug!(level = %key, "level not loaded, skipped");
                None
            }
        })
        .collect()
}

/// Narrow a host count into the column's integer width.
pub(crate) fn narrow<T: TryFrom<usize>>(count: usize, what: &str) -> Result<T> {
    T::try_from(count)
        .map_err(|_| MetricsError::Data(format!("{what} count {count} overflows column")))
}
