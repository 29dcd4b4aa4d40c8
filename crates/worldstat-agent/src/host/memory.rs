//! In-memory host used by tests and the dump tool.
//!
//! Mutators take `&self` so a simulation thread can keep changing state
//! while another thread queries metrics.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use dashmap::DashMap;

use super::{Level, ServerHost, TypeCatalog};

/// Number of tick samples kept in the rolling window.
pub const TICK_WINDOW: usize = 100;

/// Level with counted entities, ticking block entities, and a chunk count.
#[derive(Default)]
pub struct MemoryLevel {
    entities: DashMap<String, usize>,
    tickers: DashMap<String, usize>,
    chunks: AtomicUsize,
}

impl MemoryLevel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&self, entity_type: &str, n: usize) {
        *self.entities.entry(entity_type.to_string()).or_insert(0) += n;
    }

    /// Remove up to `n` entities of a type; never underflows.
    pub fn despawn(&self, entity_type: &str, n: usize) {
        if let Some(mut c) = self.entities.get_mut(entity_type) {
            *c = c.saturating_sub(n);
        }
        self.entities.remove_if(entity_type, |_, c| *c == 0);
    }

    pub fn add_tickers(&self, block_entity_type: &str, n: usize) {
        *self.tickers.entry(block_entity_type.to_string()).or_insert(0) += n;
    }

    pub fn remove_tickers(&self, block_entity_type: &str, n: usize) {
        if let Some(mut c) = self.tickers.get_mut(block_entity_type) {
            *c = c.saturating_sub(n);
        }
        self.tickers.remove_if(block_entity_type, |_, c| *c == 0);
    }

    pub fn set_loaded_chunks(&self, n: usize) {
        self.chunks.store(n, Ordering::Relaxed);
    }
}

impl Level for MemoryLevel {
    fn count_entities(&self, entity_type: &str) -> usize {
        self.entities.get(entity_type).map(|c| *c).unwrap_or(0)
    }

    fn ticking_block_entity_counts(&self) -> HashMap<String, usize> {
        self.tickers
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect()
    }

    fn loaded_chunk_count(&self) -> usize {
        self.chunks.load(Ordering::Relaxed)
    }
}

/// Server with an ordered level directory and a bounded tick window.
pub struct MemoryServer {
    keys: RwLock<Vec<String>>,
    loaded: DashMap<String, Arc<MemoryLevel>>,
    tick_times: Mutex<VecDeque<u64>>,
    players: AtomicI32,
    max_players: AtomicI32,
}

impl MemoryServer {
    pub fn new(max_players: i32) -> Self {
        Self {
            keys: RwLock::new(Vec::new()),
            loaded: DashMap::new(),
            tick_times: Mutex::new(VecDeque::with_capacity(TICK_WINDOW)),
            players: AtomicI32::new(0),
            max_players: AtomicI32::new(max_players),
        }
    }

    /// Declare a level key without loading it.
    pub fn declare_level(&self, key: &str) {
        let mut keys = self.keys.write().unwrap_or_else(PoisonError::into_inner);
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }

    /// Declare and load a level, returning its live handle.
    pub fn load_level(&self, key: &str) -> Arc<MemoryLevel> {
        self.declare_level(key);
        self.loaded
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(MemoryLevel::new()))
            .value()
            .clone()
    }

    /// Unload a level; its key stays known.
    pub fn unload_level(&self, key: &str) -> Option<Arc<MemoryLevel>> {
        self.loaded.remove(key).map(|(_, level)| level)
    }

    pub fn memory_level(&self, key: &str) -> Option<Arc<MemoryLevel>> {
        self.loaded.get(key).map(|r| r.value().clone())
    }

    /// Push one tick duration, evicting the oldest past [`TICK_WINDOW`].
    pub fn record_tick(&self, d: Duration) {
        let nanos = u64::try_from(d.as_nanos()).unwrap_or(u64::MAX);
        let mut window = self.tick_times.lock().unwrap_or_else(PoisonError::into_inner);
        if window.len() == TICK_WINDOW {
            window.pop_front();
        }
        window.push_back(nanos);
    }

    pub fn set_players(&self, n: i32) {
        self.players.store(n, Ordering::Relaxed);
    }

    pub fn set_max_players(&self, n: i32) {
        self.max_players.store(n, Ordering::Relaxed);
    }
}

impl ServerHost for MemoryServer {
    fn tick_times_nanos(&self) -> Vec<u64> {
        self.tick_times
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    fn player_count(&self) -> i32 {
        self.players.load(Ordering::Relaxed)
    }

    fn max_players(&self) -> i32 {
        self.max_players.load(Ordering::Relaxed)
    }

    fn level_keys(&self) -> Vec<String> {
        self.keys.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn level(&self, key: &str) -> Option<Arc<dyn Level>> {
        self.loaded
            .get(key)
            .map(|r| r.value().clone() as Arc<dyn Level>)
    }
}

/// Fixed list of type identifiers.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    ids: Vec<String>,
}

impl MemoryCatalog {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl TypeCatalog for MemoryCatalog {
    fn ids(&self) -> Vec<String> {
        self.ids.clone()
    }
}
