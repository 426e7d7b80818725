//! Monotone tile cache.
//!
//! This cache records which tiles have been loaded during the current
//! navigation session. It is an accumulator, not an LRU: once a hash is
//! marked loaded it stays loaded for the lifetime of the cache. External
//! code never sees the live map, only immutable snapshots.
//!
//! # Thread Safety
//!
//! The cache itself is not synchronized. It is owned exclusively by the
//! tile service, which serializes all mutation behind its own lock.

use std::collections::HashMap;
use std::sync::Arc;

use super::coordinate::TileHash;

/// Immutable, point-in-time copy of the cache state.
///
/// Maps each known tile hash to its loaded marker. Every entry is `true`:
/// the map form (rather than a set) is the externally observed contract, so
/// subscribers can index by hash directly.
pub type CacheSnapshot = Arc<HashMap<TileHash, bool>>;

/// Accumulator of loaded tile hashes.
#[derive(Debug, Default)]
pub struct TileCache {
    entries: HashMap<TileHash, bool>,
}

impl TileCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a tile hash as loaded.
    ///
    /// Idempotent: marking an already-loaded hash changes nothing. Returns
    /// `true` when the hash was newly inserted.
    pub fn mark_loaded(&mut self, hash: TileHash) -> bool {
        self.entries.insert(hash, true).is_none()
    }

    /// Whether a tile hash has been loaded.
    pub fn is_loaded(&self, hash: &TileHash) -> bool {
        self.entries.get(hash).copied().unwrap_or(false)
    }

    /// Number of loaded tiles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tile has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build an immutable snapshot of the current state.
    ///
    /// Copy-on-write at merge granularity: the service takes one snapshot
    /// per merge and hands the same `Arc` to every subscriber.
    pub fn snapshot(&self) -> CacheSnapshot {
        Arc::new(self.entries.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
