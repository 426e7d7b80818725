//! Tile service: request coalescing and cache publication.
//!
//! The TilesService is the single owner of the session tile cache. It takes
//! requests on two intake channels, suppresses duplicate in-flight work, and
//! republishes the cache after every merge:
//!
//! ```text
//! request_by_image_key ─┐
//!                       ├──► TilesService ──► NavigationApi fetch
//! request_by_tile_hash ─┘         │                  │
//!                                 │    batch result  │
//!                                 ◄──────────────────┘
//!                                 │ merge (atomic)
//!                                 ▼
//!                        snapshot broadcast ──► subscribers
//! ```
//!
//! # Coalescing
//!
//! For any key, at most one fetch is in flight at a time. Later requests for
//! the same key while a fetch is pending are absorbed: not queued, not
//! retried. Image keys and tile hashes are separate namespaces; a fetch by
//! image key and a fetch by tile hash that resolve to the same tile are
//! tracked independently.
//!
//! # Concurrency
//!
//! Cache and pending state live behind one mutex with short critical
//! sections that are never held across an await point. Merges therefore
//! apply as discrete, non-interleaved steps, and each snapshot is published
//! inside the same critical section that produced it, so snapshot order is
//! merge order and a partially-applied merge is never observable.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use crate::api::{ImageKey, NavigationApi, TileBatchResult};
use crate::config::TilesServiceConfig;

use super::cache::{CacheSnapshot, TileCache};
use super::coordinate::TileHash;

// =============================================================================
// Cache Stats
// =============================================================================

/// Counters describing the service's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Tiles marked loaded in the cache
    pub cached_tiles: usize,

    /// Tile-hash fetches currently in flight
    pub pending_tile_fetches: usize,

    /// Image-key fetches currently in flight
    pub pending_image_fetches: usize,
}

// =============================================================================
// Tiles Service
// =============================================================================

/// Mutable state owned by the service.
///
/// Pending sets track dispatched-but-unresolved fetches per namespace and
/// are never observed externally. `resolved_images` records image keys whose
/// fetch (or a batched association from another fetch) already satisfied
/// them, so a repeat request is a no-op without a network call.
struct State {
    cache: TileCache,
    pending_hashes: HashSet<TileHash>,
    pending_images: HashSet<ImageKey>,
    resolved_images: HashSet<ImageKey>,
}

/// The key that originated a fetch, for pending-set cleanup after the merge.
enum FetchOrigin {
    TileHash(TileHash),
    ImageKey(ImageKey),
}

/// Coalescing tile cache service.
///
/// One instance per navigation session, explicitly constructed and passed to
/// collaborators. The service is cheap to share: intake methods take `&self`
/// and fetches run as spawned Tokio tasks.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use graph_tiles::api::ImageKey;
/// use graph_tiles::tile::TilesService;
///
/// let service = TilesService::new(api);
///
/// // Subscribe before requesting: the stream has no replay.
/// let mut snapshots = service.subscribe();
/// service.request_by_image_key(ImageKey::new("capture-point"));
///
/// let snapshot = snapshots.recv().await?;
/// ```
pub struct TilesService {
    api: Arc<dyn NavigationApi>,
    state: Arc<Mutex<State>>,
    snapshots: broadcast::Sender<CacheSnapshot>,
}

impl TilesService {
    /// Create a service with default configuration.
    pub fn new(api: Arc<dyn NavigationApi>) -> Self {
        Self::with_config(api, TilesServiceConfig::default())
    }

    /// Create a service with custom configuration.
    pub fn with_config(api: Arc<dyn NavigationApi>, config: TilesServiceConfig) -> Self {
        let (snapshots, _) = broadcast::channel(config.snapshot_channel_capacity);
        Self {
            api,
            state: Arc::new(Mutex::new(State {
                cache: TileCache::new(),
                pending_hashes: HashSet::new(),
                pending_images: HashSet::new(),
                resolved_images: HashSet::new(),
            })),
            snapshots,
        }
    }

    /// Request the tiles locating a capture point.
    ///
    /// No-op when the key was already satisfied by a previous fetch or a
    /// fetch for it is currently in flight. Otherwise dispatches a
    /// fetch-by-image-key on the Tokio runtime; the batch result is merged
    /// into the cache and one snapshot is published on completion.
    ///
    /// Never blocks. Must be called within a Tokio runtime.
    pub fn request_by_image_key(&self, key: ImageKey) {
        {
            let mut state = self.lock_state();
            if state.resolved_images.contains(&key) {
                trace!(key = %key, "Image key already resolved; skipping fetch");
                return;
            }
            if !state.pending_images.insert(key.clone()) {
                trace!(key = %key, "Image key fetch already in flight; coalescing");
                return;
            }
        }

        debug!(key = %key, "Dispatching fetch by image key");
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let snapshots = self.snapshots.clone();
        tokio::spawn(async move {
            match api.fetch_by_image_key(&key).await {
                Ok(batch) => {
                    merge_batch(&state, &snapshots, FetchOrigin::ImageKey(key), &batch);
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "Image key fetch failed; next request will retry");
                    lock(&state).pending_images.remove(&key);
                }
            }
        });
    }

    /// Request a tile by its hash.
    ///
    /// No-op when the hash is already loaded in the cache or a fetch for it
    /// is currently in flight. Otherwise dispatches a fetch-by-tile-hash;
    /// the batch result is merged and one snapshot published on completion.
    ///
    /// Never blocks. Must be called within a Tokio runtime.
    pub fn request_by_tile_hash(&self, hash: TileHash) {
        {
            let mut state = self.lock_state();
            if state.cache.is_loaded(&hash) {
                trace!(hash = %hash, "Tile already cached; skipping fetch");
                return;
            }
            if !state.pending_hashes.insert(hash.clone()) {
                trace!(hash = %hash, "Tile fetch already in flight; coalescing");
                return;
            }
        }

        debug!(hash = %hash, "Dispatching fetch by tile hash");
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let snapshots = self.snapshots.clone();
        tokio::spawn(async move {
            match api.fetch_by_tile_hash(&hash).await {
                Ok(batch) => {
                    merge_batch(&state, &snapshots, FetchOrigin::TileHash(hash), &batch);
                }
                Err(err) => {
                    warn!(hash = %hash, error = %err, "Tile fetch failed; next request will retry");
                    lock(&state).pending_hashes.remove(&hash);
                }
            }
        });
    }

    /// Subscribe to cache snapshots.
    ///
    /// Hot stream: exactly one snapshot per successful merge, in merge
    /// order, with no replay of history. A subscriber that needs the
    /// snapshot resulting from a request must subscribe before issuing that
    /// request. Fetch failures produce nothing on this stream.
    ///
    /// A receiver that falls more than the configured channel capacity
    /// behind observes a `Lagged` error and resumes with newer snapshots;
    /// because snapshots are cumulative, the newest one subsumes anything
    /// missed.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheSnapshot> {
        self.snapshots.subscribe()
    }

    /// Current cache state, for late joiners.
    ///
    /// The snapshot stream deliberately does not replay history; a caller
    /// that attaches mid-session combines this query with [`subscribe`]
    /// (query first, then apply live updates on top).
    ///
    /// [`subscribe`]: TilesService::subscribe
    pub fn snapshot(&self) -> CacheSnapshot {
        self.lock_state().cache.snapshot()
    }

    /// Counters for the cache and both pending sets.
    pub fn cache_stats(&self) -> CacheStats {
        let state = self.lock_state();
        CacheStats {
            cached_tiles: state.cache.len(),
            pending_tile_fetches: state.pending_hashes.len(),
            pending_image_fetches: state.pending_images.len(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }
}

/// Acquire the state lock.
///
/// Poisoning means a merge panicked mid-update; the state can no longer be
/// trusted, so this is treated as fatal rather than recovered.
fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().expect("tiles service state lock poisoned")
}

/// Apply one completed fetch to the cache and publish a snapshot.
///
/// Runs entirely inside one critical section: insertion of every hash the
/// batch touches, pending-set cleanup for the originating key, snapshot
/// construction, and publication. Two merges can therefore never interleave,
/// and subscribers see each batch all-or-nothing.
fn merge_batch(
    state: &Mutex<State>,
    snapshots: &broadcast::Sender<CacheSnapshot>,
    origin: FetchOrigin,
    batch: &TileBatchResult,
) {
    let mut state = lock(state);

    for hash in batch.hashes.iter().chain(batch.spatial_extras.iter()) {
        state.cache.mark_loaded(hash.clone());
    }
    for assoc in &batch.image_associations {
        if let Some(tile) = &assoc.tile {
            state.cache.mark_loaded(tile.clone());
        }
        state.resolved_images.insert(assoc.key.clone());
    }

    match origin {
        FetchOrigin::TileHash(hash) => {
            state.pending_hashes.remove(&hash);
            debug!(hash = %hash, cached = state.cache.len(), "Merged tile hash fetch");
        }
        FetchOrigin::ImageKey(key) => {
            state.pending_images.remove(&key);
            state.resolved_images.insert(key.clone());
            debug!(key = %key, cached = state.cache.len(), "Merged image key fetch");
        }
    }

    // Published under the lock: snapshot order is merge order. A send error
    // only means there is currently no subscriber.
    let _ = snapshots.send(state.cache.snapshot());
}

// =============================================================================
// Tests
// =============================================================================
