//! Shared test utilities for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use graph_tiles::{
    FetchError, ImageAssociation, ImageKey, NavigationApi, TileBatchResult, TileHash,
};

/// Initialize test logging once; respects `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mock navigation API backed by a static tile neighborhood.
///
/// Fetching a tile hash returns that hash plus its configured neighbors,
/// mimicking the batched responses of the real service. Image keys must be
/// scripted explicitly; unscripted keys fail with `NotFound`.
pub struct MockNavigationApi {
    neighbors: Mutex<HashMap<TileHash, Vec<TileHash>>>,
    image_batches: Mutex<HashMap<ImageKey, TileBatchResult>>,
    hash_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl MockNavigationApi {
    pub fn new() -> Self {
        Self {
            neighbors: Mutex::new(HashMap::new()),
            image_batches: Mutex::new(HashMap::new()),
            hash_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    /// Configure the neighbors batched into a tile-hash response.
    pub fn with_neighbors(
        self,
        hash: impl Into<TileHash>,
        neighbors: impl IntoIterator<Item = TileHash>,
    ) -> Self {
        self.neighbors
            .lock()
            .unwrap()
            .insert(hash.into(), neighbors.into_iter().collect());
        self
    }

    /// Script the batch returned for an image key.
    pub fn with_image_batch(self, key: impl Into<ImageKey>, batch: TileBatchResult) -> Self {
        self.image_batches.lock().unwrap().insert(key.into(), batch);
        self
    }

    /// Script an image key resolving to a single locating tile.
    pub fn with_image_tile(self, key: &str, tile: impl Into<TileHash>) -> Self {
        let tile = tile.into();
        self.with_image_batch(
            key,
            TileBatchResult {
                hashes: vec![tile.clone()],
                image_associations: vec![ImageAssociation::with_tile(key, tile)],
                spatial_extras: vec![],
            },
        )
    }

    pub fn hash_calls(&self) -> usize {
        self.hash_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockNavigationApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NavigationApi for MockNavigationApi {
    async fn fetch_by_image_key(&self, key: &ImageKey) -> Result<TileBatchResult, FetchError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.image_batches
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(key.to_string()))
    }

    async fn fetch_by_tile_hash(&self, hash: &TileHash) -> Result<TileBatchResult, FetchError> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        let neighbors = self
            .neighbors
            .lock()
            .unwrap()
            .get(hash)
            .cloned()
            .unwrap_or_default();

        let mut hashes = vec![hash.clone()];
        hashes.extend(neighbors);
        Ok(TileBatchResult {
            hashes,
            image_associations: vec![],
            spatial_extras: vec![],
        })
    }
}
