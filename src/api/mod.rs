//! Navigation API boundary.
//!
//! The tile service consumes the remote navigation API as exactly two async
//! operations, both returning the same batched response shape. This module
//! defines that boundary as an object-safe trait so the service can be wired
//! to an HTTP client in production and to scripted fakes in tests.
//!
//! Both operations are single attempt: no implicit retry lives at this
//! boundary. Retry-on-next-demand is the tile service's policy.

mod types;

pub use types::{ImageAssociation, ImageKey, TileBatchResult};

use async_trait::async_trait;

use crate::error::FetchError;
use crate::tile::TileHash;

/// Client for the remote navigation API.
///
/// Implementations must be cheap to share across tasks (`Send + Sync`); the
/// tile service holds one behind an `Arc` and calls it from spawned fetch
/// tasks.
#[async_trait]
pub trait NavigationApi: Send + Sync {
    /// Fetch the tiles covering a capture point, by its image key.
    ///
    /// # Arguments
    /// * `key` - Capture-point identifier from the navigation graph
    ///
    /// # Returns
    /// A batch result touching potentially many tiles, or a [`FetchError`]
    /// on network or service failure.
    async fn fetch_by_image_key(&self, key: &ImageKey) -> Result<TileBatchResult, FetchError>;

    /// Fetch a tile and its batched neighbors, by tile hash.
    ///
    /// # Arguments
    /// * `hash` - Tile hash produced by the hashing scheme or handed back by
    ///   a previous batch result
    async fn fetch_by_tile_hash(&self, hash: &TileHash) -> Result<TileBatchResult, FetchError>;
}
