//! # Graph Tiles
//!
//! Tile cache and request coalescing for a graph-based spatial navigation
//! viewer.
//!
//! Nodes in the viewer's traversal graph correspond to geo-located capture
//! points; a spatial index partitions the world into fixed-size grid cells
//! ("tiles"). Loading a node's neighborhood means fetching the tiles that
//! cover it, and each fetch is an expensive network round trip. This crate
//! owns that boundary: it guarantees at most one in-flight fetch per logical
//! key, merges overlapping batch results into a monotone session cache, and
//! broadcasts consistent cache snapshots to any number of subscribers.
//!
//! ## Architecture
//!
//! - [`tile`] - Tile coordinates, the hashing scheme, the session cache, and
//!   the coalescing [`TilesService`]
//! - [`api`] - The navigation API boundary ([`NavigationApi`]) and its wire
//!   types
//! - [`config`] - Service configuration
//! - [`error`] - Fetch and hashing error types
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use graph_tiles::{TileCoordinate, TilesService};
//!
//! let service = TilesService::new(api_client);
//!
//! // Subscribe first: the snapshot stream has no replay.
//! let mut snapshots = service.subscribe();
//!
//! let hash = TileCoordinate::new(4, -2, 1).hash()?;
//! service.request_by_tile_hash(hash.clone());
//!
//! let snapshot = snapshots.recv().await?;
//! assert_eq!(snapshot.get(&hash), Some(&true));
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod tile;

// Re-export commonly used types
pub use api::{ImageAssociation, ImageKey, NavigationApi, TileBatchResult};
pub use config::{TilesServiceConfig, DEFAULT_SNAPSHOT_CHANNEL_CAPACITY};
pub use error::{FetchError, HashError};
pub use tile::{
    CacheSnapshot, CacheStats, TileCache, TileCoordinate, TileHash, TilesService, MAX_TILE_INDEX,
    MAX_TILE_SIZE, MIN_TILE_INDEX, MIN_TILE_SIZE,
};
