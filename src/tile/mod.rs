//! Tile layer: hashing scheme, session cache, and the coalescing service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 TilesService                  │
//! │  ┌──────────────┐      ┌──────────────────┐  │
//! │  │  TileCache   │      │   PendingSets    │  │
//! │  │  (monotone   │      │   (in-flight     │  │
//! │  │   hash map)  │      │    fetch keys)   │  │
//! │  └──────────────┘      └──────────────────┘  │
//! └──────────┬───────────────────────┬───────────┘
//!            │ snapshots             │ fetches
//!            ▼                       ▼
//!     subscribers             NavigationApi
//! ```
//!
//! # Components
//!
//! - [`TileCoordinate`] / [`TileHash`]: grid coordinates and the
//!   deterministic hashing scheme
//! - [`TileCache`]: monotone accumulator of loaded tile hashes
//! - [`CacheSnapshot`]: immutable point-in-time view handed to subscribers
//! - [`TilesService`]: intake, request coalescing, merge, and publication

mod cache;
mod coordinate;
mod service;

pub use cache::{CacheSnapshot, TileCache};
pub use coordinate::{
    TileCoordinate, TileHash, MAX_TILE_INDEX, MAX_TILE_SIZE, MIN_TILE_INDEX, MIN_TILE_SIZE,
};
pub use service::{CacheStats, TilesService};
