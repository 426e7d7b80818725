//! Tile coordinates and the tile hashing scheme.
//!
//! A tile is a fixed-size cell of a spatial grid partition. Each grid
//! resolution level (`size`) partitions the world independently, so
//! coordinates are only comparable within the same level.
//!
//! # Hashing Scheme
//!
//! [`TileCoordinate::hash`] maps a coordinate to an opaque string key used
//! both as a cache key and as the wire argument for tile-fetch requests. The
//! encoding packs the coordinate into a `u64` and hex-encodes it:
//!
//! ```text
//! | size (12 bits) | row + BIAS (26 bits) | col + BIAS (26 bits) |
//! 63             52 51                  26 25                   0
//! ```
//!
//! The packing is injective for a fixed `size`, and the hex encoding is
//! stable across process restarts, so the hash is a durable correlation key
//! with the remote service rather than just a local cache key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HashError;

// =============================================================================
// Encoding Constants
// =============================================================================

const COL_BITS: u64 = 26;
const ROW_BITS: u64 = 26;

const ROW_SHIFT: u64 = COL_BITS;
const SIZE_SHIFT: u64 = COL_BITS + ROW_BITS;

/// Bias added to `col` and `row` so signed indices pack into unsigned fields.
const INDEX_BIAS: i64 = 1 << 25;

/// Smallest encodable tile index.
pub const MIN_TILE_INDEX: i32 = -(1 << 25);

/// Largest encodable tile index.
pub const MAX_TILE_INDEX: i32 = (1 << 25) - 1;

/// Smallest valid grid resolution level.
pub const MIN_TILE_SIZE: u32 = 1;

/// Largest encodable grid resolution level.
pub const MAX_TILE_SIZE: u32 = (1 << 12) - 1;

// =============================================================================
// TileCoordinate
// =============================================================================

/// A grid coordinate identifying one tile at one resolution level.
///
/// Immutable value type. `size` denotes the grid resolution level; distinct
/// levels partition the world differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    /// Column index (signed, 0 at the grid origin)
    pub col: i32,

    /// Row index (signed, 0 at the grid origin)
    pub row: i32,

    /// Grid resolution level
    pub size: u32,
}

impl TileCoordinate {
    /// Create a new tile coordinate.
    pub fn new(col: i32, row: i32, size: u32) -> Self {
        Self { col, row, size }
    }

    /// Compute the tile hash for this coordinate.
    ///
    /// Pure and deterministic: equal coordinates always produce equal hashes,
    /// and distinct coordinates at the same `size` produce distinct hashes.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::CoordinateOutOfRange`] when `col` or `row` falls
    /// outside `MIN_TILE_INDEX..=MAX_TILE_INDEX`, or `size` outside
    /// `MIN_TILE_SIZE..=MAX_TILE_SIZE`.
    pub fn hash(&self) -> Result<TileHash, HashError> {
        check_index("col", self.col)?;
        check_index("row", self.row)?;
        if self.size < MIN_TILE_SIZE || self.size > MAX_TILE_SIZE {
            return Err(HashError::CoordinateOutOfRange {
                axis: "size",
                value: self.size as i64,
                min: MIN_TILE_SIZE as i64,
                max: MAX_TILE_SIZE as i64,
            });
        }

        let col = (self.col as i64 + INDEX_BIAS) as u64;
        let row = (self.row as i64 + INDEX_BIAS) as u64;
        let size = self.size as u64;

        let packed = (size << SIZE_SHIFT) | (row << ROW_SHIFT) | col;
        Ok(TileHash(hex::encode(packed.to_be_bytes())))
    }
}

fn check_index(axis: &'static str, value: i32) -> Result<(), HashError> {
    if value < MIN_TILE_INDEX || value > MAX_TILE_INDEX {
        return Err(HashError::CoordinateOutOfRange {
            axis,
            value: value as i64,
            min: MIN_TILE_INDEX as i64,
            max: MAX_TILE_INDEX as i64,
        });
    }
    Ok(())
}

// =============================================================================
// TileHash
// =============================================================================

/// Opaque, deterministic string key identifying a tile.
///
/// Produced by [`TileCoordinate::hash`] for locally generated coordinates, or
/// constructed from strings handed back by the remote service (batch results
/// may reference tiles the client never computed a coordinate for).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileHash(String);

impl TileHash {
    /// Wrap an externally supplied hash string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The hash as a plain string slice (map key, request argument).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TileHash {
    fn from(hash: &str) -> Self {
        Self(hash.to_string())
    }
}

impl From<String> for TileHash {
    fn from(hash: String) -> Self {
        Self(hash)
    }
}

// =============================================================================
// Tests
// =============================================================================
