//! Wire types for the navigation API.
//!
//! The remote service answers both fetch operations with the same batched
//! response shape. Field names on the wire are the service's short keys
//! (`hs`, `ims`, `ss`); the Rust names spell out what they hold.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::TileHash;

// =============================================================================
// ImageKey
// =============================================================================

/// Opaque identifier for a single capture point in the navigation graph.
///
/// Supplied by the caller; a distinct namespace from [`TileHash`]. The two
/// are never compared or coalesced against each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageKey(String);

impl ImageKey {
    /// Wrap a capture-point key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a plain string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ImageKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

// =============================================================================
// Batch Result
// =============================================================================

/// A capture point whose locating tile became resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAssociation {
    /// The capture-point key
    pub key: ImageKey,

    /// The tile that locates this capture point, when the service reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<TileHash>,
}

impl ImageAssociation {
    /// Association without a reported locating tile.
    pub fn new(key: impl Into<ImageKey>) -> Self {
        Self {
            key: key.into(),
            tile: None,
        }
    }

    /// Association carrying the locating tile hash.
    pub fn with_tile(key: impl Into<ImageKey>, tile: impl Into<TileHash>) -> Self {
        Self {
            key: key.into(),
            tile: Some(tile.into()),
        }
    }
}

/// Response of a fetch operation.
///
/// A single fetch by image key or by tile hash can populate many cache
/// entries beyond the one requested: the service batches neighboring tiles
/// into one response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBatchResult {
    /// Tile hashes now known as a result of this fetch
    #[serde(rename = "hs")]
    pub hashes: Vec<TileHash>,

    /// Capture points whose locating tile is now resolvable
    #[serde(rename = "ims")]
    pub image_associations: Vec<ImageAssociation>,

    /// Auxiliary spatial identifiers, cached under the same rules as `hs`
    #[serde(rename = "ss")]
    pub spatial_extras: Vec<TileHash>,
}

// =============================================================================
// Tests
// =============================================================================
