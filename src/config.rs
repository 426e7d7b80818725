//! Configuration for the tiles service.
//!
//! The crate is an internal library boundary with no CLI or environment
//! surface of its own; the embedding application owns those. Configuration
//! is therefore a plain struct with sensible defaults, validated at
//! construction time.

// =============================================================================
// Default Values
// =============================================================================

/// Default capacity of the snapshot broadcast channel.
///
/// Snapshots are cumulative, so a subscriber that lags past this many
/// unconsumed snapshots only loses intermediate states it could reconstruct
/// from the newest one.
pub const DEFAULT_SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// Service Configuration
// =============================================================================

/// Configuration for a [`TilesService`](crate::tile::TilesService).
#[derive(Debug, Clone)]
pub struct TilesServiceConfig {
    /// Capacity of the snapshot broadcast channel.
    ///
    /// Bounds how far a slow subscriber may fall behind before it observes
    /// a lag error and skips to newer snapshots.
    pub snapshot_channel_capacity: usize,
}

impl TilesServiceConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.snapshot_channel_capacity == 0 {
            return Err("snapshot_channel_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for TilesServiceConfig {
    fn default() -> Self {
        Self {
            snapshot_channel_capacity: DEFAULT_SNAPSHOT_CHANNEL_CAPACITY,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
