use thiserror::Error;

/// Errors returned by the navigation API when a fetch fails.
///
/// A fetch failure is recovered locally by the tile service: the pending
/// entry is cleared, the cache is left untouched, and no snapshot is
/// published. The next request for the same key retries from scratch.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Network or connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// The remote service rejected the request
    #[error("Service error (status {status}): {message}")]
    Service { status: u16, message: String },

    /// The requested key is unknown to the remote service
    #[error("Key not found: {0}")]
    NotFound(String),
}

/// Errors from the tile hashing scheme.
///
/// These indicate a coordinate outside the representable domain of the
/// encoding. Internally generated coordinates never trigger them; a caller
/// hitting this class has a programming error, not a recoverable runtime
/// condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// Coordinate component outside the encodable range
    #[error("Coordinate out of range: {axis} = {value}, representable range is {min}..={max}")]
    CoordinateOutOfRange {
        axis: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}
