//! Error types shared by the curve, codec and decomposer.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by curve construction, key encoding and range decomposition.
///
/// Every error is a deterministic function of the inputs; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The curve or codec cannot be built with the requested parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A coordinate, distance or rectangle lies outside its valid domain.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// A key could not be decoded.
    #[error("format error: {0}")]
    Format(String),

    /// The rectangle cannot be downsampled to a size the sampler can handle.
    ///
    /// Split the rectangle into smaller pieces and decompose each separately.
    #[error("{width} by {height} rectangle is too large to downsample")]
    QueryTooLarge {
        /// Width of the rectangle after downsampling.
        width: i64,
        /// Height of the rectangle after downsampling.
        height: i64,
    },

    /// The query arguments are unusable (non-positive extent or cost).
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
