//! Hilbert-curve keys for spatial range queries on ordered key-value stores.
//!
//! A [`SpatialCodec`] maps signed 2D integer points to 8-byte big-endian keys
//! along a Hilbert curve, so that points close together in the plane tend to
//! be close together in key order. Rectangles are decomposed into a handful of
//! [`ByteRange`]s; scanning each range and filtering the results with
//! [`SpatialCodec::decode_point`] and [`Rect::contains`] answers the query.
//!
//! ```
//! use spacekey::{DEFAULT_IOPS_COST, Rect, SpatialCodec};
//!
//! let codec = SpatialCodec::new(64)?;
//! let key = codec.encode_point(12, -3)?;
//!
//! let query = Rect::new(10, -5, 8, 8);
//! let ranges = codec.decompose_rect(query, DEFAULT_IOPS_COST)?;
//! assert!(ranges.iter().any(|r| r.contains(&key)));
//! assert!(query.contains(codec.decode_point(key.as_ref())?));
//! # Ok::<(), spacekey::Error>(())
//! ```

/// Point encoding and the codec configuration.
pub mod codec;
/// The 2D Hilbert curve.
pub mod curve;
/// Rectangle to key range decomposition.
pub mod decompose;
/// Error types used across the crate.
pub mod error;
/// Points and rectangles.
pub mod geometry;
/// Order-preserving keys and key ranges.
pub mod key;

pub use crate::{
    codec::{BitWidth, DEFAULT_IOPS_COST, SpatialCodec},
    curve::Hilbert,
    error::{Error, Result},
    geometry::{Point, Rect},
    key::{ByteRange, IndexedKey},
};
