//! Encoding of signed 2D points into order-preserving curve keys.

use crate::{
    curve::Hilbert,
    decompose,
    error::{self, Error},
    geometry::{Point, Rect},
    key::{ByteRange, IndexedKey},
};

/// Cost parameter that balances wasted scan bandwidth against the number of
/// scans. Suits both SSDs and spinning disks.
pub const DEFAULT_IOPS_COST: f32 = 1.0;

/// Integer width a codec is sized for.
///
/// The curve length must fit in a signed integer of this width, so the grid
/// edge has `bits / 2 - 1` bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitWidth {
    /// 32-bit curve distances on a `2^15` grid.
    W32,
    /// 64-bit curve distances on a `2^31` grid.
    W64,
}

impl BitWidth {
    /// Widest codec the target's native integer supports.
    pub const fn native() -> Self {
        if usize::BITS >= 64 { Self::W64 } else { Self::W32 }
    }

    /// Number of bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Number of bits in the grid edge.
    pub const fn edge_size_bits(self) -> u32 {
        self.bits() / 2 - 1
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = Error;

    fn try_from(bits: u32) -> error::Result<Self> {
        match bits {
            32 => Ok(Self::W32),
            64 => Ok(Self::W64),
            _ => Err(Error::InvalidConfiguration(format!(
                "{bits} bit codec is not supported, use 32 or 64 bit"
            ))),
        }
    }
}

/// Maps signed points to 8-byte keys along a Hilbert curve, and rectangles to
/// the key ranges that cover them.
///
/// A codec is immutable. Build one per bit width and share it freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpatialCodec {
    /// Configured integer width.
    width: BitWidth,
    /// Full-resolution curve.
    curve: Hilbert,
}

impl SpatialCodec {
    /// Build a codec for a 32 or 64 bit key space.
    pub fn new(bits: u32) -> error::Result<Self> {
        if bits > usize::BITS {
            return Err(Error::InvalidConfiguration(format!(
                "can't create a {bits} bit codec on a {} bit target",
                usize::BITS
            )));
        }
        Self::with_width(BitWidth::try_from(bits)?)
    }

    /// Build a codec for the given width.
    pub fn with_width(width: BitWidth) -> error::Result<Self> {
        if width.bits() > usize::BITS {
            return Err(Error::InvalidConfiguration(format!(
                "can't create a {} bit codec on a {} bit target",
                width.bits(),
                usize::BITS
            )));
        }
        Ok(Self {
            width,
            curve: Hilbert::new(1 << width.edge_size_bits())?,
        })
    }

    /// Build the widest codec the target supports.
    pub fn native() -> error::Result<Self> {
        Self::with_width(BitWidth::native())
    }

    /// Configured integer width.
    pub const fn bit_width(&self) -> BitWidth {
        self.width
    }

    /// Number of bits in the grid edge.
    pub const fn edge_size_bits(&self) -> u32 {
        self.width.edge_size_bits()
    }

    /// The full-resolution curve.
    pub const fn curve(&self) -> &Hilbert {
        &self.curve
    }

    /// Smallest and largest coordinate accepted on either axis.
    ///
    /// 64-bit: `(-1073741823, 1073741823)`. 32-bit: `(-16383, 16383)`.
    pub const fn valid_input_range(&self) -> (i64, i64) {
        let half = 1i64 << (self.edge_size_bits() - 1);
        (-half + 1, half - 1)
    }

    /// Smallest and largest key the codec can produce.
    pub const fn output_range(&self) -> (IndexedKey, IndexedKey) {
        (
            IndexedKey::from_distance(0),
            IndexedKey::from_distance(self.curve.length()),
        )
    }

    /// Encode a point as a key.
    pub fn encode_point(&self, x: i64, y: i64) -> error::Result<IndexedKey> {
        let distance = self
            .curve
            .distance(to_grid(&self.curve, x)?, to_grid(&self.curve, y)?)?;
        Ok(IndexedKey::from_distance(distance))
    }

    /// Decode a point from the first 8 bytes of `bytes`.
    pub fn decode_point(&self, bytes: &[u8]) -> error::Result<Point> {
        self.decode_key(&IndexedKey::from_slice(bytes)?)
    }

    /// Decode the point a key was encoded from.
    pub fn decode_key(&self, key: &IndexedKey) -> error::Result<Point> {
        let (x, y) = self.curve.point(key.distance())?;
        Ok(Point::new(
            from_grid(&self.curve, x),
            from_grid(&self.curve, y),
        ))
    }

    /// Whether `key` decodes to a point inside `rect`. Use this to discard
    /// the false positives returned by scanning decomposed ranges.
    pub fn key_in_rect(&self, key: &[u8], rect: &Rect) -> error::Result<bool> {
        Ok(rect.contains(self.decode_point(key)?))
    }

    /// Key ranges whose union covers every point in the rectangle at
    /// `(x, y)` with the given extent.
    ///
    /// Larger `iops_cost` values merge more aggressively into fewer, wider
    /// ranges. The ranges also cover points outside the rectangle.
    pub fn decompose_rectangle(
        &self,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        iops_cost: f32,
    ) -> error::Result<Vec<ByteRange>> {
        decompose::decompose(self, Rect::new(x, y, width, height), iops_cost)
    }

    /// [`Self::decompose_rectangle`] for a [`Rect`].
    pub fn decompose_rect(&self, rect: Rect, iops_cost: f32) -> error::Result<Vec<ByteRange>> {
        decompose::decompose(self, rect, iops_cost)
    }
}

/// Shift a signed coordinate onto the curve's unsigned grid, centring zero.
pub fn to_grid(curve: &Hilbert, value: i64) -> error::Result<u64> {
    let half = (curve.edge_length() >> 1) as i64;
    value
        .checked_add(half)
        .and_then(|v| u64::try_from(v).ok())
        .filter(|&v| v < curve.edge_length())
        .ok_or_else(|| {
            Error::OutOfRange(format!(
                "coordinate {value} is outside [{}, {})",
                -half,
                half
            ))
        })
}

/// Inverse of [`to_grid`].
pub const fn from_grid(curve: &Hilbert, value: u64) -> i64 {
    value as i64 - (curve.edge_length() >> 1) as i64
}
