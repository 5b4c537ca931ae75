//! Fixed-width, order-preserving keys and inclusive key ranges.
//!
//! Keys are curve distances written as 8 big-endian bytes, so comparing keys
//! byte by byte gives the same order as comparing the distances. Ordered
//! stores can therefore scan a [`ByteRange`] directly.

use std::{fmt, ops::RangeInclusive};

use crate::error::{self, Error};

/// Width in bytes of every encoded key.
pub const KEY_LEN: usize = 8;

/// A curve distance encoded as 8 big-endian bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IndexedKey([u8; KEY_LEN]);

impl IndexedKey {
    /// Encode a curve distance.
    pub const fn from_distance(distance: u64) -> Self {
        Self(distance.to_be_bytes())
    }

    /// Decode the curve distance held by this key.
    pub const fn distance(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    /// Read a key from the first 8 bytes of `bytes`. Trailing bytes are
    /// ignored.
    pub fn from_slice(bytes: &[u8]) -> error::Result<Self> {
        bytes
            .get(..KEY_LEN)
            .and_then(|head| <[u8; KEY_LEN]>::try_from(head).ok())
            .map(Self)
            .ok_or_else(|| {
                Error::Format(format!(
                    "key requires at least {KEY_LEN} bytes, got {}",
                    bytes.len()
                ))
            })
    }

    /// The raw key bytes.
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Consume the key, returning its bytes.
    pub const fn to_bytes(self) -> [u8; KEY_LEN] {
        self.0
    }
}

impl AsRef<[u8]> for IndexedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; KEY_LEN]> for IndexedKey {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<IndexedKey> for [u8; KEY_LEN] {
    fn from(key: IndexedKey) -> Self {
        key.0
    }
}

impl From<u64> for IndexedKey {
    fn from(distance: u64) -> Self {
        Self::from_distance(distance)
    }
}

impl From<IndexedKey> for u64 {
    fn from(key: IndexedKey) -> Self {
        key.distance()
    }
}

impl TryFrom<&[u8]> for IndexedKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> error::Result<Self> {
        Self::from_slice(bytes)
    }
}

/// Lowercase hex, two digits per byte.
impl fmt::Display for IndexedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// An inclusive range of keys, scanned as one operation against a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// First key in the range.
    pub start: IndexedKey,
    /// Last key in the range (inclusive).
    pub end: IndexedKey,
}

impl ByteRange {
    /// Create a range. `start` must not be greater than `end`.
    pub fn new(start: IndexedKey, end: IndexedKey) -> Self {
        debug_assert!(start <= end, "range start {start} is past end {end}");
        Self { start, end }
    }

    /// Whether `key` falls within the range.
    pub fn contains(&self, key: &IndexedKey) -> bool {
        self.start <= *key && *key <= self.end
    }

    /// Number of curve distances spanned by the range.
    pub const fn span(&self) -> u64 {
        self.end.distance() - self.start.distance() + 1
    }

    /// The range as bounds usable with `BTreeMap::range` and friends.
    pub const fn as_range(&self) -> RangeInclusive<IndexedKey> {
        RangeInclusive::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_layout() {
        let key = IndexedKey::from_distance(0x0102_0304_0506_0708);
        assert_eq!(key.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(key.distance(), 0x0102_0304_0506_0708);
        assert_eq!(key.to_string(), "0102030405060708");
    }

    #[test]
    fn small_distances_leave_high_bytes_zero() {
        let key = IndexedKey::from(0x2000_0000u64);
        assert_eq!(key.to_bytes(), [0, 0, 0, 0, 0x20, 0, 0, 0]);
    }

    #[test]
    fn byte_order_matches_numeric_order() {
        let values = [0u64, 1, 255, 256, 65_535, 1 << 32, (1 << 62) - 1, u64::MAX];
        for pair in values.windows(2) {
            let (a, b) = (IndexedKey::from(pair[0]), IndexedKey::from(pair[1]));
            assert!(a < b);
            assert!(a.as_ref() < b.as_ref());
        }
    }

    #[test]
    fn from_slice() -> error::Result<()> {
        let key = IndexedKey::from_slice(&[0, 0, 0, 0, 0, 0, 1, 0, 0xff])?;
        assert_eq!(key.distance(), 256);
        assert!(matches!(
            IndexedKey::from_slice(&[0; 7]),
            Err(Error::Format(_))
        ));
        assert!(IndexedKey::try_from(&[][..]).is_err());
        Ok(())
    }

    #[test]
    fn range_contains() {
        let range = ByteRange::new(IndexedKey::from(10u64), IndexedKey::from(20u64));
        assert!(range.contains(&IndexedKey::from(10u64)));
        assert!(range.contains(&IndexedKey::from(20u64)));
        assert!(!range.contains(&IndexedKey::from(9u64)));
        assert!(!range.contains(&IndexedKey::from(21u64)));
        assert_eq!(range.span(), 11);
        assert!(range.as_range().contains(&IndexedKey::from(15u64)));
    }
}
