//! The 2D Hilbert curve over a square grid with a power-of-two edge.
//!
//! Distances run over `[0, edge_length²)` and coordinates over
//! `[0, edge_length)` on both axes. Mapping is pure arithmetic; a [`Hilbert`]
//! value only records the grid size.

use crate::error::{self, Error};

/// Reflect and transpose the coordinates of a quadrant of side `size` so the
/// sub-curve inside it has the orientation of its parent.
///
/// Both coordinates must be smaller than `size`. Quadrants with `ry` set keep
/// their orientation.
#[inline]
pub const fn rotate(size: u64, x: u64, y: u64, rx: bool, ry: bool) -> (u64, u64) {
    if ry {
        return (x, y);
    }
    if rx {
        (size - 1 - y, size - 1 - x)
    } else {
        (y, x)
    }
}

/// A 2D Hilbert curve filling an `edge_length` by `edge_length` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hilbert {
    /// Side of the grid. Always a power of two.
    edge_length: u64,
}

impl Hilbert {
    /// Construct a curve for a grid with the given side.
    ///
    /// The side must be a positive power of two, and the curve length
    /// (`edge_length²`) must fit in a `u64`.
    pub fn new(edge_length: u64) -> error::Result<Self> {
        if edge_length == 0 {
            return Err(Error::InvalidConfiguration(
                "edge length must be greater than zero".into(),
            ));
        }
        if edge_length & (edge_length - 1) != 0 {
            return Err(Error::InvalidConfiguration(format!(
                "edge length {edge_length} is not a power of two"
            )));
        }
        if edge_length.checked_mul(edge_length).is_none() {
            return Err(Error::InvalidConfiguration(format!(
                "edge length {edge_length} gives a curve longer than u64::MAX"
            )));
        }
        Ok(Self { edge_length })
    }

    /// Side of the grid.
    pub const fn edge_length(&self) -> u64 {
        self.edge_length
    }

    /// Width and height of the grid.
    pub const fn dimensions(&self) -> (u64, u64) {
        (self.edge_length, self.edge_length)
    }

    /// Number of cells on the curve (`edge_length²`).
    pub const fn length(&self) -> u64 {
        self.edge_length * self.edge_length
    }

    /// Curve order, i.e. `log2(edge_length)`.
    pub const fn order(&self) -> u32 {
        self.edge_length.trailing_zeros()
    }

    /// Distance along the curve of the cell at `(x, y)`.
    pub fn distance(&self, x: u64, y: u64) -> error::Result<u64> {
        let n = self.edge_length;
        if x >= n || y >= n {
            return Err(Error::OutOfRange(format!(
                "point ({x}, {y}) is outside the {n}x{n} grid"
            )));
        }

        let (mut x, mut y) = (x, y);
        let mut distance = 0;
        let mut scale = n / 2;
        while scale > 0 {
            let rx = x & scale != 0;
            let ry = y & scale != 0;
            let quadrant = (if rx { 3 } else { 0 }) ^ u64::from(ry);
            distance += scale * scale * quadrant;
            // Only the bits below `scale` matter from here on.
            (x, y) = rotate(scale, x & (scale - 1), y & (scale - 1), rx, ry);
            scale /= 2;
        }
        Ok(distance)
    }

    /// Cell at distance `t` along the curve.
    pub fn point(&self, t: u64) -> error::Result<(u64, u64)> {
        let length = self.length();
        if t >= length {
            return Err(Error::OutOfRange(format!(
                "distance {t} is outside the curve length {length}"
            )));
        }

        let (mut x, mut y) = (0, 0);
        let mut t = t;
        let mut scale = 1;
        while scale < self.edge_length {
            let rx = t & 2 != 0;
            let ry = (t & 1 != 0) ^ rx;
            (x, y) = rotate(scale, x, y, rx, ry);
            if rx {
                x += scale;
            }
            if ry {
                y += scale;
            }
            t >>= 2;
            scale *= 2;
        }
        Ok((x, y))
    }
}
