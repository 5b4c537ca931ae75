//! Signed points and axis-aligned rectangles in the codec's input domain.

/// A 2D point with signed integer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i64,
    /// Vertical coordinate.
    pub y: i64,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i64, i64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// An axis-aligned rectangle covering the cells `x..x + width` by
/// `y..y + height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i64,
    /// Bottom edge (inclusive).
    pub y: i64,
    /// Number of columns.
    pub width: i64,
    /// Number of rows.
    pub height: i64,
}

impl Rect {
    /// Create a rectangle from its origin and extent.
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of cells covered, saturating at `i64::MAX`.
    pub const fn area(&self) -> i64 {
        self.width.saturating_mul(self.height)
    }

    /// Whether the cell at `p` lies inside the rectangle.
    ///
    /// This is the exact test callers apply to scan results to discard the
    /// false positives a range decomposition lets through.
    pub fn contains(&self, p: Point) -> bool {
        let dx = i128::from(p.x) - i128::from(self.x);
        let dy = i128::from(p.y) - i128::from(self.y);
        (0..i128::from(self.width)).contains(&dx) && (0..i128::from(self.height)).contains(&dy)
    }

    /// Iterate over every cell of the rectangle, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Point> + use<> {
        let Self {
            x,
            y,
            width,
            height,
        } = *self;
        (0..height.max(0)).flat_map(move |j| (0..width.max(0)).map(move |i| Point::new(x + i, y + j)))
    }
}
