//! Decomposition of query rectangles into covering key ranges.
//!
//! Large rectangles are first shrunk onto a coarser curve until sampling
//! every cell is cheap. The sampled distances are sorted, merged into runs
//! wherever neighbouring samples are close, and the runs are scaled back up to
//! full resolution. The ranges cover the whole rectangle, plus some cells
//! outside it.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    codec::{SpatialCodec, to_grid},
    curve::Hilbert,
    error::{self, Error},
    geometry::Rect,
    key::{ByteRange, IndexedKey},
};

/// Largest number of cells sampled before the rectangle is downsampled.
pub const SAMPLE_BUDGET: i64 = 128;

/// Smallest curve order worth sampling.
const MIN_SAMPLE_ORDER: u32 = 3;

/// Halve a coordinate, pushing the remainder back in so the reduced
/// rectangle does not lose its leading edge.
pub const fn halve_position(value: i64) -> i64 {
    let half = value / 2;
    if half != 0 { half + value % half } else { 0 }
}

/// Halve an extent, pushing the remainder back in. Never returns less than 1.
pub const fn halve_extent(value: i64) -> i64 {
    let half = value / 2;
    if half != 0 { half + value % half } else { 1 }
}

/// Shrink `rect` until it holds at most [`SAMPLE_BUDGET`] cells, returning the
/// reduced rectangle and the number of halvings applied.
pub fn downsample(rect: Rect) -> (Rect, u32) {
    let mut reduced = rect;
    let mut bits = 0;
    while reduced.area() > SAMPLE_BUDGET {
        reduced = Rect::new(
            halve_position(reduced.x),
            halve_position(reduced.y),
            halve_extent(reduced.width),
            halve_extent(reduced.height),
        );
        bits += 1;
    }
    (reduced, bits)
}

/// Pad a downsampled rectangle so halving losses along its edges are
/// recovered, then clip it to the reduced grid.
///
/// `original` is the full-resolution query; its exact footprint on the
/// reduced grid is always included.
fn correct_edges(reduced: Rect, original: Rect, reduced_bits: u32, curve: &Hilbert) -> Rect {
    let half = (curve.edge_length() >> 1) as i64;
    let Rect {
        mut x,
        mut y,
        mut width,
        mut height,
    } = reduced;

    if x > -half {
        x -= 1;
    }
    if y > -half {
        y -= 1;
    }
    for _ in 0..2 {
        if x + width < half {
            width += 1;
        }
        if y + height < half {
            height += 1;
        }
    }

    let (x0, x1) = footprint(original.x, original.width, reduced_bits);
    let (y0, y1) = footprint(original.y, original.height, reduced_bits);
    let left = x.min(x0).clamp(-half, half - 1);
    let bottom = y.min(y0).clamp(-half, half - 1);
    let right = (x + width).max(x1).clamp(left + 1, half);
    let top = (y + height).max(y1).clamp(bottom + 1, half);
    Rect::new(left, bottom, right - left, top - bottom)
}

/// Half-open span of reduced cells touched by `start..start + len`.
const fn footprint(start: i64, len: i64, reduced_bits: u32) -> (i64, i64) {
    (start >> reduced_bits, ((start + len - 1) >> reduced_bits) + 1)
}

/// Check the query arguments before any work is done.
fn validate(rect: &Rect, iops_cost: f32) -> error::Result<()> {
    if rect.width <= 0 || rect.height <= 0 {
        return Err(Error::InvalidQuery(format!(
            "rectangle extent must be positive, got {} by {}",
            rect.width, rect.height
        )));
    }
    if !iops_cost.is_finite() || iops_cost <= 0.0 {
        return Err(Error::InvalidQuery(format!(
            "iops cost must be a positive number, got {iops_cost}"
        )));
    }
    Ok(())
}

/// Check that every cell of `rect` can be encoded by `curve`.
fn check_bounds(rect: &Rect, curve: &Hilbert) -> error::Result<()> {
    let half = (curve.edge_length() >> 1) as i64;
    let inside = |start: i64, len: i64| {
        start >= -half && start.checked_add(len).is_some_and(|end| end <= half)
    };
    if inside(rect.x, rect.width) && inside(rect.y, rect.height) {
        Ok(())
    } else {
        Err(Error::OutOfRange(format!(
            "rectangle {rect:?} extends outside [{}, {})",
            -half, half
        )))
    }
}

/// Curve distance of every cell in `rect`, unsorted, duplicates kept.
fn sample(curve: &Hilbert, rect: &Rect) -> error::Result<SmallVec<[u64; SAMPLE_BUDGET as usize]>> {
    let mut samples = SmallVec::with_capacity(rect.area() as usize);
    for i in 0..rect.width {
        let x = to_grid(curve, rect.x + i)?;
        for j in 0..rect.height {
            samples.push(curve.distance(x, to_grid(curve, rect.y + j)?)?);
        }
    }
    Ok(samples)
}

/// Greedily merge sorted distances into inclusive runs, splitting wherever two
/// neighbours are more than `max_gap` apart.
pub fn merge(sorted: &[u64], max_gap: f32) -> Vec<(u64, u64)> {
    let mut runs = Vec::new();
    let Some((&first, rest)) = sorted.split_first() else {
        return runs;
    };
    let (mut start, mut prev) = (first, first);
    for &next in rest {
        if (next - prev) as f32 > max_gap {
            runs.push((start, prev));
            start = next;
        }
        prev = next;
    }
    runs.push((start, prev));
    runs
}

/// Scale a run on the reduced curve back to full resolution. The end is
/// widened to the last full-resolution cell inside the final coarse cell.
const fn rescale((start, end): (u64, u64), reduced_bits: u32) -> ByteRange {
    let shift = reduced_bits * 2;
    let fill = (1u64 << shift) - 1;
    ByteRange {
        start: IndexedKey::from_distance(start << shift),
        end: IndexedKey::from_distance((end << shift) | fill),
    }
}

/// Key ranges covering every point of `rect` on `codec`'s curve.
///
/// `iops_cost` scales the largest gap bridged within one range: larger values
/// give fewer, wider ranges.
pub fn decompose(
    codec: &SpatialCodec,
    rect: Rect,
    iops_cost: f32,
) -> error::Result<Vec<ByteRange>> {
    validate(&rect, iops_cost)?;

    let (reduced, reduced_bits) = downsample(rect);
    let order = codec.edge_size_bits();
    if order < reduced_bits + MIN_SAMPLE_ORDER {
        return Err(Error::QueryTooLarge {
            width: reduced.width,
            height: reduced.height,
        });
    }
    check_bounds(&rect, codec.curve())?;

    let curve = Hilbert::new(1 << (order - reduced_bits))?;
    let sampled = if reduced_bits > 0 {
        correct_edges(reduced, rect, reduced_bits, &curve)
    } else {
        reduced
    };
    trace!(?rect, ?sampled, reduced_bits, "sampling reduced rectangle");

    let mut samples = sample(&curve, &sampled)?;
    samples.sort_unstable();

    let max_gap = sampled.area() as f32 * iops_cost;
    let ranges: Vec<_> = merge(&samples, max_gap)
        .into_iter()
        .map(|run| rescale(run, reduced_bits))
        .collect();

    debug!(
        reduced_bits,
        samples = samples.len(),
        ranges = ranges.len(),
        "decomposed rectangle"
    );
    Ok(ranges)
}
