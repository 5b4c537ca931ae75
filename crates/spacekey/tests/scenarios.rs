//! Scenario tests: named query rectangles checked cell by cell.
#[cfg(test)]
mod tests {
    use spacekey::{ByteRange, Rect, SpatialCodec, error};

    fn assert_covers(codec: &SpatialCodec, rect: Rect, ranges: &[ByteRange]) -> error::Result<()> {
        for p in rect.cells() {
            let key = codec.encode_point(p.x, p.y)?;
            assert!(
                ranges.iter().any(|r| r.contains(&key)),
                "{p:?} ({key}) is not covered by {ranges:?} for {rect:?}"
            );
        }
        Ok(())
    }

    macro_rules! coverage_tests {
        ($(($name:ident, $bits:expr, $x:expr, $y:expr, $w:expr, $h:expr, $cost:expr)),* $(,)?) => {
            $(
                paste::paste! {
                    #[test]
                    fn [<covers_ $name _ $bits>]() -> error::Result<()> {
                        let codec = SpatialCodec::new($bits)?;
                        let rect = Rect::new($x, $y, $w, $h);
                        let ranges = codec.decompose_rect(rect, $cost)?;
                        assert!(!ranges.is_empty());
                        assert_covers(&codec, rect, &ranges)
                    }
                }
            )*
        };
    }

    coverage_tests! {
        (unit_square, 64, 0, 0, 4, 4, 1.0),
        (unit_square, 32, 0, 0, 4, 4, 1.0),
        (single_cell, 64, 17, -9, 1, 1, 1.0),
        (centre, 64, -2, -2, 4, 4, 1.0),
        (centre, 32, -2, -2, 4, 4, 1.0),
        (centre_wide, 32, -150, -40, 300, 80, 1.0),
        (sliver, 64, -500, 3, 1000, 1, 0.5),
        (column, 32, 77, -900, 1, 1800, 2.0),
        (prime_sides, 64, 1_009, -2_003, 97, 89, 1.0),
        (negative_quadrant, 32, -1_000, -700, 255, 129, 0.25),
        (low_corner, 32, -16_384, -16_384, 200, 200, 1.0),
        (high_corner, 32, 16_184, 16_184, 200, 200, 1.0),
        (aggressive_merge, 64, 123_456, 654_321, 150, 150, 8.0),
        (fine_split, 64, -98_765, 4_321, 150, 150, 0.01),
    }

    #[test]
    fn aligned_block_is_a_single_range() -> error::Result<()> {
        let codec = SpatialCodec::new(64)?;
        let ranges = codec.decompose_rectangle(100, 100, 4, 4, 1.0)?;
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].span(), 16);
        Ok(())
    }

    #[test]
    fn centre_straddle_needs_more_ranges() -> error::Result<()> {
        let codec = SpatialCodec::new(64)?;
        let centre = codec.decompose_rectangle(-2, -2, 4, 4, 1.0)?;
        let away = codec.decompose_rectangle(100, 100, 4, 4, 1.0)?;
        // The upper two quadrants meet at the centre, the lower two do not.
        assert!(centre.len() >= 3, "got {centre:?}");
        assert!(centre.len() > away.len());
        Ok(())
    }

    #[test]
    fn false_positives_are_filtered_by_decode() -> error::Result<()> {
        let codec = SpatialCodec::new(32)?;
        let rect = Rect::new(-20, 30, 45, 17);
        let ranges = codec.decompose_rect(rect, 1.0)?;
        let mut hits = 0i64;
        for range in &ranges {
            for d in range.start.distance()..=range.end.distance() {
                let key = spacekey::IndexedKey::from(d);
                if codec.key_in_rect(key.as_ref(), &rect)? {
                    hits += 1;
                }
            }
        }
        assert_eq!(hits, rect.area());
        Ok(())
    }
}
