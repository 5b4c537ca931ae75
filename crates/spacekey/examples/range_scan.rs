//! Store points in an ordered map keyed by Hilbert keys, then answer a
//! rectangle query with one range scan per decomposed range.

use std::{collections::BTreeMap, error::Error};

use spacekey::{DEFAULT_IOPS_COST, IndexedKey, Rect, SpatialCodec};

fn main() -> Result<(), Box<dyn Error>> {
    let codec = SpatialCodec::new(64)?;

    // An ordered store: key -> record name.
    let mut store: BTreeMap<IndexedKey, String> = BTreeMap::new();
    for x in (-40..40).step_by(7) {
        for y in (-40..40).step_by(5) {
            store.insert(codec.encode_point(x, y)?, format!("p({x},{y})"));
        }
    }

    let query = Rect::new(-12, -3, 25, 18);
    let ranges = codec.decompose_rect(query, DEFAULT_IOPS_COST)?;
    println!("{} ranges for {query:?}", ranges.len());

    let mut scanned = 0;
    let mut hits = Vec::new();
    for range in &ranges {
        println!("  scan {} ..= {}", range.start, range.end);
        for (key, name) in store.range(range.as_range()) {
            scanned += 1;
            if query.contains(codec.decode_key(key)?) {
                hits.push(name.as_str());
            }
        }
    }

    println!("scanned {scanned} records, {} inside the rectangle", hits.len());
    for name in &hits {
        println!("  {name}");
    }
    Ok(())
}
