//! Boolean operations on flattened contours.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;

use crate::model::{signed_area2, Point, Ring};
use crate::triangulate::strip_closing_duplicate;

/// Unions `rings` into simple, non-overlapping rings.
///
/// Output rings come polygon by polygon: each exterior (counter-clockwise)
/// followed by its holes (clockwise). Closing duplicates are removed and
/// input rings with fewer than three points are ignored.
pub fn union_contours(rings: &[Ring]) -> Vec<Ring> {
    let mut sketch: Sketch<()> = Sketch::new();
    let mut used = 0usize;
    for ring in rings {
        let ring = strip_closing_duplicate(ring);
        if ring.len() < 3 {
            continue;
        }
        let pts: Vec<[f64; 2]> = ring.iter().map(|p| [p.x, p.y]).collect();
        sketch = sketch.union(&Sketch::polygon(&pts, None));
        used += 1;
    }

    let mut out: Vec<Ring> = Vec::new();
    if used == 0 {
        return out;
    }

    let mp = sketch.to_multipolygon();
    for poly in mp.0 {
        let exterior = oriented(
            poly.exterior().0.iter().map(|c| Point::new(c.x, c.y)).collect(),
            true,
        );
        if exterior.len() < 3 {
            continue;
        }
        out.push(exterior);

        for interior in poly.interiors() {
            let hole = oriented(
                interior.0.iter().map(|c| Point::new(c.x, c.y)).collect(),
                false,
            );
            if hole.len() >= 3 {
                out.push(hole);
            }
        }
    }

    tracing::trace!(input = rings.len(), output = out.len(), "Unioned contours");
    out
}

fn oriented(mut ring: Ring, ccw: bool) -> Ring {
    let len = strip_closing_duplicate(&ring).len();
    ring.truncate(len);
    let area = signed_area2(&ring);
    if (ccw && area < 0.0) || (!ccw && area > 0.0) {
        ring.reverse();
    }
    ring
}
