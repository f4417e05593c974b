//! Ear-clipping triangulation of flattened rings.
//!
//! Rings may carry holes; those are bridged into the outer ring before
//! clipping so a single index list covers the whole group. Indices refer to
//! the outer ring's points followed by each hole's points, in order.

use vellum_core::constants::MAX_INDEXABLE_VERTICES;

use crate::model::{ring_contains, signed_area2, Point, Ring};

/// Triangle indices for one ring group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triangulation {
    /// Triangle list, three indices per triangle, no padding
    pub indices: Vec<u16>,
    /// `false` when clipping got stuck and the list covers only part of the ring
    pub complete: bool,
}

impl Triangulation {
    fn empty() -> Self {
        Self {
            indices: Vec::new(),
            complete: true,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// An outer ring and the holes cut out of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingGroup {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl RingGroup {
    pub fn new(outer: Ring) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Outer points followed by every hole's points.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.outer
            .iter()
            .chain(self.holes.iter().flatten())
            .copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }
}

/// Triangulates a simple ring of either winding.
pub fn triangulate(ring: &[Point]) -> Triangulation {
    triangulate_with_holes(ring, &[])
}

/// Triangulates `outer` with `holes` removed.
pub fn triangulate_with_holes(outer: &[Point], holes: &[Ring]) -> Triangulation {
    let outer = strip_closing_duplicate(outer);
    if outer.len() < 3 {
        return Triangulation::empty();
    }

    let mut points: Vec<Point> = outer.to_vec();
    let mut ring: Vec<usize> = (0..outer.len()).collect();
    if signed_area2(outer) < 0.0 {
        ring.reverse();
    }

    let mut hole_rings: Vec<Vec<usize>> = Vec::with_capacity(holes.len());
    for hole in holes {
        // Hole offsets are reserved even for skipped holes so indices keep
        // matching the group's vertex order.
        let base = points.len();
        points.extend_from_slice(hole);
        let hole = strip_closing_duplicate(hole);
        if hole.len() < 3 || signed_area2(hole) == 0.0 {
            continue;
        }
        let mut indices: Vec<usize> = (base..base + hole.len()).collect();
        if signed_area2(hole) > 0.0 {
            indices.reverse();
        }
        hole_rings.push(indices);
    }

    if points.len() > MAX_INDEXABLE_VERTICES {
        tracing::warn!(
            vertices = points.len(),
            "Ring group exceeds the 16-bit index range; skipping"
        );
        return Triangulation {
            indices: Vec::new(),
            complete: false,
        };
    }

    if !hole_rings.is_empty() {
        ring = bridge_holes(&points, ring, hole_rings);
    }

    let (indices, complete) = ear_clip(&points, ring);
    if !complete {
        tracing::warn!(
            vertices = points.len(),
            triangles = indices.len() / 3,
            "Ear clipping stopped early; mesh is partial"
        );
    }
    Triangulation { indices, complete }
}

/// Pads `indices` with zeros up to a multiple of `stride`.
pub fn pad_indices(mut indices: Vec<u16>, stride: usize) -> Vec<u16> {
    if stride > 1 {
        let rem = indices.len() % stride;
        if rem != 0 {
            indices.resize(indices.len() + stride - rem, 0);
        }
    }
    indices
}

/// Thins a ring to at most `max_vertices` points by taking every n-th point.
pub fn decimate(ring: &[Point], max_vertices: usize) -> Ring {
    let max_vertices = max_vertices.max(3);
    if ring.len() <= max_vertices {
        return ring.to_vec();
    }
    let stride = ring.len().div_ceil(max_vertices);
    tracing::warn!(
        vertices = ring.len(),
        max_vertices,
        stride,
        "Ring too long for ear clipping; decimating"
    );
    ring.iter().step_by(stride).copied().collect()
}

/// Drops a trailing point equal to the first.
pub fn strip_closing_duplicate(ring: &[Point]) -> &[Point] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Assigns hole rings to the smallest outer ring containing them.
///
/// The winding of the largest ring is taken as the outer winding. Rings of
/// the opposite winding that sit inside an outer ring become its holes; all
/// others, including degenerate rings, stay outers in their original order.
pub fn group_rings(rings: Vec<Ring>) -> Vec<RingGroup> {
    let areas: Vec<f64> = rings
        .iter()
        .map(|r| signed_area2(strip_closing_duplicate(r)))
        .collect();

    let dominant = areas
        .iter()
        .copied()
        .fold(0.0_f64, |best, a| if a.abs() > best.abs() { a } else { best });
    if dominant == 0.0 {
        return rings.into_iter().map(RingGroup::new).collect();
    }

    let mut parent: Vec<Option<usize>> = vec![None; rings.len()];
    for (i, ring) in rings.iter().enumerate() {
        if areas[i] == 0.0 || areas[i].signum() == dominant.signum() {
            continue;
        }
        let mut best: Option<usize> = None;
        for (j, outer) in rings.iter().enumerate() {
            if i == j || areas[j].signum() != dominant.signum() {
                continue;
            }
            if !mostly_inside(ring, outer) {
                continue;
            }
            if best.is_none_or(|b| areas[j].abs() < areas[b].abs()) {
                best = Some(j);
            }
        }
        parent[i] = best;
    }

    let mut slot: Vec<Option<usize>> = vec![None; rings.len()];
    let mut groups: Vec<RingGroup> = Vec::new();
    for (i, ring) in rings.iter().enumerate() {
        if parent[i].is_none() {
            slot[i] = Some(groups.len());
            groups.push(RingGroup::new(ring.clone()));
        }
    }
    for (i, ring) in rings.into_iter().enumerate() {
        if let Some(g) = parent[i].and_then(|p| slot[p]) {
            groups[g].holes.push(ring);
        }
    }
    groups
}

fn mostly_inside(inner: &[Point], outer: &[Point]) -> bool {
    let inside = inner.iter().filter(|p| ring_contains(outer, **p)).count();
    !inner.is_empty() && inside * 2 >= inner.len()
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d0 = cross(a, b, p);
    let d1 = cross(b, c, p);
    let d2 = cross(c, a, p);
    (d0 >= 0.0 && d1 >= 0.0 && d2 >= 0.0) || (d0 <= 0.0 && d1 <= 0.0 && d2 <= 0.0)
}

/// Clips ears off a counter-clockwise index ring.
fn ear_clip(points: &[Point], mut ring: Vec<usize>) -> (Vec<u16>, bool) {
    let mut indices: Vec<u16> = Vec::with_capacity(ring.len().saturating_sub(2) * 3);
    // Threshold follows the ring's extent, not its distance from the origin.
    let (min, max) = ring.iter().fold(
        (
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        ),
        |(min, max), &i| {
            let p = points[i];
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        },
    );
    let extent = (max.x - min.x).max(max.y - min.y);
    let eps = if extent.is_finite() {
        (extent * extent * 1e-12).max(f64::MIN_POSITIVE)
    } else {
        f64::MIN_POSITIVE
    };
    let mut cursor = 0;

    while ring.len() > 3 {
        let n = ring.len();
        let mut clipped = false;

        for step in 0..n {
            let i = (cursor + step) % n;
            let prev = ring[(i + n - 1) % n];
            let curr = ring[i];
            let next = ring[(i + 1) % n];
            let (a, b, c) = (points[prev], points[curr], points[next]);

            if cross(a, b, c) <= eps {
                continue;
            }

            let blocked = ring.iter().any(|&j| {
                if j == prev || j == curr || j == next {
                    return false;
                }
                let p = points[j];
                // Bridge seams duplicate vertices; those never block an ear.
                if p == a || p == b || p == c {
                    return false;
                }
                point_in_triangle(p, a, b, c)
            });
            if blocked {
                continue;
            }

            indices.extend_from_slice(&[prev as u16, curr as u16, next as u16]);
            ring.remove(i);
            cursor = i % ring.len();
            clipped = true;
            break;
        }

        if clipped {
            continue;
        }

        // No ear: drop a zero-area vertex if there is one.
        let degenerate = (0..n).find(|&i| {
            let a = points[ring[(i + n - 1) % n]];
            let b = points[ring[i]];
            let c = points[ring[(i + 1) % n]];
            cross(a, b, c).abs() <= eps
        });
        match degenerate {
            Some(i) => {
                tracing::trace!(vertex = ring[i], "Dropping degenerate vertex");
                ring.remove(i);
                cursor = i % ring.len();
            }
            None => return (indices, false),
        }
    }

    if ring.len() == 3 && cross(points[ring[0]], points[ring[1]], points[ring[2]]).abs() > eps {
        indices.extend(ring.iter().map(|&i| i as u16));
    }
    (indices, true)
}

/// Splices each hole into the outer ring through a two-way bridge edge.
///
/// Holes are merged rightmost first. Each bridge runs from the hole's
/// rightmost vertex to the closest ring vertex that it can see.
fn bridge_holes(points: &[Point], mut ring: Vec<usize>, mut holes: Vec<Vec<usize>>) -> Vec<usize> {
    let rightmost = |hole: &[usize]| -> usize {
        let mut best = 0;
        for (k, &i) in hole.iter().enumerate() {
            if points[i].x > points[hole[best]].x {
                best = k;
            }
        }
        best
    };
    holes.sort_by(|a, b| {
        let xa = points[a[rightmost(a)]].x;
        let xb = points[b[rightmost(b)]].x;
        xb.total_cmp(&xa)
    });

    for h in 0..holes.len() {
        let hole = &holes[h];
        let start = rightmost(hole);
        let anchor = points[hole[start]];

        let pending: Vec<&[usize]> = holes[h..].iter().map(Vec::as_slice).collect();
        let mut best: Option<(usize, f64)> = None;
        for (k, &v) in ring.iter().enumerate() {
            let d = anchor.distance_to(&points[v]);
            if best.is_some_and(|(_, bd)| d >= bd) {
                continue;
            }
            let visible = !crosses_any(points, anchor, points[v], &ring)
                && pending
                    .iter()
                    .all(|other| !crosses_any(points, anchor, points[v], other));
            if visible {
                best = Some((k, d));
            }
        }

        let at = match best {
            Some((k, _)) => k,
            None => {
                tracing::warn!("No visible bridge for hole; using nearest vertex");
                ring.iter()
                    .enumerate()
                    .min_by(|(_, &a), (_, &b)| {
                        anchor
                            .distance_to(&points[a])
                            .total_cmp(&anchor.distance_to(&points[b]))
                    })
                    .map(|(k, _)| k)
                    .unwrap_or(0)
            }
        };

        let mut splice: Vec<usize> = Vec::with_capacity(hole.len() + 2);
        splice.extend(hole[start..].iter().chain(hole[..start].iter()).copied());
        splice.push(hole[start]);
        splice.push(ring[at]);
        let tail = ring.split_off(at + 1);
        ring.extend(splice);
        ring.extend(tail);
    }
    ring
}

/// Whether segment `a`-`b` properly crosses any edge of `ring`.
fn crosses_any(points: &[Point], a: Point, b: Point, ring: &[usize]) -> bool {
    let n = ring.len();
    (0..n).any(|k| {
        let c = points[ring[k]];
        let d = points[ring[(k + 1) % n]];
        if c == a || c == b || d == a || d == b {
            return false;
        }
        segments_cross(a, b, c, d)
    })
}

fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}
