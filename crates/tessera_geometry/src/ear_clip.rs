//! Ear-clipping triangulation of simple polygons, with holes stitched in
//! through zero-area bridge seams.
//!
//! The ear search is a plain O(n³) scan. Glyph contours rarely exceed a
//! hundred points and the first-ear-wins order keeps output deterministic.

use glam::Vec2;

use crate::error::TriangulateError;
use crate::ring::{at, is_clockwise, point_in_ring, remove_collinear};

/// Orientation the caller declares for the outer ring. Emitted triangles
/// carry the same orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    pub fn of(vertices: &[Vec2], ring: &[u32]) -> Self {
        if is_clockwise(vertices, ring) {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
        }
    }
}

/// Triangulates `ring` (minus any `holes` lying inside it) and returns a
/// flat list of vertex indices, three per triangle.
///
/// Holes whose first point falls outside `ring` are ignored, so the same
/// hole list may be passed for every polygon of a glyph.
pub fn triangulate(
    vertices: &[Vec2],
    ring: &[u32],
    holes: &[Vec<u32>],
    winding: Winding,
) -> Result<Vec<u32>, TriangulateError> {
    let mut polygon = ring.to_vec();
    if polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    if polygon.len() < 3 {
        return Err(TriangulateError::TooFewPoints {
            points: polygon.len(),
        });
    }

    let mut merged = polygon.clone();
    for (hole_no, hole) in holes.iter().enumerate() {
        if hole.len() < 3 {
            continue;
        }
        if !point_in_ring(at(vertices, hole[0]), vertices, &polygon) {
            continue;
        }
        bridge_hole(vertices, &mut merged, hole, hole_no)?;
    }

    remove_collinear(vertices, &mut merged);
    clip_ears(vertices, merged, winding)
}

/// Splices `hole` into `polygon` through a seam between the hole's
/// rightmost vertex and the nearest visible polygon vertex. Both seam
/// endpoints end up duplicated.
fn bridge_hole(
    vertices: &[Vec2],
    polygon: &mut Vec<u32>,
    hole: &[u32],
    hole_no: usize,
) -> Result<(), TriangulateError> {
    let mut hole = hole.to_vec();
    let clockwise = is_clockwise(vertices, polygon);
    if clockwise == is_clockwise(vertices, &hole) {
        hole.reverse();
    }

    let mut anchor = 0;
    for i in 1..hole.len() {
        if at(vertices, hole[i]).x > at(vertices, hole[anchor]).x {
            anchor = i;
        }
    }
    let anchor_point = at(vertices, hole[anchor]);
    let outer: &[u32] = polygon;

    let nearest_visible = |right_only: bool| -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &index) in outer.iter().enumerate() {
            let p = at(vertices, index);
            if right_only && p.x <= anchor_point.x {
                continue;
            }
            if !is_visible(vertices, anchor_point, p, outer, &hole) {
                continue;
            }
            let d = anchor_point.distance_squared(p);
            if best.map_or(true, |(_, min)| d < min) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    };

    let bridge = nearest_visible(true)
        .or_else(|| nearest_visible(false))
        .ok_or(TriangulateError::NoBridge { hole: hole_no })?;
    let bridge = seam_copy(vertices, outer, bridge, anchor_point, clockwise);

    let mut stitched = Vec::with_capacity(outer.len() + hole.len() + 2);
    stitched.extend_from_slice(&outer[..=bridge]);
    stitched.extend((0..hole.len()).map(|i| hole[(anchor + i) % hole.len()]));
    stitched.push(hole[anchor]);
    stitched.extend_from_slice(&outer[bridge..]);
    *polygon = stitched;
    Ok(())
}

/// A vertex that already ends an earlier seam appears twice in the ring.
/// Splicing at the wrong copy crosses that seam, so pick the copy whose
/// interior corner faces `target`.
fn seam_copy(
    vertices: &[Vec2],
    ring: &[u32],
    first: usize,
    target: Vec2,
    clockwise: bool,
) -> usize {
    let index = ring[first];
    let dir = target - at(vertices, index);
    (0..ring.len())
        .filter(|&i| ring[i] == index)
        .find(|&i| corner_contains(vertices, ring, i, dir, clockwise))
        .unwrap_or(first)
}

/// Whether `dir` points into the interior angle at `ring[i]`. Boundary
/// directions count as inside.
fn corner_contains(
    vertices: &[Vec2],
    ring: &[u32],
    i: usize,
    dir: Vec2,
    clockwise: bool,
) -> bool {
    let n = ring.len();
    let v = at(vertices, ring[i]);
    let next = at(vertices, ring[(i + 1) % n]) - v;
    let prev = at(vertices, ring[(i + n - 1) % n]) - v;
    // the interior sweeps counter-clockwise from `from` to `to`
    let (from, to) = if clockwise { (prev, next) } else { (next, prev) };
    if from.perp_dot(to) >= 0.0 {
        from.perp_dot(dir) >= 0.0 && dir.perp_dot(to) >= 0.0
    } else {
        from.perp_dot(dir) >= 0.0 || dir.perp_dot(to) >= 0.0
    }
}

/// A segment is visible when it crosses no edge of either loop. Edges that
/// share an endpoint with the segment don't count.
fn is_visible(vertices: &[Vec2], a: Vec2, b: Vec2, polygon: &[u32], hole: &[u32]) -> bool {
    segment_clear(vertices, a, b, polygon) && segment_clear(vertices, a, b, hole)
}

fn segment_clear(vertices: &[Vec2], a: Vec2, b: Vec2, ring: &[u32]) -> bool {
    let n = ring.len();
    (0..n).all(|i| {
        let v1 = at(vertices, ring[i]);
        let v2 = at(vertices, ring[(i + 1) % n]);
        if v1 == a || v1 == b || v2 == a || v2 == b {
            return true;
        }
        !segments_intersect(a, b, v1, v2)
    })
}

fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);
    o1 != o2 && o3 != o4
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Collinear,
    Clockwise,
    CounterClockwise,
}

fn orientation(a: Vec2, b: Vec2, c: Vec2) -> Turn {
    let val = (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y);
    if val.abs() < 1e-6 {
        Turn::Collinear
    } else if val > 0.0 {
        Turn::Clockwise
    } else {
        Turn::CounterClockwise
    }
}

fn clip_ears(
    vertices: &[Vec2],
    mut ring: Vec<u32>,
    winding: Winding,
) -> Result<Vec<u32>, TriangulateError> {
    if ring.len() < 3 {
        return Err(TriangulateError::TooFewPoints { points: ring.len() });
    }

    let mut triangles = Vec::with_capacity((ring.len() - 2) * 3);
    while ring.len() > 3 {
        let n = ring.len();
        let ear = (0..n)
            .find(|&i| is_ear(vertices, &ring, i, winding))
            .ok_or(TriangulateError::NoEar { remaining: n })?;

        triangles.extend_from_slice(&[ring[ear], ring[(ear + 1) % n], ring[(ear + 2) % n]]);
        ring.remove((ear + 1) % n);
    }
    triangles.extend_from_slice(&ring);
    Ok(triangles)
}

fn is_ear(vertices: &[Vec2], ring: &[u32], i: usize, winding: Winding) -> bool {
    let n = ring.len();
    let (i0, i1, i2) = (ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
    let (v0, v1, v2) = (at(vertices, i0), at(vertices, i1), at(vertices, i2));

    // v1 must be a convex corner for the declared winding
    let cross = (v0 - v1).perp_dot(v2 - v1);
    let reflex = match winding {
        Winding::Clockwise => cross < 0.0,
        Winding::CounterClockwise => cross > 0.0,
    };
    if reflex {
        return false;
    }

    !ring
        .iter()
        .filter(|&&x| x != i0 && x != i1 && x != i2)
        .any(|&x| in_triangle(at(vertices, x), v0, v1, v2))
}

/// Boundary points count as inside.
fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
