//! Index rings: closed loops of indices into a shared vertex list.
//!
//! A ring never repeats its first index at the end; closure is implicit.
//! Flattened index streams separate rings with [`CONTOUR_END`].

use glam::Vec2;

/// Sentinel separating contours inside a flattened index stream.
pub const CONTOUR_END: u32 = u32::MAX;

/// Triangles whose doubled area falls below this are treated as collinear.
pub const COLLINEAR_EPSILON: f32 = 1e-6;

#[inline]
pub(crate) fn at(vertices: &[Vec2], index: u32) -> Vec2 {
    vertices[index as usize]
}

/// Signed area of the ring (shoelace). Positive for counter-clockwise rings
/// in a y-up coordinate system.
pub fn signed_area(vertices: &[Vec2], ring: &[u32]) -> f32 {
    let n = ring.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = at(vertices, ring[i]);
        let b = at(vertices, ring[(i + 1) % n]);
        sum += a.perp_dot(b);
    }
    sum * 0.5
}

pub fn is_clockwise(vertices: &[Vec2], ring: &[u32]) -> bool {
    signed_area(vertices, ring) < 0.0
}

/// Even-odd point containment test against a single ring.
pub fn point_in_ring(point: Vec2, vertices: &[Vec2], ring: &[u32]) -> bool {
    let n = ring.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = at(vertices, ring[i]);
        let vj = at(vertices, ring[j]);
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub fn is_collinear(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).perp_dot(c - a).abs() < COLLINEAR_EPSILON
}

/// Removes every vertex lying on the line through its two neighbours.
///
/// Passes repeat until the ring is stable, so applying this twice yields the
/// same ring as applying it once. Rings of three or fewer points are left
/// untouched.
pub fn remove_collinear(vertices: &[Vec2], ring: &mut Vec<u32>) {
    loop {
        let n = ring.len();
        if n <= 3 {
            return;
        }

        let kept: Vec<u32> = (0..n)
            .filter(|&i| {
                let a = at(vertices, ring[(i + n - 1) % n]);
                let b = at(vertices, ring[i]);
                let c = at(vertices, ring[(i + 1) % n]);
                !is_collinear(a, b, c)
            })
            .map(|i| ring[i])
            .collect();

        if kept.len() == n {
            return;
        }
        *ring = kept;
    }
}

/// Splits a sentinel-terminated index stream back into its rings.
///
/// Empty segments (two sentinels in a row) are skipped; a trailing segment
/// without a sentinel is still returned.
pub fn split_contours(stream: &[u32]) -> impl Iterator<Item = &[u32]> {
    stream
        .split(|&i| i == CONTOUR_END)
        .filter(|ring| !ring.is_empty())
}

/// Drops consecutive repeats and an explicit closing duplicate.
pub fn dedup_ring(ring: &mut Vec<u32>) {
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn area_sign_follows_winding() {
        let v = square();
        assert!((signed_area(&v, &[0, 1, 2, 3]) - 1.0).abs() < 1e-6);
        assert!((signed_area(&v, &[3, 2, 1, 0]) + 1.0).abs() < 1e-6);
        assert!(!is_clockwise(&v, &[0, 1, 2, 3]));
        assert!(is_clockwise(&v, &[3, 2, 1, 0]));
    }

    #[test]
    fn point_containment() {
        let v = square();
        assert!(point_in_ring(Vec2::new(0.5, 0.5), &v, &[0, 1, 2, 3]));
        assert!(!point_in_ring(Vec2::new(1.5, 0.5), &v, &[0, 1, 2, 3]));
        assert!(!point_in_ring(Vec2::new(0.5, 0.5), &v, &[]));
    }

    #[test]
    fn collinear_points_are_removed() {
        let v = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(0.0, 1.0),
        ];
        let mut ring = vec![0, 1, 2, 3, 4, 5, 6];
        remove_collinear(&v, &mut ring);
        assert_eq!(ring, vec![0, 2, 3, 5]);
    }

    #[test]
    fn remove_collinear_is_idempotent() {
        let v = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(1.5, 2.0),
            Vec2::new(0.0, 3.0),
            Vec2::new(0.0, 1.5),
        ];
        let mut once = (0..v.len() as u32).collect::<Vec<_>>();
        remove_collinear(&v, &mut once);
        let mut twice = once.clone();
        remove_collinear(&v, &mut twice);
        assert_eq!(once, twice);
        assert_eq!(once, vec![0, 3, 4, 6]);
    }

    #[test]
    fn split_skips_empty_segments() {
        let stream = [0, 1, 2, CONTOUR_END, CONTOUR_END, 3, 4, 5, CONTOUR_END, 6];
        let rings: Vec<&[u32]> = split_contours(&stream).collect();
        assert_eq!(rings, vec![&[0u32, 1, 2][..], &[3u32, 4, 5][..], &[6u32][..]]);
    }

    #[test]
    fn dedup_drops_closing_duplicate() {
        let mut ring = vec![0, 1, 1, 2, 0];
        dedup_ring(&mut ring);
        assert_eq!(ring, vec![0, 1, 2]);
    }
}
