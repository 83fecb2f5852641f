//! Dual representation of a glyph outline.
//!
//! Every quadratic segment becomes one "wedge" triangle `[anchor, control,
//! end]` in the outer stream; a fragment shader evaluates the curve inside
//! it using fixed UVs. The anchors alone form the inner fill polygon. Both
//! streams end each contour with [`CONTOUR_END`].

use glam::Vec2;
use tessera_geometry::{split_contours, CONTOUR_END};

use super::glyf::{OutlinePoint, SimpleOutline};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Glyph {
    /// Font units. Outline points come first in file order, followed by
    /// synthesized midpoints.
    pub vertices: Vec<Vec2>,
    /// Wedge triples, sentinel-terminated per contour.
    pub outer_indices: Vec<u32>,
    /// Anchor rings, sentinel-terminated per contour.
    pub inner_indices: Vec<u32>,
    /// Advance width in font units.
    pub advance: u16,
}

#[derive(Clone, Copy)]
struct Node {
    index: u32,
    on_curve: bool,
}

impl Glyph {
    pub fn empty(advance: u16) -> Self {
        Self {
            advance,
            ..Default::default()
        }
    }

    pub fn from_outline(outline: &SimpleOutline, advance: u16) -> Self {
        let mut glyph = Glyph {
            vertices: Vec::with_capacity(outline.point_count() * 2),
            advance,
            ..Default::default()
        };
        glyph.vertices.extend(
            outline
                .contours
                .iter()
                .flatten()
                .map(|p: &OutlinePoint| p.position),
        );

        let mut first = 0u32;
        for contour in &outline.contours {
            let nodes: Vec<Node> = contour
                .iter()
                .enumerate()
                .map(|(i, p)| Node {
                    index: first + i as u32,
                    on_curve: p.on_curve,
                })
                .collect();
            first += contour.len() as u32;

            if nodes.len() < 2 {
                continue;
            }
            glyph.push_contour(nodes);
        }
        glyph
    }

    fn push_contour(&mut self, nodes: Vec<Node>) {
        // two off-curve points in a row imply an on-curve point between them
        let n = nodes.len();
        let mut seq = Vec::with_capacity(n * 2);
        for i in 0..n {
            let (a, b) = (nodes[i], nodes[(i + 1) % n]);
            seq.push(a);
            if !a.on_curve && !b.on_curve {
                let index = self.midpoint(a.index, b.index);
                seq.push(Node {
                    index,
                    on_curve: true,
                });
            }
        }

        let Some(start) = seq.iter().position(|p| p.on_curve) else {
            return;
        };
        seq.rotate_left(start);

        let m = seq.len();
        let mut i = 0;
        while i < m {
            let anchor = seq[i].index;
            let next = seq[(i + 1) % m];
            let (control, end) = if next.on_curve {
                // straight segment: flat wedge through the midpoint
                (self.midpoint(anchor, next.index), next.index)
            } else {
                i += 1;
                (next.index, seq[(i + 1) % m].index)
            };
            self.outer_indices.extend_from_slice(&[anchor, control, end]);
            self.inner_indices.push(anchor);
            i += 1;
        }
        self.outer_indices.push(CONTOUR_END);
        self.inner_indices.push(CONTOUR_END);
    }

    fn midpoint(&mut self, a: u32, b: u32) -> u32 {
        let p = (self.vertices[a as usize] + self.vertices[b as usize]) * 0.5;
        self.vertices.push(p);
        (self.vertices.len() - 1) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.inner_indices.is_empty()
    }

    /// Anchor rings, one per contour.
    pub fn inner_rings(&self) -> Vec<Vec<u32>> {
        split_contours(&self.inner_indices).map(<[u32]>::to_vec).collect()
    }

    /// Control polygons `[anchor, control, anchor, control, ..]`, one per
    /// contour. Unlike the anchor rings these pass through every curve's
    /// control point.
    pub fn control_rings(&self) -> Vec<Vec<u32>> {
        split_contours(&self.outer_indices)
            .map(|wedges| wedges.chunks(3).flat_map(|w| [w[0], w[1]]).collect())
            .collect()
    }

    /// Outer wedge triples with the sentinels removed.
    pub fn wedges(&self) -> Vec<u32> {
        self.outer_indices
            .iter()
            .copied()
            .filter(|&i| i != CONTOUR_END)
            .collect()
    }
}
