//! Contour merging: resolves overlapping glyph rings into simple polygons
//! with holes, ready for ear clipping.
//!
//! The boolean step runs an intersection under the non-zero fill rule. Its
//! result is arranged as a [`ClipTree`] (rings nested inside the holes of
//! other rings) and flattened depth-first into [`PolygonRegion`]s.

use std::collections::HashMap;

use glam::Vec2;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use crate::ring::{at, dedup_ring, point_in_ring, signed_area};

/// Clipper output points within this distance of an existing vertex reuse it.
const SNAP_DISTANCE: f32 = 1e-3;

/// One outer ring and the holes directly inside it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonRegion {
    pub outer: Vec<u32>,
    pub holes: Vec<Vec<u32>>,
}

/// A ring of the boolean result together with everything nested inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipNode {
    pub ring: Vec<u32>,
    pub is_hole: bool,
    pub children: Vec<ClipNode>,
}

impl ClipNode {
    fn new(ring: Vec<u32>, is_hole: bool) -> Self {
        Self {
            ring,
            is_hole,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipTree {
    pub roots: Vec<ClipNode>,
}

impl ClipTree {
    /// Walks the tree depth-first. Every non-hole ring becomes a region
    /// whose holes are its direct hole children.
    pub fn regions(&self) -> Vec<PolygonRegion> {
        let mut out = Vec::new();
        for root in &self.roots {
            collect_regions(root, &mut out);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn insert(&mut self, node: ClipNode, vertices: &[Vec2]) {
        insert_node(&mut self.roots, node, vertices);
    }
}

fn collect_regions(node: &ClipNode, out: &mut Vec<PolygonRegion>) {
    if !node.is_hole {
        out.push(PolygonRegion {
            outer: node.ring.clone(),
            holes: node
                .children
                .iter()
                .filter(|c| c.is_hole)
                .map(|c| c.ring.clone())
                .collect(),
        });
    }
    for child in &node.children {
        collect_regions(child, out);
    }
}

fn insert_node(siblings: &mut Vec<ClipNode>, node: ClipNode, vertices: &[Vec2]) {
    let sample = at(vertices, node.ring[0]);
    match siblings
        .iter_mut()
        .find(|s| point_in_ring(sample, vertices, &s.ring))
    {
        Some(parent) => insert_node(&mut parent.children, node, vertices),
        None => siblings.push(node),
    }
}

/// Maps clipper output points back onto vertex indices, appending any new
/// intersection points to the vertex list.
struct VertexPool<'a> {
    vertices: &'a mut Vec<Vec2>,
    lookup: HashMap<(u32, u32), u32>,
}

impl<'a> VertexPool<'a> {
    fn new(vertices: &'a mut Vec<Vec2>) -> Self {
        let mut lookup = HashMap::with_capacity(vertices.len());
        for (i, v) in vertices.iter().enumerate() {
            lookup.entry(key(*v)).or_insert(i as u32);
        }
        Self { vertices, lookup }
    }

    fn index_of(&mut self, point: Vec2) -> u32 {
        if let Some(&i) = self.lookup.get(&key(point)) {
            return i;
        }
        if let Some(i) = self
            .vertices
            .iter()
            .position(|v| v.distance_squared(point) < SNAP_DISTANCE * SNAP_DISTANCE)
        {
            return i as u32;
        }

        let i = self.vertices.len() as u32;
        self.vertices.push(point);
        self.lookup.insert(key(point), i);
        i
    }
}

fn key(v: Vec2) -> (u32, u32) {
    (v.x.to_bits(), v.y.to_bits())
}

fn to_path(vertices: &[Vec2], ring: &[u32]) -> Vec<[f64; 2]> {
    ring.iter()
        .map(|&i| {
            let v = at(vertices, i);
            [v.x as f64, v.y as f64]
        })
        .collect()
}

/// Intersects the union of `subject` rings with the union of `clip` rings
/// (each under the non-zero rule) and returns the result as a tree.
///
/// An empty `clip` set means the subject rings clip themselves. New
/// intersection points are appended to `vertices`.
pub fn merge_contours(vertices: &mut Vec<Vec2>, subject: &[Vec<u32>], clip: &[Vec<u32>]) -> ClipTree {
    let subject_paths: Vec<Vec<[f64; 2]>> = subject
        .iter()
        .filter(|r| r.len() >= 3)
        .map(|r| to_path(vertices, r))
        .collect();
    let clip_paths: Vec<Vec<[f64; 2]>> = if clip.is_empty() {
        subject_paths.clone()
    } else {
        clip.iter()
            .filter(|r| r.len() >= 3)
            .map(|r| to_path(vertices, r))
            .collect()
    };

    if subject_paths.is_empty() || clip_paths.is_empty() {
        return ClipTree::default();
    }

    let shapes = subject_paths.overlay(&clip_paths, OverlayRule::Intersect, FillRule::NonZero);
    log::debug!(
        "merged {} subject / {} clip rings into {} shapes",
        subject_paths.len(),
        clip_paths.len(),
        shapes.len()
    );

    let mut pool = VertexPool::new(vertices);
    let mut nodes: Vec<(f32, ClipNode)> = Vec::with_capacity(shapes.len());
    for shape in &shapes {
        let mut contours = shape.iter().map(|contour| {
            let mut ring: Vec<u32> = contour
                .iter()
                .map(|p| pool.index_of(Vec2::new(p[0] as f32, p[1] as f32)))
                .collect();
            dedup_ring(&mut ring);
            ring
        });

        let Some(outer) = contours.next() else {
            continue;
        };
        if outer.len() < 3 {
            continue;
        }
        let mut node = ClipNode::new(outer, false);
        node.children = contours
            .filter(|h| h.len() >= 3)
            .map(|h| ClipNode::new(h, true))
            .collect();
        nodes.push((0.0, node));
    }

    let vertices: &[Vec2] = pool.vertices;
    for (area, node) in &mut nodes {
        *area = signed_area(vertices, &node.ring).abs();
    }
    // containers are larger than anything nested inside them
    nodes.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut tree = ClipTree::default();
    for (_, node) in nodes {
        tree.insert(node, vertices);
    }
    tree
}
