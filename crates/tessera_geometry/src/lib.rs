//! Polygon helpers for turning glyph contours into fill triangles.
//!
//! Rings are lists of `u32` indices into a shared `Vec2` vertex list, so the
//! same vertex can appear in several rings (and twice in one ring once a hole
//! has been bridged in).

pub mod ear_clip;
pub mod error;
pub mod merge;
pub mod ring;

pub use ear_clip::{triangulate, Winding};
pub use error::TriangulateError;
pub use merge::{merge_contours, ClipNode, ClipTree, PolygonRegion};
pub use ring::{
    dedup_ring, is_clockwise, point_in_ring, remove_collinear, signed_area, split_contours,
    CONTOUR_END,
};

// re-export so downstream crates agree on the vector type
pub use glam::Vec2;
