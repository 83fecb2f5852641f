//! Per-glyph triangulation.

use std::fmt;

use glam::Vec2;
use tessera_geometry::{
    is_clockwise, merge_contours, triangulate, TriangulateError, Winding, CONTOUR_END,
};

use super::outline::Glyph;
use crate::error::{ErrorCategory, FontError, Result};

/// Triangulated geometry for one glyph, in font units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphMesh {
    /// The glyph's vertices plus any intersection points added while merging
    /// contours.
    pub vertices: Vec<Vec2>,
    /// Curve wedge triangles.
    pub outer: Vec<u32>,
    /// Fill triangles. Empty when triangulation failed.
    pub inner: Vec<u32>,
    pub advance: u16,
    pub diagnostic: Option<GlyphDiagnostic>,
}

/// Everything needed to reproduce a failed fill triangulation.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDiagnostic {
    pub glyph: u32,
    pub error: TriangulateError,
    pub polygons: Vec<Vec<u32>>,
    pub holes: Vec<Vec<u32>>,
    pub inner_indices: Vec<u32>,
    pub outer_indices: Vec<u32>,
    pub vertices: Vec<Vec2>,
}

impl fmt::Display for GlyphDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "glyph {}: {}", self.glyph, self.error)?;
        for (i, ring) in self.polygons.iter().enumerate() {
            writeln!(f, "  polygon {i}: {ring:?}")?;
        }
        for (i, ring) in self.holes.iter().enumerate() {
            writeln!(f, "  hole {i}: {ring:?}")?;
        }
        writeln!(f, "  inner: {}", stream(&self.inner_indices))?;
        writeln!(f, "  outer: {}", stream(&self.outer_indices))?;
        write!(f, "  vertices:")?;
        for (i, v) in self.vertices.iter().enumerate() {
            write!(f, " {i}=({}, {})", v.x, v.y)?;
        }
        Ok(())
    }
}

/// Index stream with sentinels shown as `|`.
fn stream(indices: &[u32]) -> String {
    indices
        .iter()
        .map(|&i| match i {
            CONTOUR_END => "|".to_string(),
            i => i.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl GlyphDiagnostic {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from(&self.error)
    }
}

impl GlyphMesh {
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty() && self.inner.is_empty()
    }
}

struct FillFailure {
    error: TriangulateError,
    polygons: Vec<Vec<u32>>,
    holes: Vec<Vec<u32>>,
}

/// Triangulates `glyph`. A fill that cannot be triangulated is logged and
/// replaced by an empty one; only a broken index-count invariant is an error.
pub fn build_glyph_mesh(glyph: &Glyph, index: u32, merge: bool) -> Result<GlyphMesh> {
    let outer = glyph.wedges();
    check_triangles("outer", &outer)?;

    let mut vertices = glyph.vertices.clone();
    let fill = if merge {
        fill_merged(&mut vertices, glyph)
    } else {
        fill_by_orientation(&vertices, glyph)
    };

    let (inner, diagnostic) = match fill {
        Ok(inner) => {
            check_triangles("inner", &inner)?;
            (inner, None)
        }
        Err(failure) => {
            let diagnostic = GlyphDiagnostic {
                glyph: index,
                error: failure.error,
                polygons: failure.polygons,
                holes: failure.holes,
                inner_indices: glyph.inner_indices.clone(),
                outer_indices: glyph.outer_indices.clone(),
                vertices: vertices.clone(),
            };
            log::warn!("fill triangulation failed, {diagnostic}");
            (Vec::new(), Some(diagnostic))
        }
    };

    Ok(GlyphMesh {
        vertices,
        outer,
        inner,
        advance: glyph.advance,
        diagnostic,
    })
}

fn check_triangles(stream: &'static str, indices: &[u32]) -> Result<()> {
    if indices.len() % 3 != 0 {
        return Err(FontError::IndexCount {
            stream,
            len: indices.len(),
        });
    }
    Ok(())
}

/// Clips the anchor rings against the control polygons under the non-zero
/// rule, then triangulates every resulting region counter-clockwise.
fn fill_merged(vertices: &mut Vec<Vec2>, glyph: &Glyph) -> Result<Vec<u32>, FillFailure> {
    let tree = merge_contours(vertices, &glyph.inner_rings(), &glyph.control_rings());
    let regions = tree.regions();

    let mut triangles = Vec::new();
    for region in &regions {
        let mut outer = region.outer.clone();
        if is_clockwise(vertices, &outer) {
            outer.reverse();
        }
        match triangulate(vertices, &outer, &region.holes, Winding::CounterClockwise) {
            Ok(t) => triangles.extend(t),
            Err(error) => {
                return Err(FillFailure {
                    error,
                    polygons: regions.iter().map(|r| r.outer.clone()).collect(),
                    holes: regions.iter().flat_map(|r| r.holes.clone()).collect(),
                })
            }
        }
    }
    Ok(triangles)
}

/// Treats the anchor rings as-is: clockwise rings are filled, counter-
/// clockwise rings are holes of whichever polygon contains them.
fn fill_by_orientation(vertices: &[Vec2], glyph: &Glyph) -> Result<Vec<u32>, FillFailure> {
    let (polygons, holes): (Vec<_>, Vec<_>) = glyph
        .inner_rings()
        .into_iter()
        .filter(|r| r.len() >= 3)
        .partition(|r| is_clockwise(vertices, r));

    let mut triangles = Vec::new();
    for polygon in &polygons {
        match triangulate(vertices, polygon, &holes, Winding::Clockwise) {
            Ok(t) => triangles.extend(t),
            Err(error) => {
                return Err(FillFailure {
                    error,
                    polygons,
                    holes,
                })
            }
        }
    }
    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::glyf::{OutlinePoint, SimpleOutline};
    use tessera_geometry::signed_area;

    fn glyph(contours: &[Vec<(f32, f32, bool)>]) -> Glyph {
        let outline = SimpleOutline {
            contours: contours
                .iter()
                .map(|c| {
                    c.iter()
                        .map(|&(x, y, on)| OutlinePoint {
                            position: Vec2::new(x, y),
                            on_curve: on,
                        })
                        .collect()
                })
                .collect(),
        };
        Glyph::from_outline(&outline, 500)
    }

    /// Clockwise in a y-up system.
    fn square(min: f32, max: f32) -> Vec<(f32, f32, bool)> {
        vec![
            (min, min, true),
            (min, max, true),
            (max, max, true),
            (max, min, true),
        ]
    }

    fn fill_area(mesh: &GlyphMesh) -> f32 {
        mesh.inner
            .chunks(3)
            .map(|t| signed_area(&mesh.vertices, t).abs())
            .sum()
    }

    fn assert_in_bounds(mesh: &GlyphMesh) {
        let n = mesh.vertices.len() as u32;
        assert!(mesh.outer.iter().chain(&mesh.inner).all(|&i| i < n));
        assert_eq!(mesh.outer.len() % 3, 0);
        assert_eq!(mesh.inner.len() % 3, 0);
    }

    #[test]
    fn square_fills_in_both_modes() {
        let g = glyph(&[square(0.0, 100.0)]);
        for merge in [true, false] {
            let mesh = build_glyph_mesh(&g, 1, merge).unwrap();
            assert_in_bounds(&mesh);
            assert!(mesh.diagnostic.is_none());
            assert_eq!(mesh.outer.len(), 12);
            assert!((fill_area(&mesh) - 10_000.0).abs() < 1e-2, "merge = {merge}");
        }
    }

    #[test]
    fn fill_winding_follows_the_merge_mode() {
        let g = glyph(&[square(0.0, 100.0), square(200.0, 300.0)]);
        for (merge, counter_clockwise) in [(true, true), (false, false)] {
            let mesh = build_glyph_mesh(&g, 1, merge).unwrap();
            assert!(!mesh.inner.is_empty());
            for t in mesh.inner.chunks(3) {
                let area = signed_area(&mesh.vertices, t);
                assert_eq!(area > 0.0, counter_clockwise, "merge = {merge}, triangle {t:?}");
            }
        }
    }

    #[test]
    fn counter_clockwise_contour_is_a_hole() {
        let mut hole = square(25.0, 75.0);
        hole.reverse();
        let g = glyph(&[square(0.0, 100.0), hole]);
        for merge in [true, false] {
            let mesh = build_glyph_mesh(&g, 1, merge).unwrap();
            assert_in_bounds(&mesh);
            assert!((fill_area(&mesh) - 7_500.0).abs() < 1e-1, "merge = {merge}");
        }
    }

    #[test]
    fn overlapping_strokes_are_merged() {
        let g = glyph(&[square(0.0, 60.0), square(40.0, 100.0)]);
        let mesh = build_glyph_mesh(&g, 1, true).unwrap();
        assert_in_bounds(&mesh);
        assert!(mesh.diagnostic.is_none());
        // 3600 + 3600 - 400 overlap
        assert!((fill_area(&mesh) - 6_800.0).abs() < 1e-1);
        assert!(mesh.vertices.len() > g.vertices.len());
    }

    #[test]
    fn concave_curve_is_carved_out_of_the_fill() {
        // square whose top edge bends down through an off-curve control
        let g = glyph(&[vec![
            (0.0, 0.0, true),
            (0.0, 100.0, true),
            (50.0, 50.0, false),
            (100.0, 100.0, true),
            (100.0, 0.0, true),
        ]]);
        let mesh = build_glyph_mesh(&g, 1, true).unwrap();
        assert!(mesh.diagnostic.is_none());
        // anchor square minus the wedge triangle (0,100) (50,50) (100,100)
        assert!((fill_area(&mesh) - 7_500.0).abs() < 1e-1);
    }

    #[test]
    fn doubled_contour_records_a_diagnostic() {
        let contour = vec![
            (0.0, 0.0, true),
            (0.0, 100.0, true),
            (100.0, 0.0, true),
            (0.0, 0.0, true),
            (0.0, 100.0, true),
            (100.0, 0.0, true),
        ];
        let g = glyph(&[contour]);
        let mesh = build_glyph_mesh(&g, 7, false).unwrap();
        assert!(mesh.inner.is_empty());
        assert_eq!(mesh.outer.len(), 18);

        let diag = mesh.diagnostic.expect("diagnostic");
        assert_eq!(diag.glyph, 7);
        assert_eq!(diag.error, TriangulateError::NoEar { remaining: 6 });
        assert_eq!(diag.polygons, vec![vec![0, 1, 2, 3, 4, 5]]);
        let text = diag.to_string();
        assert!(text.starts_with("glyph 7: no ear found"));
        assert!(text.contains("inner: 0 1 2 3 4 5 |"));
    }

    #[test]
    fn unbridgeable_hole_records_a_diagnostic() {
        // counter-clockwise, starts inside the square and wraps a wall at
        // x = 20 around its own rightmost point
        let hole = vec![
            (5.0, 5.0, true),
            (20.0, 30.0, true),
            (20.0, -30.0, true),
            (40.0, 0.0, true),
            (25.0, 40.0, true),
        ];
        let g = glyph(&[square(0.0, 10.0), hole]);
        let mesh = build_glyph_mesh(&g, 3, false).unwrap();
        assert!(mesh.inner.is_empty());
        assert_eq!(mesh.outer.len(), 27);

        let diag = mesh.diagnostic.expect("diagnostic");
        assert_eq!(diag.error, TriangulateError::NoBridge { hole: 0 });
        assert_eq!(diag.category(), ErrorCategory::Geometry);
        assert_eq!(diag.polygons, vec![vec![0, 1, 2, 3]]);
        assert_eq!(diag.holes, vec![vec![4, 5, 6, 7, 8]]);
        assert!(diag.to_string().starts_with("glyph 3: could not find a visible bridge"));
    }

    #[test]
    fn empty_glyph_has_no_triangles() {
        let mesh = build_glyph_mesh(&Glyph::empty(300), 0, true).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.advance, 300);
        assert!(mesh.diagnostic.is_none());
    }
}
