use std::path::Path;
use std::sync::OnceLock;

use glam::Vec2;

use super::cmap::CharacterMap;
use super::glyf::{parse_glyph, RawGlyph};
use super::mesh::{build_glyph_mesh, GlyphDiagnostic, GlyphMesh};
use super::metrics::FontMetrics;
use super::outline::Glyph;
use super::search::SearchPaths;
use crate::error::{FontError, Result};
use crate::tables::{TableDirectory, Tag};
use crate::vertex::{InnerVertex, MeshData, OuterVertex, FORWARD, WEDGE_UVS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceOptions {
    /// Triangulate every glyph while loading instead of on first use.
    pub triangulate_on_load: bool,
    /// Resolve overlapping contours with a non-zero boolean pass before
    /// triangulating. When off, contour orientation alone decides what is
    /// filled and what is a hole.
    ///
    /// The fill winding follows this flag: merged fills are emitted
    /// counter-clockwise, orientation-only fills clockwise (y up). Set up
    /// back-face culling for the inner mesh accordingly.
    pub merge_contours: bool,
}

impl Default for FaceOptions {
    fn default() -> Self {
        Self {
            triangulate_on_load: true,
            merge_contours: true,
        }
    }
}

/// Outer (curve) and inner (fill) meshes for a run of text, in em units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMesh {
    pub outer: MeshData<OuterVertex>,
    pub inner: MeshData<InnerVertex>,
    /// Total advance in em units.
    pub width: f32,
}

impl TextMesh {
    /// `(outer, inner)` triangle counts.
    pub fn triangle_counts(&self) -> (usize, usize) {
        (self.outer.triangle_count(), self.inner.triangle_count())
    }
}

/// A loaded TrueType font.
///
/// Glyph outlines are decoded once at load time. Their triangulated meshes
/// live in write-once cells, so a `Face` can be shared between threads
/// without locking.
#[derive(Debug)]
pub struct Face {
    glyphs: Vec<Glyph>,
    meshes: Vec<OnceLock<GlyphMesh>>,
    cmap: CharacterMap,
    metrics: FontMetrics,
    options: FaceOptions,
}

impl Face {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with(data, FaceOptions::default())
    }

    pub fn from_bytes_with(data: &[u8], options: FaceOptions) -> Result<Self> {
        let dir = TableDirectory::read(data)?;
        let cmap = CharacterMap::read(dir.data(data, Tag::CMAP)?)?;
        let metrics = FontMetrics::read(&dir, data)?;
        let glyf = dir.data(data, Tag::GLYF)?;

        let mut glyphs = Vec::with_capacity(metrics.glyph_count as usize);
        for index in 0..metrics.glyph_count as u32 {
            let advance = metrics.advance(index);
            let range = metrics
                .glyph_range(index)
                .ok_or_else(|| FontError::malformed(Tag::LOCA, "too few entries"))?;
            let glyph = match parse_glyph(glyf, range, index)? {
                RawGlyph::Empty => Glyph::empty(advance),
                RawGlyph::Simple(outline) => Glyph::from_outline(&outline, advance),
                RawGlyph::Compound => {
                    log::warn!("{}; drawing it empty", FontError::CompoundGlyph { glyph: index });
                    Glyph::empty(advance)
                }
            };
            glyphs.push(glyph);
        }

        let meshes = glyphs.iter().map(|_| OnceLock::new()).collect();
        let face = Face {
            glyphs,
            meshes,
            cmap,
            metrics,
            options,
        };
        if options.triangulate_on_load {
            face.triangulate_all()?;
        }

        log::info!(
            "loaded face: {} glyphs, {} mapped characters, {} fill failures",
            face.glyph_count(),
            face.cmap.len(),
            face.diagnostics().len()
        );
        Ok(face)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with(path, FaceOptions::default())
    }

    pub fn from_file_with(path: impl AsRef<Path>, options: FaceOptions) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading font {}", path.display());
        let data = std::fs::read(path).map_err(FontError::Io)?;
        Self::from_bytes_with(&data, options)
    }

    /// Resolves `name` through `search` and loads it.
    pub fn open(name: &str, search: &SearchPaths, options: FaceOptions) -> Result<Self> {
        let path = search.resolve(name)?;
        Self::from_file_with(path, options)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn triangulate_all(&self) -> Result<()> {
        use rayon::prelude::*;

        self.glyphs
            .par_iter()
            .zip(self.meshes.par_iter())
            .enumerate()
            .try_for_each(|(index, (glyph, cell))| {
                let mesh = build_glyph_mesh(glyph, index as u32, self.options.merge_contours)?;
                let _ = cell.set(mesh);
                Ok(())
            })
    }

    #[cfg(target_arch = "wasm32")]
    fn triangulate_all(&self) -> Result<()> {
        for index in 0..self.glyphs.len() as u32 {
            self.glyph_mesh(index)?;
        }
        Ok(())
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn units_per_em(&self) -> u16 {
        self.metrics.units_per_em
    }

    /// Font units to em units.
    pub fn scale(&self) -> f32 {
        self.metrics.scale()
    }

    pub fn options(&self) -> FaceOptions {
        self.options
    }

    pub fn character_map(&self) -> &CharacterMap {
        &self.cmap
    }

    pub fn glyph_index(&self, c: char) -> Result<u32> {
        self.cmap
            .glyph_index(c)
            .ok_or(FontError::UnmappedCodepoint(c))
    }

    pub fn glyph(&self, index: u32) -> Result<&Glyph> {
        self.glyphs
            .get(index as usize)
            .ok_or(FontError::GlyphIndexOutOfRange {
                index,
                count: self.glyphs.len() as u32,
            })
    }

    /// Triangulated mesh for glyph `index`, built on first request.
    pub fn glyph_mesh(&self, index: u32) -> Result<&GlyphMesh> {
        let glyph = self.glyph(index)?;
        let cell = &self.meshes[index as usize];
        if let Some(mesh) = cell.get() {
            return Ok(mesh);
        }
        let mesh = build_glyph_mesh(glyph, index, self.options.merge_contours)?;
        Ok(cell.get_or_init(|| mesh))
    }

    /// Fill failures of every glyph triangulated so far.
    pub fn diagnostics(&self) -> Vec<&GlyphDiagnostic> {
        self.meshes
            .iter()
            .filter_map(OnceLock::get)
            .filter_map(|m| m.diagnostic.as_ref())
            .collect()
    }

    /// Lays out `text` left to right from the origin and returns the
    /// combined meshes. Fails on the first character without a glyph.
    pub fn text_mesh(&self, text: &str) -> Result<TextMesh> {
        let scale = self.scale();
        let mut out = TextMesh::default();
        let mut pen = 0.0f32;

        for c in text.chars() {
            let mesh = self.glyph_mesh(self.glyph_index(c)?)?;
            let place = |v: Vec2| {
                let p = v * scale;
                [p.x + pen, p.y, 0.0]
            };

            for wedge in mesh.outer.chunks_exact(3) {
                for (&i, uv) in wedge.iter().zip(WEDGE_UVS) {
                    out.outer.indices.push(out.outer.vertices.len() as u32);
                    out.outer.vertices.push(OuterVertex {
                        position: place(mesh.vertices[i as usize]),
                        uv,
                        normal: FORWARD,
                    });
                }
            }

            let base = out.inner.vertices.len() as u32;
            out.inner.vertices.extend(mesh.vertices.iter().map(|&v| InnerVertex {
                position: place(v),
            }));
            out.inner.indices.extend(mesh.inner.iter().map(|&i| base + i));

            pen += mesh.advance as f32 * scale;
        }

        out.width = pen;
        Ok(out)
    }
}
