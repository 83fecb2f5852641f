//! Command line front end: loads a font face and builds the text meshes for
//! a string, reporting what was produced.

pub mod cli;
pub mod config;
pub mod logging;

use std::fmt;

use anyhow::Context;
use tessera_assets::Face;

pub use cli::Args;
pub use config::{AppConfig, CONFIG_FILE};

/// Summary of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub glyph_count: usize,
    pub units_per_em: u16,
    pub outer_triangles: usize,
    pub inner_triangles: usize,
    pub width: f32,
    /// Glyphs whose fill could not be triangulated.
    pub failed_glyphs: Vec<u32>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "glyphs:          {}", self.glyph_count)?;
        writeln!(f, "units per em:    {}", self.units_per_em)?;
        writeln!(f, "curve triangles: {}", self.outer_triangles)?;
        writeln!(f, "fill triangles:  {}", self.inner_triangles)?;
        write!(f, "width (em):      {:.3}", self.width)?;
        if !self.failed_glyphs.is_empty() {
            write!(f, "\nfill failures:   {:?}", self.failed_glyphs)?;
        }
        Ok(())
    }
}

pub fn run(config: &AppConfig) -> anyhow::Result<Report> {
    let face = Face::open(&config.font, &config.search_paths(), config.face_options())
        .with_context(|| format!("failed to load font '{}'", config.font))?;
    report(&face, &config.text)
}

pub fn report(face: &Face, text: &str) -> anyhow::Result<Report> {
    let mesh = face
        .text_mesh(text)
        .with_context(|| format!("failed to lay out {text:?}"))?;
    let (outer_triangles, inner_triangles) = mesh.triangle_counts();
    Ok(Report {
        glyph_count: face.glyph_count(),
        units_per_em: face.units_per_em(),
        outer_triangles,
        inner_triangles,
        width: mesh.width,
        failed_glyphs: face.diagnostics().iter().map(|d| d.glyph).collect(),
    })
}
