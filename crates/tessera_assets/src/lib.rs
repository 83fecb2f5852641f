//! Asset utilities for Tessera: TrueType parsing and text mesh generation.

pub mod binary_reader;
pub mod error;
pub mod font;
pub mod tables;
pub mod vertex;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_font;

pub use error::{ErrorCategory, FontError};
pub use font::{
    CharacterMap, Face, FaceOptions, Glyph, GlyphDiagnostic, GlyphMesh, SearchPaths, TextMesh,
};
pub use tables::{TableDirectory, TableRecord, Tag};
pub use vertex::{InnerVertex, MeshData, OuterVertex};
