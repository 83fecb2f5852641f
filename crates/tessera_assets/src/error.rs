use std::io;
use std::path::PathBuf;

use tessera_geometry::TriangulateError;
use thiserror::Error;

use crate::tables::Tag;

/// Coarse classification of a [`FontError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The file is not a font we can read, or violates its own structure.
    Format,
    /// Valid font data using something this crate doesn't implement.
    UnsupportedFeature,
    /// Geometry that could not be triangulated.
    Geometry,
    /// Bad input from the caller.
    Argument,
    Io,
}

#[derive(Debug, Error)]
pub enum FontError {
    #[error("i/o error: {0}")]
    Io(io::Error),
    #[error("not a TrueType font (signature {0:#010x})")]
    BadSignature(u32),
    #[error("required table '{0}' is missing")]
    MissingTable(Tag),
    #[error("unexpected end of data while reading {what}")]
    Truncated { what: &'static str },
    #[error("malformed '{table}' table: {reason}")]
    Malformed { table: Tag, reason: String },
    #[error("glyph {glyph} has a contour count of zero")]
    ZeroContours { glyph: u32 },
    #[error("{stream} index count {len} is not a multiple of 3")]
    IndexCount { stream: &'static str, len: usize },
    #[error("no Unicode character map subtable")]
    NoUnicodeCmap,
    #[error("unsupported character map format {0}")]
    UnsupportedCmapFormat(u16),
    #[error("glyph {glyph} is a compound glyph")]
    CompoundGlyph { glyph: u32 },
    #[error("no glyph for character {0:?}")]
    UnmappedCodepoint(char),
    #[error("glyph index {index} out of range (font has {count} glyphs)")]
    GlyphIndexOutOfRange { index: u32, count: u32 },
    #[error("font '{0}' not found in any search directory")]
    FontNotFound(PathBuf),
    #[error("font name is empty")]
    EmptyName,
}

impl FontError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FontError::Io(_) => ErrorCategory::Io,
            FontError::BadSignature(_)
            | FontError::MissingTable(_)
            | FontError::Truncated { .. }
            | FontError::Malformed { .. }
            | FontError::ZeroContours { .. }
            | FontError::IndexCount { .. } => ErrorCategory::Format,
            FontError::NoUnicodeCmap
            | FontError::UnsupportedCmapFormat(_)
            | FontError::CompoundGlyph { .. } => ErrorCategory::UnsupportedFeature,
            FontError::UnmappedCodepoint(_)
            | FontError::GlyphIndexOutOfRange { .. }
            | FontError::FontNotFound(_)
            | FontError::EmptyName => ErrorCategory::Argument,
        }
    }

    pub(crate) fn malformed(table: Tag, reason: impl Into<String>) -> Self {
        FontError::Malformed {
            table,
            reason: reason.into(),
        }
    }
}

/// Fill failures never abort a load; they are classified for the glyph's
/// diagnostic instead.
impl From<&TriangulateError> for ErrorCategory {
    fn from(e: &TriangulateError) -> Self {
        if e.is_malformed_input() {
            ErrorCategory::Format
        } else {
            ErrorCategory::Geometry
        }
    }
}

impl From<io::Error> for FontError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            FontError::Truncated { what: "font data" }
        } else {
            FontError::Io(e)
        }
    }
}

pub type Result<T, E = FontError> = std::result::Result<T, E>;
