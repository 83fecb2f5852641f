//! TrueType font loading and glyph triangulation.
//!
//! | Module    | Responsibility                                        |
//! |-----------|-------------------------------------------------------|
//! | `metrics` | `head`/`maxp`/`hhea`/`hmtx`/`loca` global metrics     |
//! | `cmap`    | code point to glyph index (format 12)                 |
//! | `glyf`    | glyph records to point contours                       |
//! | `outline` | contours to curve wedges + anchor rings               |
//! | `mesh`    | per-glyph fill triangulation and failure diagnostics  |
//! | `face`    | `Face`: load once, lay out strings                    |
//! | `search`  | font lookup across directories                        |

pub mod cmap;
pub mod face;
pub mod glyf;
pub mod mesh;
pub mod metrics;
pub mod outline;
pub mod search;

pub use cmap::CharacterMap;
pub use face::{Face, FaceOptions, TextMesh};
pub use mesh::{GlyphDiagnostic, GlyphMesh};
pub use metrics::FontMetrics;
pub use outline::Glyph;
pub use search::{SearchPaths, FONT_PATH_VAR};
