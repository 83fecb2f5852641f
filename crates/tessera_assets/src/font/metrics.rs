use std::io::Cursor;
use std::ops::Range;

use crate::binary_reader::*;
use crate::error::{FontError, Result};
use crate::tables::{TableDirectory, Tag};

/// Global metrics and per-glyph lookup tables gathered from `head`, `maxp`,
/// `hhea`, `hmtx` and `loca`.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub glyph_count: u16,
    /// `true` when `loca` stores 32-bit offsets.
    pub long_offsets: bool,
    advances: Vec<u16>,
    /// `glyph_count + 1` byte offsets into `glyf`.
    offsets: Vec<u32>,
}

impl FontMetrics {
    pub fn read(dir: &TableDirectory, font: &[u8]) -> Result<Self> {
        let head = dir.data(font, Tag::HEAD)?;
        let units_per_em = u16_at(head, 18).map_err(|_| short(Tag::HEAD))?;
        if units_per_em == 0 {
            return Err(FontError::malformed(Tag::HEAD, "unitsPerEm is zero"));
        }
        let long_offsets = match i16_at(head, 50).map_err(|_| short(Tag::HEAD))? {
            0 => false,
            1 => true,
            other => {
                return Err(FontError::malformed(
                    Tag::HEAD,
                    format!("unknown indexToLocFormat {other}"),
                ))
            }
        };

        let maxp = dir.data(font, Tag::MAXP)?;
        let glyph_count = u16_at(maxp, 4).map_err(|_| short(Tag::MAXP))?;

        let hhea = dir.data(font, Tag::HHEA)?;
        let metric_count = u16_at(hhea, 34).map_err(|_| short(Tag::HHEA))?;
        let hmtx = dir.data(font, Tag::HMTX)?;
        let advances = read_advances(hmtx, metric_count, glyph_count)?;

        let loca = dir.data(font, Tag::LOCA)?;
        let offsets = read_offsets(loca, glyph_count, long_offsets)?;

        log::debug!(
            "{glyph_count} glyphs, {units_per_em} units/em, {} loca",
            if long_offsets { "long" } else { "short" }
        );
        Ok(Self {
            units_per_em,
            glyph_count,
            long_offsets,
            advances,
            offsets,
        })
    }

    /// Multiplier from font units to em units.
    pub fn scale(&self) -> f32 {
        1.0 / self.units_per_em as f32
    }

    pub fn advance(&self, glyph: u32) -> u16 {
        self.advances.get(glyph as usize).copied().unwrap_or(0)
    }

    /// Byte range of `glyph` inside `glyf`; empty for outline-less glyphs.
    pub fn glyph_range(&self, glyph: u32) -> Option<Range<usize>> {
        let i = glyph as usize;
        let start = *self.offsets.get(i)? as usize;
        let end = *self.offsets.get(i + 1)? as usize;
        Some(start..end)
    }
}

fn short(table: Tag) -> FontError {
    FontError::malformed(table, "table too short")
}

/// Glyphs past the last long metric reuse its advance width.
fn read_advances(hmtx: &[u8], metric_count: u16, glyph_count: u16) -> Result<Vec<u16>> {
    if metric_count == 0 && glyph_count > 0 {
        return Err(FontError::malformed(Tag::HHEA, "numberOfHMetrics is zero"));
    }
    let mut cur = Cursor::new(hmtx);
    let mut advances = Vec::with_capacity(glyph_count as usize);
    for _ in 0..metric_count {
        advances.push(read_u16_be(&mut cur).map_err(|_| short(Tag::HMTX))?);
        skip(&mut cur, 2)?; // left side bearing
    }
    let last = advances.last().copied().unwrap_or(0);
    advances.resize(advances.len().max(glyph_count as usize), last);
    Ok(advances)
}

fn read_offsets(loca: &[u8], glyph_count: u16, long: bool) -> Result<Vec<u32>> {
    let mut cur = Cursor::new(loca);
    let mut offsets = Vec::with_capacity(glyph_count as usize + 1);
    for _ in 0..=glyph_count {
        let off = match long {
            true => read_u32_be(&mut cur),
            // short offsets are stored halved
            false => read_u16_be(&mut cur).map(|o| o as u32 * 2),
        };
        offsets.push(off.map_err(|_| short(Tag::LOCA))?);
    }
    Ok(offsets)
}
