//! Character to glyph mapping from the `cmap` table.
//!
//! Only the segmented coverage subtable (format 12) is read. Its groups are
//! expanded up front into a flat map.

use std::collections::HashMap;
use std::io::Cursor;

use crate::binary_reader::*;
use crate::error::{FontError, Result};
use crate::tables::Tag;

/// Unicode encoding records, most preferred first: Unicode full repertoire,
/// Windows UCS-4, then the BMP-only encodings.
const PREFERRED_ENCODINGS: [(u16, u16); 5] = [(0, 4), (3, 10), (0, 6), (0, 3), (3, 1)];

const SEGMENTED_COVERAGE: u16 = 12;
const MAX_CODEPOINT: u32 = 0x10_FFFF;

#[derive(Debug, Clone, Default)]
pub struct CharacterMap {
    glyphs: HashMap<u32, u32>,
}

impl CharacterMap {
    pub fn read(cmap: &[u8]) -> Result<Self> {
        let truncated = |_: std::io::Error| FontError::malformed(Tag::CMAP, "table too short");
        let mut cur = Cursor::new(cmap);
        let _version = read_u16_be(&mut cur).map_err(truncated)?;
        let num_tables = read_u16_be(&mut cur).map_err(truncated)?;

        let mut records = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            let platform = read_u16_be(&mut cur).map_err(truncated)?;
            let encoding = read_u16_be(&mut cur).map_err(truncated)?;
            let offset = read_u32_be(&mut cur).map_err(truncated)?;
            records.push(((platform, encoding), offset));
        }

        let offset = PREFERRED_ENCODINGS
            .iter()
            .find_map(|want| records.iter().find(|(id, _)| id == want))
            .map(|&(_, offset)| offset)
            .ok_or(FontError::NoUnicodeCmap)?;

        cur.set_position(offset as u64);
        let format = read_u16_be(&mut cur).map_err(truncated)?;
        if format != SEGMENTED_COVERAGE {
            return Err(FontError::UnsupportedCmapFormat(format));
        }
        skip(&mut cur, 2 + 4 + 4)?; // reserved, length, language
        let group_count = read_u32_be(&mut cur).map_err(truncated)?;

        let mut glyphs = HashMap::new();
        for _ in 0..group_count {
            let start = read_u32_be(&mut cur).map_err(truncated)?;
            let end = read_u32_be(&mut cur).map_err(truncated)?;
            let start_glyph = read_u32_be(&mut cur).map_err(truncated)?;
            if start > end || end > MAX_CODEPOINT {
                return Err(FontError::malformed(
                    Tag::CMAP,
                    format!("invalid group {start:#x}..={end:#x}"),
                ));
            }
            for code in start..=end {
                let Some(glyph) = start_glyph.checked_add(code - start) else {
                    break;
                };
                // first mapping wins
                glyphs.entry(code).or_insert(glyph);
            }
        }

        log::debug!("cmap: {} code points in {group_count} groups", glyphs.len());
        Ok(Self { glyphs })
    }

    pub fn get(&self, code: u32) -> Option<u32> {
        self.glyphs.get(&code).copied()
    }

    pub fn glyph_index(&self, c: char) -> Option<u32> {
        self.get(c as u32)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
