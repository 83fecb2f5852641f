//! The table directory at the start of every TrueType file.

use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;

use crate::binary_reader::*;
use crate::error::{FontError, Result};

/// Four byte table identifier such as `glyf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const HEAD: Tag = Tag(*b"head");
    pub const MAXP: Tag = Tag(*b"maxp");
    pub const HHEA: Tag = Tag(*b"hhea");
    pub const HMTX: Tag = Tag(*b"hmtx");
    pub const LOCA: Tag = Tag(*b"loca");
    pub const GLYF: Tag = Tag(*b"glyf");
    pub const CMAP: Tag = Tag(*b"cmap");
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '?'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// A directory entry in the font file's table directory.
#[derive(Debug, Clone)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

/// sfnt version of a TrueType outline font
const TRUETYPE_VERSION: u32 = 0x0001_0000;
/// legacy Apple signature
const TRUE_SIGNATURE: u32 = u32::from_be_bytes(*b"true");

#[derive(Debug, Clone, Default)]
pub struct TableDirectory {
    records: HashMap<Tag, TableRecord>,
}

impl TableDirectory {
    pub fn read(data: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(data);
        // Offset table: sfnt version (u32), numTables (u16), searchRange,
        // entrySelector, rangeShift (u16 each)
        let signature = read_u32_be(&mut cur).map_err(|_| FontError::Truncated {
            what: "offset table",
        })?;
        if signature != TRUETYPE_VERSION && signature != TRUE_SIGNATURE {
            return Err(FontError::BadSignature(signature));
        }
        let num_tables = read_u16_be(&mut cur)?;
        skip(&mut cur, 6)?;

        let mut records = HashMap::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            let tag = Tag(read_tag(&mut cur).map_err(|_| FontError::Truncated {
                what: "table directory",
            })?);
            let checksum = read_u32_be(&mut cur)?;
            let offset = read_u32_be(&mut cur)?;
            let length = read_u32_be(&mut cur)?;
            log::debug!("table '{tag}' at {offset} ({length} bytes)");
            // first record wins on duplicate tags
            records.entry(tag).or_insert(TableRecord {
                tag,
                checksum,
                offset,
                length,
            });
        }
        Ok(Self { records })
    }

    pub fn find(&self, tag: Tag) -> Option<&TableRecord> {
        self.records.get(&tag)
    }

    pub fn require(&self, tag: Tag) -> Result<&TableRecord> {
        self.find(tag).ok_or(FontError::MissingTable(tag))
    }

    /// The bytes of a required table. A record pointing past the end of
    /// the file is a format error.
    pub fn data<'a>(&self, font: &'a [u8], tag: Tag) -> Result<&'a [u8]> {
        let rec = self.require(tag)?;
        let start = rec.offset as usize;
        let end = start
            .checked_add(rec.length as usize)
            .filter(|&end| end <= font.len())
            .ok_or_else(|| FontError::malformed(tag, "table extends past end of file"))?;
        Ok(&font[start..end])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_font::sfnt;

    #[test]
    fn finds_tables_by_tag() {
        let font = sfnt(&[(*b"head", vec![1, 2, 3, 4]), (*b"cmap", vec![9; 6])]);
        let dir = TableDirectory::read(&font).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.require(Tag::CMAP).unwrap().length, 6);
        assert_eq!(dir.data(&font, Tag::HEAD).unwrap(), &[1, 2, 3, 4]);
        assert!(dir.find(Tag::GLYF).is_none());
    }

    #[test]
    fn missing_table_is_named() {
        let font = sfnt(&[(*b"head", vec![0; 4])]);
        let dir = TableDirectory::read(&font).unwrap();
        match dir.data(&font, Tag::CMAP) {
            Err(FontError::MissingTable(tag)) => assert_eq!(tag, Tag::CMAP),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_signature() {
        let mut font = sfnt(&[]);
        font[0..4].copy_from_slice(b"OTTO");
        assert!(matches!(
            TableDirectory::read(&font),
            Err(FontError::BadSignature(_))
        ));

        font[0..4].copy_from_slice(b"true");
        assert!(TableDirectory::read(&font).is_ok());
    }

    #[test]
    fn table_past_end_is_malformed() {
        let mut font = sfnt(&[(*b"glyf", vec![0; 8])]);
        font.truncate(font.len() - 4);
        let dir = TableDirectory::read(&font).unwrap();
        assert!(matches!(
            dir.data(&font, Tag::GLYF),
            Err(FontError::Malformed { .. })
        ));
    }

    #[test]
    fn truncated_directory() {
        let font = sfnt(&[(*b"head", vec![0; 4])]);
        assert!(matches!(
            TableDirectory::read(&font[..16]),
            Err(FontError::Truncated { .. })
        ));
        assert!(matches!(
            TableDirectory::read(&font[..2]),
            Err(FontError::Truncated { .. })
        ));
    }

    #[test]
    fn tag_display_escapes_binary() {
        assert_eq!(Tag(*b"OS/2").to_string(), "OS/2");
        assert_eq!(Tag([0, b'a', b'b', b'c']).to_string(), "?abc");
    }
}
