//! Builds small TrueType files in memory for unit tests. Enabled for
//! dependent crates through the `test-utils` feature.

use crate::font::glyf::{ON_CURVE, REPEAT, X_SAME_OR_POS, X_SHORT, Y_SAME_OR_POS, Y_SHORT};

/// Assembles an sfnt file from `(tag, bytes)` pairs in the given order.
pub fn sfnt(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(&0x0001_0000u32.to_be_bytes()); // scaler type
    data.extend(&(tables.len() as u16).to_be_bytes());
    data.extend(&[0; 6]); // searchRange, entrySelector, rangeShift

    let mut offset = 12 + 16 * tables.len();
    for (tag, tbl) in tables {
        data.extend(tag);
        data.extend(&0u32.to_be_bytes()); // checksum
        data.extend(&(offset as u32).to_be_bytes());
        data.extend(&(tbl.len() as u32).to_be_bytes());
        offset += tbl.len();
    }
    for (_, tbl) in tables {
        data.extend(tbl);
    }
    data
}

/// `(x, y, on_curve)` in font units.
pub type Point = (i16, i16, bool);

#[derive(Debug, Clone)]
pub enum TestGlyph {
    /// Zero-length `loca` entry.
    Empty,
    Simple(Vec<Vec<Point>>),
    /// Glyph record bytes written as-is.
    Raw(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct FontBuilder {
    glyphs: Vec<(TestGlyph, u16)>,
    groups: Vec<(u32, u32, u32)>,
    units_per_em: u16,
    long_loca: bool,
    h_metrics: Option<u16>,
    without: Vec<[u8; 4]>,
    cmap: Option<Vec<u8>>,
}

impl Default for FontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBuilder {
    /// Glyph 0 is always an empty `.notdef`.
    pub fn new() -> Self {
        Self {
            glyphs: vec![(TestGlyph::Empty, 500)],
            groups: Vec::new(),
            units_per_em: 1000,
            long_loca: false,
            h_metrics: None,
            without: Vec::new(),
            cmap: None,
        }
    }

    pub fn units_per_em(mut self, units: u16) -> Self {
        self.units_per_em = units;
        self
    }

    pub fn long_loca(mut self) -> Self {
        self.long_loca = true;
        self
    }

    /// Only the first `n` glyphs get an explicit advance width.
    pub fn h_metrics(mut self, n: u16) -> Self {
        self.h_metrics = Some(n);
        self
    }

    pub fn without(mut self, tag: &[u8; 4]) -> Self {
        self.without.push(*tag);
        self
    }

    /// Replaces the generated `cmap` table.
    pub fn cmap_table(mut self, bytes: Vec<u8>) -> Self {
        self.cmap = Some(bytes);
        self
    }

    /// Appends a glyph and maps `c` to it.
    pub fn glyph(mut self, c: char, glyph: TestGlyph, advance: u16) -> Self {
        let index = self.glyphs.len() as u32;
        self.glyphs.push((glyph, advance));
        self.groups.push((c as u32, c as u32, index));
        self
    }

    /// Appends a glyph with no character mapped to it.
    pub fn unmapped_glyph(mut self, glyph: TestGlyph, advance: u16) -> Self {
        self.glyphs.push((glyph, advance));
        self
    }

    pub fn group(mut self, start: u32, end: u32, start_glyph: u32) -> Self {
        self.groups.push((start, end, start_glyph));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let glyph_count = self.glyphs.len() as u16;

        let mut head = vec![0u8; 54];
        head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes()); // magic
        head[18..20].copy_from_slice(&self.units_per_em.to_be_bytes());
        head[50..52].copy_from_slice(&(self.long_loca as i16).to_be_bytes());

        let mut maxp = Vec::new();
        maxp.extend(&0x0000_5000u32.to_be_bytes());
        maxp.extend(&glyph_count.to_be_bytes());

        let h_metrics = self.h_metrics.unwrap_or(glyph_count).min(glyph_count);
        let mut hhea = vec![0u8; 36];
        hhea[34..36].copy_from_slice(&h_metrics.to_be_bytes());

        let mut hmtx = Vec::new();
        for (i, (_, advance)) in self.glyphs.iter().enumerate() {
            if i < h_metrics as usize {
                hmtx.extend(&advance.to_be_bytes());
            }
            hmtx.extend(&0i16.to_be_bytes()); // lsb
        }

        let mut glyf = Vec::new();
        let mut offsets = vec![0u32];
        for (glyph, _) in &self.glyphs {
            match glyph {
                TestGlyph::Empty => {}
                TestGlyph::Simple(contours) => glyf.extend(encode_simple(contours)),
                TestGlyph::Raw(bytes) => glyf.extend(bytes),
            }
            if glyf.len() % 2 == 1 {
                glyf.push(0);
            }
            offsets.push(glyf.len() as u32);
        }

        let mut loca = Vec::new();
        for off in offsets {
            if self.long_loca {
                loca.extend(&off.to_be_bytes());
            } else {
                loca.extend(&((off / 2) as u16).to_be_bytes());
            }
        }

        let cmap = self.cmap.unwrap_or_else(|| cmap_format12(0, 4, &self.groups));

        let tables: Vec<([u8; 4], Vec<u8>)> = vec![
            (*b"cmap", cmap),
            (*b"glyf", glyf),
            (*b"head", head),
            (*b"hhea", hhea),
            (*b"hmtx", hmtx),
            (*b"loca", loca),
            (*b"maxp", maxp),
        ]
        .into_iter()
        .filter(|(tag, _)| !self.without.contains(tag))
        .collect();
        sfnt(&tables)
    }
}

/// A `cmap` with a single format 12 subtable under the given encoding record.
pub fn cmap_format12(platform: u16, encoding: u16, groups: &[(u32, u32, u32)]) -> Vec<u8> {
    let mut sub = Vec::new();
    sub.extend(&12u16.to_be_bytes());
    sub.extend(&0u16.to_be_bytes()); // reserved
    sub.extend(&((16 + 12 * groups.len()) as u32).to_be_bytes());
    sub.extend(&0u32.to_be_bytes()); // language
    sub.extend(&(groups.len() as u32).to_be_bytes());
    for &(start, end, glyph) in groups {
        sub.extend(&start.to_be_bytes());
        sub.extend(&end.to_be_bytes());
        sub.extend(&glyph.to_be_bytes());
    }
    cmap_with(&[(platform, encoding, sub)])
}

/// A `cmap` table with one encoding record per `(platform, encoding, subtable)`.
pub fn cmap_with(subtables: &[(u16, u16, Vec<u8>)]) -> Vec<u8> {
    let mut cmap = Vec::new();
    cmap.extend(&0u16.to_be_bytes()); // version
    cmap.extend(&(subtables.len() as u16).to_be_bytes());
    let mut offset = 4 + 8 * subtables.len();
    for (platform, encoding, sub) in subtables {
        cmap.extend(&platform.to_be_bytes());
        cmap.extend(&encoding.to_be_bytes());
        cmap.extend(&(offset as u32).to_be_bytes());
        offset += sub.len();
    }
    for (_, _, sub) in subtables {
        cmap.extend(sub);
    }
    cmap
}

/// Encodes a simple glyph the way font compilers do: short deltas where they
/// fit, "same" flags for zero deltas and repeat runs for identical flags.
pub fn encode_simple(contours: &[Vec<Point>]) -> Vec<u8> {
    let points: Vec<Point> = contours.iter().flatten().copied().collect();
    let (min_x, max_x) = bounds(points.iter().map(|p| p.0));
    let (min_y, max_y) = bounds(points.iter().map(|p| p.1));

    let mut out = Vec::new();
    out.extend(&(contours.len() as i16).to_be_bytes());
    for v in [min_x, min_y, max_x, max_y] {
        out.extend(&v.to_be_bytes());
    }
    let mut end = -1i32;
    for c in contours {
        end += c.len() as i32;
        out.extend(&(end as u16).to_be_bytes());
    }
    out.extend(&0u16.to_be_bytes()); // instructionLength

    let mut flags = Vec::with_capacity(points.len());
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let (mut px, mut py) = (0i16, 0i16);
    for &(x, y, on) in &points {
        let mut flag = if on { ON_CURVE } else { 0 };
        flag |= encode_delta(x - px, X_SHORT, X_SAME_OR_POS, &mut xs);
        flag |= encode_delta(y - py, Y_SHORT, Y_SAME_OR_POS, &mut ys);
        flags.push(flag);
        px = x;
        py = y;
    }

    let mut i = 0;
    while i < flags.len() {
        let flag = flags[i];
        let run = flags[i + 1..]
            .iter()
            .take(255)
            .take_while(|&&f| f == flag)
            .count();
        if run > 0 {
            out.push(flag | REPEAT);
            out.push(run as u8);
        } else {
            out.push(flag);
        }
        i += run + 1;
    }
    out.extend(xs);
    out.extend(ys);
    out
}

fn encode_delta(d: i16, short: u8, same_or_pos: u8, out: &mut Vec<u8>) -> u8 {
    if d == 0 {
        same_or_pos
    } else if d.unsigned_abs() <= 255 {
        out.push(d.unsigned_abs() as u8);
        if d > 0 {
            short | same_or_pos
        } else {
            short
        }
    } else {
        out.extend(&d.to_be_bytes());
        0
    }
}

fn bounds(values: impl Iterator<Item = i16>) -> (i16, i16) {
    values.fold((0, 0), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Clockwise square outline (TrueType outer contour) from `min` to `max`.
pub fn square(min: i16, max: i16) -> Vec<Point> {
    vec![
        (min, min, true),
        (min, max, true),
        (max, max, true),
        (max, min, true),
    ]
}

/// Counter-clockwise square, i.e. a hole.
pub fn square_hole(min: i16, max: i16) -> Vec<Point> {
    let mut s = square(min, max);
    s.reverse();
    s
}
