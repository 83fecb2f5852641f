//! Decoding of `glyf` records into point contours.

use std::io::Cursor;
use std::ops::Range;

use glam::Vec2;

use crate::binary_reader::*;
use crate::error::{FontError, Result};
use crate::tables::Tag;

// simple glyph flag bits
pub const ON_CURVE: u8 = 0x01;
pub const X_SHORT: u8 = 0x02;
pub const Y_SHORT: u8 = 0x04;
pub const REPEAT: u8 = 0x08;
pub const X_SAME_OR_POS: u8 = 0x10;
pub const Y_SAME_OR_POS: u8 = 0x20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlinePoint {
    /// Font units.
    pub position: Vec2,
    pub on_curve: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimpleOutline {
    pub contours: Vec<Vec<OutlinePoint>>,
}

impl SimpleOutline {
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawGlyph {
    /// No outline data (e.g. the space character).
    Empty,
    Simple(SimpleOutline),
    /// Composite glyphs are not decoded.
    Compound,
}

/// Decodes the glyph stored at `range` inside the `glyf` table.
pub fn parse_glyph(glyf: &[u8], range: Range<usize>, glyph: u32) -> Result<RawGlyph> {
    if range.start > range.end || range.end > glyf.len() {
        return Err(FontError::malformed(
            Tag::LOCA,
            format!("glyph {glyph} spans {range:?} outside glyf ({} bytes)", glyf.len()),
        ));
    }
    if range.is_empty() {
        return Ok(RawGlyph::Empty);
    }

    let data = &glyf[range];
    let truncated = |_: std::io::Error| FontError::Truncated {
        what: "glyph outline",
    };
    let mut cur = Cursor::new(data);
    let contour_count = read_i16_be(&mut cur).map_err(truncated)?;
    skip(&mut cur, 8)?; // xMin, yMin, xMax, yMax

    match contour_count {
        0 => Err(FontError::ZeroContours { glyph }),
        n if n < 0 => Ok(RawGlyph::Compound),
        n => read_simple(&mut cur, n as usize, glyph)
            .map(RawGlyph::Simple)
            .map_err(|e| match e {
                FontError::Truncated { .. } => FontError::Truncated {
                    what: "glyph outline",
                },
                other => other,
            }),
    }
}

fn read_simple(cur: &mut Cursor<&[u8]>, contour_count: usize, glyph: u32) -> Result<SimpleOutline> {
    let mut end_points = Vec::with_capacity(contour_count);
    for _ in 0..contour_count {
        end_points.push(read_u16_be(cur)? as usize);
    }
    if end_points.windows(2).any(|w| w[1] <= w[0]) {
        return Err(FontError::malformed(
            Tag::GLYF,
            format!("glyph {glyph} has unordered contour end points"),
        ));
    }
    let point_count = end_points.last().map_or(0, |&e| e + 1);

    let instruction_len = read_u16_be(cur)?;
    skip(cur, instruction_len as i64)?;

    let mut flags = Vec::with_capacity(point_count);
    while flags.len() < point_count {
        let flag = read_u8(cur)?;
        flags.push(flag);
        if flag & REPEAT != 0 {
            let count = read_u8(cur)?;
            for _ in 0..count {
                flags.push(flag);
            }
        }
    }
    if flags.len() > point_count {
        return Err(FontError::malformed(
            Tag::GLYF,
            format!("glyph {glyph} flag run overflows {point_count} points"),
        ));
    }

    let xs = read_coordinates(cur, &flags, X_SHORT, X_SAME_OR_POS)?;
    let ys = read_coordinates(cur, &flags, Y_SHORT, Y_SAME_OR_POS)?;

    let mut contours = Vec::with_capacity(contour_count);
    let mut start = 0;
    for end in end_points {
        let contour = (start..=end)
            .map(|i| OutlinePoint {
                position: Vec2::new(xs[i] as f32, ys[i] as f32),
                on_curve: flags[i] & ON_CURVE != 0,
            })
            .collect();
        contours.push(contour);
        start = end + 1;
    }
    Ok(SimpleOutline { contours })
}

/// Coordinates are deltas from the previous point. A short delta is one
/// unsigned byte with the sign taken from `same_or_pos`; otherwise
/// `same_or_pos` means "unchanged" and a clear bit means an i16 follows.
fn read_coordinates(
    cur: &mut Cursor<&[u8]>,
    flags: &[u8],
    short: u8,
    same_or_pos: u8,
) -> Result<Vec<i32>> {
    let mut values = Vec::with_capacity(flags.len());
    let mut value = 0i32;
    for &flag in flags {
        if flag & short != 0 {
            let delta = read_u8(cur)? as i32;
            value += if flag & same_or_pos != 0 { delta } else { -delta };
        } else if flag & same_or_pos == 0 {
            value += read_i16_be(cur)? as i32;
        }
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_font::{encode_simple, square};

    fn parse(bytes: &[u8]) -> Result<RawGlyph> {
        parse_glyph(bytes, 0..bytes.len(), 1)
    }

    fn simple(bytes: &[u8]) -> SimpleOutline {
        match parse(bytes).unwrap() {
            RawGlyph::Simple(outline) => outline,
            other => panic!("expected a simple glyph, got {other:?}"),
        }
    }

    #[test]
    fn decodes_encoded_contours() {
        let contours = vec![
            square(0, 700),
            vec![(100, 100, true), (350, 600, false), (600, 100, true), (-300, -2, false)],
        ];
        let outline = simple(&encode_simple(&contours));
        assert_eq!(outline.contours.len(), 2);
        assert_eq!(outline.point_count(), 8);
        for (decoded, expected) in outline.contours.iter().zip(&contours) {
            for (p, &(x, y, on)) in decoded.iter().zip(expected) {
                assert_eq!(p.position, Vec2::new(x as f32, y as f32));
                assert_eq!(p.on_curve, on);
            }
        }
    }

    #[test]
    fn hand_encoded_flags() {
        #[rustfmt::skip]
        let bytes = [
            0, 1,             // one contour
            0, 0, 0, 0, 0, 0, 0, 0,
            0, 2,             // end point
            0, 1, 0xAA,       // instructions
            // on-curve, x short positive, y same, repeated twice more
            ON_CURVE | X_SHORT | X_SAME_OR_POS | Y_SAME_OR_POS | REPEAT, 2,
            10, 20, 30,       // x deltas
        ];
        let outline = simple(&bytes);
        let xs: Vec<f32> = outline.contours[0].iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![10.0, 30.0, 60.0]);
        assert!(outline.contours[0].iter().all(|p| p.on_curve && p.position.y == 0.0));
    }

    #[test]
    fn negative_short_and_long_deltas() {
        #[rustfmt::skip]
        let bytes = [
            0, 1,
            0, 0, 0, 0, 0, 0, 0, 0,
            0, 1,
            0, 0,
            X_SHORT | Y_SAME_OR_POS, // x -5, y same
            0,                       // x i16, y i16
            5,
            0x01, 0x00,              // x +256
            0xFF, 0x00,              // y -256
        ];
        let outline = simple(&bytes);
        let pts: Vec<Vec2> = outline.contours[0].iter().map(|p| p.position).collect();
        assert_eq!(pts, vec![Vec2::new(-5.0, 0.0), Vec2::new(251.0, -256.0)]);
        assert!(outline.contours[0].iter().all(|p| !p.on_curve));
    }

    #[test]
    fn zero_contours_is_a_format_error() {
        let bytes = [0u8; 10];
        assert!(matches!(parse(&bytes), Err(FontError::ZeroContours { glyph: 1 })));
    }

    #[test]
    fn compound_and_empty_glyphs() {
        let mut bytes = vec![0xFF, 0xFF];
        bytes.extend([0; 8]);
        assert_eq!(parse(&bytes).unwrap(), RawGlyph::Compound);
        assert_eq!(parse_glyph(&bytes, 4..4, 0).unwrap(), RawGlyph::Empty);
    }

    #[test]
    fn range_outside_table() {
        let bytes = [0u8; 4];
        assert!(matches!(
            parse_glyph(&bytes, 2..8, 3),
            Err(FontError::Malformed { table: Tag::LOCA, .. })
        ));
    }

    #[test]
    fn truncated_coordinates() {
        let contours = vec![square(0, 700)];
        let bytes = encode_simple(&contours);
        assert!(matches!(
            parse(&bytes[..bytes.len() - 1]),
            Err(FontError::Truncated { what: "glyph outline" })
        ));
    }

    #[test]
    fn unordered_end_points() {
        #[rustfmt::skip]
        let bytes = [
            0, 2,
            0, 0, 0, 0, 0, 0, 0, 0,
            0, 3, 0, 3,
            0, 0,
        ];
        assert!(matches!(parse(&bytes), Err(FontError::Malformed { table: Tag::GLYF, .. })));
    }
}
