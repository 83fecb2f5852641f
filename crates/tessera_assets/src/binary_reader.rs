use std::io::{self, Read, Seek, SeekFrom};

/// Read a single byte from the cursor.
pub fn read_u8<R: Read>(reader: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read an unsigned 16-bit big-endian value from the cursor.
pub fn read_u16_be<R: Read>(reader: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

/// Read a signed 16-bit big-endian value.
pub fn read_i16_be<R: Read>(reader: &mut R) -> io::Result<i16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(i16::from_be_bytes(buf))
}

/// Read an unsigned 32-bit big-endian value.
pub fn read_u32_be<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Read a four byte table tag.
pub fn read_tag<R: Read>(reader: &mut R) -> io::Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Advance the cursor by `n` bytes without reading them.
pub fn skip<R: Seek>(reader: &mut R, n: i64) -> io::Result<()> {
    reader.seek(SeekFrom::Current(n))?;
    Ok(())
}

/// Read a big-endian u16 at `offset` in `slice`.
pub fn u16_at(slice: &[u8], offset: usize) -> io::Result<u16> {
    let mut cur = io::Cursor::new(slice);
    cur.seek(SeekFrom::Start(offset as u64))?;
    read_u16_be(&mut cur)
}

/// Read a big-endian i16 at `offset` in `slice`.
pub fn i16_at(slice: &[u8], offset: usize) -> io::Result<i16> {
    let mut cur = io::Cursor::new(slice);
    cur.seek(SeekFrom::Start(offset as u64))?;
    read_i16_be(&mut cur)
}
