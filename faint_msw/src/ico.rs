//! ICO/CUR container read/write (§4.G, §6).
use std::io::{Read, Seek, SeekFrom, Write};

use faint_pixmap::Bitmap;
use log::trace;

use crate::error::{Error, FormatError, IoError, SemanticError};
use crate::pixels::{
    and_map_len, masked, read_and_mask, read_color_table, read_packed_indices,
    write_opaque_and_mask, write_32bpp,
};
use crate::types::{
    BitmapInfoHeader, IconDir, IconDirEntry, IconType, BITMAPINFOHEADER_BYTES, ICONDIRENTRY_BYTES,
    ICONDIR_BYTES, PNG_SIGNATURE,
};

const MAX_ICON_SIZE: u32 = 256;

fn peek_is_png(r: &mut (impl Read + Seek)) -> Result<bool, Error> {
    let mut sig = [0u8; 8];
    let start = r.stream_position().map_err(IoError::Io)?;
    match r.read_exact(&mut sig) {
        Ok(()) => {
            r.seek(SeekFrom::Start(start)).map_err(IoError::Io)?;
            Ok(sig == PNG_SIGNATURE)
        }
        Err(_) => {
            r.seek(SeekFrom::Start(start)).map_err(IoError::Io)?;
            Ok(false)
        }
    }
}

fn read_image_entry(r: &mut (impl Read + Seek), entry: &IconDirEntry, index: usize) -> Result<Bitmap, Error> {
    r.seek(SeekFrom::Start(u64::from(entry.offset))).map_err(|_| IoError::SeekFailed(u64::from(entry.offset)))?;

    if peek_is_png(r)? {
        return Err(FormatError::UnsupportedPngEntry(index).into());
    }

    let info = BitmapInfoHeader::read(r)?;
    let width = info.width.unsigned_abs();
    // The DIB height is doubled to reserve room for the trailing AND mask.
    let height = info.height.unsigned_abs() / 2;

    match info.bpp {
        1 => {
            let palette = read_color_table(r, 2)?;
            let indices = read_packed_indices(r, width, height, 1)?;
            let xor = faint_quantize::bitmap_from_indexed_colors(&indices, &palette);
            let mask = read_and_mask(r, width, height)?;
            Ok(masked(&xor, &mask))
        }
        4 => {
            let palette = read_color_table(r, 16)?;
            let indices = read_packed_indices(r, width, height, 4)?;
            let xor = faint_quantize::bitmap_from_indexed_colors(&indices, &palette);
            let mask = read_and_mask(r, width, height)?;
            Ok(masked(&xor, &mask))
        }
        8 => {
            let palette = read_color_table(r, 256)?;
            let indices = read_packed_indices(r, width, height, 8)?;
            let xor = faint_quantize::bitmap_from_indexed_colors(&indices, &palette);
            let mask = read_and_mask(r, width, height)?;
            Ok(masked(&xor, &mask))
        }
        32 => crate::pixels::read_32bpp(r, width, height),
        bpp => Err(FormatError::UnsupportedBpp(bpp).into()),
    }
}

fn read_container(r: &mut (impl Read + Seek), expected: IconType) -> Result<Vec<(Bitmap, IconDirEntry)>, Error> {
    let dir = IconDir::read(r, expected)?;
    let mut entries = Vec::with_capacity(dir.image_count as usize);
    for _ in 0..dir.image_count {
        entries.push(IconDirEntry::read(r)?);
    }

    let mut out = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let (w, h) = entry.size();
        if w == 0 || h == 0 {
            return Err(FormatError::InvalidIconSize(w as i32, h as i32).into());
        }
        trace!("{:?}: entry {} is {}x{}", expected, index, w, h);
        out.push((read_image_entry(r, entry, index)?, *entry));
    }
    Ok(out)
}

/// Reads every frame of an `.ico` file.
pub fn read_ico(r: &mut (impl Read + Seek)) -> Result<Vec<Bitmap>, Error> {
    Ok(read_container(r, IconType::Ico)?.into_iter().map(|(bmp, _)| bmp).collect())
}

/// Reads every frame of a `.cur` file, paired with its hot spot.
pub fn read_cur(r: &mut (impl Read + Seek)) -> Result<Vec<(Bitmap, (i32, i32))>, Error> {
    Ok(read_container(r, IconType::Cur)?
        .into_iter()
        .map(|(bmp, entry)| (bmp, entry.hot_spot()))
        .collect())
}

fn write_container(
    image_type: IconType,
    frames: &[(&Bitmap, (i32, i32))],
    w: &mut impl Write,
) -> Result<(), Error> {
    let dir = IconDir::new(image_type, frames.len() as u16);
    dir.write(w)?;

    let header_bytes = ICONDIR_BYTES + ICONDIRENTRY_BYTES * frames.len() as u32;
    let mut entries = Vec::with_capacity(frames.len());
    let mut offset = header_bytes;
    for (bmp, hot_spot) in frames {
        let width = bmp.width();
        let height = bmp.height();
        if width > MAX_ICON_SIZE || height > MAX_ICON_SIZE {
            return Err(SemanticError::OversizedForIcon(width, height).into());
        }
        let mut entry = IconDirEntry {
            width: 0,
            height: 0,
            color_count: 0,
            reserved: 0,
            color_planes_or_hotspot_x: 0,
            bpp_or_hotspot_y: 0,
            bytes: width * height * 4 + and_map_len(width, height) as u32 + BITMAPINFOHEADER_BYTES,
            offset,
        };
        entry.set_size(width, height);
        match image_type {
            IconType::Ico => {}
            IconType::Cur => entry.set_hot_spot(hot_spot.0, hot_spot.1),
        }
        offset += entry.bytes;
        entries.push(entry);
    }

    for entry in &entries {
        entry.write(w)?;
    }
    for i in 0..frames.len() {
        let bmp = frames[i].0;
        let entry = &entries[i];
        let width = bmp.width();
        let height = bmp.height();
        let (_, declared_h) = entry.size();
        let info = BitmapInfoHeader::new(width as i32, (declared_h * 2) as i32, 32, 0);
        info.write(w)?;
        write_32bpp(w, bmp)?;
        write_opaque_and_mask(w, width, height)?;
    }
    Ok(())
}

/// Writes `bitmaps` as a 32bpp BGRA `.ico` file (the source always saves
/// icons this way, regardless of what bit depth it read).
pub fn write_ico(bitmaps: &[Bitmap], w: &mut impl Write) -> Result<(), Error> {
    let frames: Vec<_> = bitmaps.iter().map(|b| (b, (0, 0))).collect();
    write_container(IconType::Ico, &frames, w)
}

/// Writes `bitmaps` with matching `hotspots` as a `.cur` file.
pub fn write_cur(bitmaps: &[Bitmap], hotspots: &[(i32, i32)], w: &mut impl Write) -> Result<(), Error> {
    let frames: Vec<_> = bitmaps.iter().zip(hotspots.iter().copied()).collect();
    write_container(IconType::Cur, &frames, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::color;

    #[test]
    fn ico_round_trip_preserves_pixels() {
        let bmp = Bitmap::new_with_color(16, 16, color(10, 20, 30, 255));
        let mut buf = Vec::new();
        write_ico(&[bmp], &mut buf).unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let frames = read_ico(&mut cursor).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].width(), 16);
        assert_eq!(frames[0].get_color_raw(0, 0), color(10, 20, 30, 255));
    }

    #[test]
    fn cur_round_trip_preserves_hot_spot() {
        let bmp = Bitmap::new_with_color(8, 8, color(1, 2, 3, 255));
        let mut buf = Vec::new();
        write_cur(&[bmp], &[(3, 5)], &mut buf).unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let frames = read_cur(&mut cursor).unwrap();
        assert_eq!(frames[0].1, (3, 5));
    }

    #[test]
    fn read_ico_rejects_a_cur_file() {
        let bmp = Bitmap::new_with_color(4, 4, color(0, 0, 0, 255));
        let mut buf = Vec::new();
        write_cur(&[bmp], &[(0, 0)], &mut buf).unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        assert!(read_ico(&mut cursor).is_err());
    }

    #[test]
    fn write_ico_rejects_oversized_frame() {
        let bmp = Bitmap::new_with_color(300, 300, color(0, 0, 0, 255));
        let mut buf = Vec::new();
        assert!(write_ico(&[bmp], &mut buf).is_err());
    }
}
