//! Standalone BMP file read/write (§4.G, §6).
use std::io::{Read, Seek, SeekFrom, Write};

use faint_pixmap::Bitmap;
use faint_quantize::quantized;
use log::trace;

use crate::error::{Error, FormatError, IoError, SemanticError};
use crate::pixels::{
    grayscale_palette, read_24bpp, read_color_table, read_packed_indices, row_stride,
    write_24bpp, write_color_table, write_packed_indices,
};
use crate::types::{BitmapFileHeader, BitmapInfoHeader, BITMAPFILEHEADER_BYTES, BITMAPINFOHEADER_BYTES};

/// Pixel format `write_bmp` encodes into; `read_bmp` accepts 8/24/32bpp
/// `BI_RGB` regardless of which quality wrote the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapQuality {
    Color8Bit,
    Color24Bit,
    Gray8Bit,
}

/// Reads a standalone `.bmp` file. Only uncompressed (`BI_RGB`) 8/24/32bpp
/// is supported; 4bpp and RLE variants are not produced by this codec's
/// own writer and are rejected on read.
pub fn read_bmp(r: &mut (impl Read + Seek)) -> Result<Bitmap, Error> {
    let file_header = BitmapFileHeader::read(r)?;
    let info = BitmapInfoHeader::read(r)?;
    let width = info.width.unsigned_abs();
    let height = info.height.unsigned_abs();
    trace!("BMP: {}x{}, {}bpp, data at {}", width, height, info.bpp, file_header.data_offset);

    let palette = if info.bpp == 8 {
        let palette_colors = if info.palette_colors == 0 { 256 } else { info.palette_colors };
        Some(read_color_table(r, palette_colors as usize)?)
    } else {
        None
    };

    r.seek(SeekFrom::Start(u64::from(file_header.data_offset)))
        .map_err(|_| IoError::SeekFailed(u64::from(file_header.data_offset)))?;

    match info.bpp {
        8 => {
            let palette = palette.expect("8bpp BMP always reads a color table above");
            let indices = read_packed_indices(r, width, height, 8)?;
            let mut out = Bitmap::new(width, height);
            for y in 0..height as i32 {
                for x in 0..width as i32 {
                    let idx = indices.get_raw(x, y) as usize;
                    let c = palette.get(idx).ok_or(SemanticError::PaletteIndexOutOfRange(idx, palette.len()))?;
                    out.put_pixel_raw(x, y, c);
                }
            }
            Ok(out)
        }
        24 => read_24bpp(r, width, height),
        32 => crate::pixels::read_32bpp(r, width, height),
        bpp => Err(FormatError::UnsupportedBpp(bpp).into()),
    }
}

/// Writes `bmp` as a standalone `.bmp` file at the requested `quality`.
pub fn write_bmp(bmp: &Bitmap, quality: BitmapQuality, w: &mut impl Write) -> Result<(), Error> {
    let width = bmp.width();
    let height = bmp.height();
    let bpp = match quality {
        BitmapQuality::Color8Bit | BitmapQuality::Gray8Bit => 8,
        BitmapQuality::Color24Bit => 24,
    };
    let palette_bytes = if bpp == 8 { 256 * 4 } else { 0 };
    let data_offset = BITMAPFILEHEADER_BYTES + BITMAPINFOHEADER_BYTES + palette_bytes;
    let pixel_bytes = row_stride(bpp, width) as u32 * height;

    let file_header = BitmapFileHeader {
        file_type: crate::types::BMP_SIGNATURE,
        length: data_offset + pixel_bytes,
        reserved1: 0,
        reserved2: 0,
        data_offset,
    };
    let palette_colors = if bpp == 8 { 256 } else { 0 };
    let info = BitmapInfoHeader::new(width as i32, height as i32, bpp as u16, palette_colors);

    file_header.write(w)?;
    info.write(w)?;

    match quality {
        BitmapQuality::Color8Bit => {
            let (indices, palette) = quantized(bmp);
            trace!("BMP: 8-bit palette holds {} entries", palette.len());
            write_color_table(w, &palette)?;
            write_packed_indices(w, &indices, 8)?;
        }
        BitmapQuality::Gray8Bit => {
            let palette = grayscale_palette();
            write_color_table(w, &palette)?;
            let mut indices = faint_pixmap::AlphaMap::new(width, height);
            for y in 0..height as i32 {
                for x in 0..width as i32 {
                    let c = bmp.get_color_raw(x, y);
                    let gray = (u32::from(c.r) + u32::from(c.g) + u32::from(c.b)) / 3;
                    indices.set_raw(x, y, gray as u8);
                }
            }
            write_packed_indices(w, &indices, 8)?;
        }
        BitmapQuality::Color24Bit => {
            write_24bpp(w, bmp)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::color;

    #[test]
    fn bmp_24bit_round_trip_preserves_rgb() {
        let mut bmp = Bitmap::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                bmp.put_pixel_raw(x, y, color((x * 10) as u8, (y * 10) as u8, 5, 255));
            }
        }
        let mut buf = Vec::new();
        write_bmp(&bmp, BitmapQuality::Color24Bit, &mut buf).unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let back = read_bmp(&mut cursor).unwrap();
        assert_eq!(back.width(), 4);
        assert_eq!(back.height(), 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(bmp.get_color_raw(x, y), back.get_color_raw(x, y));
            }
        }
    }

    #[test]
    fn bmp_8bit_round_trip_on_small_palette() {
        let mut bmp = Bitmap::new_with_color(6, 6, color(0, 0, 0, 255));
        bmp.put_pixel_raw(0, 0, color(255, 255, 255, 255));
        let mut buf = Vec::new();
        write_bmp(&bmp, BitmapQuality::Color8Bit, &mut buf).unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let back = read_bmp(&mut cursor).unwrap();
        assert_eq!(back.get_color_raw(0, 0), color(255, 255, 255, 255));
        assert_eq!(back.get_color_raw(1, 1), color(0, 0, 0, 255));
    }

    #[test]
    fn bmp_grayscale_write_averages_channels() {
        let bmp = Bitmap::new_with_color(2, 2, color(30, 60, 90, 255));
        let mut buf = Vec::new();
        write_bmp(&bmp, BitmapQuality::Gray8Bit, &mut buf).unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let back = read_bmp(&mut cursor).unwrap();
        let c = back.get_color_raw(0, 0);
        assert_eq!((c.r, c.g, c.b), (60, 60, 60));
    }

    #[test]
    fn read_bmp_rejects_bad_signature() {
        let bytes = [0u8; 14];
        let mut cursor = std::io::Cursor::new(bytes);
        assert!(read_bmp(&mut cursor).is_err());
    }
}
