//! Row stride, palette, and packed-pixel encode/decode shared by the BMP
//! and ICO/CUR readers and writers (§4.G).
use std::io::{Read, Write};

use faint_pixmap::{color, AlphaMap, Bitmap, Color, ColorMap};

use crate::error::{Error, IoError};

/// `stride(bpp,w) = ((bpp*w + 31) / 32) * 4`, the 4-byte row alignment every
/// BMP-family pixel array uses.
pub fn row_stride(bpp: u32, width: u32) -> usize {
    (((bpp * width + 31) / 32) * 4) as usize
}

/// Stride of a 1-bit-per-pixel AND mask, which pads independently of the
/// color data's bit depth.
pub fn and_map_stride(width: u32) -> usize {
    if width % 32 == 0 {
        (width / 8) as usize
    } else {
        4 * (width / 32 + 1) as usize
    }
}

pub fn and_map_len(width: u32, height: u32) -> usize {
    and_map_stride(width) * height as usize
}

/// Fully opaque white with alpha forced to transparent; painted wherever an
/// ICO/CUR AND mask bit is set.
fn color_transparent_white() -> Color {
    color(255, 255, 255, 0)
}

fn fill_row(r: &mut impl Read, stride: usize, what: &'static str) -> Result<Vec<u8>, Error> {
    let mut buf = vec![0u8; stride];
    r.read_exact(&mut buf).map_err(|_| IoError::PrematureEof(what))?;
    Ok(buf)
}

/// Reads a BGR0-packed color table of `count` entries (as used by 8-bit BMP
/// palettes and 1/4-bit ICO color tables).
pub fn read_color_table(r: &mut impl Read, count: usize) -> Result<ColorMap, Error> {
    let mut palette = ColorMap::with_capacity(count);
    for _ in 0..count {
        let mut entry = [0u8; 4];
        r.read_exact(&mut entry).map_err(|_| IoError::PrematureEof("color table"))?;
        palette.push(color(entry[2], entry[1], entry[0], 255));
    }
    Ok(palette)
}

/// Writes a palette as a 256-entry BGR0 table, zero-filling any entries
/// beyond `palette.len()`.
pub fn write_color_table(w: &mut impl Write, palette: &ColorMap) -> Result<(), Error> {
    for i in 0..256 {
        let c = palette.get(i).unwrap_or(faint_pixmap::BLACK);
        w.write_all(&[c.b, c.g, c.r, 0]).map_err(IoError::Io)?;
    }
    Ok(())
}

/// A 256-entry `(i,i,i)` grayscale ramp, used for `GRAY_8BIT` BMP writes.
pub fn grayscale_palette() -> ColorMap {
    let mut palette = ColorMap::with_capacity(256);
    for i in 0..256u16 {
        let v = i as u8;
        palette.push(color(v, v, v, 255));
    }
    palette
}

/// Reads `width*height` palette indices packed `bpp` bits per sample
/// (`bpp` ∈ {1, 4, 8}), bottom-up, each row padded to a 4-byte stride.
pub fn read_packed_indices(r: &mut impl Read, width: u32, height: u32, bpp: u32) -> Result<AlphaMap, Error> {
    let stride = row_stride(bpp, width);
    let samples_per_byte = 8 / bpp;
    let mut out = AlphaMap::new(width, height);
    for row in 0..height {
        let buf = fill_row(r, stride, "packed pixel row")?;
        let y = (height - 1 - row) as i32;
        for x in 0..width {
            let byte = buf[(x / samples_per_byte) as usize];
            let shift = 8 - bpp - (x % samples_per_byte) * bpp;
            let mask = (1u32 << bpp) - 1;
            let value = (u32::from(byte) >> shift) & mask;
            out.set_raw(x as i32, y, value as u8);
        }
    }
    Ok(out)
}

/// Writes `indices` packed `bpp` bits per sample, bottom-up, stride-padded.
pub fn write_packed_indices(w: &mut impl Write, indices: &AlphaMap, bpp: u32) -> Result<(), Error> {
    let width = indices.width();
    let height = indices.height();
    let stride = row_stride(bpp, width);
    let samples_per_byte = 8 / bpp;
    for row in 0..height {
        let y = (height - 1 - row) as i32;
        let mut buf = vec![0u8; stride];
        for x in 0..width {
            let value = indices.get_raw(x as i32, y) as u32;
            let shift = 8 - bpp - (x % samples_per_byte) * bpp;
            buf[(x / samples_per_byte) as usize] |= (value << shift) as u8;
        }
        w.write_all(&buf).map_err(IoError::Io)?;
    }
    Ok(())
}

/// Reads a 24bpp BGR pixel array, bottom-up, stride-padded; alpha is forced
/// to opaque (24bpp carries none).
pub fn read_24bpp(r: &mut impl Read, width: u32, height: u32) -> Result<Bitmap, Error> {
    let stride = row_stride(24, width);
    let mut out = Bitmap::new(width, height);
    for row in 0..height {
        let buf = fill_row(r, stride, "24bpp pixel row")?;
        let y = (height - 1 - row) as i32;
        for x in 0..width as usize {
            let px = &buf[x * 3..x * 3 + 3];
            out.put_pixel_raw(x as i32, y, color(px[2], px[1], px[0], 255));
        }
    }
    Ok(out)
}

pub fn write_24bpp(w: &mut impl Write, bmp: &Bitmap) -> Result<(), Error> {
    let width = bmp.width();
    let height = bmp.height();
    let stride = row_stride(24, width);
    for row in 0..height {
        let y = (height - 1 - row) as i32;
        let mut buf = vec![0u8; stride];
        for x in 0..width as usize {
            let c = bmp.get_color_raw(x as i32, y);
            buf[x * 3] = c.b;
            buf[x * 3 + 1] = c.g;
            buf[x * 3 + 2] = c.r;
        }
        w.write_all(&buf).map_err(IoError::Io)?;
    }
    Ok(())
}

/// Reads a 32bpp BGRA pixel array, bottom-up (always 4-byte aligned, no
/// padding needed).
pub fn read_32bpp(r: &mut impl Read, width: u32, height: u32) -> Result<Bitmap, Error> {
    let mut out = Bitmap::new(width, height);
    for row in 0..height {
        let buf = fill_row(r, width as usize * 4, "32bpp pixel row")?;
        let y = (height - 1 - row) as i32;
        for x in 0..width as usize {
            let px = &buf[x * 4..x * 4 + 4];
            out.put_pixel_raw(x as i32, y, color(px[2], px[1], px[0], px[3]));
        }
    }
    Ok(out)
}

pub fn write_32bpp(w: &mut impl Write, bmp: &Bitmap) -> Result<(), Error> {
    let width = bmp.width();
    let height = bmp.height();
    for row in 0..height {
        let y = (height - 1 - row) as i32;
        let mut buf = vec![0u8; width as usize * 4];
        for x in 0..width as usize {
            let c = bmp.get_color_raw(x as i32, y);
            buf[x * 4] = c.b;
            buf[x * 4 + 1] = c.g;
            buf[x * 4 + 2] = c.r;
            buf[x * 4 + 3] = c.a;
        }
        w.write_all(&buf).map_err(IoError::Io)?;
    }
    Ok(())
}

/// Reads a 1bpp AND mask: `true` marks a pixel that `masked` will make
/// transparent.
pub fn read_and_mask(r: &mut impl Read, width: u32, height: u32) -> Result<Vec<bool>, Error> {
    let stride = and_map_stride(width);
    let mut out = vec![false; (width * height) as usize];
    for row in 0..height {
        let buf = fill_row(r, stride, "AND mask row")?;
        let y = height - 1 - row;
        for x in 0..width {
            let byte = buf[(x / 8) as usize];
            let bit = (byte >> (7 - (x % 8))) & 1;
            out[(y * width + x) as usize] = bit == 1;
        }
    }
    Ok(out)
}

/// Writes an all-opaque (all-`0xff`) AND mask, matching the source's
/// icon/cursor save path: the alpha channel already carries transparency.
pub fn write_opaque_and_mask(w: &mut impl Write, width: u32, height: u32) -> Result<(), Error> {
    let stride = and_map_stride(width);
    let row = vec![0xffu8; stride];
    for _ in 0..height {
        w.write_all(&row).map_err(IoError::Io)?;
    }
    Ok(())
}

/// Overlays `color_transparent_white()` wherever `mask[y*w+x]` is set.
pub fn masked(bmp: &Bitmap, mask: &[bool]) -> Bitmap {
    let width = bmp.width();
    let height = bmp.height();
    let mut out = bmp.deep_clone();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if mask[(y as u32 * width + x as u32) as usize] {
                out.put_pixel_raw(x, y, color_transparent_white());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_stride_rounds_up_to_4_bytes() {
        assert_eq!(row_stride(24, 1), 4);
        assert_eq!(row_stride(8, 4), 4);
        assert_eq!(row_stride(8, 5), 8);
        assert_eq!(row_stride(1, 1), 4);
        assert_eq!(row_stride(32, 3), 12);
    }

    #[test]
    fn and_map_stride_matches_word_alignment() {
        assert_eq!(and_map_stride(32), 4);
        assert_eq!(and_map_stride(1), 4);
        assert_eq!(and_map_stride(64), 8);
    }

    #[test]
    fn packed_indices_round_trip_at_each_supported_depth() {
        for bpp in [1u32, 4, 8] {
            let width = 9;
            let height = 3;
            let mut indices = AlphaMap::new(width, height);
            let max = (1u32 << bpp) - 1;
            for y in 0..height as i32 {
                for x in 0..width as i32 {
                    indices.set_raw(x, y, ((x + y) as u32 % (max + 1)) as u8);
                }
            }
            let mut buf = Vec::new();
            write_packed_indices(&mut buf, &indices, bpp).unwrap();
            let mut cursor = std::io::Cursor::new(buf);
            let back = read_packed_indices(&mut cursor, width, height, bpp).unwrap();
            for y in 0..height as i32 {
                for x in 0..width as i32 {
                    assert_eq!(indices.get_raw(x, y), back.get_raw(x, y), "bpp={}", bpp);
                }
            }
        }
    }

    #[test]
    fn pixel_24bpp_round_trips() {
        let bmp = Bitmap::new_with_color(5, 3, color(10, 20, 30, 255));
        let mut buf = Vec::new();
        write_24bpp(&mut buf, &bmp).unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let back = read_24bpp(&mut cursor, 5, 3).unwrap();
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(bmp.get_color_raw(x, y), back.get_color_raw(x, y));
            }
        }
    }

    #[test]
    fn pixel_32bpp_round_trips_including_alpha() {
        let bmp = Bitmap::new_with_color(4, 2, color(1, 2, 3, 128));
        let mut buf = Vec::new();
        write_32bpp(&mut buf, &bmp).unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let back = read_32bpp(&mut cursor, 4, 2).unwrap();
        assert_eq!(bmp.get_color_raw(0, 0), back.get_color_raw(0, 0));
    }

    #[test]
    fn masked_pixels_become_transparent_white() {
        let bmp = Bitmap::new_with_color(2, 2, color(10, 20, 30, 255));
        let mask = vec![true, false, false, false];
        let out = masked(&bmp, &mask);
        assert_eq!(out.get_color_raw(0, 0), color_transparent_white());
        assert_eq!(out.get_color_raw(1, 0), color(10, 20, 30, 255));
    }
}
