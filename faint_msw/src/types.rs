//! On-disk structures for BMP/ICO/CUR (§4.G, §6). All integers are
//! little-endian; fields are serialized one at a time rather than cast
//! through a packed struct.
use std::io::{Read, Write};

use crate::error::{Error, FormatError, IoError};

pub const BMP_SIGNATURE: u16 = 0x4d42;
pub const BITMAPFILEHEADER_BYTES: u32 = 14;
pub const BITMAPINFOHEADER_BYTES: u32 = 40;
pub const ICONDIR_BYTES: u32 = 6;
pub const ICONDIRENTRY_BYTES: u32 = 16;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

fn read_u8(r: &mut impl Read, what: &'static str) -> Result<u8, Error> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf).map_err(|_| IoError::PrematureEof(what))?;
    Ok(buf[0])
}

fn read_u16(r: &mut impl Read, what: &'static str) -> Result<u16, Error> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf).map_err(|_| IoError::PrematureEof(what))?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32(r: &mut impl Read, what: &'static str) -> Result<u32, Error> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(|_| IoError::PrematureEof(what))?;
    Ok(u32::from_le_bytes(buf))
}

fn read_i32(r: &mut impl Read, what: &'static str) -> Result<i32, Error> {
    Ok(read_u32(r, what)? as i32)
}

fn write_u8(w: &mut impl Write, v: u8) -> Result<(), Error> {
    w.write_all(&[v]).map_err(IoError::Io)?;
    Ok(())
}

fn write_u16(w: &mut impl Write, v: u16) -> Result<(), Error> {
    w.write_all(&v.to_le_bytes()).map_err(IoError::Io)?;
    Ok(())
}

fn write_u32(w: &mut impl Write, v: u32) -> Result<(), Error> {
    w.write_all(&v.to_le_bytes()).map_err(IoError::Io)?;
    Ok(())
}

fn write_i32(w: &mut impl Write, v: i32) -> Result<(), Error> {
    write_u32(w, v as u32)
}

/// BMP compression method. Only `Rgb` is readable or writable by this codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Rgb,
    Rle8,
    Rle4,
    Bitfields,
    Jpeg,
    Png,
    AlphaBitfields,
}

impl Compression {
    fn from_u32(v: u32) -> Option<Self> {
        Some(match v {
            0 => Compression::Rgb,
            1 => Compression::Rle8,
            2 => Compression::Rle4,
            3 => Compression::Bitfields,
            4 => Compression::Jpeg,
            5 => Compression::Png,
            6 => Compression::AlphaBitfields,
            _ => return None,
        })
    }

    fn to_u32(self) -> u32 {
        match self {
            Compression::Rgb => 0,
            Compression::Rle8 => 1,
            Compression::Rle4 => 2,
            Compression::Bitfields => 3,
            Compression::Jpeg => 4,
            Compression::Png => 5,
            Compression::AlphaBitfields => 6,
        }
    }
}

/// The 14-byte BMP file header.
#[derive(Debug, Clone, Copy)]
pub struct BitmapFileHeader {
    pub file_type: u16,
    pub length: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub data_offset: u32,
}

impl BitmapFileHeader {
    pub fn read(r: &mut impl Read) -> Result<Self, Error> {
        let file_type = read_u16(r, "BitmapFileHeader")?;
        if file_type != BMP_SIGNATURE {
            return Err(FormatError::BadSignature(file_type).into());
        }
        let length = read_u32(r, "BitmapFileHeader")?;
        let reserved1 = read_u16(r, "BitmapFileHeader")?;
        let reserved2 = read_u16(r, "BitmapFileHeader")?;
        let data_offset = read_u32(r, "BitmapFileHeader")?;
        Ok(Self { file_type, length, reserved1, reserved2, data_offset })
    }

    pub fn write(&self, w: &mut impl Write) -> Result<(), Error> {
        write_u16(w, self.file_type)?;
        write_u32(w, self.length)?;
        write_u16(w, self.reserved1)?;
        write_u16(w, self.reserved2)?;
        write_u32(w, self.data_offset)?;
        Ok(())
    }
}

/// The 40-byte `BITMAPINFOHEADER`.
#[derive(Debug, Clone, Copy)]
pub struct BitmapInfoHeader {
    pub header_len: u32,
    pub width: i32,
    pub height: i32,
    pub color_planes: u16,
    pub bpp: u16,
    pub compression: u32,
    pub raw_data_size: u32,
    pub horizontal_resolution: i32,
    pub vertical_resolution: i32,
    pub palette_colors: u32,
    pub important_colors: u32,
}

impl BitmapInfoHeader {
    pub fn new(width: i32, height: i32, bpp: u16, palette_colors: u32) -> Self {
        Self {
            header_len: BITMAPINFOHEADER_BYTES,
            width,
            height,
            color_planes: 1,
            bpp,
            compression: Compression::Rgb.to_u32(),
            raw_data_size: 0,
            horizontal_resolution: 1,
            vertical_resolution: 1,
            palette_colors,
            important_colors: 0,
        }
    }

    pub fn read(r: &mut impl Read) -> Result<Self, Error> {
        let header_len = read_u32(r, "BitmapInfoHeader")?;
        if header_len != BITMAPINFOHEADER_BYTES {
            return Err(FormatError::TruncatedHeader(BITMAPINFOHEADER_BYTES, header_len).into());
        }
        let width = read_i32(r, "BitmapInfoHeader")?;
        let height = read_i32(r, "BitmapInfoHeader")?;
        let color_planes = read_u16(r, "BitmapInfoHeader")?;
        if color_planes != 1 {
            return Err(FormatError::BadColorPlanes(color_planes).into());
        }
        let bpp = read_u16(r, "BitmapInfoHeader")?;
        let compression = read_u32(r, "BitmapInfoHeader")?;
        if Compression::from_u32(compression) != Some(Compression::Rgb) {
            return Err(FormatError::UnsupportedCompression(compression).into());
        }
        let raw_data_size = read_u32(r, "BitmapInfoHeader")?;
        let horizontal_resolution = read_i32(r, "BitmapInfoHeader")?;
        let vertical_resolution = read_i32(r, "BitmapInfoHeader")?;
        let palette_colors = read_u32(r, "BitmapInfoHeader")?;
        let important_colors = read_u32(r, "BitmapInfoHeader")?;
        Ok(Self {
            header_len,
            width,
            height,
            color_planes,
            bpp,
            compression,
            raw_data_size,
            horizontal_resolution,
            vertical_resolution,
            palette_colors,
            important_colors,
        })
    }

    pub fn write(&self, w: &mut impl Write) -> Result<(), Error> {
        write_u32(w, self.header_len)?;
        write_i32(w, self.width)?;
        write_i32(w, self.height)?;
        write_u16(w, self.color_planes)?;
        write_u16(w, self.bpp)?;
        write_u32(w, self.compression)?;
        write_u32(w, self.raw_data_size)?;
        write_i32(w, self.horizontal_resolution)?;
        write_i32(w, self.vertical_resolution)?;
        write_u32(w, self.palette_colors)?;
        write_u32(w, self.important_colors)?;
        Ok(())
    }
}

/// Which container a `IconDir` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconType {
    Ico,
    Cur,
}

impl IconType {
    fn from_u16(v: u16) -> Option<Self> {
        match v {
            1 => Some(IconType::Ico),
            2 => Some(IconType::Cur),
            _ => None,
        }
    }

    fn to_u16(self) -> u16 {
        match self {
            IconType::Ico => 1,
            IconType::Cur => 2,
        }
    }
}

/// The 6-byte `IconDir` at the start of an ICO or CUR file.
#[derive(Debug, Clone, Copy)]
pub struct IconDir {
    pub image_type: IconType,
    pub image_count: u16,
}

impl IconDir {
    pub fn new(image_type: IconType, image_count: u16) -> Self {
        Self { image_type, image_count }
    }

    pub fn read(r: &mut impl Read, expected: IconType) -> Result<Self, Error> {
        let reserved = read_u16(r, "IconDir")?;
        if reserved != 0 {
            return Err(FormatError::ReservedNonZero(reserved).into());
        }
        let type_value = read_u16(r, "IconDir")?;
        let image_type = match IconType::from_u16(type_value) {
            Some(t) => t,
            None => return Err(FormatError::UnknownImageType(type_value).into()),
        };
        if image_type != expected {
            return Err(match expected {
                IconType::Ico => FormatError::IconIsCursor,
                IconType::Cur => FormatError::CursorIsIcon,
            }
            .into());
        }
        let image_count = read_u16(r, "IconDir")?;
        if image_count == 0 {
            return Err(FormatError::NoImages.into());
        }
        Ok(Self { image_type, image_count })
    }

    pub fn write(&self, w: &mut impl Write) -> Result<(), Error> {
        write_u16(w, 0)?;
        write_u16(w, self.image_type.to_u16())?;
        write_u16(w, self.image_count)?;
        Ok(())
    }
}

/// One 16-byte `IconDirEntry`. `width`/`height` of 0 mean 256. The two
/// half-words that hold color planes/bpp for an icon hold the cursor
/// hot-spot (x, y) instead, for a `.cur`.
#[derive(Debug, Clone, Copy)]
pub struct IconDirEntry {
    pub width: u8,
    pub height: u8,
    pub color_count: u8,
    pub reserved: u8,
    pub color_planes_or_hotspot_x: u16,
    pub bpp_or_hotspot_y: u16,
    pub bytes: u32,
    pub offset: u32,
}

impl IconDirEntry {
    pub fn read(r: &mut impl Read) -> Result<Self, Error> {
        let width = read_u8(r, "IconDirEntry")?;
        let height = read_u8(r, "IconDirEntry")?;
        let color_count = read_u8(r, "IconDirEntry")?;
        let reserved = read_u8(r, "IconDirEntry")?;
        let color_planes_or_hotspot_x = read_u16(r, "IconDirEntry")?;
        let bpp_or_hotspot_y = read_u16(r, "IconDirEntry")?;
        let bytes = read_u32(r, "IconDirEntry")?;
        let offset = read_u32(r, "IconDirEntry")?;
        Ok(Self {
            width,
            height,
            color_count,
            reserved,
            color_planes_or_hotspot_x,
            bpp_or_hotspot_y,
            bytes,
            offset,
        })
    }

    pub fn write(&self, w: &mut impl Write) -> Result<(), Error> {
        write_u8(w, self.width)?;
        write_u8(w, self.height)?;
        write_u8(w, self.color_count)?;
        write_u8(w, self.reserved)?;
        write_u16(w, self.color_planes_or_hotspot_x)?;
        write_u16(w, self.bpp_or_hotspot_y)?;
        write_u32(w, self.bytes)?;
        write_u32(w, self.offset)?;
        Ok(())
    }

    /// The real frame size: a stored 0 means 256.
    pub fn size(&self) -> (u32, u32) {
        let w = if self.width == 0 { 256 } else { u32::from(self.width) };
        let h = if self.height == 0 { 256 } else { u32::from(self.height) };
        (w, h)
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = if width == 256 { 0 } else { width as u8 };
        self.height = if height == 256 { 0 } else { height as u8 };
    }

    pub fn hot_spot(&self) -> (i32, i32) {
        (i32::from(self.color_planes_or_hotspot_x), i32::from(self.bpp_or_hotspot_y))
    }

    pub fn set_hot_spot(&mut self, x: i32, y: i32) {
        self.color_planes_or_hotspot_x = x as u16;
        self.bpp_or_hotspot_y = y as u16;
    }
}
