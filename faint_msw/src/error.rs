//! Error taxonomy for the MSW codecs (§7): structural I/O, signature and
//! compatibility mismatches, and semantic violations, each its own
//! `quick_error!` enum, folded into one top-level [`Error`].
use quick_error::quick_error;

quick_error! {
    /// File-open, read, and seek failures that carry no format meaning.
    #[derive(Debug)]
    pub enum IoError {
        Io(err: std::io::Error) {
            from()
            display("I/O error: {}", err)
        }
        PrematureEof(what: &'static str) {
            display("premature end of file while reading {}", what)
        }
        SeekFailed(offset: u64) {
            display("failed to seek to offset {}", offset)
        }
    }
}

quick_error! {
    /// Signature, header, and container-layout mismatches.
    #[derive(Debug)]
    pub enum FormatError {
        BadSignature(found: u16) {
            display("not a BMP file: expected signature 0x4d42, found {:#06x}", found)
        }
        TruncatedHeader(expected: u32, found: u32) {
            display("truncated BITMAPINFOHEADER: expected {} bytes, header declares {}", expected, found)
        }
        UnsupportedCompression(compression: u32) {
            display("unsupported BMP compression {}; only BI_RGB is supported", compression)
        }
        UnsupportedBpp(bpp: u16) {
            display("unsupported bit depth {}bpp", bpp)
        }
        BadColorPlanes(planes: u16) {
            display("unsupported color plane count {}; only 1 is supported", planes)
        }
        ReservedNonZero(value: u16) {
            display("ICONDIR reserved field must be 0, found {}", value)
        }
        NoImages {
            display("icon/cursor file declares zero images")
        }
        UnknownImageType(value: u16) {
            display("unknown icon directory type {}; expected 1 (ICO) or 2 (CUR)", value)
        }
        IconIsCursor {
            display("expected an icon (.ico) but the file is a cursor (.cur)")
        }
        CursorIsIcon {
            display("expected a cursor (.cur) but the file is an icon (.ico)")
        }
        InvalidIconSize(width: i32, height: i32) {
            display("invalid icon/cursor frame size {}x{}", width, height)
        }
        UnsupportedPngEntry(index: usize) {
            display("icon/cursor entry {} is PNG-compressed, which this codec does not decode", index)
        }
    }
}

quick_error! {
    /// Value-range and cross-field consistency violations.
    #[derive(Debug)]
    pub enum SemanticError {
        PaletteIndexOutOfRange(index: usize, len: usize) {
            display("palette index {} is out of range for a {}-entry palette", index, len)
        }
        OversizedForIcon(width: u32, height: u32) {
            display("bitmap {}x{} exceeds the maximum icon/cursor size of 256x256", width, height)
        }
    }
}

quick_error! {
    /// The error type every `faint_msw` entry point returns.
    #[derive(Debug)]
    pub enum Error {
        Io(err: IoError) {
            from()
            display("{}", err)
        }
        Format(err: FormatError) {
            from()
            display("{}", err)
        }
        Semantic(err: SemanticError) {
            from()
            display("{}", err)
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(IoError::Io(err))
    }
}
