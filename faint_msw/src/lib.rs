//! Bit-exact MSW BMP/ICO/CUR parsers and writers (§4.G).
mod bmp;
mod error;
mod ico;
mod pixels;
mod types;

pub use bmp::{read_bmp, write_bmp, BitmapQuality};
pub use error::{Error, FormatError, IoError, SemanticError};
pub use ico::{read_cur, read_ico, write_cur, write_ico};
