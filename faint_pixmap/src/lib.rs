//! The pixel substrate: an owned ARGB32 bitmap with explicit stride, an
//! 8-bit alpha/index mask, and the straight-alpha byte color model they're
//! built out of.
mod alpha;
mod bitmap;
mod color;
mod offsat;

pub use self::alpha::*;
pub use self::bitmap::*;
pub use self::color::*;
pub use self::offsat::*;
