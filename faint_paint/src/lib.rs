//! Paint dispatch (§4.H): the `Paint` variant (solid color / pattern /
//! gradient), the `PixelSource` functor it's dispatched to, and the
//! brush/grid auxiliary types that sit alongside it.
mod brush;
mod grid;
mod paint;
mod pixel_source;

pub use self::brush::*;
pub use self::grid::*;
pub use self::paint::*;
pub use self::pixel_source::*;
