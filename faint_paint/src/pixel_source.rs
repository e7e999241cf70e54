use faint_geom::Rect;
use faint_pixmap::Color;

use crate::{Gradient, Paint, Pattern};

/// A per-pixel color functor: maps `(x, y)` to the color a drawing
/// primitive should write there.
///
/// Every drawing API that takes a [`Paint`] dispatches once, at the top
/// level, into exactly one of [`ColorFromColor`], [`ColorFromPattern`], or
/// [`ColorFromGradient`], then runs a single generic drawing routine
/// parameterized over `impl PixelSource` — monomorphized per call site
/// rather than tested per pixel.
pub trait PixelSource {
    fn at(&self, x: i32, y: i32) -> Color;
}

#[derive(Debug, Clone, Copy)]
pub struct ColorFromColor(pub Color);

impl PixelSource for ColorFromColor {
    #[inline]
    fn at(&self, _x: i32, _y: i32) -> Color {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct ColorFromPattern<'a>(pub &'a Pattern);

impl<'a> PixelSource for ColorFromPattern<'a> {
    #[inline]
    fn at(&self, x: i32, y: i32) -> Color {
        self.0.sample(x, y)
    }
}

#[derive(Debug, Clone)]
pub struct ColorFromGradient<'a> {
    pub gradient: &'a Gradient,
    pub bounding_rect: Rect,
}

impl<'a> PixelSource for ColorFromGradient<'a> {
    fn at(&self, x: i32, y: i32) -> Color {
        let p = faint_geom::Point::new(f64::from(x), f64::from(y));
        match self.gradient {
            Gradient::Linear(g) => g.at(p, self.bounding_rect),
            Gradient::Radial(g) => g.at(p),
        }
    }
}

/// Dispatch `paint` to the matching [`PixelSource`] and invoke `f` with
/// it. `bounding_rect` is only consulted for [`Paint::Gradient`].
pub fn with_pixel_source<R>(
    paint: &Paint,
    bounding_rect: Rect,
    f: impl FnOnce(&dyn PixelSource) -> R,
) -> R {
    match paint {
        Paint::Color(c) => f(&ColorFromColor(*c)),
        Paint::Pattern(p) => f(&ColorFromPattern(p)),
        Paint::Gradient(g) => f(&ColorFromGradient {
            gradient: g,
            bounding_rect,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_geom::{Point, Size};

    #[test]
    fn color_source_is_constant() {
        let src = ColorFromColor(Color::new(1, 2, 3, 4));
        assert_eq!(src.at(0, 0), Color::new(1, 2, 3, 4));
        assert_eq!(src.at(100, 100), Color::new(1, 2, 3, 4));
    }

    #[test]
    fn dispatch_picks_matching_functor() {
        let paint = Paint::Color(Color::new(9, 9, 9, 255));
        let bounds = Rect::new(Point::new(0.0, 0.0), Size::new(1.0, 1.0));
        let c = with_pixel_source(&paint, bounds, |src| src.at(0, 0));
        assert_eq!(c, Color::new(9, 9, 9, 255));
    }
}
