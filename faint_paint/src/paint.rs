use std::sync::Arc;

use faint_geom::{IntPoint, Radian, Rect};
use faint_pixmap::{Bitmap, Color};

/// A bitmap sampled with modulo-wrap addressing, anchored at a point.
///
/// The bitmap is reference-counted rather than owned outright: the same
/// pattern is typically reused across many drawing calls, and `Bitmap`
/// being move-only (see `faint_pixmap::Bitmap`) means sharing it requires
/// an explicit `Arc`, per the source's use of a `shared_ptr` here.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub bitmap: Arc<Bitmap>,
    pub anchor: IntPoint,
}

impl Pattern {
    pub fn new(bitmap: Arc<Bitmap>, anchor: IntPoint) -> Self {
        Self { bitmap, anchor }
    }

    /// Sample the pattern at `(x, y)`, wrapping modulo the bitmap's size.
    pub fn sample(&self, x: i32, y: i32) -> Color {
        let w = self.bitmap.width() as i32;
        let h = self.bitmap.height() as i32;
        let sx = (x + self.anchor.x).rem_euclid(w);
        let sy = (y + self.anchor.y).rem_euclid(h);
        self.bitmap.get_color_raw(sx, sy)
    }
}

/// One stop of a gradient: a position in `[0, 1]` and the color there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// A linear gradient: color stops projected along `angle`.
#[derive(Debug, Clone)]
pub struct LinearGradient {
    pub stops: Vec<ColorStop>,
    pub angle: Radian,
}

/// A radial gradient: color stops projected along the distance from
/// `focal` normalized by `radii`, centered at `center`.
#[derive(Debug, Clone)]
pub struct RadialGradient {
    pub stops: Vec<ColorStop>,
    pub center: faint_geom::Point,
    pub focal: faint_geom::Point,
    pub radii: faint_geom::Size,
}

fn sample_stops(stops: &[ColorStop], t: f64) -> Color {
    if stops.is_empty() {
        return Color::new(0, 0, 0, 0);
    }
    let t = t.max(0.0).min(1.0);
    if t <= stops[0].offset {
        return stops[0].color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.offset && t <= b.offset {
            let span = b.offset - a.offset;
            let frac = if span.abs() < 1e-12 { 0.0 } else { (t - a.offset) / span };
            return lerp_color(a.color, b.color, frac);
        }
    }
    stops[stops.len() - 1].color
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let l = |x: u8, y: u8| -> u8 { (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8 };
    Color::new(l(a.r, b.r), l(a.g, b.g), l(a.b, b.b), l(a.a, b.a))
}

impl LinearGradient {
    /// Color at `p`, projected onto `angle` within `bounds`.
    pub fn at(&self, p: faint_geom::Point, bounds: Rect) -> Color {
        let (s, c) = self.angle.0.sin_cos();
        let dir = faint_geom::Size::new(c, s);
        let rel = p - bounds.pos;
        let extent = (bounds.w().abs() * c.abs() + bounds.h().abs() * s.abs()).max(1e-9);
        let t = (rel.x * dir.x + rel.y * dir.y) / extent;
        sample_stops(&self.stops, t)
    }
}

impl RadialGradient {
    pub fn at(&self, p: faint_geom::Point) -> Color {
        let dx = (p.x - self.focal.x) / self.radii.x.max(1e-9);
        let dy = (p.y - self.focal.y) / self.radii.y.max(1e-9);
        let t = (dx * dx + dy * dy).sqrt();
        sample_stops(&self.stops, t)
    }
}

/// A gradient, either linear or radial.
#[derive(Debug, Clone)]
pub enum Gradient {
    Linear(LinearGradient),
    Radial(RadialGradient),
}

/// How a drawing primitive samples its fill color per pixel.
#[derive(Debug, Clone)]
pub enum Paint {
    Color(Color),
    Pattern(Pattern),
    Gradient(Gradient),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Color(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_sampling_wraps() {
        let mut bmp = Bitmap::new(2, 2);
        bmp.put_pixel_raw(1, 1, Color::new(9, 9, 9, 255));
        let pattern = Pattern::new(Arc::new(bmp), IntPoint::new(0, 0));
        assert_eq!(pattern.sample(-1, -1), Color::new(9, 9, 9, 255));
        assert_eq!(pattern.sample(1, 1), Color::new(9, 9, 9, 255));
    }

    #[test]
    fn gradient_stop_lookup_clamps_at_ends() {
        let stops = vec![
            ColorStop::new(0.0, Color::new(0, 0, 0, 255)),
            ColorStop::new(1.0, Color::new(255, 255, 255, 255)),
        ];
        assert_eq!(sample_stops(&stops, -1.0), Color::new(0, 0, 0, 255));
        assert_eq!(sample_stops(&stops, 2.0), Color::new(255, 255, 255, 255));
        assert_eq!(sample_stops(&stops, 0.5), Color::new(128, 128, 128, 255));
    }

    #[test]
    fn radial_gradient_center_is_first_stop() {
        let g = RadialGradient {
            stops: vec![
                ColorStop::new(0.0, Color::new(255, 0, 0, 255)),
                ColorStop::new(1.0, Color::new(0, 0, 255, 255)),
            ],
            center: faint_geom::Point::new(5.0, 5.0),
            focal: faint_geom::Point::new(5.0, 5.0),
            radii: faint_geom::Size::new(5.0, 5.0),
        };
        assert_eq!(g.at(faint_geom::Point::new(5.0, 5.0)), Color::new(255, 0, 0, 255));
    }
}
