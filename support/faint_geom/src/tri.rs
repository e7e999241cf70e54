use cgmath::{InnerSpace, Rad};

use crate::Point;

/// An angle, in radians. Degrees only ever appear in user-facing strings,
/// never inside the geometric model.
pub type Radian = Rad<f64>;

/// A pair of axis scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn uniform(s: f64) -> Self {
        Self::new(s, s)
    }
}

/// Rotate `p` around `origin` by `theta`.
#[inline]
pub fn rotate_point(p: Point, theta: Radian, origin: Point) -> Point {
    let (s, c) = theta.0.sin_cos();
    let d = p - origin;
    Point::new(origin.x + d.x * c - d.y * s, origin.y + d.x * s + d.y * c)
}

/// Scale `p` about `origin` by `scale`.
#[inline]
pub fn scale_point(p: Point, scale: Scale, origin: Point) -> Point {
    Point::new(
        origin.x + (p.x - origin.x) * scale.x,
        origin.y + (p.y - origin.y) * scale.y,
    )
}

/// An affine triangle frame: three corners `p0`, `p1`, `p2` spanning a
/// parallelogram. `p3`, the implied fourth corner, completes it:
/// `p3 = p1 + p2 - p0`.
///
/// Every drawable object's full transform is stored as a `Tri` rather than
/// a width/height/angle triple, so skew is representable without a fourth
/// field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tri {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl Tri {
    #[inline]
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self { p0, p1, p2 }
    }

    /// An axis-aligned, unskewed, unrotated frame with the given top-left
    /// corner and size.
    pub fn from_rect(pos: Point, w: f64, h: f64) -> Self {
        Self::new(pos, Point::new(pos.x + w, pos.y), Point::new(pos.x, pos.y + h))
    }

    /// The implied fourth corner.
    #[inline]
    pub fn p3(&self) -> Point {
        self.p1 + (self.p2 - self.p0)
    }

    /// Length of the `p0`→`p1` edge.
    #[inline]
    pub fn width(&self) -> f64 {
        (self.p1 - self.p0).magnitude()
    }

    /// Length of the `p0`→`p2` edge.
    #[inline]
    pub fn height(&self) -> f64 {
        (self.p2 - self.p0).magnitude()
    }

    /// Orientation of the `p0`→`p1` edge.
    #[inline]
    pub fn angle(&self) -> Radian {
        let d = self.p1 - self.p0;
        Rad(d.y.atan2(d.x))
    }

    /// Each corner shifted by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let d = cgmath::Vector2::new(dx, dy);
        Self::new(self.p0 + d, self.p1 + d, self.p2 + d)
    }

    /// Each corner rotated around `origin` by `theta`. The new angle is
    /// `self.angle() + theta`.
    pub fn rotated(&self, theta: Radian, origin: Point) -> Self {
        Self::new(
            rotate_point(self.p0, theta, origin),
            rotate_point(self.p1, theta, origin),
            rotate_point(self.p2, theta, origin),
        )
    }

    /// `p2` shifted by `k` along the direction perpendicular to `p0`→`p1`.
    /// `p0` and `p1` are preserved.
    pub fn skewed(&self, k: f64) -> Self {
        let edge = self.p1 - self.p0;
        let len = edge.magnitude();
        if len == 0.0 {
            return *self;
        }
        let perp = cgmath::Vector2::new(-edge.y, edge.x) / len;
        Self::new(self.p0, self.p1, self.p2 + perp * k)
    }

    /// Each corner scaled about `origin`.
    pub fn scaled(&self, scale: Scale, origin: Point) -> Self {
        Self::new(
            scale_point(self.p0, scale, origin),
            scale_point(self.p1, scale, origin),
            scale_point(self.p2, scale, origin),
        )
    }

    /// Translate by `(dx, dy)` expressed in the Tri's own local frame: `dx`
    /// along `p0`→`p1`, `dy` along `p0`→`p2`.
    pub fn offset_aligned(&self, dx: f64, dy: f64) -> Self {
        let ex = self.p1 - self.p0;
        let ey = self.p2 - self.p0;
        let ex_len = ex.magnitude();
        let ey_len = ey.magnitude();
        let ux = if ex_len == 0.0 { ex } else { ex / ex_len };
        let uy = if ey_len == 0.0 { ey } else { ey / ey_len };
        self.translated(ux.x * dx + uy.x * dy, ux.y * dx + uy.y * dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn p3_completes_the_parallelogram() {
        let t = Tri::from_rect(Point::new(0.0, 0.0), 10.0, 5.0);
        assert_eq!(t.p3(), Point::new(10.0, 5.0));
    }

    #[test]
    fn rotate_then_rotate_back_is_identity() {
        let t = Tri::from_rect(Point::new(1.0, 2.0), 10.0, 5.0);
        let origin = Point::new(0.0, 0.0);
        let theta = Rad(PI / 3.0);
        let back = t.rotated(theta, origin).rotated(-theta, origin);
        assert!((back.p0 - t.p0).magnitude() < 1e-9);
        assert!((back.p1 - t.p1).magnitude() < 1e-9);
        assert!((back.p2 - t.p2).magnitude() < 1e-9);
    }

    #[test]
    fn rotate_updates_angle() {
        let t = Tri::from_rect(Point::new(0.0, 0.0), 10.0, 5.0);
        let theta = Rad(PI / 4.0);
        let rotated = t.rotated(theta, t.p0);
        assert!((rotated.angle().0 - (t.angle().0 + theta.0)).abs() < 1e-9);
    }

    #[test]
    fn skew_preserves_p0_and_p1() {
        let t = Tri::from_rect(Point::new(0.0, 0.0), 10.0, 5.0);
        let skewed = t.skewed(3.0);
        assert_eq!(skewed.p0, t.p0);
        assert_eq!(skewed.p1, t.p1);
        assert_ne!(skewed.p2, t.p2);
    }

    #[test]
    fn rotate_point_quarter_turn() {
        let p = rotate_point(Point::new(1.0, 0.0), Rad(PI / 2.0), Point::new(0.0, 0.0));
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scale_point_about_origin() {
        let p = scale_point(Point::new(4.0, 4.0), Scale::new(2.0, 0.5), Point::new(2.0, 2.0));
        assert_eq!(p, Point::new(6.0, 3.0));
    }
}
