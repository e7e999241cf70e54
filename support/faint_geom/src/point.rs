use cgmath::{Point2, Vector2};

use crate::Round;

/// A sub-pixel coordinate.
pub type Point = Point2<f64>;

/// A pixel-indexed coordinate.
pub type IntPoint = Point2<i32>;

/// A sub-pixel extent.
pub type Size = Vector2<f64>;

/// A pixel-indexed extent.
pub type IntSize = Vector2<i32>;

/// Convert a sub-pixel point to a pixel-indexed one under a stated rounding
/// policy. See [`crate::round`] for the available policies.
pub trait ToIntPoint {
    fn floored(&self) -> IntPoint;
    fn truncated(&self) -> IntPoint;
    fn rounded(&self) -> IntPoint;
    fn ceiled(&self) -> IntPoint;
}

impl ToIntPoint for Point {
    #[inline]
    fn floored(&self) -> IntPoint {
        IntPoint::new(self.x.floored(), self.y.floored())
    }
    #[inline]
    fn truncated(&self) -> IntPoint {
        IntPoint::new(self.x.truncated(), self.y.truncated())
    }
    #[inline]
    fn rounded(&self) -> IntPoint {
        IntPoint::new(self.x.rounded(), self.y.rounded())
    }
    #[inline]
    fn ceiled(&self) -> IntPoint {
        IntPoint::new(self.x.ceiled(), self.y.ceiled())
    }
}

/// Widen a pixel-indexed point to a sub-pixel one, placing it at the pixel's
/// top-left corner.
pub trait ToPoint {
    fn to_point(&self) -> Point;
}

impl ToPoint for IntPoint {
    #[inline]
    fn to_point(&self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_policies_agree_on_exact_values() {
        let p = Point::new(3.0, -2.0);
        assert_eq!(p.floored(), IntPoint::new(3, -2));
        assert_eq!(p.truncated(), IntPoint::new(3, -2));
        assert_eq!(p.rounded(), IntPoint::new(3, -2));
        assert_eq!(p.ceiled(), IntPoint::new(3, -2));
    }

    #[test]
    fn rounding_policies_differ_on_fractional_values() {
        let p = Point::new(1.5, -1.5);
        assert_eq!(p.floored(), IntPoint::new(1, -2));
        assert_eq!(p.truncated(), IntPoint::new(1, -1));
        assert_eq!(p.ceiled(), IntPoint::new(2, -1));
    }
}
