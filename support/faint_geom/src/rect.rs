use crate::{AxisAlignedBox, Box2, IntPoint, IntSize, Point, Round, Size};

/// A sub-pixel axis-aligned rectangle: inclusive top-left, exclusive
/// bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Point,
    pub size: Size,
}

/// A pixel-indexed axis-aligned rectangle: inclusive top-left, exclusive
/// bottom-right. [`IntRect::right`] and [`IntRect::bottom`] report the last
/// *covered* pixel column/row, i.e. `x + w - 1` and `y + h - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRect {
    pub pos: IntPoint,
    pub size: IntSize,
}

macro_rules! impl_rect {
    ($rect:ident, $point:ty, $size:ty, $scalar:ty) => {
        impl $rect {
            #[inline]
            pub fn new(pos: $point, size: $size) -> Self {
                Self { pos, size }
            }

            #[inline]
            pub fn x(&self) -> $scalar {
                self.pos.x
            }
            #[inline]
            pub fn y(&self) -> $scalar {
                self.pos.y
            }
            #[inline]
            pub fn w(&self) -> $scalar {
                self.size.x
            }
            #[inline]
            pub fn h(&self) -> $scalar {
                self.size.y
            }
            #[inline]
            pub fn left(&self) -> $scalar {
                self.x()
            }
            #[inline]
            pub fn top(&self) -> $scalar {
                self.y()
            }

            /// Respects a signed width/height: the result is always
            /// normalized so that `size` is non-negative.
            #[inline]
            pub fn normalized(&self) -> Self {
                let (x, w) = if self.w() < <$scalar>::from(0i8) {
                    (self.x() + self.w(), -self.w())
                } else {
                    (self.x(), self.w())
                };
                let (y, h) = if self.h() < <$scalar>::from(0i8) {
                    (self.y() + self.h(), -self.h())
                } else {
                    (self.y(), self.h())
                };
                Self::new(<$point>::new(x, y), <$size>::new(w, h))
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.w() <= <$scalar>::from(0i8) || self.h() <= <$scalar>::from(0i8)
            }

            #[inline]
            pub fn contains_point(&self, p: &$point) -> bool {
                let r = self.normalized();
                p.x >= r.x() && p.x < r.x() + r.w() && p.y >= r.y() && p.y < r.y() + r.h()
            }

            #[inline]
            pub fn translated(&self, dx: $scalar, dy: $scalar) -> Self {
                Self::new(<$point>::new(self.x() + dx, self.y() + dy), self.size)
            }

            /// Expand (positive amount) or deflate (negative amount) on all
            /// four sides, keeping the rect centered.
            #[inline]
            pub fn inflated(&self, dx: $scalar, dy: $scalar) -> Self {
                Self::new(
                    <$point>::new(self.x() - dx, self.y() - dy),
                    <$size>::new(self.w() + dx + dx, self.h() + dy + dy),
                )
            }
        }
    };
}

impl_rect!(Rect, Point, Size, f64);
impl_rect!(IntRect, IntPoint, IntSize, i32);

impl Rect {
    /// Exclusive right edge, `x + w`.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x() + self.w()
    }
    /// Exclusive bottom edge, `y + h`.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y() + self.h()
    }

    #[inline]
    pub fn to_box2(&self) -> Box2<f64> {
        let r = self.normalized();
        Box2::new(r.pos, cgmath::Point2::new(r.right(), r.bottom()))
    }

    #[inline]
    pub fn floored(&self) -> IntRect {
        let r = self.normalized();
        let min = cgmath::Point2::new(r.x().floor() as i32, r.y().floor() as i32);
        let max = cgmath::Point2::new(r.right().floor() as i32, r.bottom().floor() as i32);
        IntRect::new(min, max - min)
    }

    #[inline]
    pub fn rounded(&self) -> IntRect {
        let r = self.normalized();
        let min = cgmath::Point2::new(r.x().rounded(), r.y().rounded());
        let max = cgmath::Point2::new(r.right().rounded(), r.bottom().rounded());
        IntRect::new(min, max - min)
    }
}

impl IntRect {
    /// Last covered pixel column, `x + w - 1`.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x() + self.w() - 1
    }
    /// Last covered pixel row, `y + h - 1`.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y() + self.h() - 1
    }

    #[inline]
    pub fn to_box2(&self) -> Box2<i32> {
        let r = self.normalized();
        Box2::new(r.pos, r.pos + r.size)
    }

    #[inline]
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            Point::new(f64::from(self.x()), f64::from(self.y())),
            Size::new(f64::from(self.w()), f64::from(self.h())),
        )
    }

    /// Returns the intersection of two rects, or `None` if they don't
    /// overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let b = self.to_box2().intersection(&other.to_box2())?;
        Some(Self::new(b.min, b.max - b.min))
    }

    /// `true` iff `self` fits entirely within `bounds` (e.g. a pixel region
    /// against a bitmap's dimensions).
    #[inline]
    pub fn inside(&self, bounds: &Self) -> bool {
        let b1 = self.to_box2();
        let b2 = bounds.to_box2();
        b1.min.x >= b2.min.x && b1.min.y >= b2.min.y && b1.max.x <= b2.max.x && b1.max.y <= b2.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_rect_right_bottom_are_inclusive() {
        let r = IntRect::new(IntPoint::new(2, 3), IntSize::new(4, 5));
        assert_eq!(r.right(), 5);
        assert_eq!(r.bottom(), 7);
    }

    #[test]
    fn rect_right_bottom_are_exclusive() {
        let r = Rect::new(Point::new(2.0, 3.0), Size::new(4.0, 5.0));
        assert_eq!(r.right(), 6.0);
        assert_eq!(r.bottom(), 8.0);
    }

    #[test]
    fn negative_size_normalizes() {
        let r = IntRect::new(IntPoint::new(5, 5), IntSize::new(-3, -2));
        let n = r.normalized();
        assert_eq!(n.pos, IntPoint::new(2, 3));
        assert_eq!(n.size, IntSize::new(3, 2));
    }

    #[test]
    fn intersection_of_disjoint_rects_is_none() {
        let a = IntRect::new(IntPoint::new(0, 0), IntSize::new(2, 2));
        let b = IntRect::new(IntPoint::new(10, 10), IntSize::new(2, 2));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn inside_checks_containment() {
        let bounds = IntRect::new(IntPoint::new(0, 0), IntSize::new(10, 10));
        let inner = IntRect::new(IntPoint::new(2, 2), IntSize::new(3, 3));
        let outer = IntRect::new(IntPoint::new(8, 8), IntSize::new(5, 5));
        assert!(inner.inside(&bounds));
        assert!(!outer.inside(&bounds));
    }
}
