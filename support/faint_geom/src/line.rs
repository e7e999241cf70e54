use cgmath::InnerSpace;
use quick_error::quick_error;

use crate::{IntPoint, Point, COORD_EPSILON};

/// An ordered pair of endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p0: Point,
    pub p1: Point,
}

/// A pixel-indexed ordered pair of endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntLineSegment {
    pub p0: IntPoint,
    pub p1: IntPoint,
}

impl LineSegment {
    #[inline]
    pub fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.p1 - self.p0).magnitude()
    }

    /// The algebraic line through both endpoints, in the `ax + by = c` form.
    pub fn to_line(&self) -> Line {
        Line::through_points(self.p0, self.p1)
    }
}

impl IntLineSegment {
    #[inline]
    pub fn new(p0: IntPoint, p1: IntPoint) -> Self {
        Self { p0, p1 }
    }
}

quick_error! {
    /// Error returned by [`Line::intersection`] when both lines are parallel
    /// (or coincident) within `coord_epsilon`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum ParallelLines {
        ParallelLines {
            display("the two lines are parallel and do not intersect at a single point")
        }
    }
}

/// A line in the algebraic form `ax + by = c`, used for projection and
/// intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    #[inline]
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// The line passing through two distinct points.
    pub fn through_points(p0: Point, p1: Point) -> Self {
        let a = p1.y - p0.y;
        let b = p0.x - p1.x;
        let c = a * p0.x + b * p0.y;
        Self::new(a, b, c)
    }

    /// The signed perpendicular distance-scaled residual `a*p.x + b*p.y - c`.
    #[inline]
    pub fn residual(&self, p: Point) -> f64 {
        self.a * p.x + self.b * p.y - self.c
    }

    /// Intersection point of `self` and `other`. Fails with
    /// [`ParallelLines`] when the determinant of the two lines' normal
    /// vectors is within `coord_epsilon` of zero.
    pub fn intersection(&self, other: &Self) -> Result<Point, ParallelLines> {
        let det = self.a * other.b - other.a * self.b;
        if det.abs() < COORD_EPSILON {
            return Err(ParallelLines::ParallelLines);
        }
        let x = (other.b * self.c - self.b * other.c) / det;
        let y = (self.a * other.c - other.a * self.c) / det;
        Ok(Point::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_crossing_lines() {
        let l1 = Line::through_points(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let l2 = Line::through_points(Point::new(0.0, 2.0), Point::new(2.0, 0.0));
        let p = l1.intersection(&l2).unwrap();
        assert!((p.x - 1.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_lines_fail() {
        let l1 = Line::through_points(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        let l2 = Line::through_points(Point::new(0.0, 1.0), Point::new(2.0, 1.0));
        assert_eq!(l1.intersection(&l2), Err(ParallelLines::ParallelLines));
    }

    #[test]
    fn segment_length() {
        let s = LineSegment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(s.length(), 5.0);
    }
}
