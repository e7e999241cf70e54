//! Maximum/minimum value functions for floating-point types.

/// Implements decisive maximum/minimum value functions for floating-point
/// types.
///
/// Unlike [`f32::min`]/[`f32::max`], `fmin`/`fmax` always return one of the
/// two operands: if either is `NaN`, the *other* operand wins. This matches
/// the behavior of x86's `minss`/`maxss` instructions and is the behavior
/// the octree quantizer and ellipse/line rasterizers rely on when folding
/// over a fixed-size set of candidate values.
///
/// # Examples
///
/// ```
/// use faint_fp::FloatOrd;
///
/// assert_eq!(1.0.fmin(2.0), 1.0);
/// assert_eq!(2.0.fmin(1.0), 1.0);
/// assert_eq!(1.0.fmax(2.0), 2.0);
/// ```
pub trait FloatOrd {
    /// Compute the minimum value of `self` and `x`.
    fn fmin(self, x: Self) -> Self
    where
        Self: Sized;

    /// Compute the maximum value of `self` and `x`.
    fn fmax(self, x: Self) -> Self
    where
        Self: Sized;
}

impl FloatOrd for f32 {
    #[inline]
    fn fmin(self, x: Self) -> Self {
        if self < x {
            self
        } else {
            x
        }
    }

    #[inline]
    fn fmax(self, x: Self) -> Self {
        if self > x {
            self
        } else {
            x
        }
    }
}

impl FloatOrd for f64 {
    #[inline]
    fn fmin(self, x: Self) -> Self {
        if self < x {
            self
        } else {
            x
        }
    }

    #[inline]
    fn fmax(self, x: Self) -> Self {
        if self > x {
            self
        } else {
            x
        }
    }
}

/// A set of [`FloatOrd`] values, folded down to a single minimum/maximum.
pub trait FloatOrdSet {
    type Item;

    /// Compute the minimum value of the set. Panics if the set is empty.
    fn fmin(&self) -> Self::Item;

    /// Compute the maximum value of the set. Panics if the set is empty.
    fn fmax(&self) -> Self::Item;
}

impl<T: FloatOrd + Copy> FloatOrdSet for [T] {
    type Item = T;

    #[inline]
    fn fmin(&self) -> Self::Item {
        let mut output = self[0];
        for &x in &self[1..] {
            output = output.fmin(x);
        }
        output
    }

    #[inline]
    fn fmax(&self) -> Self::Item {
        let mut output = self[0];
        for &x in &self[1..] {
            output = output.fmax(x);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_loses_to_the_other_operand() {
        let nan = f32::NAN;
        assert_eq!(nan.fmin(1.0), 1.0);
        assert_eq!(nan.fmax(1.0), 1.0);
        assert_eq!(1.0f32.fmin(nan).is_nan(), true);
    }

    #[test]
    fn set_fmin_fmax() {
        let v = [3.0f32, 1.0, 4.0, 1.5, -2.0];
        assert_eq!(v.fmin(), -2.0);
        assert_eq!(v.fmax(), 4.0);
    }
}
