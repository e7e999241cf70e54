//! Fused multiply-add with an unfused fallback.
use std::ops::{Add, Mul, Neg, Sub};

/// Implements fused multiply-add with an unfused fallback.
///
/// # Examples
///
/// ```
/// use faint_fp::Fma;
///
/// assert_eq!(2.0f32.fmadd(3.0f32, 5.0f32), 2.0 * 3.0 + 5.0);
/// assert_eq!(2.0f32.fmsub(3.0f32, 5.0f32), 2.0 * 3.0 - 5.0);
/// ```
pub trait Fma:
    Mul<Output = Self> + Add<Output = Self> + Sub<Output = Self> + Clone + Sized + Neg<Output = Self>
{
    /// Fused multiply-add. Computes `(self * a) + b`.
    #[inline]
    fn fmadd(self, a: Self, b: Self) -> Self {
        (self * a) + b
    }

    /// Fused multiply-sub. Computes `(self * a) - b`.
    #[inline]
    fn fmsub(self, a: Self, b: Self) -> Self {
        (self * a) - b
    }

    /// Fused multiply-add assignment. Computes `self = (self * a) + b`.
    #[inline]
    fn fmadd_assign(&mut self, a: Self, b: Self) {
        *self = self.clone().fmadd(a, b);
    }
}

impl Fma for f32 {}
impl Fma for f64 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmadd_matches_unfused() {
        assert_eq!(2.0f32.fmadd(3.0, 5.0), 11.0);
        assert_eq!(2.0f64.fmsub(3.0, 5.0), 1.0);
    }
}
