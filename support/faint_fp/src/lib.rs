//! Small floating-point helpers used by the geometric and rasterization
//! code: NaN-decisive min/max (modeled after x86's `minss`/`maxss`, which
//! propagate the second operand on a NaN rather than following IEEE 754's
//! "ignore NaN" rule) and fused multiply-add with an unfused fallback.
mod cmp;
mod fma;

#[doc(no_inline)]
pub use self::{cmp::*, fma::*};
