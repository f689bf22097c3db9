//! Quantity trait shared by plain numbers and AD scalars.
//!
//! Reduction operators are written once against [`FaceQuantity`] and are
//! instantiated over `f64` or [`AdScalar`]. With `AdScalar`, every `+=` and
//! `*=` inside the operator goes through the chain-rule arithmetic, so the
//! output carries propagated derivatives with no separate bookkeeping.

use std::ops::{AddAssign, MulAssign, SubAssign};

use crate::types::AdScalar;

/// Arithmetic required of a per-cell quantity.
///
/// By-reference `+=`/`-=` keep the hot loop free of clones of the right
/// operand; `*= f64` applies constant weights.
///
/// # Examples
///
/// ```
/// use ad_core::traits::FaceQuantity;
/// use ad_core::types::AdScalar;
///
/// fn midpoint<T: FaceQuantity>(a: &T, b: &T) -> T {
///     let mut m = a.clone();
///     m += b;
///     m *= 0.5;
///     m
/// }
///
/// assert_eq!(midpoint(&1.0, &3.0), 2.0);
///
/// let m = midpoint(&AdScalar::variable(1.0, 0), &AdScalar::variable(3.0, 1));
/// assert_eq!(m.derivatives(), &[0.5, 0.5]);
/// ```
pub trait FaceQuantity:
    Clone + Send + Sync + for<'a> AddAssign<&'a Self> + for<'a> SubAssign<&'a Self> + MulAssign<f64>
{
}

impl FaceQuantity for f64 {}

impl FaceQuantity for AdScalar {}

#[cfg(test)]
mod tests {
    use super::*;

    fn difference<T: FaceQuantity>(a: &T, b: &T) -> T {
        let mut d = b.clone();
        d -= a;
        d
    }

    #[test]
    fn test_generic_difference_both_types() {
        assert_eq!(difference(&1.0, &4.0), 3.0);

        let d = difference(&AdScalar::variable(1.0, 0), &AdScalar::variable(4.0, 1));
        assert_eq!(d.value(), 3.0);
        assert_eq!(d.derivatives(), &[-1.0, 1.0]);
    }
}
