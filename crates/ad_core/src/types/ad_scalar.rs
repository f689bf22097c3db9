//! Forward-mode AD scalar with a growable derivative vector.
//!
//! [`AdScalar`] pairs a primal `f64` with partial derivatives indexed by
//! independent-variable slot. The slot numbering is owned by the caller
//! (e.g. "slot 3 is the pressure of cell 3"); the scalar only guarantees that
//! every arithmetic step applies the chain rule exactly.
//!
//! ## Zero-extension
//!
//! Each instance stores only the slots its own history has touched. A slot
//! past the end of the vector reads as `0.0`, so operands of different lengths
//! combine without error and the result length is the maximum of the two.
//!
//! ## Usage
//!
//! ```rust
//! use ad_core::types::AdScalar;
//!
//! // x is independent variable 0, y is independent variable 1
//! let x = AdScalar::variable(3.0, 0);
//! let y = AdScalar::variable(2.0, 1);
//!
//! let f = &x * &y + &x;
//! assert_eq!(f.value(), 9.0);
//! assert_eq!(f.derivative(0), 3.0); // y + 1
//! assert_eq!(f.derivative(1), 3.0); // x
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

use super::error::AdError;
use crate::math::derivatives::{axpy_derivatives, scale_derivatives};

/// A value together with its partial derivatives.
///
/// Every `AdScalar` owns its derivative vector outright; assignment and
/// `clone` copy it. There is no shared state between instances, so an
/// `AdScalar` can be moved to, and mutated on, any thread.
///
/// # Panics
///
/// The `/` and `/=` operators panic when the divisor's primal value is exactly
/// zero. Use [`AdScalar::checked_div`] and friends to receive
/// [`AdError::DivisionByZero`] instead.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdScalar {
    value: f64,
    derivatives: Vec<f64>,
}

impl AdScalar {
    /// Creates a constant: the given value with no tracked derivatives.
    #[inline]
    pub fn constant(value: f64) -> Self {
        Self {
            value,
            derivatives: Vec::new(),
        }
    }

    /// Creates a value with `num_slots` zero-filled derivative slots.
    ///
    /// Useful when a run agrees on a fixed derivative width up front.
    #[inline]
    pub fn with_slots(value: f64, num_slots: usize) -> Self {
        Self {
            value,
            derivatives: vec![0.0; num_slots],
        }
    }

    /// Creates an independent variable: unit derivative at `slot`, zero elsewhere.
    ///
    /// # Examples
    ///
    /// ```
    /// use ad_core::types::AdScalar;
    ///
    /// let p = AdScalar::variable(10.0, 2);
    /// assert_eq!(p.derivatives(), &[0.0, 0.0, 1.0]);
    /// ```
    pub fn variable(value: f64, slot: usize) -> Self {
        let mut x = Self::constant(value);
        x.set_derivative(slot, 1.0);
        x
    }

    /// Creates a scalar from an explicit value and derivative vector.
    #[inline]
    pub fn from_parts(value: f64, derivatives: Vec<f64>) -> Self {
        Self { value, derivatives }
    }

    /// Like [`from_parts`](Self::from_parts), but rejects NaN and infinities.
    pub fn try_from_parts(value: f64, derivatives: Vec<f64>) -> Result<Self, AdError> {
        if !value.is_finite() {
            return Err(AdError::NonFiniteValue { value });
        }
        if let Some(&bad) = derivatives.iter().find(|d| !d.is_finite()) {
            return Err(AdError::NonFiniteValue { value: bad });
        }
        Ok(Self { value, derivatives })
    }

    /// Returns the primal value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the stored derivative slots.
    #[inline]
    pub fn derivatives(&self) -> &[f64] {
        &self.derivatives
    }

    /// Returns the derivative at `slot`, or `0.0` if the slot is not stored.
    #[inline]
    pub fn derivative(&self, slot: usize) -> f64 {
        self.derivatives.get(slot).copied().unwrap_or(0.0)
    }

    /// Number of stored derivative slots.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.derivatives.len()
    }

    /// Whether every stored derivative is exactly zero.
    pub fn is_constant(&self) -> bool {
        self.derivatives.iter().all(|&d| d == 0.0)
    }

    /// Whether the value and every derivative are finite.
    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.derivatives.iter().all(|d| d.is_finite())
    }

    /// Sets the derivative at `slot`, zero-extending the vector if needed.
    ///
    /// Always succeeds. Slots between the old length and `slot` become `0.0`.
    pub fn set_derivative(&mut self, slot: usize, value: f64) {
        if slot >= self.derivatives.len() {
            self.derivatives.resize(slot + 1, 0.0);
        }
        self.derivatives[slot] = value;
    }

    /// Replaces the primal value, keeping the derivatives.
    #[inline]
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Assigns a plain number: the value is replaced and derivatives cleared.
    #[inline]
    pub fn set_constant(&mut self, value: f64) {
        self.value = value;
        self.derivatives.clear();
    }

    /// Zero-extends the derivative vector to at least `num_slots` entries.
    ///
    /// Never truncates.
    pub fn pad_to(&mut self, num_slots: usize) {
        if self.derivatives.len() < num_slots {
            self.derivatives.resize(num_slots, 0.0);
        }
    }

    /// Consumes the scalar, returning `(value, derivatives)`.
    #[inline]
    pub fn into_parts(self) -> (f64, Vec<f64>) {
        (self.value, self.derivatives)
    }

    /// Product rule, in place. `a` is the value before the update.
    fn mul_assign_ad(&mut self, rhs: &AdScalar) {
        let a = self.value;
        self.value = a * rhs.value;
        scale_derivatives(&mut self.derivatives, rhs.value);
        axpy_derivatives(&mut self.derivatives, &rhs.derivatives, a);
    }

    /// Quotient rule, in place. Caller guarantees `rhs.value != 0`.
    fn div_assign_ad(&mut self, rhs: &AdScalar) {
        let a = self.value;
        let b = rhs.value;
        self.value = a / b;
        // (da * b - a * db) / b^2
        scale_derivatives(&mut self.derivatives, b);
        axpy_derivatives(&mut self.derivatives, &rhs.derivatives, -a);
        scale_derivatives(&mut self.derivatives, 1.0 / (b * b));
    }

    fn div_assign_f64(&mut self, c: f64) {
        self.value /= c;
        for d in self.derivatives.iter_mut() {
            *d /= c;
        }
    }

    /// Checked quotient `self / rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`AdError::DivisionByZero`] if `rhs.value() == 0.0`.
    pub fn checked_div(&self, rhs: &AdScalar) -> Result<AdScalar, AdError> {
        let mut out = self.clone();
        out.checked_div_assign(rhs)?;
        Ok(out)
    }

    /// Checked in-place quotient. `self` is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`AdError::DivisionByZero`] if `rhs.value() == 0.0`.
    pub fn checked_div_assign(&mut self, rhs: &AdScalar) -> Result<(), AdError> {
        if rhs.value == 0.0 {
            return Err(AdError::DivisionByZero {
                numerator: self.value,
            });
        }
        self.div_assign_ad(rhs);
        Ok(())
    }

    /// Checked division by a plain number.
    ///
    /// # Errors
    ///
    /// Returns [`AdError::DivisionByZero`] if `c == 0.0`.
    pub fn checked_div_scalar(&self, c: f64) -> Result<AdScalar, AdError> {
        let mut out = self.clone();
        out.checked_div_assign_scalar(c)?;
        Ok(out)
    }

    /// Checked in-place division by a plain number.
    ///
    /// # Errors
    ///
    /// Returns [`AdError::DivisionByZero`] if `c == 0.0`.
    pub fn checked_div_assign_scalar(&mut self, c: f64) -> Result<(), AdError> {
        if c == 0.0 {
            return Err(AdError::DivisionByZero {
                numerator: self.value,
            });
        }
        self.div_assign_f64(c);
        Ok(())
    }
}

impl From<f64> for AdScalar {
    #[inline]
    fn from(value: f64) -> Self {
        AdScalar::constant(value)
    }
}

/// Equal when values match and derivatives match after zero-extension.
impl PartialEq for AdScalar {
    fn eq(&self, other: &Self) -> bool {
        if self.value != other.value {
            return false;
        }
        let len = self.num_slots().max(other.num_slots());
        (0..len).all(|k| self.derivative(k) == other.derivative(k))
    }
}

impl fmt::Display for AdScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + [", self.value)?;
        for (k, d) in self.derivatives.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]∂")
    }
}

// ──────────────────────────────────────────────
//  Compound assignment: AdScalar ∘= AdScalar
// ──────────────────────────────────────────────

impl AddAssign<&AdScalar> for AdScalar {
    #[inline]
    fn add_assign(&mut self, rhs: &AdScalar) {
        self.value += rhs.value;
        axpy_derivatives(&mut self.derivatives, &rhs.derivatives, 1.0);
    }
}

impl SubAssign<&AdScalar> for AdScalar {
    #[inline]
    fn sub_assign(&mut self, rhs: &AdScalar) {
        self.value -= rhs.value;
        axpy_derivatives(&mut self.derivatives, &rhs.derivatives, -1.0);
    }
}

impl MulAssign<&AdScalar> for AdScalar {
    #[inline]
    fn mul_assign(&mut self, rhs: &AdScalar) {
        self.mul_assign_ad(rhs);
    }
}

impl DivAssign<&AdScalar> for AdScalar {
    /// # Panics
    ///
    /// Panics if `rhs.value() == 0.0`.
    #[inline]
    fn div_assign(&mut self, rhs: &AdScalar) {
        if let Err(err) = self.checked_div_assign(rhs) {
            panic!("{}", err);
        }
    }
}

macro_rules! impl_assign_by_value {
    ($($trait:ident, $method:ident);* $(;)?) => {
        $(
            impl $trait<AdScalar> for AdScalar {
                #[inline]
                fn $method(&mut self, rhs: AdScalar) {
                    $trait::$method(self, &rhs);
                }
            }
        )*
    };
}

impl_assign_by_value! {
    AddAssign, add_assign;
    SubAssign, sub_assign;
    MulAssign, mul_assign;
    DivAssign, div_assign;
}

// ──────────────────────────────────────────────
//  Compound assignment: AdScalar ∘= f64
// ──────────────────────────────────────────────

impl AddAssign<f64> for AdScalar {
    #[inline]
    fn add_assign(&mut self, c: f64) {
        self.value += c;
    }
}

impl SubAssign<f64> for AdScalar {
    #[inline]
    fn sub_assign(&mut self, c: f64) {
        self.value -= c;
    }
}

impl MulAssign<f64> for AdScalar {
    #[inline]
    fn mul_assign(&mut self, c: f64) {
        self.value *= c;
        scale_derivatives(&mut self.derivatives, c);
    }
}

impl DivAssign<f64> for AdScalar {
    /// # Panics
    ///
    /// Panics if `c == 0.0`.
    #[inline]
    fn div_assign(&mut self, c: f64) {
        if let Err(err) = self.checked_div_assign_scalar(c) {
            panic!("{}", err);
        }
    }
}

// ──────────────────────────────────────────────
//  Free operators: copy the left operand, then apply the compound form
// ──────────────────────────────────────────────

macro_rules! impl_binary_ops {
    ($($trait:ident, $method:ident, $assign:ident);* $(;)?) => {
        $(
            impl $trait<AdScalar> for AdScalar {
                type Output = AdScalar;
                #[inline]
                fn $method(mut self, rhs: AdScalar) -> AdScalar {
                    self.$assign(&rhs);
                    self
                }
            }

            impl $trait<&AdScalar> for AdScalar {
                type Output = AdScalar;
                #[inline]
                fn $method(mut self, rhs: &AdScalar) -> AdScalar {
                    self.$assign(rhs);
                    self
                }
            }

            impl $trait<&AdScalar> for &AdScalar {
                type Output = AdScalar;
                #[inline]
                fn $method(self, rhs: &AdScalar) -> AdScalar {
                    let mut out = self.clone();
                    out.$assign(rhs);
                    out
                }
            }

            impl $trait<AdScalar> for &AdScalar {
                type Output = AdScalar;
                #[inline]
                fn $method(self, rhs: AdScalar) -> AdScalar {
                    let mut out = self.clone();
                    out.$assign(&rhs);
                    out
                }
            }

            impl $trait<f64> for AdScalar {
                type Output = AdScalar;
                #[inline]
                fn $method(mut self, rhs: f64) -> AdScalar {
                    self.$assign(rhs);
                    self
                }
            }

            impl $trait<f64> for &AdScalar {
                type Output = AdScalar;
                #[inline]
                fn $method(self, rhs: f64) -> AdScalar {
                    let mut out = self.clone();
                    out.$assign(rhs);
                    out
                }
            }
        )*
    };
}

impl_binary_ops! {
    Add, add, add_assign;
    Sub, sub, sub_assign;
    Mul, mul, mul_assign;
    Div, div, div_assign;
}

// Plain number on the left.

impl Add<AdScalar> for f64 {
    type Output = AdScalar;
    #[inline]
    fn add(self, mut rhs: AdScalar) -> AdScalar {
        rhs += self;
        rhs
    }
}

impl Sub<AdScalar> for f64 {
    type Output = AdScalar;
    #[inline]
    fn sub(self, rhs: AdScalar) -> AdScalar {
        let mut out = -rhs;
        out += self;
        out
    }
}

impl Mul<AdScalar> for f64 {
    type Output = AdScalar;
    #[inline]
    fn mul(self, mut rhs: AdScalar) -> AdScalar {
        rhs *= self;
        rhs
    }
}

impl Div<AdScalar> for f64 {
    type Output = AdScalar;
    /// # Panics
    ///
    /// Panics if `rhs.value() == 0.0`.
    #[inline]
    fn div(self, rhs: AdScalar) -> AdScalar {
        AdScalar::constant(self) / rhs
    }
}

impl Neg for AdScalar {
    type Output = AdScalar;
    #[inline]
    fn neg(mut self) -> AdScalar {
        self *= -1.0;
        self
    }
}

impl Neg for &AdScalar {
    type Output = AdScalar;
    #[inline]
    fn neg(self) -> AdScalar {
        -self.clone()
    }
}

impl Zero for AdScalar {
    #[inline]
    fn zero() -> Self {
        AdScalar::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0.0 && self.is_constant()
    }
}

impl One for AdScalar {
    #[inline]
    fn one() -> Self {
        AdScalar::constant(1.0)
    }
}

impl Sum for AdScalar {
    fn sum<I: Iterator<Item = AdScalar>>(iter: I) -> Self {
        iter.fold(AdScalar::zero(), |mut acc, x| {
            acc += &x;
            acc
        })
    }
}

impl<'a> Sum<&'a AdScalar> for AdScalar {
    fn sum<I: Iterator<Item = &'a AdScalar>>(iter: I) -> Self {
        iter.fold(AdScalar::zero(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}
