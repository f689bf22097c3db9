//! Error types for AD arithmetic.
//!
//! This module provides:
//! - `AdError`: Errors raised by checked AD operations

use thiserror::Error;

/// Errors from checked AD arithmetic.
///
/// Unchecked operators (`/`, `/=`) treat these conditions as fatal
/// precondition violations and panic. The `checked_*` methods on
/// [`AdScalar`](crate::types::AdScalar) surface them as values instead.
///
/// # Variants
/// - `DivisionByZero`: Divisor primal value is exactly zero
/// - `NonFiniteValue`: A constructor was handed NaN or infinity
///
/// # Examples
/// ```
/// use ad_core::types::AdError;
///
/// let err = AdError::DivisionByZero { numerator: 3.0 };
/// assert_eq!(format!("{}", err), "Division by zero: 3 / 0");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdError {
    /// Divisor primal value is exactly zero.
    #[error("Division by zero: {numerator} / 0")]
    DivisionByZero {
        /// Primal value of the dividend
        numerator: f64,
    },

    /// Non-finite value passed to a checked constructor.
    #[error("Non-finite value: {value}")]
    NonFiniteValue {
        /// The offending value
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_display() {
        let err = AdError::DivisionByZero { numerator: -1.5 };
        assert_eq!(format!("{}", err), "Division by zero: -1.5 / 0");
    }

    #[test]
    fn test_non_finite_display() {
        let err = AdError::NonFiniteValue { value: f64::INFINITY };
        assert_eq!(format!("{}", err), "Non-finite value: inf");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = AdError::DivisionByZero { numerator: 1.0 };
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = AdError::DivisionByZero { numerator: 2.0 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_ad_error_serde_roundtrip() {
            let err = AdError::DivisionByZero { numerator: 4.0 };
            let json = serde_json::to_string(&err).unwrap();
            let deserialized: AdError = serde_json::from_str(&json).unwrap();
            assert_eq!(err, deserialized);
        }
    }
}
