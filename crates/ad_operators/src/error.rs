//! Error types for mesh reduction operators.

use std::fmt;

use thiserror::Error;

/// Which neighbor of a face an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaceSide {
    /// First cell of the face record
    Left,
    /// Second cell of the face record
    Right,
}

impl fmt::Display for FaceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceSide::Left => write!(f, "left"),
            FaceSide::Right => write!(f, "right"),
        }
    }
}

/// Precondition violations detected by the operators.
///
/// All of these are raised before any output row is written, so a failed
/// call leaves the caller's output buffer untouched.
///
/// # Examples
/// ```
/// use ad_operators::{FaceSide, OperatorError};
///
/// let err = OperatorError::CellIndexOutOfRange {
///     face: 0,
///     side: FaceSide::Left,
///     index: -1,
///     num_cells: 3,
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Face 0: left cell index -1 outside [0, 3)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperatorError {
    /// A zero-based cell index is negative or not below the cell count.
    #[error("Face {face}: {side} cell index {index} outside [0, {num_cells})")]
    CellIndexOutOfRange {
        /// Face record holding the index
        face: usize,
        /// Neighbor the index belongs to
        side: FaceSide,
        /// Zero-based index after conversion
        index: i64,
        /// Number of cells in the field
        num_cells: usize,
    },

    /// A floating-point connectivity entry is not a whole number.
    #[error("Face {face}: {side} cell index {raw} is not an integer")]
    NonIntegerIndex {
        /// Face record holding the entry
        face: usize,
        /// Neighbor the entry belongs to
        side: FaceSide,
        /// Raw entry as received
        raw: f64,
    },

    /// Buffer or field dimensions disagree.
    #[error("Shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Which dimension disagrees
        what: &'static str,
        /// Required size
        expected: usize,
        /// Size supplied
        got: usize,
    },

    /// Quantities must have at least one component.
    #[error("Quantity width must be at least 1")]
    ZeroWidth,
}

/// Result alias for operator calls.
pub type Result<T> = std::result::Result<T, OperatorError>;

/// `rows * width` for a buffer of declared shape.
///
/// A product that overflows `usize` cannot match any real buffer, so it is
/// reported as a [`OperatorError::ShapeMismatch`] against `got` with
/// `expected: usize::MAX`.
pub(crate) fn shape_len(
    what: &'static str,
    rows: usize,
    width: usize,
    got: usize,
) -> Result<usize> {
    rows.checked_mul(width).ok_or(OperatorError::ShapeMismatch {
        what,
        expected: usize::MAX,
        got,
    })
}

/// Checks that a buffer of length `got` holds exactly `rows * width` entries.
pub(crate) fn check_len(
    what: &'static str,
    rows: usize,
    width: usize,
    got: usize,
) -> Result<()> {
    let expected = shape_len(what, rows, width, got)?;
    if got != expected {
        return Err(OperatorError::ShapeMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_display() {
        assert_eq!(FaceSide::Left.to_string(), "left");
        assert_eq!(FaceSide::Right.to_string(), "right");
    }

    #[test]
    fn test_non_integer_display() {
        let err = OperatorError::NonIntegerIndex {
            face: 4,
            side: FaceSide::Right,
            raw: 2.5,
        };
        assert_eq!(
            format!("{}", err),
            "Face 4: right cell index 2.5 is not an integer"
        );
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = OperatorError::ShapeMismatch {
            what: "cell rows",
            expected: 3,
            got: 2,
        };
        assert_eq!(
            format!("{}", err),
            "Shape mismatch for cell rows: expected 3, got 2"
        );
    }

    #[test]
    fn test_check_len() {
        assert!(check_len("buffer", 3, 2, 6).is_ok());
        assert_eq!(
            check_len("buffer", 3, 2, 5).unwrap_err(),
            OperatorError::ShapeMismatch {
                what: "buffer",
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn test_check_len_overflow() {
        // 2^63 * 2 wraps to 0 in unchecked arithmetic
        let err = check_len("buffer", 1usize << (usize::BITS - 1), 2, 0).unwrap_err();
        assert_eq!(
            err,
            OperatorError::ShapeMismatch {
                what: "buffer",
                expected: usize::MAX,
                got: 0
            }
        );
    }

    #[test]
    fn test_error_trait_implementation() {
        let _: &dyn std::error::Error = &OperatorError::ZeroWidth;
    }
}
