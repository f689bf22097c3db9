//! Per-entity quantity arrays.
//!
//! A [`Field`] is a dense `rows x width` table stored row-major: the
//! `width` components of one cell (or face) are contiguous. Row-major storage
//! lets the parallel kernels hand each worker a disjoint run of whole face
//! rows. Conversions to and from the column-major layout of numerical
//! environments are provided for the buffer interface.

use crate::error::{check_len, shape_len, OperatorError, Result};

/// Dense `rows x width` array of quantities, row-major.
///
/// # Invariants
///
/// - `width >= 1`
/// - `data.len() == rows * width`
///
/// Deserialisation goes through [`Field::new`], so a malformed shape is
/// rejected at load time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawField<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct Field<T> {
    rows: usize,
    width: usize,
    data: Vec<T>,
}

/// Unvalidated serialised form of [`Field`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawField<T> {
    rows: usize,
    width: usize,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawField<T>> for Field<T> {
    type Error = OperatorError;

    fn try_from(raw: RawField<T>) -> Result<Self> {
        Field::new(raw.rows, raw.width, raw.data)
    }
}

/// Quantities indexed by cell.
pub type CellField<T> = Field<T>;

/// Quantities indexed by face.
pub type FaceField<T> = Field<T>;

impl<T> Field<T> {
    /// Wraps a row-major buffer.
    ///
    /// # Errors
    ///
    /// - [`OperatorError::ZeroWidth`] if `width == 0`
    /// - [`OperatorError::ShapeMismatch`] if `data.len() != rows * width`
    pub fn new(rows: usize, width: usize, data: Vec<T>) -> Result<Self> {
        if width == 0 {
            return Err(OperatorError::ZeroWidth);
        }
        check_len("field data", rows, width, data.len())?;
        Ok(Self { rows, width, data })
    }

    /// Builds a field from one `Vec` per row.
    ///
    /// `width` is taken from the first row; an empty input needs an explicit
    /// width, see [`Field::new`].
    ///
    /// # Errors
    ///
    /// [`OperatorError::ShapeMismatch`] if rows differ in length,
    /// [`OperatorError::ZeroWidth`] if rows are empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ad_operators::CellField;
    ///
    /// let cells = CellField::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(cells.row(1), &[3.0, 4.0]);
    /// ```
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).ok_or(OperatorError::ZeroWidth)?;
        let n = rows.len();
        let mut data = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for row in rows {
            if row.len() != width {
                return Err(OperatorError::ShapeMismatch {
                    what: "row width",
                    expected: width,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Self::new(n, width, data)
    }

    /// Number of rows (cells or faces).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of components per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Components of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows()`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    /// Mutable components of one row.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.data[row * self.width..(row + 1) * self.width]
    }

    /// One component of one row.
    #[inline]
    pub fn get(&self, row: usize, component: usize) -> Option<&T> {
        if component >= self.width {
            return None;
        }
        self.data.get(row * self.width + component)
    }

    /// Iterator over rows.
    pub fn iter_rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.width)
    }

    /// Flat row-major view.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Flat row-major mutable view.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the field, returning the row-major buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Field<T> {
    /// A field with every entry set to `value`.
    ///
    /// # Errors
    ///
    /// [`OperatorError::ZeroWidth`] if `width == 0`,
    /// [`OperatorError::ShapeMismatch`] if `rows * width` overflows.
    pub fn filled(rows: usize, width: usize, value: T) -> Result<Self> {
        let len = shape_len("field data", rows, width, 0)?;
        Self::new(rows, width, vec![value; len])
    }

    /// Reads a column-major buffer: component `j` of row `i` at `i + rows * j`.
    ///
    /// # Errors
    ///
    /// As for [`Field::new`].
    pub fn from_column_major(rows: usize, width: usize, buffer: &[T]) -> Result<Self> {
        if width == 0 {
            return Err(OperatorError::ZeroWidth);
        }
        check_len("column-major buffer", rows, width, buffer.len())?;
        let data = (0..rows)
            .flat_map(|i| (0..width).map(move |j| buffer[i + rows * j].clone()))
            .collect();
        Ok(Self { rows, width, data })
    }

    /// Writes the field out column-major.
    pub fn to_column_major(&self) -> Vec<T> {
        (0..self.width)
            .flat_map(|j| (0..self.rows).map(move |i| self.data[i * self.width + j].clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(Field::new(2, 2, vec![1.0; 4]).is_ok());
        let err = Field::new(2, 2, vec![1.0; 3]).unwrap_err();
        assert_eq!(
            err,
            OperatorError::ShapeMismatch {
                what: "field data",
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn test_zero_width_rejected() {
        assert_eq!(
            Field::<f64>::new(0, 0, vec![]).unwrap_err(),
            OperatorError::ZeroWidth
        );
        assert_eq!(
            Field::<f64>::from_rows(vec![]).unwrap_err(),
            OperatorError::ZeroWidth
        );
    }

    #[test]
    fn test_overflowing_shape_rejected() {
        let huge = 1usize << (usize::BITS - 1);
        let err = Field::<f64>::new(huge, 2, vec![]).unwrap_err();
        assert!(matches!(
            err,
            OperatorError::ShapeMismatch {
                what: "field data",
                expected: usize::MAX,
                got: 0
            }
        ));
        assert!(Field::<f64>::from_column_major(huge, 2, &[]).is_err());
        assert!(Field::filled(huge, 2, 0.0).is_err());
    }

    #[test]
    fn test_zero_rows_allowed() {
        let f = Field::<f64>::new(0, 3, vec![]).unwrap();
        assert_eq!(f.rows(), 0);
        assert_eq!(f.iter_rows().count(), 0);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Field::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, OperatorError::ShapeMismatch { what: "row width", .. }));
    }

    #[test]
    fn test_column_major_round_trip() {
        // [[1, 2], [3, 4], [5, 6]] column-major
        let buffer = [1.0, 3.0, 5.0, 2.0, 4.0, 6.0];
        let f = Field::from_column_major(3, 2, &buffer).unwrap();
        assert_eq!(f.row(0), &[1.0, 2.0]);
        assert_eq!(f.row(2), &[5.0, 6.0]);
        assert_eq!(f.to_column_major(), buffer.to_vec());
    }

    #[test]
    fn test_get_bounds() {
        let f = Field::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(f.get(1, 0), Some(&3));
        assert_eq!(f.get(0, 2), None);
        assert_eq!(f.get(2, 0), None);
    }

    #[test]
    fn test_row_mut() {
        let mut f = Field::filled(2, 2, 0.0).unwrap();
        f.row_mut(1)[0] = 7.0;
        assert_eq!(f.as_slice(), &[0.0, 0.0, 7.0, 0.0]);
    }
}
