//! Face-to-cell connectivity tables.
//!
//! A [`Connectivity`] lists, for every face, the two cells it separates.
//! External sources number cells from 1; every constructor here converts to
//! zero-based indices and rejects anything outside `[0, num_cells)`, so the
//! reduction kernels can index cell rows without further checks.

use tracing::warn;

use crate::error::{check_len, FaceSide, OperatorError, Result};

/// The two cells adjacent to one face, zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceCells {
    /// First neighbor
    pub left: usize,
    /// Second neighbor
    pub right: usize,
}

/// Validated face-to-cell table.
///
/// # Invariants
///
/// Every `left`/`right` entry is below [`num_cells`](Self::num_cells).
///
/// # Examples
///
/// ```
/// use ad_operators::Connectivity;
///
/// let conn = Connectivity::from_one_based(&[(1, 2), (2, 3)], 3).unwrap();
/// assert_eq!(conn.num_faces(), 2);
/// assert_eq!(conn.face(1).left, 1);
///
/// // Index 0 is -1 once converted to zero-based
/// assert!(Connectivity::from_one_based(&[(0, 1)], 3).is_err());
/// ```
///
/// Deserialisation goes through [`Connectivity::from_zero_based`], so the
/// invariant holds for tables loaded from disk as well.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawConnectivity"))]
pub struct Connectivity {
    faces: Vec<FaceCells>,
    num_cells: usize,
}

/// Unvalidated serialised form of [`Connectivity`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConnectivity {
    faces: Vec<FaceCells>,
    num_cells: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConnectivity> for Connectivity {
    type Error = OperatorError;

    fn try_from(raw: RawConnectivity) -> Result<Self> {
        let pairs: Vec<(usize, usize)> = raw.faces.iter().map(|f| (f.left, f.right)).collect();
        Self::from_zero_based(&pairs, raw.num_cells)
    }
}

impl Connectivity {
    /// Builds a table from 1-based `(left, right)` pairs.
    ///
    /// # Errors
    ///
    /// [`OperatorError::CellIndexOutOfRange`] for the first pair whose
    /// converted index falls outside `[0, num_cells)`.
    pub fn from_one_based(pairs: &[(i64, i64)], num_cells: usize) -> Result<Self> {
        let faces = pairs
            .iter()
            .enumerate()
            .map(|(face, &(l, r))| {
                Ok(FaceCells {
                    left: checked_index(face, FaceSide::Left, l.saturating_sub(1), num_cells)?,
                    right: checked_index(face, FaceSide::Right, r.saturating_sub(1), num_cells)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { faces, num_cells })
    }

    /// Builds a table from already zero-based pairs.
    ///
    /// # Errors
    ///
    /// [`OperatorError::CellIndexOutOfRange`] if an index is `>= num_cells`.
    pub fn from_zero_based(pairs: &[(usize, usize)], num_cells: usize) -> Result<Self> {
        for (face, &(l, r)) in pairs.iter().enumerate() {
            checked_index(face, FaceSide::Left, saturating_i64(l), num_cells)?;
            checked_index(face, FaceSide::Right, saturating_i64(r), num_cells)?;
        }
        let faces = pairs
            .iter()
            .map(|&(left, right)| FaceCells { left, right })
            .collect();
        Ok(Self { faces, num_cells })
    }

    /// Builds a table from an `num_faces x 2` column-major buffer of 1-based
    /// indices stored as `f64`.
    ///
    /// Entry `i` is the left cell of face `i`; entry `i + num_faces` its right
    /// cell. This is the layout numerical environments hand over for an
    /// integer matrix held in double precision.
    ///
    /// # Errors
    ///
    /// - [`OperatorError::ShapeMismatch`] if `buffer.len() != 2 * num_faces`
    /// - [`OperatorError::NonIntegerIndex`] for a fractional or non-finite entry
    /// - [`OperatorError::CellIndexOutOfRange`] for an index outside the mesh
    pub fn from_column_major(buffer: &[f64], num_faces: usize, num_cells: usize) -> Result<Self> {
        check_len("connectivity buffer", num_faces, 2, buffer.len())?;
        let (lefts, rights) = buffer.split_at(num_faces);
        let faces = lefts
            .iter()
            .zip(rights)
            .enumerate()
            .map(|(face, (&l, &r))| {
                let l = integral(face, FaceSide::Left, l)?;
                let r = integral(face, FaceSide::Right, r)?;
                Ok(FaceCells {
                    left: checked_index(face, FaceSide::Left, l.saturating_sub(1), num_cells)?,
                    right: checked_index(face, FaceSide::Right, r.saturating_sub(1), num_cells)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { faces, num_cells })
    }

    /// Number of face records.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of cells the indices were validated against.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// All face records in order.
    #[inline]
    pub fn faces(&self) -> &[FaceCells] {
        &self.faces
    }

    /// The neighbors of one face.
    ///
    /// # Panics
    ///
    /// Panics if `face >= num_faces()`.
    #[inline]
    pub fn face(&self, face: usize) -> FaceCells {
        self.faces[face]
    }

    /// Returns the table as 1-based pairs, the inverse of [`from_one_based`](Self::from_one_based).
    pub fn to_one_based(&self) -> Vec<(i64, i64)> {
        self.faces
            .iter()
            .map(|f| (f.left as i64 + 1, f.right as i64 + 1))
            .collect()
    }
}

fn checked_index(face: usize, side: FaceSide, index: i64, num_cells: usize) -> Result<usize> {
    if index < 0 || index as u64 >= num_cells as u64 {
        warn!(face, %side, index, num_cells, "cell index out of range");
        return Err(OperatorError::CellIndexOutOfRange {
            face,
            side,
            index,
            num_cells,
        });
    }
    Ok(index as usize)
}

fn saturating_i64(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

fn integral(face: usize, side: FaceSide, raw: f64) -> Result<i64> {
    if !raw.is_finite() || raw.fract() != 0.0 || raw.abs() > i64::MAX as f64 {
        warn!(face, %side, raw, "non-integer cell index");
        return Err(OperatorError::NonIntegerIndex { face, side, raw });
    }
    Ok(raw as i64)
}
