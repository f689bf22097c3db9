//! Neighbor-pair reductions from cells to faces.
//!
//! This module provides:
//! - [`neighbor_pair_reduce`]: the generic in-place operator
//! - [`neighbor_pair_map`]: its allocating form
//! - [`face_average`] / [`face_average_into`]: the mean of the two neighbors
//! - [`face_difference`]: `right - left`, the discrete gradient
//!
//! Every face row depends only on its own two neighbor rows, so the output is
//! split into disjoint runs of face rows and filled in parallel once the face
//! count passes [`ParallelConfig::parallel_threshold`]. Inputs are shared
//! read-only; no locking is involved. Results are identical on the serial and
//! parallel paths.
//!
//! All shape and index checks happen before the first row is written.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use ad_core::FaceQuantity;

use crate::connectivity::{Connectivity, FaceCells};
use crate::error::{OperatorError, Result};
use crate::field::{CellField, FaceField};
use crate::parallel::ParallelConfig;

/// `0.5 * (left + right)`, through the quantity's own arithmetic.
///
/// For [`AdScalar`](ad_core::AdScalar) the result's derivative vector is the
/// zero-extended mean of both neighbor vectors.
#[inline]
pub fn pair_mean<T: FaceQuantity>(left: &T, right: &T) -> T {
    let mut mean = left.clone();
    mean += right;
    mean *= 0.5;
    mean
}

/// `right - left`.
#[inline]
pub fn pair_difference<T: FaceQuantity>(left: &T, right: &T) -> T {
    let mut diff = right.clone();
    diff -= left;
    diff
}

/// Applies `combine(left, right)` per component for every face, writing `out`.
///
/// `out` must already have `connectivity.num_faces()` rows of the same width
/// as `cells`; existing entries are overwritten.
///
/// # Errors
///
/// [`OperatorError::ShapeMismatch`] if `cells` has a different row count than
/// the connectivity was validated against, or `out` has the wrong shape.
/// `out` is untouched on error.
///
/// # Examples
///
/// ```
/// use ad_operators::{neighbor_pair_reduce, CellField, Connectivity, FaceField, ParallelConfig};
///
/// let cells = CellField::from_rows(vec![vec![1.0], vec![4.0]]).unwrap();
/// let conn = Connectivity::from_one_based(&[(1, 2)], 2).unwrap();
/// let mut out = FaceField::filled(1, 1, 0.0).unwrap();
///
/// neighbor_pair_reduce(&cells, &conn, &mut out, &ParallelConfig::default(), |l, r| l.max(*r))
///     .unwrap();
/// assert_eq!(out.as_slice(), &[4.0]);
/// ```
pub fn neighbor_pair_reduce<T, F>(
    cells: &CellField<T>,
    connectivity: &Connectivity,
    out: &mut FaceField<T>,
    config: &ParallelConfig,
    combine: F,
) -> Result<()>
where
    T: FaceQuantity,
    F: Fn(&T, &T) -> T + Sync + Send,
{
    check_cells(cells, connectivity)?;
    let num_faces = connectivity.num_faces();
    if out.rows() != num_faces {
        return Err(OperatorError::ShapeMismatch {
            what: "face rows",
            expected: num_faces,
            got: out.rows(),
        });
    }
    if out.width() != cells.width() {
        return Err(OperatorError::ShapeMismatch {
            what: "face width",
            expected: cells.width(),
            got: out.width(),
        });
    }

    let width = cells.width();
    let parallel = config.should_parallelize(num_faces);
    debug!(num_faces, width, parallel, "neighbor-pair reduction");

    #[cfg(feature = "parallel")]
    if parallel {
        out.as_mut_slice()
            .par_chunks_mut(width)
            .zip(connectivity.faces().par_iter())
            .with_min_len(config.effective_chunk_size())
            .for_each(|(row, face)| write_row(row, face, cells, &combine));
        return Ok(());
    }

    for (row, face) in out.as_mut_slice().chunks_mut(width).zip(connectivity.faces()) {
        write_row(row, face, cells, &combine);
    }
    Ok(())
}

/// Allocating form of [`neighbor_pair_reduce`].
///
/// # Errors
///
/// [`OperatorError::ShapeMismatch`] if `cells` does not match the
/// connectivity's cell count.
pub fn neighbor_pair_map<T, F>(
    cells: &CellField<T>,
    connectivity: &Connectivity,
    config: &ParallelConfig,
    combine: F,
) -> Result<FaceField<T>>
where
    T: FaceQuantity,
    F: Fn(&T, &T) -> T + Sync + Send,
{
    check_cells(cells, connectivity)?;
    let num_faces = connectivity.num_faces();
    let width = cells.width();
    let parallel = config.should_parallelize(num_faces);
    debug!(num_faces, width, parallel, "neighbor-pair map");

    let pairs = |face: &FaceCells| {
        cells
            .row(face.left)
            .iter()
            .zip(cells.row(face.right))
            .map(|(l, r)| combine(l, r))
            .collect::<Vec<T>>()
    };

    #[cfg(feature = "parallel")]
    if parallel {
        // Ordered collect keeps face rows in connectivity order
        let data: Vec<T> = connectivity
            .faces()
            .par_iter()
            .with_min_len(config.effective_chunk_size())
            .flat_map_iter(&pairs)
            .collect();
        return FaceField::new(num_faces, width, data);
    }

    let data: Vec<T> = connectivity.faces().iter().flat_map(&pairs).collect();
    FaceField::new(num_faces, width, data)
}

/// Per-face mean of the two neighboring cells.
///
/// `result[f][c] = 0.5 * (cells[left(f)][c] + cells[right(f)][c])`.
/// Works for plain `f64` fields and for [`AdScalar`](ad_core::AdScalar)
/// fields alike; with AD inputs each face carries the averaged gradient.
///
/// # Errors
///
/// [`OperatorError::ShapeMismatch`] if `cells.rows()` differs from
/// `connectivity.num_cells()`.
///
/// # Examples
///
/// ```
/// use ad_core::AdScalar;
/// use ad_operators::{face_average, CellField, Connectivity, ParallelConfig};
///
/// let cells = CellField::from_rows(vec![
///     vec![AdScalar::from_parts(10.0, vec![1.0, 0.0])],
///     vec![AdScalar::from_parts(20.0, vec![0.0, 1.0])],
/// ])
/// .unwrap();
/// let conn = Connectivity::from_one_based(&[(1, 2)], 2).unwrap();
///
/// let faces = face_average(&cells, &conn, &ParallelConfig::default()).unwrap();
/// let f = &faces.row(0)[0];
/// assert_eq!(f.value(), 15.0);
/// assert_eq!(f.derivatives(), &[0.5, 0.5]);
/// ```
pub fn face_average<T: FaceQuantity>(
    cells: &CellField<T>,
    connectivity: &Connectivity,
    config: &ParallelConfig,
) -> Result<FaceField<T>> {
    neighbor_pair_map(cells, connectivity, config, pair_mean)
}

/// [`face_average`] into a caller-owned face field.
///
/// # Errors
///
/// As for [`neighbor_pair_reduce`].
pub fn face_average_into<T: FaceQuantity>(
    cells: &CellField<T>,
    connectivity: &Connectivity,
    out: &mut FaceField<T>,
    config: &ParallelConfig,
) -> Result<()> {
    neighbor_pair_reduce(cells, connectivity, out, config, pair_mean)
}

/// Per-face `right - left` difference of the neighboring cells.
///
/// # Errors
///
/// As for [`face_average`].
pub fn face_difference<T: FaceQuantity>(
    cells: &CellField<T>,
    connectivity: &Connectivity,
    config: &ParallelConfig,
) -> Result<FaceField<T>> {
    neighbor_pair_map(cells, connectivity, config, pair_difference)
}

fn check_cells<T>(cells: &CellField<T>, connectivity: &Connectivity) -> Result<()> {
    if cells.rows() != connectivity.num_cells() {
        return Err(OperatorError::ShapeMismatch {
            what: "cell rows",
            expected: connectivity.num_cells(),
            got: cells.rows(),
        });
    }
    Ok(())
}

#[inline]
fn write_row<T, F>(row: &mut [T], face: &FaceCells, cells: &CellField<T>, combine: &F)
where
    F: Fn(&T, &T) -> T,
{
    let left = cells.row(face.left);
    let right = cells.row(face.right);
    for ((slot, l), r) in row.iter_mut().zip(left).zip(right) {
        *slot = combine(l, r);
    }
}
