//! Face averaging over raw column-major `f64` buffers.
//!
//! Numerical environments hand over matrices column-major: a `num_cells x
//! width` value matrix stores component `j` of cell `i` at
//! `values[i + num_cells * j]`, and the `num_faces x 2` neighbor matrix keeps
//! 1-based cell numbers in double precision, left cells first. The functions
//! here accept exactly that layout and return the `num_faces x width` result
//! in the same layout, so a binding layer can pass its buffers straight
//! through without reshaping.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::connectivity::Connectivity;
use crate::error::{check_len, shape_len, OperatorError, Result};
use crate::parallel::ParallelConfig;
use crate::reduce::pair_mean;

/// Averages cell values onto faces, column-major in and out.
///
/// # Arguments
///
/// * `values` - `num_cells x width` column-major cell values
/// * `num_cells` - Number of cells
/// * `width` - Components per cell, at least 1
/// * `neighbors` - `num_faces x 2` column-major 1-based cell numbers
/// * `num_faces` - Number of faces
/// * `config` - Parallel execution settings
///
/// # Returns
///
/// `num_faces x width` column-major face values.
///
/// # Errors
///
/// [`OperatorError::ZeroWidth`], [`OperatorError::ShapeMismatch`] for buffer
/// lengths that disagree with the declared dimensions, and the connectivity
/// errors of [`Connectivity::from_column_major`].
///
/// # Examples
///
/// ```
/// use ad_operators::dense::face_average_column_major;
/// use ad_operators::ParallelConfig;
///
/// // Cells [[1, 2], [3, 4]], one face between them
/// let values = [1.0, 3.0, 2.0, 4.0];
/// let neighbors = [1.0, 2.0];
/// let config = ParallelConfig::default();
/// let faces = face_average_column_major(&values, 2, 2, &neighbors, 1, &config).unwrap();
/// assert_eq!(faces, vec![2.0, 3.0]);
/// ```
pub fn face_average_column_major(
    values: &[f64],
    num_cells: usize,
    width: usize,
    neighbors: &[f64],
    num_faces: usize,
    config: &ParallelConfig,
) -> Result<Vec<f64>> {
    let connectivity = validate(values, num_cells, width, neighbors, num_faces)?;
    let len = shape_len("face result buffer", num_faces, width, 0)?;
    let mut result = vec![0.0; len];
    average_columns(values, num_cells, width, &connectivity, &mut result, config);
    Ok(result)
}

/// [`face_average_column_major`] writing into a caller-declared buffer of
/// length `num_faces * width`.
///
/// # Errors
///
/// As for [`face_average_column_major`], plus
/// [`OperatorError::ShapeMismatch`] if `result` has the wrong length. The
/// buffer is untouched on error.
pub fn face_average_column_major_into(
    values: &[f64],
    num_cells: usize,
    width: usize,
    neighbors: &[f64],
    num_faces: usize,
    result: &mut [f64],
    config: &ParallelConfig,
) -> Result<()> {
    let connectivity = validate(values, num_cells, width, neighbors, num_faces)?;
    check_len("face result buffer", num_faces, width, result.len())?;
    average_columns(values, num_cells, width, &connectivity, result, config);
    Ok(())
}

/// Shape checks shared by both entry points. Nothing is allocated or
/// written before these pass.
fn validate(
    values: &[f64],
    num_cells: usize,
    width: usize,
    neighbors: &[f64],
    num_faces: usize,
) -> Result<Connectivity> {
    if width == 0 {
        return Err(OperatorError::ZeroWidth);
    }
    check_len("cell value buffer", num_cells, width, values.len())?;
    Connectivity::from_column_major(neighbors, num_faces, num_cells)
}

/// `result` has already been checked to hold `num_faces * width` entries.
fn average_columns(
    values: &[f64],
    num_cells: usize,
    width: usize,
    connectivity: &Connectivity,
    result: &mut [f64],
    config: &ParallelConfig,
) {
    let num_faces = connectivity.num_faces();
    if num_faces == 0 {
        return;
    }

    let parallel = config.should_parallelize(num_faces);
    debug!(num_faces, num_cells, width, parallel, "column-major face average");

    // A valid face implies num_cells >= 1, so chunking by num_cells is safe
    #[cfg(feature = "parallel")]
    if parallel {
        let faces = connectivity.faces();
        let min_len = config.effective_chunk_size();
        result
            .par_chunks_mut(num_faces)
            .zip(values.par_chunks(num_cells))
            .for_each(|(out_col, cell_col)| {
                out_col
                    .par_iter_mut()
                    .zip(faces.par_iter())
                    .with_min_len(min_len)
                    .for_each(|(slot, face)| {
                        *slot = pair_mean(&cell_col[face.left], &cell_col[face.right]);
                    });
            });
        return;
    }

    for (out_col, cell_col) in result.chunks_mut(num_faces).zip(values.chunks(num_cells)) {
        for (slot, face) in out_col.iter_mut().zip(connectivity.faces()) {
            *slot = pair_mean(&cell_col[face.left], &cell_col[face.right]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column_line() {
        let values = [10.0, 20.0, 30.0];
        let neighbors = [1.0, 2.0, 2.0, 3.0];
        let faces =
            face_average_column_major(&values, 3, 1, &neighbors, 2, &ParallelConfig::serial())
                .unwrap();
        assert_eq!(faces, vec![15.0, 25.0]);
    }

    #[test]
    fn test_two_columns_layout() {
        // Cells [[1, 10], [3, 30], [5, 50]], faces (1,2), (3,1)
        let values = [1.0, 3.0, 5.0, 10.0, 30.0, 50.0];
        let neighbors = [1.0, 3.0, 2.0, 1.0];
        let faces =
            face_average_column_major(&values, 3, 2, &neighbors, 2, &ParallelConfig::serial())
                .unwrap();
        assert_eq!(faces, vec![2.0, 3.0, 20.0, 30.0]);
    }

    #[test]
    fn test_zero_faces() {
        let faces =
            face_average_column_major(&[1.0, 2.0], 2, 1, &[], 0, &ParallelConfig::always_parallel())
                .unwrap();
        assert!(faces.is_empty());
    }

    #[test]
    fn test_index_zero_rejected_before_write() {
        let mut result = [7.0, 7.0];
        let err = face_average_column_major_into(
            &[1.0, 2.0],
            2,
            1,
            &[1.0, 2.0, 0.0, 1.0],
            2,
            &mut result,
            &ParallelConfig::serial(),
        )
        .unwrap_err();
        assert!(matches!(err, OperatorError::CellIndexOutOfRange { face: 0, index: -1, .. }));
        assert_eq!(result, [7.0, 7.0]);
    }

    #[test]
    fn test_buffer_lengths_checked() {
        let config = ParallelConfig::serial();
        assert_eq!(
            face_average_column_major(&[1.0], 1, 0, &[], 0, &config).unwrap_err(),
            OperatorError::ZeroWidth
        );
        assert!(matches!(
            face_average_column_major(&[1.0, 2.0, 3.0], 2, 2, &[1.0, 2.0], 1, &config),
            Err(OperatorError::ShapeMismatch { what: "cell value buffer", .. })
        ));

        let mut short = [0.0; 1];
        let neighbors = [1.0, 2.0, 2.0, 1.0];
        let err =
            face_average_column_major_into(&[1.0, 2.0], 2, 1, &neighbors, 2, &mut short, &config)
                .unwrap_err();
        assert!(matches!(err, OperatorError::ShapeMismatch { what: "face result buffer", .. }));
    }

    #[test]
    fn test_overflowing_declared_shape() {
        let config = ParallelConfig::serial();
        let huge = 1usize << (usize::BITS - 1);

        // num_cells * width wraps to 0 in unchecked arithmetic
        let err = face_average_column_major(&[], huge, 2, &[], 0, &config).unwrap_err();
        assert_eq!(
            err,
            OperatorError::ShapeMismatch {
                what: "cell value buffer",
                expected: usize::MAX,
                got: 0
            }
        );

        // num_faces * width
        let mut empty: [f64; 0] = [];
        let err =
            face_average_column_major_into(&[1.0], 1, 1, &[], huge, &mut empty, &config)
                .unwrap_err();
        assert!(matches!(err, OperatorError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let n = 300;
        let width = 3;
        let values: Vec<f64> = (0..n * width).map(|k| (k as f64 * 0.37).cos()).collect();
        let mut neighbors: Vec<f64> = (1..n).map(|i| i as f64).collect();
        neighbors.extend((2..=n).map(|i| i as f64));

        let serial = face_average_column_major(
            &values,
            n,
            width,
            &neighbors,
            n - 1,
            &ParallelConfig::serial(),
        )
        .unwrap();
        let parallel = face_average_column_major(
            &values,
            n,
            width,
            &neighbors,
            n - 1,
            &ParallelConfig::always_parallel(),
        )
        .unwrap();
        assert_eq!(serial, parallel);
    }
}
