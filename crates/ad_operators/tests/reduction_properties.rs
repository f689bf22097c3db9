//! Property tests for face reductions.
//!
//! Results must not depend on threading or on the order faces are listed in.

use ad_core::AdScalar;
use ad_operators::{face_average, CellField, Connectivity, ParallelConfig};
use proptest::prelude::*;

/// Random mesh: cell values, width and a list of 1-based face pairs.
fn mesh_strategy() -> impl Strategy<Value = (usize, usize, Vec<f64>, Vec<(i64, i64)>)> {
    (1usize..40, 1usize..4).prop_flat_map(|(num_cells, width)| {
        let values = prop::collection::vec(-1e3..1e3, num_cells * width);
        let faces = prop::collection::vec(
            (1..=num_cells as i64, 1..=num_cells as i64),
            0..80,
        );
        (Just(num_cells), Just(width), values, faces)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_parallel_matches_serial((num_cells, width, values, pairs) in mesh_strategy()) {
        let cells = CellField::new(num_cells, width, values).unwrap();
        let conn = Connectivity::from_one_based(&pairs, num_cells).unwrap();

        let serial = face_average(&cells, &conn, &ParallelConfig::serial()).unwrap();
        let parallel = face_average(&cells, &conn, &ParallelConfig::always_parallel()).unwrap();
        prop_assert_eq!(serial, parallel);
    }

    #[test]
    fn prop_face_order_independent(
        (num_cells, width, values, pairs) in mesh_strategy(),
        seed in any::<u64>(),
    ) {
        let cells = CellField::new(num_cells, width, values).unwrap();
        let conn = Connectivity::from_one_based(&pairs, num_cells).unwrap();
        let faces = face_average(&cells, &conn, &ParallelConfig::default()).unwrap();

        // Rotate the face list; each face row must follow its face
        let shift = if pairs.is_empty() { 0 } else { (seed % pairs.len() as u64) as usize };
        let mut rotated = pairs.clone();
        rotated.rotate_left(shift);
        let rotated_conn = Connectivity::from_one_based(&rotated, num_cells).unwrap();
        let rotated_faces =
            face_average(&cells, &rotated_conn, &ParallelConfig::default()).unwrap();

        for f in 0..pairs.len() {
            let g = (f + pairs.len() - shift) % pairs.len();
            prop_assert_eq!(faces.row(f), rotated_faces.row(g));
        }
    }

    #[test]
    fn prop_face_value_between_neighbors((num_cells, width, values, pairs) in mesh_strategy()) {
        let cells = CellField::new(num_cells, width, values).unwrap();
        let conn = Connectivity::from_one_based(&pairs, num_cells).unwrap();
        let faces = face_average(&cells, &conn, &ParallelConfig::default()).unwrap();

        for (f, face) in conn.faces().iter().enumerate() {
            for c in 0..width {
                let l = cells.row(face.left)[c];
                let r = cells.row(face.right)[c];
                let v = faces.row(f)[c];
                prop_assert!(v >= l.min(r) && v <= l.max(r));
            }
        }
    }

    #[test]
    fn prop_ad_gradient_weights((num_cells, _width, values, pairs) in mesh_strategy()) {
        // One AD variable per cell, first component only
        let seeded: Vec<AdScalar> = (0..num_cells)
            .map(|i| AdScalar::variable(values[i], i))
            .collect();
        let cells = CellField::new(num_cells, 1, seeded).unwrap();
        let conn = Connectivity::from_one_based(&pairs, num_cells).unwrap();
        let faces = face_average(&cells, &conn, &ParallelConfig::always_parallel()).unwrap();

        for (f, face) in conn.faces().iter().enumerate() {
            let out = &faces.row(f)[0];
            let total: f64 = out.derivatives().iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-12);
            if face.left == face.right {
                prop_assert_eq!(out.derivative(face.left), 1.0);
            } else {
                prop_assert_eq!(out.derivative(face.left), 0.5);
                prop_assert_eq!(out.derivative(face.right), 0.5);
            }
        }
    }
}
