//! Connectivity tables and fields loaded from disk are validated on load.

#![cfg(feature = "serde")]

use ad_operators::{face_average, CellField, Connectivity, OperatorError, ParallelConfig};

#[test]
fn test_out_of_range_face_rejected_on_load() {
    let err = toml::from_str::<Connectivity>(
        r#"
        num_cells = 2
        faces = [{ left = 0, right = 7 }]
        "#,
    )
    .unwrap_err();
    assert!(
        err.to_string().contains("right cell index 7 outside [0, 2)"),
        "{}",
        err
    );
}

#[test]
fn test_loaded_connectivity_is_usable() {
    let conn = Connectivity::from_one_based(&[(1, 2), (2, 3)], 3).unwrap();
    let text = toml::to_string(&conn).unwrap();
    let loaded: Connectivity = toml::from_str(&text).unwrap();
    assert_eq!(loaded, conn);

    let cells = CellField::from_rows(vec![vec![1.0], vec![3.0], vec![7.0]]).unwrap();
    let faces = face_average(&cells, &loaded, &ParallelConfig::serial()).unwrap();
    assert_eq!(faces.as_slice(), &[2.0, 5.0]);
}

#[test]
fn test_zero_width_field_rejected_on_load() {
    let err = toml::from_str::<CellField<f64>>("rows = 0\nwidth = 0\ndata = []").unwrap_err();
    assert!(
        err.to_string().contains(&OperatorError::ZeroWidth.to_string()),
        "{}",
        err
    );
}

#[test]
fn test_short_field_rejected_on_load() {
    let err = toml::from_str::<CellField<f64>>("rows = 2\nwidth = 2\ndata = [1.0, 2.0, 3.0]")
        .unwrap_err();
    assert!(
        err.to_string().contains("Shape mismatch for field data: expected 4, got 3"),
        "{}",
        err
    );
}
