//! # ad_operators: Mesh Reduction Operators
//!
//! ## Operator Layer Role
//!
//! ad_operators sits on top of `ad_core` and maps per-cell quantities onto
//! mesh faces, providing:
//! - Validated face-to-cell tables (`connectivity`)
//! - Row-major per-cell and per-face storage (`field`)
//! - Neighbor-pair reductions: face average and face difference (`reduce`)
//! - A column-major `f64` buffer interface for binding layers (`dense`)
//! - Serial/parallel dispatch settings (`parallel`)
//!
//! Every operator is generic over [`FaceQuantity`](ad_core::FaceQuantity), so
//! the same code path serves plain `f64` fields and
//! [`AdScalar`](ad_core::AdScalar) fields; with AD inputs the face values
//! carry propagated derivatives.
//!
//! ## Usage Examples
//!
//! ```rust
//! use ad_operators::{face_average, CellField, Connectivity, ParallelConfig};
//!
//! let cells = CellField::from_rows(vec![vec![10.0], vec![20.0], vec![30.0]]).unwrap();
//! let conn = Connectivity::from_one_based(&[(1, 2), (2, 3)], 3).unwrap();
//!
//! let faces = face_average(&cells, &conn, &ParallelConfig::default()).unwrap();
//! assert_eq!(faces.as_slice(), &[15.0, 25.0]);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Rayon-backed parallel kernels
//! - `serde`: Serialisation for fields, connectivity and `ParallelConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod connectivity;
pub mod dense;
pub mod error;
pub mod field;
pub mod parallel;
pub mod reduce;

pub use connectivity::{Connectivity, FaceCells};
pub use error::{FaceSide, OperatorError, Result};
pub use field::{CellField, FaceField, Field};
pub use parallel::ParallelConfig;
pub use reduce::{
    face_average, face_average_into, face_difference, neighbor_pair_map, neighbor_pair_reduce,
    pair_difference, pair_mean,
};
