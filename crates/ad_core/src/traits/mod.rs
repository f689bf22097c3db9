//! Core traits for quantities carried on mesh entities.
//!
//! This module defines:
//! - `FaceQuantity`: the arithmetic a neighbor-pair operator needs from a
//!   per-cell value, implemented for plain `f64` and for [`AdScalar`]
//!
//! [`AdScalar`]: crate::types::AdScalar

pub mod quantity;

pub use quantity::FaceQuantity;
