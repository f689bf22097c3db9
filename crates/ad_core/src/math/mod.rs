//! Numerical helpers shared by the AD types.
//!
//! - `derivatives`: zero-extending combination of derivative vectors

pub mod derivatives;

pub use derivatives::{axpy_derivatives, combine_derivatives, scale_derivatives};
