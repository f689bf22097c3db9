//! Core AD types.
//!
//! This module provides:
//! - `ad_scalar`: The forward-mode [`AdScalar`] with growable derivative slots
//! - `error`: Structured error types for checked AD arithmetic
//!
//! # Re-exports
//!
//! - [`AdScalar`] from `ad_scalar`
//! - [`AdError`] from `error`

pub mod ad_scalar;
pub mod error;

pub use ad_scalar::AdScalar;
pub use error::AdError;
