//! # ad_core: Forward-mode AD Foundation
//!
//! ## Core Layer Role
//!
//! ad_core is the bottom layer of the workspace, providing:
//! - The forward-mode AD scalar [`AdScalar`](types::AdScalar) (`types::ad_scalar`)
//! - Zero-extending derivative combination (`math::derivatives`)
//! - The [`FaceQuantity`](traits::FaceQuantity) trait shared by `f64` and `AdScalar` (`traits`)
//! - Error types: `AdError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! This layer has no dependencies on other workspace crates, with minimal
//! external dependencies:
//! - num-traits: `Zero`/`One` for generic numeric code
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use ad_core::types::AdScalar;
//!
//! // Two independent variables in slots 0 and 1
//! let a = AdScalar::from_parts(10.0, vec![1.0, 0.0]);
//! let b = AdScalar::from_parts(20.0, vec![0.0, 1.0]);
//!
//! let mut mean = &a + &b;
//! mean *= 0.5;
//! assert_eq!(mean.value(), 15.0);
//! assert_eq!(mean.derivatives(), &[0.5, 0.5]);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `AdScalar` and `AdError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;

pub use traits::FaceQuantity;
pub use types::{AdError, AdScalar};
