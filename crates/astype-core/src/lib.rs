//! # astype-core
//!
//! Core tensor primitives and backend traits of the astype host library.
//!
//! This crate provides:
//! - [`Tensor`] — immutable n-dimensional array handle
//! - [`Shape`] — dimension sizes
//! - [`DType`] — element types (Bool, U8..I64, F16, BF16, F32, F64, C64, C128)
//! - [`Backend`] trait — abstraction over devices, including the `cast` primitive
//! - [`version`] — the host release, used by dependents for feature gating

pub mod backend;
pub mod complex;
pub mod dtype;
pub mod error;
pub mod shape;
pub mod tensor;

pub use backend::{Backend, BackendDevice, BackendStorage};
pub use complex::{Complex128, Complex64};
pub use dtype::{DType, Scalar, WithDType};
pub use error::{Error, Result};
pub use shape::Shape;
pub use tensor::Tensor;

/// Release of this host library, `MAJOR.MINOR.PATCH`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The host library release string.
pub fn version() -> &'static str {
    VERSION
}
