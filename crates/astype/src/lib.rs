//! # astype
//!
//! String dtype aliases and an `astype` conversion for astype-core tensors.
//!
//! ```ignore
//! use astype::prelude::*;
//!
//! let t = CpuTensor::from_f64_slice(&[1.1], 1, DType::F32, &CpuDevice)?;
//! let b = t.astype("torch.bool")?;        // [true]
//! let i = astype(&t, "torch.int32")?;     // [1]
//! assert_eq!(resolve("torch.short")?, resolve("torch.int16")?);
//! ```
//!
//! ## Modules
//!
//! - [`registry`] — alias table, host-version feature gate, [`resolve`]
//! - [`convert`] — [`astype`], [`AsType`], [`DtypeSpec`]
//! - [`version`] — host release parsing and ordering
//! - [`error`] — [`DtypeParseError`] and the crate [`Error`]
//!
//! ## Host version
//!
//! `torch.bool` and `torch.bfloat16` are registered only when the host
//! release is 1.3.0 or newer. The release is read once, when the process-wide
//! registry is first used, from the `ASTYPE_HOST_VERSION` environment
//! variable or else from [`astype_core::version`].

pub mod convert;
pub mod error;
pub mod registry;
pub mod version;

pub use convert::{astype, astype_dynamic, AsType, DtypeSpec};
pub use error::{DtypeParseError, Error, Result};
pub use registry::{
    aliases_of, available_aliases, registry, resolve, BuiltinType, DtypeId, DtypeRegistry,
    HOST_VERSION_ENV,
};
pub use version::{HostVersion, PreRelease, FEATURE_THRESHOLD};

/// Everything needed to build host tensors and convert them.
pub mod prelude {
    pub use crate::{
        aliases_of, astype, astype_dynamic, available_aliases, registry, resolve, AsType,
        BuiltinType, DtypeId, DtypeParseError, DtypeRegistry, DtypeSpec, Error, HostVersion,
    };
    pub use astype_core::{DType, Shape, Tensor, WithDType};
    pub use astype_cpu::{CpuBackend, CpuDevice, CpuTensor};
}
