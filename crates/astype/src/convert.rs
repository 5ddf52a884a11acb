// Conversion facade — `astype` for host tensors
//
// A dtype specifier is either something the host already understands (a
// DType, or a DtypeId from an earlier lookup) or a string alias. Strings go
// through a registry; everything else is handed straight to the host cast
// primitive, Tensor::to_dtype. No numeric policy lives here.

use std::any::{type_name, Any};

use astype_core::{Backend, DType, Tensor};
use log::trace;

use crate::error::{Error, Result};
use crate::registry::{registry, DtypeId, DtypeRegistry};

/// A dtype given as an identifier or as an alias string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeSpec<'a> {
    Native(DType),
    Id(DtypeId),
    Alias(&'a str),
}

impl From<DType> for DtypeSpec<'_> {
    fn from(dt: DType) -> Self {
        DtypeSpec::Native(dt)
    }
}

impl From<DtypeId> for DtypeSpec<'_> {
    fn from(id: DtypeId) -> Self {
        DtypeSpec::Id(id)
    }
}

impl<'a> From<&'a str> for DtypeSpec<'a> {
    fn from(alias: &'a str) -> Self {
        DtypeSpec::Alias(alias)
    }
}

impl<'a> From<&'a String> for DtypeSpec<'a> {
    fn from(alias: &'a String) -> Self {
        DtypeSpec::Alias(alias.as_str())
    }
}

impl<'a> DtypeSpec<'a> {
    /// Build a specifier from a value whose type is only known at runtime.
    ///
    /// Accepts `DType`, `DtypeId`, `&str` and `String`. Any other type fails
    /// with [`Error::InvalidSpec`] naming it.
    pub fn from_dynamic<T: Any>(value: &'a T) -> Result<Self> {
        let any = value as &dyn Any;
        if let Some(dt) = any.downcast_ref::<DType>() {
            Ok(DtypeSpec::Native(*dt))
        } else if let Some(id) = any.downcast_ref::<DtypeId>() {
            Ok(DtypeSpec::Id(*id))
        } else if let Some(alias) = any.downcast_ref::<&'static str>() {
            Ok(DtypeSpec::Alias(*alias))
        } else if let Some(alias) = any.downcast_ref::<String>() {
            Ok(DtypeSpec::Alias(alias.as_str()))
        } else {
            Err(Error::InvalidSpec {
                found: type_name::<T>(),
            })
        }
    }

    /// The host dtype this specifier names, looking aliases up in `registry`.
    pub fn resolve_in(self, registry: &DtypeRegistry) -> Result<DType> {
        match self {
            DtypeSpec::Native(dt) => Ok(dt),
            DtypeSpec::Id(id) => Ok(id.dtype()),
            DtypeSpec::Alias(alias) => {
                let id = registry.resolve(alias)?;
                trace!("dtype alias {alias:?} -> {id}");
                Ok(id.dtype())
            }
        }
    }
}

impl DtypeRegistry {
    /// [`astype`] against this registry instead of the process-wide one.
    pub fn astype<'a, B: Backend>(
        &self,
        tensor: &Tensor<B>,
        spec: impl Into<DtypeSpec<'a>>,
    ) -> Result<Tensor<B>> {
        let dtype = spec.into().resolve_in(self)?;
        Ok(tensor.to_dtype(dtype)?)
    }
}

/// Return `tensor` converted to the dtype named by `spec`.
///
/// ```ignore
/// use astype::prelude::*;
///
/// let t = CpuTensor::from_f64_slice(&[1.1], 1, DType::F32, &CpuDevice)?;
/// let i = astype(&t, "torch.int32")?;  // [1], I32
/// let h = astype(&t, DType::F16)?;     // registry not consulted
/// ```
pub fn astype<'a, B: Backend>(
    tensor: &Tensor<B>,
    spec: impl Into<DtypeSpec<'a>>,
) -> Result<Tensor<B>> {
    registry().astype(tensor, spec)
}

/// [`astype`] for a specifier whose type is only known at runtime; see
/// [`DtypeSpec::from_dynamic`].
pub fn astype_dynamic<B: Backend, T: Any>(tensor: &Tensor<B>, spec: &T) -> Result<Tensor<B>> {
    astype(tensor, DtypeSpec::from_dynamic(spec)?)
}

/// Method-call form of [`astype`] for host tensors.
pub trait AsType: Sized {
    /// Convert using the process-wide registry.
    fn astype<'a>(&self, spec: impl Into<DtypeSpec<'a>>) -> Result<Self>;

    /// Convert using an explicit registry.
    fn astype_with<'a>(
        &self,
        registry: &DtypeRegistry,
        spec: impl Into<DtypeSpec<'a>>,
    ) -> Result<Self>;
}

impl<B: Backend> AsType for Tensor<B> {
    fn astype<'a>(&self, spec: impl Into<DtypeSpec<'a>>) -> Result<Self> {
        astype(self, spec)
    }

    fn astype_with<'a>(
        &self,
        registry: &DtypeRegistry,
        spec: impl Into<DtypeSpec<'a>>,
    ) -> Result<Self> {
        registry.astype(self, spec)
    }
}
