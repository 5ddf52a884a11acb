// CPU Backend — Host-memory implementation of the astype Backend trait
//
// ARCHITECTURE:
// - CpuDevice is a unit struct; there is only one host.
// - CpuStorage is an enum over Vec<T> for each supported dtype.
// - The cast kernel lifts every element into a Scalar and lowers it into
//   the target element type (see WithDType::from_scalar for the rules).
// - Buffers of PARALLEL_THRESHOLD elements or more are cast with rayon.
//
// USAGE:
//   let t = CpuTensor::from_f64_slice(&[1.1], 1, DType::F32, &CpuDevice)?;
//   let i = t.to_dtype(DType::I32)?;  // [1]

use half::{bf16, f16};
use rayon::prelude::*;

use astype_core::backend::{Backend, BackendDevice, BackendStorage};
use astype_core::complex::{Complex128, Complex64};
use astype_core::dtype::{DType, WithDType};
use astype_core::error::{Error, Result};
use astype_core::tensor::Tensor;

/// Element count at which casts switch to the rayon thread pool.
pub const PARALLEL_THRESHOLD: usize = 32 * 1024;

/// The host CPU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuDevice;

impl BackendDevice for CpuDevice {
    fn name(&self) -> String {
        "cpu".to_string()
    }
}

/// Contiguous host buffer, one variant per dtype.
#[derive(Debug, Clone, PartialEq)]
pub enum CpuStorage {
    Bool(Vec<bool>),
    U8(Vec<u8>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F16(Vec<f16>),
    BF16(Vec<bf16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    C64(Vec<Complex64>),
    C128(Vec<Complex128>),
}

/// Run `$body` with `$v` bound to the typed slice inside a CpuStorage.
macro_rules! with_storage {
    ($storage:expr, $v:ident => $body:expr) => {
        match $storage {
            CpuStorage::Bool($v) => $body,
            CpuStorage::U8($v) => $body,
            CpuStorage::I8($v) => $body,
            CpuStorage::I16($v) => $body,
            CpuStorage::I32($v) => $body,
            CpuStorage::I64($v) => $body,
            CpuStorage::F16($v) => $body,
            CpuStorage::BF16($v) => $body,
            CpuStorage::F32($v) => $body,
            CpuStorage::F64($v) => $body,
            CpuStorage::C64($v) => $body,
            CpuStorage::C128($v) => $body,
        }
    };
}

impl BackendStorage for CpuStorage {
    fn dtype(&self) -> DType {
        match self {
            CpuStorage::Bool(_) => DType::Bool,
            CpuStorage::U8(_) => DType::U8,
            CpuStorage::I8(_) => DType::I8,
            CpuStorage::I16(_) => DType::I16,
            CpuStorage::I32(_) => DType::I32,
            CpuStorage::I64(_) => DType::I64,
            CpuStorage::F16(_) => DType::F16,
            CpuStorage::BF16(_) => DType::BF16,
            CpuStorage::F32(_) => DType::F32,
            CpuStorage::F64(_) => DType::F64,
            CpuStorage::C64(_) => DType::C64,
            CpuStorage::C128(_) => DType::C128,
        }
    }

    fn len(&self) -> usize {
        with_storage!(self, v => v.len())
    }
}

// Cast kernel

fn convert<S: WithDType, D: WithDType>(src: &[S]) -> Vec<D> {
    if src.len() >= PARALLEL_THRESHOLD {
        src.par_iter()
            .map(|&x| D::from_scalar(x.to_scalar()))
            .collect()
    } else {
        src.iter().map(|&x| D::from_scalar(x.to_scalar())).collect()
    }
}

fn cast_slice<S: WithDType>(src: &[S], dtype: DType) -> CpuStorage {
    match dtype {
        DType::Bool => CpuStorage::Bool(convert(src)),
        DType::U8 => CpuStorage::U8(convert(src)),
        DType::I8 => CpuStorage::I8(convert(src)),
        DType::I16 => CpuStorage::I16(convert(src)),
        DType::I32 => CpuStorage::I32(convert(src)),
        DType::I64 => CpuStorage::I64(convert(src)),
        DType::F16 => CpuStorage::F16(convert(src)),
        DType::BF16 => CpuStorage::BF16(convert(src)),
        DType::F32 => CpuStorage::F32(convert(src)),
        DType::F64 => CpuStorage::F64(convert(src)),
        DType::C64 => CpuStorage::C64(convert(src)),
        DType::C128 => CpuStorage::C128(convert(src)),
    }
}

fn to_f64s<S: WithDType>(src: &[S]) -> Vec<f64> {
    src.iter().map(|&x| x.to_f64()).collect()
}

/// The CPU compute backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl Backend for CpuBackend {
    type Device = CpuDevice;
    type Storage = CpuStorage;

    fn from_vec<T: WithDType>(data: Vec<T>, _device: &CpuDevice) -> Result<CpuStorage> {
        // Identity conversion: T -> Scalar -> T is exact for every element type.
        Ok(cast_slice(&data, T::DTYPE))
    }

    fn from_f64_slice(data: &[f64], dtype: DType, _device: &CpuDevice) -> Result<CpuStorage> {
        Ok(cast_slice(data, dtype))
    }

    fn to_f64_vec(input: &CpuStorage) -> Result<Vec<f64>> {
        Ok(with_storage!(input, v => to_f64s(v)))
    }

    fn to_vec<T: WithDType>(input: &CpuStorage) -> Result<Vec<T>> {
        if input.dtype() != T::DTYPE {
            return Err(Error::DTypeMismatch {
                expected: T::DTYPE,
                got: input.dtype(),
            });
        }
        Ok(with_storage!(input, v => convert::<_, T>(v)))
    }

    fn cast(input: &CpuStorage, dtype: DType, _device: &CpuDevice) -> Result<CpuStorage> {
        if input.dtype() == dtype {
            return Ok(input.clone());
        }
        Ok(with_storage!(input, v => cast_slice(v, dtype)))
    }
}

/// Convenience alias for a tensor on the CPU backend.
pub type CpuTensor = Tensor<CpuBackend>;
