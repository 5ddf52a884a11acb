use std::sync::Arc;

use crate::backend::{Backend, BackendStorage};
use crate::complex::Complex128;
use crate::dtype::{DType, WithDType};
use crate::error::{Error, Result};
use crate::shape::Shape;

// Tensor — The fundamental data structure
//
// A Tensor is an n-dimensional array of elements that:
//
//   1. Holds data on a specific device
//   2. Has a shape (e.g., [batch, channels, height, width])
//   3. Has a dtype (f32, i64, bool, c64, ...)
//
// Tensor<B: Backend> is generic over the backend, so Tensor<CpuBackend>
// holds host memory and operations are dispatched via the Backend trait.
//
// The inner data is wrapped in Arc and never mutated after construction:
// cloning a Tensor is O(1), and a handle can be shared across threads.

/// Inner data of a tensor, shared via Arc.
struct TensorInner<B: Backend> {
    /// The raw data stored on the backend's device, contiguous row-major.
    storage: B::Storage,
    shape: Shape,
    dtype: DType,
    device: B::Device,
}

/// An n-dimensional array of elements on a specific backend.
///
/// # Example
/// ```ignore
/// use astype_core::{DType, Tensor};
/// use astype_cpu::{CpuBackend, CpuDevice};
///
/// let a = Tensor::<CpuBackend>::from_f64_slice(&[1.1, 2.7], 2, DType::F32, &CpuDevice)?;
/// let b = a.to_dtype(DType::I32)?; // [1, 2]
/// ```
pub struct Tensor<B: Backend> {
    inner: Arc<TensorInner<B>>,
}

// Manual Clone: Arc::clone is cheap (just increment refcount).
impl<B: Backend> Clone for Tensor<B> {
    fn clone(&self) -> Self {
        Tensor {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Backend> std::fmt::Debug for Tensor<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tensor(shape={}, dtype={}, device={:?})",
            self.inner.shape, self.inner.dtype, self.inner.device,
        )
    }
}

impl<B: Backend> Tensor<B> {
    // Internal constructors

    fn from_storage(storage: B::Storage, shape: Shape, device: B::Device) -> Self {
        Tensor {
            inner: Arc::new(TensorInner {
                dtype: storage.dtype(),
                storage,
                shape,
                device,
            }),
        }
    }

    fn check_elem_count(shape: &Shape, got: usize) -> Result<()> {
        let expected = shape.elem_count();
        if expected != got {
            return Err(Error::ElementCountMismatch {
                shape: shape.clone(),
                expected,
                got,
            });
        }
        Ok(())
    }

    // Accessors

    pub fn shape(&self) -> &Shape {
        &self.inner.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.inner.shape.dims()
    }

    pub fn rank(&self) -> usize {
        self.inner.shape.rank()
    }

    pub fn elem_count(&self) -> usize {
        self.inner.shape.elem_count()
    }

    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    pub fn device(&self) -> &B::Device {
        &self.inner.device
    }

    pub fn storage(&self) -> &B::Storage {
        &self.inner.storage
    }

    /// Whether two handles point at the same storage.
    pub fn same_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // Creation

    /// Create a tensor that takes ownership of `data`; dtype is `T::DTYPE`.
    pub fn from_vec<T: WithDType>(
        data: Vec<T>,
        shape: impl Into<Shape>,
        device: &B::Device,
    ) -> Result<Self> {
        let shape = shape.into();
        Self::check_elem_count(&shape, data.len())?;
        let storage = B::from_vec(data, device)?;
        Ok(Self::from_storage(storage, shape, device.clone()))
    }

    /// Create a tensor from f64 values, converting them to `dtype`.
    pub fn from_f64_slice(
        data: &[f64],
        shape: impl Into<Shape>,
        dtype: DType,
        device: &B::Device,
    ) -> Result<Self> {
        let shape = shape.into();
        Self::check_elem_count(&shape, data.len())?;
        let storage = B::from_f64_slice(data, dtype, device)?;
        Ok(Self::from_storage(storage, shape, device.clone()))
    }

    // Data extraction

    /// Extract all elements as a flat Vec<f64>. Complex elements report
    /// their real part.
    pub fn to_f64_vec(&self) -> Result<Vec<f64>> {
        B::to_f64_vec(&self.inner.storage)
    }

    /// Extract all elements as `T`; the tensor must already hold `T::DTYPE`.
    pub fn to_vec<T: WithDType>(&self) -> Result<Vec<T>> {
        B::to_vec(&self.inner.storage)
    }

    /// Extract a scalar value (tensor must have exactly 1 element).
    pub fn to_scalar_f64(&self) -> Result<f64> {
        if self.elem_count() != 1 {
            return Err(Error::NotAScalar {
                shape: self.shape().clone(),
            });
        }
        let vec = self.to_f64_vec()?;
        Ok(vec[0])
    }

    // Dtype conversion

    /// Convert this tensor to a different dtype.
    ///
    /// Returns a new tensor with the same shape and device. When `dtype`
    /// already matches, the handle is cloned and the storage shared; the
    /// receiver is never modified either way.
    pub fn to_dtype(&self, dtype: DType) -> Result<Self> {
        if self.dtype() == dtype {
            return Ok(self.clone());
        }
        let storage = B::cast(&self.inner.storage, dtype, self.device())?;
        Ok(Self::from_storage(
            storage,
            self.shape().clone(),
            self.device().clone(),
        ))
    }

    // Comparison

    /// Element-wise closeness, `|a - b| <= atol + rtol * |b|`, evaluated in
    /// complex128 so any pair of dtypes can be compared. Shapes must match;
    /// dtypes are not compared.
    pub fn allclose(&self, other: &Self, rtol: f64, atol: f64) -> Result<bool> {
        if self.shape() != other.shape() {
            return Ok(false);
        }
        let lhs = self.to_dtype(DType::C128)?.to_vec::<Complex128>()?;
        let rhs = other.to_dtype(DType::C128)?.to_vec::<Complex128>()?;
        Ok(lhs.iter().zip(rhs.iter()).all(|(a, b)| {
            let diff = Complex128::new(a.re - b.re, a.im - b.im).magnitude();
            diff <= atol + rtol * b.magnitude()
        }))
    }
}
