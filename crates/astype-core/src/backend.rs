use crate::dtype::{DType, WithDType};
use crate::error::Result;
use std::fmt;

// Backend — Abstraction over compute devices
//
// Each backend implements this trait with its own storage type. The tensor
// handle is generic over it (Tensor<B: Backend>), so a new device can be
// added as a separate crate without touching astype-core.

/// Identifies a compute device (e.g., "cpu").
pub trait BackendDevice: Clone + fmt::Debug + Send + Sync + 'static {
    /// A human-readable name for this device.
    fn name(&self) -> String;
}

/// A contiguous buffer that holds tensor data on a specific device.
pub trait BackendStorage: Clone + Send + Sync + 'static {
    /// The data type of the elements in this storage.
    fn dtype(&self) -> DType;

    /// Number of elements in this storage.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The main Backend trait. Implementing this for a struct (e.g., CpuBackend)
/// makes that struct a complete backend for the host library.
///
/// Storage is immutable once created: every operation returns new storage.
pub trait Backend: Clone + Send + Sync + fmt::Debug + 'static {
    /// The device type for this backend.
    type Device: BackendDevice;
    /// The storage type for this backend.
    type Storage: BackendStorage;

    //  Creation

    /// Move a typed host vector into device storage of dtype `T::DTYPE`.
    fn from_vec<T: WithDType>(data: Vec<T>, device: &Self::Device) -> Result<Self::Storage>;

    /// Create storage from a flat f64 slice, converting to the target dtype.
    fn from_f64_slice(data: &[f64], dtype: DType, device: &Self::Device) -> Result<Self::Storage>;

    //  Data movement

    /// Copy data from this storage to a Vec<f64> on the host (for inspection).
    /// Complex elements report their real part.
    fn to_f64_vec(input: &Self::Storage) -> Result<Vec<f64>>;

    /// Copy data out as `T`. Fails with `DTypeMismatch` unless the storage
    /// already holds `T::DTYPE`; use [`Backend::cast`] first otherwise.
    fn to_vec<T: WithDType>(input: &Self::Storage) -> Result<Vec<T>>;

    //  Dtype conversion

    /// Cast storage to a different dtype.
    ///
    /// The default implementation goes through `to_f64_vec` +
    /// `from_f64_slice`, which drops imaginary parts and integer bits above
    /// 2^53. Backends should override it with an element-wise kernel.
    fn cast(input: &Self::Storage, dtype: DType, device: &Self::Device) -> Result<Self::Storage> {
        let data = Self::to_f64_vec(input)?;
        Self::from_f64_slice(&data, dtype, device)
    }
}
