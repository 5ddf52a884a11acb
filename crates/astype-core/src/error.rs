use crate::shape::Shape;

/// All errors that can occur within the host tensor library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A typed read asked for a different element type than the tensor holds.
    #[error("dtype mismatch: expected {expected:?}, got {got:?}")]
    DTypeMismatch {
        expected: crate::DType,
        got: crate::DType,
    },

    /// Tried to access a scalar from a non-scalar tensor.
    #[error("not a scalar: tensor has shape {shape}")]
    NotAScalar { shape: Shape },

    /// Element count mismatch when creating from a vec.
    #[error("element count mismatch: shape {shape} requires {expected} elements, got {got}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        got: usize,
    },
}

/// Convenience Result type used throughout the host library.
pub type Result<T> = std::result::Result<T, Error>;

