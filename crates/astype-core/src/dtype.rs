use std::fmt;

use crate::complex::{Complex128, Complex64};

// DType — Supported element data types
//
// Every tensor has a DType that determines its element size and how the
// cast primitive converts into and out of it. The set mirrors the dtypes a
// PyTorch user names in code:
//
//   Bool          — true/false masks (host 1.3.0+)
//   U8            — unsigned byte, image data
//   I8/I16/I32/I64 — signed integers; I64 is the default index type
//   F16           — IEEE half float
//   BF16          — brain float (host 1.3.0+)
//   F32/F64       — single and double precision
//   C64/C128      — complex with f32 / f64 parts

/// Enum of all supported element data types.
///
/// This is stored inside every tensor so we can dispatch operations
/// to the correct typed implementation at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DType {
    Bool,
    U8,
    I8,
    I16,
    I32,
    I64,
    F16,
    BF16,
    F32,
    F64,
    C64,
    C128,
}

impl DType {
    /// Every dtype, in declaration order.
    pub const ALL: [DType; 12] = [
        DType::Bool,
        DType::U8,
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::F16,
        DType::BF16,
        DType::F32,
        DType::F64,
        DType::C64,
        DType::C128,
    ];

    /// Size of one element in bytes.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::Bool | DType::U8 | DType::I8 => 1,
            DType::I16 | DType::F16 | DType::BF16 => 2,
            DType::I32 | DType::F32 => 4,
            DType::I64 | DType::F64 | DType::C64 => 8,
            DType::C128 => 16,
        }
    }

    /// Whether this dtype is a real floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F16 | DType::BF16 | DType::F32 | DType::F64)
    }

    /// Whether this is a half-precision type (F16 or BF16).
    pub fn is_half(&self) -> bool {
        matches!(self, DType::F16 | DType::BF16)
    }

    pub fn is_int(&self) -> bool {
        matches!(
            self,
            DType::U8 | DType::I8 | DType::I16 | DType::I32 | DType::I64
        )
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, DType::C64 | DType::C128)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, DType::Bool)
    }

    /// Host release that introduced this dtype, as `(major, minor, patch)`.
    ///
    /// Bool and BF16 arrived in 1.3.0; everything else predates versioned
    /// feature tracking and reports `None`.
    pub fn since_version(&self) -> Option<(u64, u64, u64)> {
        match self {
            DType::Bool | DType::BF16 => Some((1, 3, 0)),
            _ => None,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DType::Bool => "bool",
            DType::U8 => "u8",
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::F16 => "f16",
            DType::BF16 => "bf16",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::C64 => "c64",
            DType::C128 => "c128",
        };
        write!(f, "{}", s)
    }
}

// Scalar — The widest value any element can be lifted into
//
// Casting goes element -> Scalar -> element. Keeping integers as i64 (not
// f64) means I64 -> I32 wraps exactly instead of losing bits above 2^53.

/// A single element lifted out of its storage type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex(f64, f64),
}

// WithDType — Trait that connects Rust types to DType enum
//
// By implementing it for f32, i16, bool, etc., generic code like
//
//   fn from_vec<T: WithDType>(data: Vec<T>, shape: Shape) -> Tensor { ... }
//
// gets the DType from T, and the cast kernel converts any pair of element
// types through `to_scalar` / `from_scalar`.

/// Trait implemented by Rust types that can be stored in a tensor.
pub trait WithDType: Copy + Send + Sync + 'static + fmt::Debug + PartialEq {
    /// The corresponding DType enum variant.
    const DTYPE: DType;

    /// Lift this element into a [`Scalar`].
    fn to_scalar(self) -> Scalar;

    /// Convert a [`Scalar`] into this element type.
    ///
    /// Floats truncate toward zero and saturate when going to integers,
    /// integers wrap when narrowed, and complex values drop their imaginary
    /// part when going to a real type.
    fn from_scalar(s: Scalar) -> Self;

    /// Convert this value to f64. Complex values report their real part.
    fn to_f64(self) -> f64 {
        match self.to_scalar() {
            Scalar::Bool(b) => b as u8 as f64,
            Scalar::Int(v) => v as f64,
            Scalar::Float(v) => v,
            Scalar::Complex(re, _) => re,
        }
    }

    /// Create a value of this type from f64.
    fn from_f64(v: f64) -> Self {
        Self::from_scalar(Scalar::Float(v))
    }
}

macro_rules! impl_with_dtype_int {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl WithDType for $ty {
                const DTYPE: DType = DType::$dtype;
                fn to_scalar(self) -> Scalar {
                    Scalar::Int(self as i64)
                }
                fn from_scalar(s: Scalar) -> Self {
                    match s {
                        Scalar::Bool(b) => b as $ty,
                        Scalar::Int(v) => v as $ty,
                        Scalar::Float(v) => v as $ty,
                        Scalar::Complex(re, _) => re as $ty,
                    }
                }
            }
        )*
    };
}

impl_with_dtype_int!(u8 => U8, i8 => I8, i16 => I16, i32 => I32, i64 => I64);

macro_rules! impl_with_dtype_float {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl WithDType for $ty {
                const DTYPE: DType = DType::$dtype;
                fn to_scalar(self) -> Scalar {
                    Scalar::Float(self as f64)
                }
                fn from_scalar(s: Scalar) -> Self {
                    match s {
                        Scalar::Bool(b) => b as u8 as $ty,
                        Scalar::Int(v) => v as $ty,
                        Scalar::Float(v) => v as $ty,
                        Scalar::Complex(re, _) => re as $ty,
                    }
                }
            }
        )*
    };
}

impl_with_dtype_float!(f32 => F32, f64 => F64);

macro_rules! impl_with_dtype_half {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl WithDType for $ty {
                const DTYPE: DType = DType::$dtype;
                fn to_scalar(self) -> Scalar {
                    Scalar::Float(self.to_f64())
                }
                fn from_scalar(s: Scalar) -> Self {
                    match s {
                        Scalar::Bool(b) => <$ty>::from_f64(b as u8 as f64),
                        Scalar::Int(v) => <$ty>::from_f64(v as f64),
                        Scalar::Float(v) => <$ty>::from_f64(v),
                        Scalar::Complex(re, _) => <$ty>::from_f64(re),
                    }
                }
            }
        )*
    };
}

impl_with_dtype_half!(half::f16 => F16, half::bf16 => BF16);

impl WithDType for bool {
    const DTYPE: DType = DType::Bool;
    fn to_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }
    fn from_scalar(s: Scalar) -> Self {
        match s {
            Scalar::Bool(b) => b,
            Scalar::Int(v) => v != 0,
            // NaN != 0.0, so NaN casts to true
            Scalar::Float(v) => v != 0.0,
            Scalar::Complex(re, im) => re != 0.0 || im != 0.0,
        }
    }
}

impl WithDType for Complex64 {
    const DTYPE: DType = DType::C64;
    fn to_scalar(self) -> Scalar {
        Scalar::Complex(self.re as f64, self.im as f64)
    }
    fn from_scalar(s: Scalar) -> Self {
        match s {
            Scalar::Complex(re, im) => Complex64::new(re as f32, im as f32),
            other => Complex64::from(f32::from_scalar(other)),
        }
    }
}

impl WithDType for Complex128 {
    const DTYPE: DType = DType::C128;
    fn to_scalar(self) -> Scalar {
        Scalar::Complex(self.re, self.im)
    }
    fn from_scalar(s: Scalar) -> Self {
        match s {
            Scalar::Complex(re, im) => Complex128::new(re, im),
            other => Complex128::from(f64::from_scalar(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::{bf16, f16};

    #[test]
    fn test_dtype_size() {
        assert_eq!(DType::Bool.size_in_bytes(), 1);
        assert_eq!(DType::F16.size_in_bytes(), 2);
        assert_eq!(DType::BF16.size_in_bytes(), 2);
        assert_eq!(DType::I32.size_in_bytes(), 4);
        assert_eq!(DType::F64.size_in_bytes(), 8);
        assert_eq!(DType::C64.size_in_bytes(), 8);
        assert_eq!(DType::C128.size_in_bytes(), 16);
    }

    #[test]
    fn test_dtype_categories() {
        for dt in DType::ALL {
            let kinds = [dt.is_bool(), dt.is_int(), dt.is_float(), dt.is_complex()];
            assert_eq!(kinds.iter().filter(|k| **k).count(), 1, "{dt}");
        }
        assert!(DType::BF16.is_half());
        assert!(!DType::F32.is_half());
    }

    #[test]
    fn test_since_version() {
        assert_eq!(DType::Bool.since_version(), Some((1, 3, 0)));
        assert_eq!(DType::BF16.since_version(), Some((1, 3, 0)));
        assert_eq!(DType::F16.since_version(), None);
        assert_eq!(DType::I64.since_version(), None);
    }

    #[test]
    fn test_float_to_int_truncates() {
        assert_eq!(i32::from_scalar(1.1f32.to_scalar()), 1);
        assert_eq!(i64::from_scalar(Scalar::Float(-2.9)), -2);
        // saturating
        assert_eq!(u8::from_scalar(Scalar::Float(300.0)), 255);
        assert_eq!(u8::from_scalar(Scalar::Float(-1.0)), 0);
        assert_eq!(i32::from_scalar(Scalar::Float(f64::NAN)), 0);
    }

    #[test]
    fn test_int_narrowing_wraps() {
        assert_eq!(i8::from_scalar(300i64.to_scalar()), 44);
        assert_eq!(u8::from_scalar(Scalar::Int(-1)), 255);
        assert_eq!(i32::from_scalar(Scalar::Int(i64::MAX)), -1);
    }

    #[test]
    fn test_bool_conversions() {
        assert!(bool::from_scalar(1.1f32.to_scalar()));
        assert!(!bool::from_scalar(Scalar::Int(0)));
        assert!(bool::from_scalar(Complex64::new(0.0, 1.0).to_scalar()));
        assert_eq!(f32::from_scalar(true.to_scalar()), 1.0);
        assert_eq!(true.to_f64(), 1.0);
    }

    #[test]
    fn test_half_conversions() {
        let h = f16::from_scalar(Scalar::Float(1.1));
        assert!((h.to_f64() - 1.1).abs() < 1e-3);
        let b = bf16::from_scalar(Scalar::Float(1.1));
        assert!((b.to_f64() - 1.1).abs() < 1e-2);
    }

    #[test]
    fn test_complex_conversions() {
        let z = Complex128::from_scalar(Scalar::Float(1.1));
        assert_eq!(z, Complex128::new(1.1, 0.0));
        assert_eq!(f64::from_scalar(Complex128::new(2.5, 7.0).to_scalar()), 2.5);
        assert_eq!(Complex64::new(2.5, 7.0).to_f64(), 2.5);
    }

    #[test]
    fn test_with_dtype_f32() {
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(f32::from_f64(3.14).to_f64(), 3.140000104904175); // f32 precision
    }
}
