//! Complex element types for `C64` and `C128` tensors.
//!
//! Both are stored interleaved (`re, im, re, im, ...`), the layout NumPy and
//! PyTorch use for `complex64` / `complex128`.

use std::fmt;

macro_rules! impl_complex {
    ($name:ident, $float:ty, $bits:literal) => {
        #[doc = concat!($bits, "-bit complex number with ", stringify!($float), " real and imaginary parts.")]
        #[repr(C)]
        #[derive(Copy, Clone, Debug, Default, PartialEq)]
        pub struct $name {
            /// Real part
            pub re: $float,
            /// Imaginary part
            pub im: $float,
        }

        impl $name {
            #[inline]
            pub const fn new(re: $float, im: $float) -> Self {
                Self { re, im }
            }

            /// Modulus `|z|`.
            #[inline]
            pub fn magnitude(self) -> $float {
                self.re.hypot(self.im)
            }
        }

        impl From<$float> for $name {
            fn from(re: $float) -> Self {
                Self::new(re, 0.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.im < 0.0 {
                    write!(f, "{}-{}j", self.re, -self.im)
                } else {
                    write!(f, "{}+{}j", self.re, self.im)
                }
            }
        }
    };
}

impl_complex!(Complex64, f32, "64");
impl_complex!(Complex128, f64, "128");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert_eq!(Complex64::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Complex128::new(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Complex128::new(1.1, 0.0).to_string(), "1.1+0j");
        assert_eq!(Complex64::new(1.0, -2.0).to_string(), "1-2j");
    }
}
