//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a tensor
///
/// Connects Rust's type system to scatr's runtime dtype system. Implemented
/// for every primitive type `DType` can name.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
/// - `Add + Sub + Mul + Div` - Arithmetic for the reduction kernels
/// - `PartialOrd` - Comparison for min/max reductions
pub trait Element:
    Copy
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric comparisons
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident, $zero:expr, $one:expr;)*) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $ty
                }

                #[inline]
                fn zero() -> Self {
                    $zero
                }

                #[inline]
                fn one() -> Self {
                    $one
                }
            }
        )*
    };
}

impl_element! {
    f64 => F64, 0.0, 1.0;
    f32 => F32, 0.0, 1.0;
    i64 => I64, 0, 1;
    i32 => I32, 0, 1;
    i16 => I16, 0, 1;
    i8  => I8,  0, 1;
    u64 => U64, 0, 1;
    u32 => U32, 0, 1;
    u16 => U16, 0, 1;
    u8  => U8,  0, 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_mapping() {
        assert_eq!(<f32 as Element>::DTYPE, DType::F32);
        assert_eq!(<i64 as Element>::DTYPE, DType::I64);
        assert_eq!(<u8 as Element>::DTYPE, DType::U8);
    }

    #[test]
    fn test_f64_roundtrip() {
        assert_eq!(f32::from_f64(1.5).to_f64(), 1.5);
        assert_eq!(i32::from_f64(-3.0), -3);
        assert_eq!(u16::zero(), 0);
        assert_eq!(i64::one(), 1);
    }

    #[test]
    fn test_sizes_agree_with_dtype() {
        assert_eq!(std::mem::size_of::<f64>(), DType::F64.size_in_bytes());
        assert_eq!(std::mem::size_of::<i16>(), DType::I16.size_in_bytes());
    }
}
