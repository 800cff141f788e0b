//! Data type system for scatr tensors
//!
//! Provides the `DType` enum representing supported element types at runtime
//! and the `Element` trait connecting Rust's type system to it.

mod element;

pub use element::Element;

use std::fmt;

/// Data types supported by scatr tensors
///
/// The element type of a tensor is carried at runtime. Using an enum (rather
/// than making `Tensor` generic) keeps operands of different dtypes behind a
/// single type and lets the kernel dispatcher select a concrete generic
/// instantiation per call.
///
/// # Discriminant Values
///
/// The discriminant values are stable: floats occupy 0-9, signed ints 10-19,
/// unsigned ints 20-29. Existing values are never changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point (most common)
    F32 = 1,

    /// 64-bit signed integer (also the index dtype)
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 16-bit signed integer
    I16 = 12,
    /// 8-bit signed integer
    I8 = 13,

    /// 64-bit unsigned integer
    U64 = 20,
    /// 32-bit unsigned integer
    U32 = 21,
    /// 16-bit unsigned integer
    U16 = 22,
    /// 8-bit unsigned integer
    U8 = 23,
}

impl DType {
    /// Size of one element in bytes
    pub const fn size_in_bytes(self) -> usize {
        match self {
            DType::F64 | DType::I64 | DType::U64 => 8,
            DType::F32 | DType::I32 | DType::U32 => 4,
            DType::I16 | DType::U16 => 2,
            DType::I8 | DType::U8 => 1,
        }
    }

    /// Whether this is a floating-point type
    pub const fn is_float(self) -> bool {
        matches!(self, DType::F64 | DType::F32)
    }

    /// Whether this is an integer type (signed or unsigned)
    pub const fn is_int(self) -> bool {
        !self.is_float()
    }

    /// Short lowercase name, e.g. `"f32"`
    pub const fn name(self) -> &'static str {
        match self {
            DType::F64 => "f64",
            DType::F32 => "f32",
            DType::I64 => "i64",
            DType::I32 => "i32",
            DType::I16 => "i16",
            DType::I8 => "i8",
            DType::U64 => "u64",
            DType::U32 => "u32",
            DType::U16 => "u16",
            DType::U8 => "u8",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
