//! DType dispatch for typed kernels
//!
//! The `dispatch_dtype!` macro converts a runtime `DType` value into a
//! concrete generic instantiation: it executes a code block with `T` bound
//! to the corresponding Rust type. This is how the shape-checked dispatchers
//! select the kernel for an operand's element type.
//!
//! ```ignore
//! dispatch_dtype!(out.dtype(), T => {
//!     unsafe { kernels::scatter_kernel::<T>(/* ... */) }
//! });
//! ```

/// Macro for runtime dtype dispatch to typed operations.
///
/// Takes a `DType` value and executes `$body` with `$T` bound to the
/// corresponding Rust type. The dtype set is closed, so every arm succeeds.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::U64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::U32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::U16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
        }
    };
}
