//! Tensor operations
//!
//! The shape-checked dispatchers for scatter and gather. Each validates its
//! operands up front, then selects a typed kernel via `dispatch_dtype!` and
//! runs the write loop. `scatter` mutates the caller's output tensor in
//! place; `gather` returns a fresh tensor.

mod dispatch;
mod gather;
pub(crate) mod kernels;
mod scatter;

pub use gather::gather;
pub use scatter::{scatter, ScatterOp};
