//! Tensor types
//!
//! The tensor container used by the scatter and gather operations: a
//! contiguous, row-major, CPU-resident n-dimensional array with
//! reference-counted storage.

mod core;
mod id;
mod storage;

pub use core::Tensor;
pub use id::TensorId;
pub use storage::Storage;
