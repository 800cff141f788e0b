//! # scatr
//!
//! **Differentiable scatter and gather primitives for n-dimensional tensors.**
//!
//! scatr writes (or reduces) source values into output positions selected by
//! an index tensor along a chosen dimension, and knows how to differentiate
//! the result with respect to the source.
//!
//! ## Features
//!
//! - **Scatter**: overwrite, sum, product, max, and min reductions, with
//!   optional tracking of the winning source coordinate for max/min
//! - **Gather**: the dual read operation, exposed publicly and used as the
//!   scatter adjoint
//! - **In place**: scatter mutates the caller's output tensor through
//!   `&mut Tensor` instead of allocating a fresh result per call
//! - **Autograd contract**: the forward step returns an explicit backward
//!   context, consumed exactly once to produce a positionally aligned
//!   gradient tuple
//! - **Multiple dtypes**: f64, f32 and the common integer widths, selected
//!   at runtime and dispatched to typed kernels
//!
//! ## Quick Start
//!
//! ```
//! use scatr::prelude::*;
//!
//! let src = Tensor::from_slice(&[10.0f32, 20.0, 30.0], &[3]);
//! let index = Tensor::from_slice(&[2i64, 0, 1], &[3]);
//! let mut out = Tensor::zeros(&[3], DType::F32);
//!
//! scatter(ScatterOp::Assign, 0, &mut out, &index, &src, None)?;
//! assert_eq!(out.to_vec::<f32>(), [20.0, 30.0, 10.0]);
//! # Ok::<(), scatr::error::Error>(())
//! ```
//!
//! ## Scope
//!
//! The tensor container here is deliberately minimal: contiguous, row-major,
//! CPU-resident. General tensor algebra, views, broadcasting, and device
//! placement are out of scope, as is the differentiation graph itself - the
//! [`autograd`] module implements the operation-level contract an external
//! engine drives.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod autograd;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::autograd::ScatterBackward;
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{gather, scatter, ScatterOp};
    pub use crate::tensor::{Tensor, TensorId};
}
