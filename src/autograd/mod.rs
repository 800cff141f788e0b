//! Reverse-mode differentiation support for scatter
//!
//! The differentiation engine itself (graph/tape, topological traversal,
//! gradient accumulation) is an external collaborator. This module only
//! implements the contract such an engine expects from an in-place scatter:
//! a forward step that performs the write and hands back an explicit
//! [`ScatterBackward`] context, and a consuming backward step that turns an
//! upstream gradient into a positionally aligned gradient tuple.

mod scatter;

pub use scatter::{scatter, ScatterBackward};
