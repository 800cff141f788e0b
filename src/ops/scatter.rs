//! Shape-checked scatter dispatcher

use crate::dispatch_dtype;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::kernels;
use crate::tensor::Tensor;

/// Reduction applied when a source value lands on an output position.
///
/// `Assign` overwrites; the others combine with the value already present,
/// so repeated calls accumulate into the same output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterOp {
    /// Overwrite the destination value (last writer wins on collisions)
    Assign,
    /// Running sum with the destination value
    Add,
    /// Running product with the destination value
    Mul,
    /// Keep the maximum of destination and source
    Max,
    /// Keep the minimum of destination and source
    Min,
}

/// Scatter `src` into `out` at positions chosen by `index` along `dim`.
///
/// For every source coordinate `p`, the destination coordinate is `p` with
/// its `dim`-th component replaced by `index[p]`, and `out` at that position
/// is combined with `src[p]` according to `op`.
///
/// **Destructive**: `out` is mutated in place, so repeated calls reduce into
/// the existing contents. Callers needing the original output must clone its
/// data beforehand.
///
/// For `Max`/`Min`, `arg` may supply an I64 tensor shaped like `out`; each
/// position the reduction writes receives the source coordinate along `dim`
/// that produced the current extremum. Positions never written are left
/// untouched. `arg` is rejected for the other reductions.
///
/// # Errors
///
/// All validation precedes any write, so a failed call leaves `out` (and
/// `arg`) unmodified:
/// - `InvalidDimension` if `dim >= src.ndim()`
/// - `DTypeMismatch` if `index` is not I64 or `src`/`out` dtypes differ
/// - `ShapeMismatch` if `index`/`src`/`out` violate the dimensionality,
///   element-count, or size-apart-from-`dim` invariants
/// - `InvalidArgument` if `arg` is supplied for a non-extremum reduction
///
/// # Example
///
/// ```
/// use scatr::ops::{scatter, ScatterOp};
/// use scatr::tensor::Tensor;
/// use scatr::dtype::DType;
///
/// let src = Tensor::from_slice(&[10.0f32, 20.0, 30.0], &[3]);
/// let index = Tensor::from_slice(&[2i64, 0, 1], &[3]);
/// let mut out = Tensor::zeros(&[3], DType::F32);
///
/// scatter(ScatterOp::Assign, 0, &mut out, &index, &src, None).unwrap();
/// assert_eq!(out.to_vec::<f32>(), [20.0, 30.0, 10.0]);
/// ```
pub fn scatter(
    op: ScatterOp,
    dim: usize,
    out: &mut Tensor,
    index: &Tensor,
    src: &Tensor,
    arg: Option<&mut Tensor>,
) -> Result<()> {
    let dtype = src.dtype();
    let ndim = src.ndim();

    // Validate dimension
    if dim >= ndim {
        return Err(Error::InvalidDimension {
            dim: dim as isize,
            ndim,
        });
    }

    // Validate dtypes
    if index.dtype() != DType::I64 {
        return Err(Error::DTypeMismatch {
            lhs: DType::I64,
            rhs: index.dtype(),
        });
    }

    if out.dtype() != dtype {
        return Err(Error::DTypeMismatch {
            lhs: dtype,
            rhs: out.dtype(),
        });
    }

    // Index and input must agree in dimensionality and element count
    if index.ndim() != ndim {
        return Err(Error::shape_mismatch(src.shape(), index.shape()));
    }

    if index.numel() != src.numel() {
        return Err(Error::shape_mismatch(src.shape(), index.shape()));
    }

    // Input and output must agree in dimensionality, and in size on every
    // axis apart from `dim`
    if out.ndim() != ndim {
        return Err(Error::shape_mismatch(src.shape(), out.shape()));
    }

    for d in (0..dim).chain(dim + 1..ndim) {
        if out.shape()[d] != src.shape()[d] {
            return Err(Error::shape_mismatch(src.shape(), out.shape()));
        }
    }

    // Arg tensor only makes sense for the extremum reductions
    let arg_ptr = match arg {
        Some(arg) => {
            if !matches!(op, ScatterOp::Max | ScatterOp::Min) {
                return Err(Error::invalid_argument(
                    "arg",
                    format!("not supported for {:?} reduction", op),
                ));
            }
            if arg.dtype() != DType::I64 {
                return Err(Error::DTypeMismatch {
                    lhs: DType::I64,
                    rhs: arg.dtype(),
                });
            }
            if arg.shape() != out.shape() {
                return Err(Error::shape_mismatch(out.shape(), arg.shape()));
            }
            arg.storage().ptr() as *mut i64
        }
        None => std::ptr::null_mut(),
    };

    let src_ptr = src.storage().ptr();
    let index_ptr = index.storage().ptr();
    let out_ptr = out.storage().ptr();

    dispatch_dtype!(dtype, T => {
        unsafe {
            kernels::scatter_kernel::<T>(
                src_ptr as *const T,
                index_ptr as *const i64,
                out_ptr as *mut T,
                arg_ptr,
                src.shape(),
                out.shape(),
                dim,
                op,
            );
        }
    });

    Ok(())
}
