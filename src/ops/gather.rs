//! Shape-checked gather dispatcher

use crate::dispatch_dtype;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::kernels;
use crate::tensor::Tensor;

/// Gather elements from `a` along `dim` using an index tensor.
///
/// The dual read operation to [`scatter`](crate::ops::scatter): the result
/// is shaped like `index`, and for every coordinate `p`,
/// `result[p] = a[q]` where `q` is `p` with its `dim`-th component replaced
/// by `index[p]`. Out-of-range index values gather zero.
///
/// This is also the adjoint used by the differentiable scatter's backward
/// step to route an upstream gradient back to the source positions.
///
/// # Errors
///
/// - `InvalidDimension` if `dim >= a.ndim()`
/// - `DTypeMismatch` if `index` is not I64
/// - `ShapeMismatch` if `index` and `a` differ in dimensionality, or the
///   index is larger than `a` on an axis other than `dim`
///
/// # Example
///
/// ```
/// use scatr::ops::gather;
/// use scatr::tensor::Tensor;
///
/// let a = Tensor::from_slice(&[1.0f32, 2.0, 3.0], &[3]);
/// let index = Tensor::from_slice(&[2i64, 0, 1], &[3]);
/// let out = gather(&a, 0, &index).unwrap();
/// assert_eq!(out.to_vec::<f32>(), [3.0, 1.0, 2.0]);
/// ```
pub fn gather(a: &Tensor, dim: usize, index: &Tensor) -> Result<Tensor> {
    let dtype = a.dtype();
    let ndim = a.ndim();

    // Validate dimension
    if dim >= ndim {
        return Err(Error::InvalidDimension {
            dim: dim as isize,
            ndim,
        });
    }

    // Validate index dtype
    if index.dtype() != DType::I64 {
        return Err(Error::DTypeMismatch {
            lhs: DType::I64,
            rhs: index.dtype(),
        });
    }

    // Validate index dimensions
    if index.ndim() != ndim {
        return Err(Error::shape_mismatch(a.shape(), index.shape()));
    }

    // Apart from `dim`, every index coordinate addresses into `a` directly;
    // the kernel only bounds-checks the `dim` component.
    for d in (0..dim).chain(dim + 1..ndim) {
        if index.shape()[d] > a.shape()[d] {
            return Err(Error::shape_mismatch(a.shape(), index.shape()));
        }
    }

    // Output shape is same as index shape
    let out = Tensor::zeros(index.shape(), dtype);

    let a_ptr = a.storage().ptr();
    let index_ptr = index.storage().ptr();
    let out_ptr = out.storage().ptr();

    dispatch_dtype!(dtype, T => {
        unsafe {
            kernels::gather_kernel::<T>(
                a_ptr as *const T,
                index_ptr as *const i64,
                out_ptr as *mut T,
                a.shape(),
                index.shape(),
                dim,
            );
        }
    });

    Ok(out)
}
