//! Generic scatter and gather kernels
//!
//! The write-and-reduce loops, generic over the element type. Shape and
//! dtype validation happens in the dispatchers before these run; the only
//! per-element check left here is the index bounds test along `dim`, where
//! out-of-range values are skipped (scatter) or read as zero (gather).

use crate::dtype::Element;
use crate::ops::ScatterOp;

/// Row-major strides for a shape, in elements.
fn contiguous_strides(shape: &[usize]) -> Vec<usize> {
    let ndim = shape.len();
    let mut strides = vec![1usize; ndim];
    for i in (0..ndim.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Scatter `src` into `out` at positions chosen by `indices` along `dim`,
/// combining collisions per `op`.
///
/// For a 3D tensor with dim=1:
/// `out[i][index[i][j][k]][k] = reduce(out[i][index[i][j][k]][k], src[i][j][k])`
///
/// Writes go directly into `out`; there is no copy phase. For `Max`/`Min`
/// with a non-null `arg`, the source coordinate along `dim` of the winning
/// value is recorded at the written position.
///
/// # Safety
/// - `src` and `indices` must be valid for `src_shape`, `out` (and `arg`
///   when non-null) for `out_shape`
/// - `out` must not alias `src` or `indices`
#[allow(clippy::too_many_arguments)]
pub unsafe fn scatter_kernel<T: Element>(
    src: *const T,
    indices: *const i64,
    out: *mut T,
    arg: *mut i64,
    src_shape: &[usize],
    out_shape: &[usize],
    dim: usize,
    op: ScatterOp,
) {
    let ndim = src_shape.len();
    if ndim == 0 {
        return;
    }

    let out_strides = contiguous_strides(out_shape);
    let src_strides = contiguous_strides(src_shape);

    let total = src_shape.iter().product::<usize>();

    for src_idx in 0..total {
        // Convert linear index to multi-dimensional indices
        let mut remaining = src_idx;
        let mut multi_idx = vec![0usize; ndim];
        for d in 0..ndim {
            multi_idx[d] = remaining / src_strides[d];
            remaining %= src_strides[d];
        }

        let index_val = *indices.add(src_idx);
        if index_val < 0 || index_val as usize >= out_shape[dim] {
            // Out of bounds - skip
            continue;
        }

        // Destination position: replace multi_idx[dim] with index_val
        let mut dst_offset = 0;
        for d in 0..ndim {
            let coord = if d == dim {
                index_val as usize
            } else {
                multi_idx[d]
            };
            dst_offset += coord * out_strides[d];
        }

        let src_val = *src.add(src_idx);
        let dst_val = *out.add(dst_offset);

        match op {
            ScatterOp::Assign => {
                *out.add(dst_offset) = src_val;
            }
            ScatterOp::Add => {
                *out.add(dst_offset) = dst_val + src_val;
            }
            ScatterOp::Mul => {
                *out.add(dst_offset) = dst_val * src_val;
            }
            ScatterOp::Max => {
                if src_val.to_f64() > dst_val.to_f64() {
                    *out.add(dst_offset) = src_val;
                    if !arg.is_null() {
                        *arg.add(dst_offset) = multi_idx[dim] as i64;
                    }
                }
            }
            ScatterOp::Min => {
                if src_val.to_f64() < dst_val.to_f64() {
                    *out.add(dst_offset) = src_val;
                    if !arg.is_null() {
                        *arg.add(dst_offset) = multi_idx[dim] as i64;
                    }
                }
            }
        }
    }
}

/// Gather elements along `dim` using an index tensor.
///
/// For a 3D tensor with dim=1:
/// `out[i][j][k] = a[i][index[i][j][k]][k]`
///
/// Out-of-range index values read as zero.
///
/// # Safety
/// - `a` must be valid for `shape`, `indices` and `out` for `index_shape`
/// - For every `d != dim`, `index_shape[d] <= shape[d]`
pub unsafe fn gather_kernel<T: Element>(
    a: *const T,
    indices: *const i64,
    out: *mut T,
    shape: &[usize],
    index_shape: &[usize],
    dim: usize,
) {
    let ndim = shape.len();
    if ndim == 0 {
        return;
    }

    let a_strides = contiguous_strides(shape);
    let idx_strides = contiguous_strides(index_shape);

    let total = index_shape.iter().product::<usize>();

    for out_idx in 0..total {
        let mut remaining = out_idx;
        let mut multi_idx = vec![0usize; ndim];
        for d in 0..ndim {
            multi_idx[d] = remaining / idx_strides[d];
            remaining %= idx_strides[d];
        }

        let index_val = *indices.add(out_idx);
        if index_val < 0 || index_val as usize >= shape[dim] {
            *out.add(out_idx) = T::zero();
            continue;
        }

        // Source position: replace multi_idx[dim] with index_val
        let mut src_offset = 0;
        for d in 0..ndim {
            let coord = if d == dim {
                index_val as usize
            } else {
                multi_idx[d]
            };
            src_offset += coord * a_strides[d];
        }

        *out.add(out_idx) = *a.add(src_offset);
    }
}
