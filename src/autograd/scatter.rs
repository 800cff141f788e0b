//! Differentiable scatter: forward step and backward context

use crate::error::{Error, Result};
use crate::ops::{self, ScatterOp};
use crate::tensor::{Tensor, TensorId};

/// Backward context for one differentiable scatter call
///
/// Created by [`scatter`] after the forward write and consumed exactly once
/// by [`backward`](Self::backward), which takes `self` by value - the move
/// makes it impossible to replay a backward step or pair it with a
/// different forward call.
///
/// The retained index tensor shares storage with the caller's index; it must
/// not be mutated between the forward and backward steps.
#[derive(Debug)]
pub struct ScatterBackward {
    /// Axis the forward call scattered along
    dim: usize,
    /// Index tensor retained to replay the write pattern as a gather
    index: Tensor,
    /// Forward argument count; fixes the gradient tuple length
    num_args: usize,
    /// Id of the output tensor mutated in place
    dirty: TensorId,
}

/// Differentiable scatter forward step.
///
/// Positionally the arguments mirror the plain dispatcher's
/// `(output, index, input, [arg])`, and `needs_input_grad` carries the
/// engine's per-argument gradient request flags in that same order. The
/// index is a discrete selector, so requesting its gradient fails with
/// `UnsupportedGradient` before any mutation.
///
/// On success `out` holds the scattered values (mutated in place, exactly as
/// [`ops::scatter`] leaves it) and the returned [`ScatterBackward`] records
/// everything the paired backward step needs: the scatter axis, the index
/// tensor, the argument count, and the id of the dirtied output.
///
/// # Example
///
/// ```
/// use scatr::autograd;
/// use scatr::ops::ScatterOp;
/// use scatr::tensor::Tensor;
/// use scatr::dtype::DType;
///
/// let src = Tensor::from_slice(&[10.0f32, 20.0, 30.0], &[3]);
/// let index = Tensor::from_slice(&[2i64, 0, 1], &[3]);
/// let mut out = Tensor::zeros(&[3], DType::F32);
///
/// let ctx = autograd::scatter(
///     ScatterOp::Assign, 0, &mut out, &index, &src, None,
///     &[false, false, true],
/// ).unwrap();
///
/// let upstream = Tensor::from_slice(&[1.0f32, 1.0, 1.0], &[3]);
/// let grads = ctx.backward(&upstream, &[false, false, true]).unwrap();
/// assert_eq!(grads[2].as_ref().unwrap().to_vec::<f32>(), [1.0, 1.0, 1.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn scatter(
    op: ScatterOp,
    dim: usize,
    out: &mut Tensor,
    index: &Tensor,
    src: &Tensor,
    arg: Option<&mut Tensor>,
    needs_input_grad: &[bool],
) -> Result<ScatterBackward> {
    if needs_input_grad.get(1).copied().unwrap_or(false) {
        return Err(Error::UnsupportedGradient { arg: "index" });
    }

    let num_args = 3 + usize::from(arg.is_some());
    let dirty = out.id();

    ops::scatter(op, dim, out, index, src, arg)?;

    Ok(ScatterBackward {
        dim,
        index: index.clone(),
        num_args,
        dirty,
    })
}

impl ScatterBackward {
    /// Id of the tensor the forward step mutated in place.
    ///
    /// The engine must treat that tensor's pre-call value as lost.
    #[inline]
    pub fn dirty(&self) -> TensorId {
        self.dirty
    }

    /// Number of forward arguments, and thus the gradient tuple length.
    #[inline]
    pub fn num_args(&self) -> usize {
        self.num_args
    }

    /// Backward step: gradient tuple for the forward call's arguments.
    ///
    /// Consumes the context. The result is positionally aligned with the
    /// forward arguments `(output, index, input, [arg])`:
    /// - output: the upstream gradient itself, when requested;
    /// - index: always `None`;
    /// - input: when requested, the upstream gradient gathered at the
    ///   recorded index positions along the scatter axis;
    /// - any trailing arguments: always `None`.
    ///
    /// No tensor is mutated.
    pub fn backward(
        self,
        grad_output: &Tensor,
        needs_input_grad: &[bool],
    ) -> Result<Vec<Option<Tensor>>> {
        let mut grads: Vec<Option<Tensor>> = (0..self.num_args).map(|_| None).collect();

        if needs_input_grad.first().copied().unwrap_or(false) {
            grads[0] = Some(grad_output.clone());
        }

        if needs_input_grad.get(2).copied().unwrap_or(false) {
            // TODO: max and min need an arg-aware adjoint; the gather below
            // is exact only for the assign and add reductions.
            grads[2] = Some(ops::gather(grad_output, self.dim, &self.index)?);
        }

        Ok(grads)
    }
}
