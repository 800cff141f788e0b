//! Integration tests for the differentiable scatter wrapper
//!
//! The engine-facing contract: forward mutates the output in place and hands
//! back a `ScatterBackward` context; backward consumes the context and
//! returns a gradient tuple positionally aligned with the forward arguments
//! `(output, index, input, [arg])`.

use scatr::autograd;
use scatr::dtype::DType;
use scatr::error::Error;
use scatr::ops::ScatterOp;
use scatr::tensor::Tensor;

const NO_GRADS: &[bool] = &[false, false, false];
const INPUT_GRAD: &[bool] = &[false, false, true];

#[test]
fn test_forward_scatters_in_place() {
    let src = Tensor::from_slice(&[10.0f32, 20.0, 30.0], &[3]);
    let index = Tensor::from_slice(&[2i64, 0, 1], &[3]);
    let mut out = Tensor::zeros(&[3], DType::F32);
    let out_id = out.id();

    let ctx = autograd::scatter(ScatterOp::Assign, 0, &mut out, &index, &src, None, INPUT_GRAD)
        .unwrap();

    assert_eq!(out.to_vec::<f32>(), [20.0, 30.0, 10.0]);
    assert_eq!(ctx.dirty(), out_id);
    assert_eq!(ctx.num_args(), 3);
}

#[test]
fn test_index_gradient_rejected_before_mutation() {
    let src = Tensor::from_slice(&[1.0f32, 2.0], &[2]);
    let index = Tensor::from_slice(&[0i64, 1], &[2]);
    let mut out = Tensor::from_slice(&[7.0f32, 8.0], &[2]);

    let result = autograd::scatter(
        ScatterOp::Assign,
        0,
        &mut out,
        &index,
        &src,
        None,
        &[false, true, false],
    );

    assert!(matches!(
        result,
        Err(Error::UnsupportedGradient { arg: "index" })
    ));
    assert_eq!(out.to_vec::<f32>(), [7.0, 8.0]);
}

#[test]
fn test_backward_gathers_upstream_at_index() {
    let src = Tensor::from_slice(&[10.0f32, 20.0, 30.0], &[3]);
    let index = Tensor::from_slice(&[2i64, 0, 1], &[3]);
    let mut out = Tensor::zeros(&[3], DType::F32);

    let ctx = autograd::scatter(ScatterOp::Assign, 0, &mut out, &index, &src, None, INPUT_GRAD)
        .unwrap();

    let upstream = Tensor::from_slice(&[1.0f32, 2.0, 3.0], &[3]);
    let grads = ctx.backward(&upstream, INPUT_GRAD).unwrap();

    assert_eq!(grads.len(), 3);
    assert!(grads[0].is_none());
    assert!(grads[1].is_none());
    // grad_input[p] = upstream[index[p]] along dim 0
    assert_eq!(grads[2].as_ref().unwrap().to_vec::<f32>(), [3.0, 1.0, 2.0]);
}

#[test]
fn test_backward_unit_upstream() {
    // With a ones upstream the gathered gradient is ones as well.
    let src = Tensor::from_slice(&[10.0f32, 20.0, 30.0], &[3]);
    let index = Tensor::from_slice(&[2i64, 0, 1], &[3]);
    let mut out = Tensor::zeros(&[3], DType::F32);

    let ctx = autograd::scatter(ScatterOp::Assign, 0, &mut out, &index, &src, None, INPUT_GRAD)
        .unwrap();

    let upstream = Tensor::full(1.0f32, &[3]);
    let grads = ctx.backward(&upstream, INPUT_GRAD).unwrap();

    assert_eq!(grads[2].as_ref().unwrap().to_vec::<f32>(), [1.0, 1.0, 1.0]);
}

#[test]
fn test_backward_output_gradient_passthrough() {
    let src = Tensor::from_slice(&[1.0f64, 2.0], &[2]);
    let index = Tensor::from_slice(&[1i64, 0], &[2]);
    let mut out = Tensor::zeros(&[2], DType::F64);

    let needs = &[true, false, true];
    let ctx = autograd::scatter(ScatterOp::Add, 0, &mut out, &index, &src, None, needs).unwrap();

    let upstream = Tensor::from_slice(&[5.0f64, 6.0], &[2]);
    let grads = ctx.backward(&upstream, needs).unwrap();

    assert_eq!(grads[0].as_ref().unwrap().to_vec::<f64>(), [5.0, 6.0]);
    assert!(grads[1].is_none());
    assert_eq!(grads[2].as_ref().unwrap().to_vec::<f64>(), [6.0, 5.0]);
}

#[test]
fn test_backward_nothing_requested() {
    let src = Tensor::from_slice(&[1.0f32, 2.0], &[2]);
    let index = Tensor::from_slice(&[0i64, 1], &[2]);
    let mut out = Tensor::zeros(&[2], DType::F32);

    let ctx = autograd::scatter(ScatterOp::Assign, 0, &mut out, &index, &src, None, NO_GRADS)
        .unwrap();

    let upstream = Tensor::full(1.0f32, &[2]);
    let grads = ctx.backward(&upstream, NO_GRADS).unwrap();

    assert_eq!(grads.len(), 3);
    assert!(grads.iter().all(Option::is_none));
}

#[test]
fn test_backward_pads_trailing_arg_slot() {
    let src = Tensor::from_slice(&[3.0f32, 1.0], &[2]);
    let index = Tensor::from_slice(&[0i64, 1], &[2]);
    let mut out = Tensor::zeros(&[2], DType::F32);
    let mut arg = Tensor::full(-1i64, &[2]);

    let needs = &[false, false, true, false];
    let ctx = autograd::scatter(
        ScatterOp::Max,
        0,
        &mut out,
        &index,
        &src,
        Some(&mut arg),
        needs,
    )
    .unwrap();
    assert_eq!(ctx.num_args(), 4);

    let upstream = Tensor::from_slice(&[2.0f32, 4.0], &[2]);
    let grads = ctx.backward(&upstream, needs).unwrap();

    assert_eq!(grads.len(), 4);
    assert!(grads[0].is_none());
    assert!(grads[1].is_none());
    assert!(grads[2].is_some());
    assert!(grads[3].is_none());
}

#[test]
fn test_backward_2d() {
    // dim=1: grad_input[i][j] = upstream[i][index[i][j]]
    let src = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2]);
    let index = Tensor::from_slice(&[1i64, 0, 0, 1], &[2, 2]);
    let mut out = Tensor::zeros(&[2, 2], DType::F32);

    let ctx = autograd::scatter(ScatterOp::Assign, 1, &mut out, &index, &src, None, INPUT_GRAD)
        .unwrap();

    let upstream = Tensor::from_slice(&[10.0f32, 20.0, 30.0, 40.0], &[2, 2]);
    let grads = ctx.backward(&upstream, INPUT_GRAD).unwrap();

    assert_eq!(
        grads[2].as_ref().unwrap().to_vec::<f32>(),
        [20.0, 10.0, 30.0, 40.0]
    );
}

#[test]
fn test_forward_propagates_shape_errors() {
    // The wrapper delegates validation to the plain dispatcher; a shape
    // violation surfaces before any write and no context is produced.
    let src = Tensor::from_slice(&[1.0f32, 2.0, 3.0], &[3]);
    let index = Tensor::from_slice(&[0i64, 1], &[2]);
    let mut out = Tensor::from_slice(&[7.0f32, 8.0, 9.0], &[3]);

    let result = autograd::scatter(ScatterOp::Add, 0, &mut out, &index, &src, None, INPUT_GRAD);

    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    assert_eq!(out.to_vec::<f32>(), [7.0, 8.0, 9.0]);
}
