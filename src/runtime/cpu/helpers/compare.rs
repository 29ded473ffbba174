//! Orchestration for `le` on CPU tensors
//!
//! Each entry point resizes `out` exactly once, before any dtype dispatch, then
//! routes to the vectorized or the promoting kernels.

use super::super::kernels;
use super::super::path::{OptimizedPath, select_optimized_path};
use crate::dispatch_dtype;
use crate::dtype::{DTypeSet, Scalar, promote};
use crate::error::{Error, Result};
use crate::runtime::compute_broadcast_shape;
use crate::tensor::Tensor;

/// Resize `out`, reporting any failure as an invalid `out` argument
fn resize_out(out: &mut Tensor, shape: &[usize]) -> Result<()> {
    out.resize(shape).map_err(|e| {
        tracing::debug!(error = %e, "le: output resize failed");
        Error::invalid_argument("out", format!("failed to resize output tensor: {e}"))
    })
}

/// `out = a <= b` element-wise with broadcasting
pub fn le_tensor_impl(a: &Tensor, b: &Tensor, out: &mut Tensor) -> Result<()> {
    let out_shape = compute_broadcast_shape(a, b).map_err(|e| {
        Error::invalid_argument("out", format!("failed to resize output tensor: {e}"))
    })?;
    resize_out(out, &out_shape)?;

    match select_optimized_path(a, b, out) {
        OptimizedPath::FlattenAs1d => {
            dispatch_dtype!(out.dtype(), T => {
                kernels::le_flat::<T>(a.as_slice()?, b.as_slice()?, out.as_mut_slice()?);
            });
        }
        OptimizedPath::Broadcast(plan) => {
            dispatch_dtype!(out.dtype(), T => {
                kernels::le_broadcast::<T>(a.as_slice()?, b.as_slice()?, out.as_mut_slice()?, &plan);
            });
        }
        OptimizedPath::None => {
            tracing::debug!(
                a = %a.dtype(),
                b = %b.dtype(),
                out = %out.dtype(),
                "le: promoting fallback"
            );
            kernels::le_promoting_strided(a, b, out)?;
        }
    }
    Ok(())
}

/// `out = a <= b` element-wise against a scalar
///
/// The vectorized kernel runs only when `a`, the promoted type and `out` all
/// share one vectorizable dtype and `a` is contiguous; otherwise the
/// promoting loop handles the conversion.
pub fn le_scalar_impl(a: &Tensor, b: Scalar, out: &mut Tensor) -> Result<()> {
    resize_out(out, a.shape())?;

    let common = promote(a.dtype(), b.dtype());
    let vectorized = a.dtype() == common
        && out.dtype() == common
        && a.is_contiguous()
        && DTypeSet::VECTORIZABLE.contains(common);

    if vectorized {
        tracing::trace!(dtype = %common, "le scalar: vectorized");
        dispatch_dtype!(common, T => {
            kernels::le_flat_scalar::<T>(a.as_slice()?, b.to_element::<T>(), out.as_mut_slice()?);
        });
    } else {
        tracing::debug!(
            a = %a.dtype(),
            scalar = %b.dtype(),
            %common,
            out = %out.dtype(),
            "le scalar: promoting fallback"
        );
        kernels::le_scalar_promoting(a, b, out)?;
    }
    Ok(())
}
