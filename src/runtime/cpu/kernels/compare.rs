//! Vectorized less-than-or-equal kernels
//!
//! These run when both operands and the output share one element type and are
//! contiguous. Results are written as `T::one()` / `T::zero()`.

use super::simd::compare::{LeInput, le};
use crate::dtype::Element;
use crate::tensor::{BroadcastPlan, SegmentSource};

/// Flat sweep: `out[i] = a[i] <= b[i]`
///
/// # Panics
///
/// Panics if the three slices differ in length.
#[inline]
pub fn le_flat<T: Element>(a: &[T], b: &[T], out: &mut [T]) {
    le(LeInput::Vector(a), LeInput::Vector(b), out);
}

/// Flat sweep against one value: `out[i] = a[i] <= b`
///
/// # Panics
///
/// Panics if `a` and `out` differ in length.
#[inline]
pub fn le_flat_scalar<T: Element>(a: &[T], b: T, out: &mut [T]) {
    le(LeInput::Vector(a), LeInput::Splat(b), out);
}

/// Broadcast sweep over the segments of `plan`
///
/// `a` and `b` are the contiguous operands in their own shapes; `out` has the
/// broadcast shape.
///
/// # Panics
///
/// Panics if `out` does not hold `plan.numel()` elements or an operand is too
/// short for the plan.
pub fn le_broadcast<T: Element>(a: &[T], b: &[T], out: &mut [T], plan: &BroadcastPlan) {
    assert_eq!(out.len(), plan.numel(), "output length must match broadcast plan");

    let segments = plan.segments();
    tracing::trace!(segments = segments.len(), kind = ?plan.kind, "le broadcast sweep");

    for seg in segments {
        let dst = &mut out[seg.out_start..seg.out_start + seg.len];
        le(input(a, seg.lhs, seg.len), input(b, seg.rhs, seg.len), dst);
    }
}

#[inline]
fn input<T: Element>(data: &[T], source: SegmentSource, len: usize) -> LeInput<'_, T> {
    match source {
        SegmentSource::Contiguous(start) => LeInput::Vector(&data[start..start + len]),
        SegmentSource::Splat(index) => LeInput::Splat(data[index]),
    }
}
