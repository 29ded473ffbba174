//! Execution path selection for `le`
//!
//! Classifies a tensor-tensor comparison as a flat sweep, a segmented
//! broadcast sweep, or neither. The classification is pure; callers treat
//! [`OptimizedPath::None`] as "use the promoting kernels".

use crate::dtype::DTypeSet;
use crate::tensor::{BroadcastPlan, Tensor};

/// How a tensor-tensor `le` can be executed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptimizedPath {
    /// Operands have the same shape up to leading 1s: one flat sweep
    FlattenAs1d,
    /// One operand expands along a single block of dimensions
    Broadcast(BroadcastPlan),
    /// No vectorized path applies
    None,
}

/// Classify `a <= b` written into `out`
///
/// `out` is expected to already have the broadcast shape of `a` and `b`.
/// A vectorized path needs all three dtypes equal and vectorizable, and all
/// three tensors contiguous.
pub fn select_optimized_path(a: &Tensor, b: &Tensor, out: &Tensor) -> OptimizedPath {
    let dtype = a.dtype();
    if b.dtype() != dtype || out.dtype() != dtype || !DTypeSet::VECTORIZABLE.contains(dtype) {
        tracing::trace!(a = %a.dtype(), b = %b.dtype(), out = %out.dtype(), "le path: dtype mismatch");
        return OptimizedPath::None;
    }
    if !(a.is_contiguous() && b.is_contiguous() && out.is_contiguous()) {
        tracing::trace!("le path: non-contiguous operand");
        return OptimizedPath::None;
    }

    let path = if same_ignoring_leading_ones(a.shape(), b.shape()) {
        if a.numel() == out.numel() {
            OptimizedPath::FlattenAs1d
        } else {
            OptimizedPath::None
        }
    } else {
        match BroadcastPlan::from_shapes(a.shape(), b.shape()) {
            Some(plan) if plan.numel() == out.numel() => OptimizedPath::Broadcast(plan),
            _ => OptimizedPath::None,
        }
    };

    tracing::trace!(a = ?a.shape(), b = ?b.shape(), ?path, "le path selected");
    path
}

fn same_ignoring_leading_ones(lhs: &[usize], rhs: &[usize]) -> bool {
    let strip = |s: &[usize]| s.iter().position(|&d| d != 1).unwrap_or(s.len());
    lhs[strip(lhs)..] == rhs[strip(rhs)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::tensor::{BroadcastKind, Operand};

    fn t(shape: &[usize], dtype: DType) -> Tensor {
        Tensor::zeros(shape, dtype)
    }

    #[test]
    fn test_flatten_same_shape() {
        let a = t(&[2, 3], DType::F32);
        let b = t(&[2, 3], DType::F32);
        let out = t(&[2, 3], DType::F32);
        assert_eq!(select_optimized_path(&a, &b, &out), OptimizedPath::FlattenAs1d);
    }

    #[test]
    fn test_flatten_leading_ones() {
        let a = t(&[1, 1, 4], DType::I16);
        let b = t(&[4], DType::I16);
        let out = t(&[1, 1, 4], DType::I16);
        assert_eq!(select_optimized_path(&a, &b, &out), OptimizedPath::FlattenAs1d);
    }

    #[test]
    fn test_broadcast_path() {
        let a = t(&[3], DType::F64);
        let b = t(&[4, 3], DType::F64);
        let out = t(&[4, 3], DType::F64);
        match select_optimized_path(&a, &b, &out) {
            OptimizedPath::Broadcast(plan) => {
                assert_eq!(plan.small, Operand::Lhs);
                assert_eq!(plan.kind, BroadcastKind::TwoDByOneD);
            }
            other => panic!("expected broadcast, got {other:?}"),
        }
    }

    #[test]
    fn test_none_on_dtype_mismatch() {
        let a = t(&[3], DType::I32);
        let b = t(&[3], DType::I64);
        let out = t(&[3], DType::I32);
        assert_eq!(select_optimized_path(&a, &b, &out), OptimizedPath::None);

        let b = t(&[3], DType::I32);
        let out = t(&[3], DType::Bool);
        assert_eq!(select_optimized_path(&a, &b, &out), OptimizedPath::None);
    }

    #[test]
    fn test_none_on_strided_or_double_broadcast() {
        let a = t(&[3, 2], DType::U32).transpose(0, 1).unwrap();
        let b = t(&[2, 3], DType::U32);
        let out = t(&[2, 3], DType::U32);
        assert_eq!(select_optimized_path(&a, &b, &out), OptimizedPath::None);

        let a = t(&[2, 1], DType::U32);
        let b = t(&[1, 3], DType::U32);
        let out = t(&[2, 3], DType::U32);
        assert_eq!(select_optimized_path(&a, &b, &out), OptimizedPath::None);
    }
}
