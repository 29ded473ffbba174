//! Pairwise broadcasting: target shapes and aligned segment iteration
//!
//! [`broadcast_shapes`] computes the NumPy-style result shape of two operands.
//! [`BroadcastPlan`] recognises the broadcast patterns that can be swept as
//! contiguous runs, and [`Segments`] turns a plan into those runs so a kernel
//! only has to supply the per-run comparison.

use super::layout::Shape;
use crate::error::{Error, Result};

/// Compute the broadcast shape of two shapes
///
/// Shapes are aligned from the right; each pair of dimensions must be equal or
/// contain a 1. A missing leading dimension counts as 1.
///
/// ```
/// use elemcmp::tensor::broadcast_shapes;
/// assert_eq!(broadcast_shapes(&[2, 1, 4], &[3, 1]).unwrap().as_slice(), &[2, 3, 4]);
/// assert!(broadcast_shapes(&[2, 3], &[4]).is_err());
/// ```
pub fn broadcast_shapes(lhs: &[usize], rhs: &[usize]) -> Result<Shape> {
    let ndim = lhs.len().max(rhs.len());
    let mut result = Shape::with_capacity(ndim);

    for i in 0..ndim {
        let l = dim_from_right(lhs, ndim, i);
        let r = dim_from_right(rhs, ndim, i);

        let d = if l == r || r == 1 {
            l
        } else if l == 1 {
            r
        } else {
            return Err(Error::broadcast(lhs, rhs));
        };
        result.push(d);
    }

    Ok(result)
}

/// Dimension `i` of `shape` after left-padding it with 1s to `ndim` dims
#[inline]
fn dim_from_right(shape: &[usize], ndim: usize, i: usize) -> usize {
    let pad = ndim - shape.len();
    if i < pad { 1 } else { shape[i - pad] }
}

fn strip_leading_ones(shape: &[usize]) -> &[usize] {
    let start = shape.iter().position(|&d| d != 1).unwrap_or(shape.len());
    &shape[start..]
}

/// Which operand of a binary op
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// First (left-hand) operand
    Lhs,
    /// Second (right-hand) operand
    Rhs,
}

/// Shape pattern of a [`BroadcastPlan`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BroadcastKind {
    /// `[m, n]` against `[n]`
    TwoDByOneD,
    /// The broadcast block ends at the last dimension, e.g. `[m, n]` against `[m, 1]`
    LastDim,
    /// The broadcast block sits between equal outer and inner dimensions
    NdByNd,
}

/// A broadcast between two contiguous operands that reduces to aligned runs
///
/// Viewing the output as `[outer, broadcast, inner]`, the large operand has the
/// output's shape and the small operand has shape `[outer, 1, inner]`. Leading
/// 1s are ignored on both sides, and the block of broadcast dimensions must be
/// contiguous and belong entirely to one operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BroadcastPlan {
    /// Product of the dimensions before the broadcast block
    pub outer: usize,
    /// Product of the large operand's dimensions inside the block
    pub broadcast: usize,
    /// Product of the dimensions after the block
    pub inner: usize,
    /// The operand that is expanded along the block
    pub small: Operand,
    /// Which pattern this is
    pub kind: BroadcastKind,
}

impl BroadcastPlan {
    /// Recognise a segmentable broadcast between `lhs` and `rhs`
    ///
    /// Returns `None` when the shapes are equal modulo leading 1s, when both
    /// operands broadcast, when the broadcast dimensions are not adjacent, or
    /// when the shapes are incompatible.
    pub fn from_shapes(lhs: &[usize], rhs: &[usize]) -> Option<Self> {
        let lhs = strip_leading_ones(lhs);
        let rhs = strip_leading_ones(rhs);
        if lhs == rhs {
            return None;
        }

        let ndim = lhs.len().max(rhs.len());
        let mut block: Option<(usize, usize)> = None;
        let mut small = None;

        for i in 0..ndim {
            let l = dim_from_right(lhs, ndim, i);
            let r = dim_from_right(rhs, ndim, i);
            if l == r {
                continue;
            }

            let side = match (l, r) {
                (1, _) => Operand::Lhs,
                (_, 1) => Operand::Rhs,
                _ => return None,
            };
            if small.is_some_and(|s| s != side) {
                return None;
            }
            small = Some(side);

            block = match block {
                None => Some((i, i + 1)),
                Some((start, end)) if end == i => Some((start, i + 1)),
                Some(_) => return None,
            };
        }

        let (start, end) = block?;
        let small = small?;
        let (big_shape, small_rank) = match small {
            Operand::Lhs => (rhs, lhs.len()),
            Operand::Rhs => (lhs, rhs.len()),
        };
        let big = |i: usize| dim_from_right(big_shape, ndim, i);

        let outer = (0..start).map(big).product();
        let broadcast = (start..end).map(big).product();
        let inner = (end..ndim).map(big).product();

        let kind = if end == ndim {
            BroadcastKind::LastDim
        } else if ndim == 2 && small_rank == 1 {
            BroadcastKind::TwoDByOneD
        } else {
            BroadcastKind::NdByNd
        };

        Some(Self {
            outer,
            broadcast,
            inner,
            small,
            kind,
        })
    }

    /// Number of output elements covered by the plan
    #[inline]
    pub fn numel(&self) -> usize {
        self.outer * self.broadcast * self.inner
    }

    /// Iterate the aligned runs of the plan
    pub fn segments(&self) -> Segments {
        let count = if self.numel() == 0 {
            0
        } else if self.inner == 1 {
            self.outer
        } else {
            self.outer * self.broadcast
        };
        Segments {
            plan: *self,
            next: 0,
            count,
        }
    }
}

/// Where a segment reads one operand from
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentSource {
    /// `len` consecutive elements starting at this index
    Contiguous(usize),
    /// The single element at this index, repeated `len` times
    Splat(usize),
}

/// One aligned run of a broadcast: `out[out_start..out_start + len]`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// First output index written by this run
    pub out_start: usize,
    /// Source of the left operand
    pub lhs: SegmentSource,
    /// Source of the right operand
    pub rhs: SegmentSource,
    /// Run length
    pub len: usize,
}

/// Iterator over the [`Segment`]s of a [`BroadcastPlan`]
///
/// With `inner == 1` the small operand contributes one value per outer index,
/// so each run pairs `broadcast` large elements with a splat. Otherwise each
/// run pairs `inner` large elements with `inner` small elements.
#[derive(Clone, Debug)]
pub struct Segments {
    plan: BroadcastPlan,
    next: usize,
    count: usize,
}

impl Iterator for Segments {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.next >= self.count {
            return None;
        }
        let k = self.next;
        self.next += 1;

        let p = &self.plan;
        let (out_start, small, len) = if p.inner == 1 {
            let out_start = k * p.broadcast;
            (out_start, SegmentSource::Splat(k), p.broadcast)
        } else {
            let o = k / p.broadcast;
            let out_start = k * p.inner;
            (out_start, SegmentSource::Contiguous(o * p.inner), p.inner)
        };
        let large = SegmentSource::Contiguous(out_start);

        let (lhs, rhs) = match p.small {
            Operand::Lhs => (small, large),
            Operand::Rhs => (large, small),
        };
        Some(Segment {
            out_start,
            lhs,
            rhs,
            len,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Segments {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_shapes() {
        assert_eq!(broadcast_shapes(&[2, 3], &[2, 3]).unwrap().as_slice(), &[2, 3]);
        assert_eq!(broadcast_shapes(&[2, 3], &[3]).unwrap().as_slice(), &[2, 3]);
        assert_eq!(broadcast_shapes(&[1], &[4, 1, 5]).unwrap().as_slice(), &[4, 1, 5]);
        assert_eq!(broadcast_shapes(&[], &[2]).unwrap().as_slice(), &[2]);
        assert_eq!(broadcast_shapes(&[0, 1], &[3]).unwrap().as_slice(), &[0, 3]);
        assert!(matches!(
            broadcast_shapes(&[2, 3], &[2]),
            Err(Error::BroadcastError { .. })
        ));
    }

    #[test]
    fn test_plan_two_d_by_one_d() {
        let plan = BroadcastPlan::from_shapes(&[4, 3], &[3]).unwrap();
        assert_eq!(plan.kind, BroadcastKind::TwoDByOneD);
        assert_eq!(plan.small, Operand::Rhs);
        assert_eq!((plan.outer, plan.broadcast, plan.inner), (1, 4, 3));

        let reversed = BroadcastPlan::from_shapes(&[1, 3], &[4, 3]).unwrap();
        assert_eq!(reversed.kind, BroadcastKind::TwoDByOneD);
        assert_eq!(reversed.small, Operand::Lhs);
    }

    #[test]
    fn test_plan_last_dim() {
        let plan = BroadcastPlan::from_shapes(&[2, 3, 4], &[2, 3, 1]).unwrap();
        assert_eq!(plan.kind, BroadcastKind::LastDim);
        assert_eq!((plan.outer, plan.broadcast, plan.inner), (6, 4, 1));

        // Scalar-like operand broadcasts over everything
        let plan = BroadcastPlan::from_shapes(&[1, 1], &[2, 5]).unwrap();
        assert_eq!(plan.small, Operand::Lhs);
        assert_eq!((plan.outer, plan.broadcast, plan.inner), (1, 10, 1));
    }

    #[test]
    fn test_plan_nd_by_nd() {
        let plan = BroadcastPlan::from_shapes(&[2, 1, 4], &[2, 3, 4]).unwrap();
        assert_eq!(plan.kind, BroadcastKind::NdByNd);
        assert_eq!(plan.small, Operand::Lhs);
        assert_eq!((plan.outer, plan.broadcast, plan.inner), (2, 3, 4));

        let block = BroadcastPlan::from_shapes(&[5, 2, 3, 4], &[5, 1, 1, 4]).unwrap();
        assert_eq!((block.outer, block.broadcast, block.inner), (5, 6, 4));
    }

    #[test]
    fn test_plan_rejects() {
        // Same shape modulo leading ones
        assert!(BroadcastPlan::from_shapes(&[1, 2, 3], &[2, 3]).is_none());
        // Both operands broadcast
        assert!(BroadcastPlan::from_shapes(&[2, 1], &[1, 3]).is_none());
        // Broadcast dims not adjacent
        assert!(BroadcastPlan::from_shapes(&[2, 3, 4], &[1, 3, 1]).is_none());
        // Incompatible
        assert!(BroadcastPlan::from_shapes(&[2, 3], &[2, 4]).is_none());
    }

    #[test]
    fn test_segments_inner() {
        let plan = BroadcastPlan::from_shapes(&[2, 1, 2], &[2, 3, 2]).unwrap();
        let segs: Vec<Segment> = plan.segments().collect();
        assert_eq!(segs.len(), 6);
        assert_eq!(
            segs[4],
            Segment {
                out_start: 8,
                lhs: SegmentSource::Contiguous(2),
                rhs: SegmentSource::Contiguous(8),
                len: 2,
            }
        );
        let covered: usize = segs.iter().map(|s| s.len).sum();
        assert_eq!(covered, plan.numel());
    }

    #[test]
    fn test_segments_splat() {
        let plan = BroadcastPlan::from_shapes(&[3, 4], &[3, 1]).unwrap();
        let segs: Vec<Segment> = plan.segments().collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(
            segs[2],
            Segment {
                out_start: 8,
                lhs: SegmentSource::Contiguous(8),
                rhs: SegmentSource::Splat(2),
                len: 4,
            }
        );
    }

    #[test]
    fn test_segments_empty() {
        let plan = BroadcastPlan::from_shapes(&[0, 3], &[3]).unwrap();
        assert_eq!(plan.numel(), 0);
        assert_eq!(plan.segments().count(), 0);
    }
}
