//! Stride-aware traversal of tensor layouts

use super::Layout;
use super::layout::STACK_DIMS;
use smallvec::SmallVec;

/// Iterator over the storage offsets of a layout in row-major logical order
///
/// Offsets are updated incrementally: advancing the innermost index adds its
/// stride, and a carry into dimension `d` subtracts the span of every dimension
/// after it. Broadcast (zero-stride) dimensions revisit the same offsets.
///
/// ```
/// use elemcmp::tensor::{Layout, StridedOffsets};
/// let layout = Layout::contiguous(&[2, 3]).transpose(0, 1).unwrap();
/// let offsets: Vec<isize> = StridedOffsets::new(&layout).collect();
/// assert_eq!(offsets, vec![0, 3, 1, 4, 2, 5]);
/// ```
#[derive(Clone, Debug)]
pub struct StridedOffsets<'a> {
    shape: &'a [usize],
    strides: &'a [isize],
    indices: SmallVec<[usize; STACK_DIMS]>,
    current: isize,
    remaining: usize,
}

impl<'a> StridedOffsets<'a> {
    /// Walk every element of `layout`
    pub fn new(layout: &'a Layout) -> Self {
        Self {
            shape: layout.shape(),
            strides: layout.strides(),
            indices: SmallVec::from_elem(0, layout.ndim()),
            current: 0,
            remaining: layout.elem_count(),
        }
    }
}

impl Iterator for StridedOffsets<'_> {
    type Item = isize;

    #[inline]
    fn next(&mut self) -> Option<isize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let offset = self.current;

        if self.remaining > 0 {
            for dim in (0..self.shape.len()).rev() {
                self.indices[dim] += 1;
                self.current += self.strides[dim];
                if self.indices[dim] < self.shape[dim] {
                    break;
                }
                self.current -= self.strides[dim] * self.shape[dim] as isize;
                self.indices[dim] = 0;
            }
        }

        Some(offset)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StridedOffsets<'_> {}
