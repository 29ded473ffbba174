//! Layout: shape and element strides of a tensor view

use crate::error::{Error, Result};
use smallvec::SmallVec;

/// Dimensions kept inline before spilling to the heap
pub(crate) const STACK_DIMS: usize = 4;

/// Shape type: dimensions of a tensor
pub type Shape = SmallVec<[usize; STACK_DIMS]>;

/// Per-dimension strides, in elements
///
/// Signed so that broadcast dimensions can carry a zero stride.
pub type Strides = SmallVec<[isize; STACK_DIMS]>;

/// Shape and strides of a tensor over its storage
///
/// Element `[i0, .., in]` lives at `i0 * strides[0] + .. + in * strides[n]`.
/// Every view starts at the first storage element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    strides: Strides,
}

impl Layout {
    /// Row-major layout for `shape`
    ///
    /// # Example
    /// ```
    /// use elemcmp::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        let mut strides = Strides::from_elem(1, shape.len());
        for d in (1..shape.len()).rev() {
            strides[d - 1] = strides[d] * shape[d] as isize;
        }
        Self {
            shape: Shape::from_slice(shape),
            strides,
        }
    }

    /// Dimensions
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Strides, in elements
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Rank
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of logical elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Whether the view walks its storage in row-major order without gaps
    ///
    /// Size-1 dimensions may carry any stride.
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 1isize;
        self.shape
            .iter()
            .zip(&self.strides)
            .rev()
            .all(|(&dim, &stride)| {
                let ok = dim == 1 || stride == expected;
                expected *= dim as isize;
                ok
            })
    }

    /// Swap two dimensions; negative indices count from the end
    pub fn transpose(&self, dim0: isize, dim1: isize) -> Result<Self> {
        let d0 = self.axis(dim0)?;
        let d1 = self.axis(dim1)?;
        let mut swapped = self.clone();
        swapped.shape.swap(d0, d1);
        swapped.strides.swap(d0, d1);
        Ok(swapped)
    }

    /// View this layout as `target`, with zero strides on expanded dimensions
    ///
    /// Returns `None` unless every dimension is either equal to its target or 1.
    pub fn broadcast_to(&self, target: &[usize]) -> Option<Self> {
        let pad = target.len().checked_sub(self.ndim())?;
        let mut strides = Strides::from_elem(0, pad);
        for ((&dim, &stride), &want) in self.shape.iter().zip(&self.strides).zip(&target[pad..]) {
            if dim == want {
                strides.push(stride);
            } else if dim == 1 {
                strides.push(0);
            } else {
                return None;
            }
        }
        Some(Self {
            shape: Shape::from_slice(target),
            strides,
        })
    }

    fn axis(&self, dim: isize) -> Result<usize> {
        let ndim = self.ndim();
        let idx = if dim < 0 { dim + ndim as isize } else { dim };
        if (0..ndim as isize).contains(&idx) {
            Ok(idx as usize)
        } else {
            Err(Error::InvalidDimension { dim, ndim })
        }
    }
}
