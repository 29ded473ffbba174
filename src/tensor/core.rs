//! Core Tensor type

use super::{Layout, Storage, StridedOffsets};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::fmt;

/// How a tensor's shape may change when an operation resizes it
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ShapeDynamism {
    /// The shape is fixed; resizing only succeeds to the current shape
    Static,
    /// Any shape whose element count fits the allocated capacity
    DynamicBound,
    /// Any shape; storage grows on demand
    #[default]
    DynamicUnbound,
}

/// N-dimensional array in host memory
///
/// A `Tensor` owns its [`Storage`] and describes it with a [`Layout`]. Views
/// created with [`Tensor::transpose`] copy the storage and keep the permuted
/// strides, so they are real non-contiguous tensors.
///
/// # Example
///
/// ```
/// use elemcmp::tensor::Tensor;
/// let t = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// assert_eq!(t.shape(), &[2, 2]);
/// assert_eq!(t.to_vec::<f32>().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
/// ```
#[derive(Clone)]
pub struct Tensor {
    storage: Storage,
    layout: Layout,
    dynamism: ShapeDynamism,
}

impl Tensor {
    /// Create a contiguous tensor from a slice of data
    ///
    /// Returns an error if `data.len()` does not equal the product of `shape`.
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::shape_mismatch(shape, &[data.len()]));
        }

        Ok(Self {
            storage: Storage::from_slice(data),
            layout: Layout::contiguous(shape),
            dynamism: ShapeDynamism::default(),
        })
    }

    /// Create a tensor filled with zeros (`false` for bool)
    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        let len: usize = shape.iter().product();
        Self {
            storage: Storage::zeroed(len, dtype),
            layout: Layout::contiguous(shape),
            dynamism: ShapeDynamism::default(),
        }
    }

    /// Create a 0-dimensional tensor holding `value`
    pub fn scalar<T: Element>(value: T) -> Self {
        Self {
            storage: Storage::from_slice(&[value]),
            layout: Layout::contiguous(&[]),
            dynamism: ShapeDynamism::default(),
        }
    }

    /// Set how this tensor may be resized
    ///
    /// For [`ShapeDynamism::DynamicBound`] the capacity is the current storage
    /// length.
    pub fn with_dynamism(mut self, dynamism: ShapeDynamism) -> Self {
        self.dynamism = dynamism;
        self
    }

    // ===== Accessors =====

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Strides, in elements
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// The layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The underlying storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Resize policy
    #[inline]
    pub fn dynamism(&self) -> ShapeDynamism {
        self.dynamism
    }

    /// Number of elements the storage can hold without growing
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Whether elements are laid out contiguously in row-major order
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    // ===== Data access =====

    /// Borrow the elements of a contiguous tensor
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        if !self.is_contiguous() {
            return Err(Error::NotContiguous);
        }
        let numel = self.numel();
        Ok(&self.storage.as_slice::<T>()?[..numel])
    }

    /// Mutably borrow the elements of a contiguous tensor
    pub fn as_mut_slice<T: Element>(&mut self) -> Result<&mut [T]> {
        if !self.is_contiguous() {
            return Err(Error::NotContiguous);
        }
        let numel = self.numel();
        Ok(&mut self.storage.as_mut_slice::<T>()?[..numel])
    }

    /// Copy the elements out in logical row-major order
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        let data = self.storage.as_slice::<T>()?;
        if self.is_contiguous() {
            return Ok(data[..self.numel()].to_vec());
        }
        Ok(StridedOffsets::new(&self.layout)
            .map(|offset| data[offset as usize])
            .collect())
    }

    /// Base pointer of the storage; element offsets from the layout apply to it
    #[inline]
    pub(crate) fn storage_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }

    /// Mutable base pointer of the storage
    #[inline]
    pub(crate) fn storage_mut_ptr(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr()
    }

    // ===== Shape changes =====

    /// Swap two dimensions, producing a non-contiguous tensor
    ///
    /// Supports negative indexing.
    pub fn transpose(&self, dim0: isize, dim1: isize) -> Result<Self> {
        Ok(Self {
            storage: self.storage.clone(),
            layout: self.layout.transpose(dim0, dim1)?,
            dynamism: self.dynamism,
        })
    }

    /// Resize to `shape` according to the tensor's [`ShapeDynamism`]
    ///
    /// On success the tensor is contiguous with the requested shape. Element
    /// values are unspecified afterwards. On failure nothing changes.
    pub fn resize(&mut self, shape: &[usize]) -> Result<()> {
        if !self.is_contiguous() {
            return Err(Error::resize_failed(
                self.shape(),
                shape,
                "tensor is not contiguous",
            ));
        }
        if self.shape() == shape {
            return Ok(());
        }

        let numel: usize = shape.iter().product();
        match self.dynamism {
            ShapeDynamism::Static => {
                return Err(Error::resize_failed(
                    self.shape(),
                    shape,
                    "tensor has a static shape",
                ));
            }
            ShapeDynamism::DynamicBound => {
                if numel > self.capacity() {
                    return Err(Error::resize_failed(
                        self.shape(),
                        shape,
                        "element count exceeds the tensor's capacity",
                    ));
                }
            }
            ShapeDynamism::DynamicUnbound => self.storage.grow(numel),
        }

        self.layout = Layout::contiguous(shape);
        Ok(())
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("strides", &self.strides())
            .field("dtype", &self.dtype())
            .field("dynamism", &self.dynamism)
            .finish()
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({:?}, dtype={})", self.shape(), self.dtype())
    }
}
