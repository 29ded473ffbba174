//! Storage: aligned host memory for tensor elements

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};

/// Storage for tensor data
///
/// Elements live in a zero-initialised buffer of `u64` words, which gives every
/// supported element type (at most 8 bytes wide) a correctly aligned base
/// pointer. Typed views are handed out only for the element type matching
/// `dtype`, and every `Element` is `Zeroable`, so unwritten slots are valid.
#[derive(Clone)]
pub struct Storage {
    words: Vec<u64>,
    /// Number of elements (not bytes)
    len: usize,
    dtype: DType,
}

impl Storage {
    /// Allocate `len` zeroed elements of `dtype`
    pub fn zeroed(len: usize, dtype: DType) -> Self {
        Self {
            words: vec![0u64; Self::word_count(len, dtype)],
            len,
            dtype,
        }
    }

    /// Create storage holding a copy of `data`
    pub fn from_slice<T: Element>(data: &[T]) -> Self {
        let mut storage = Self::zeroed(data.len(), T::DTYPE);
        storage.typed_mut::<T>().copy_from_slice(data);
        storage
    }

    #[inline]
    fn word_count(len: usize, dtype: DType) -> usize {
        (len * dtype.size_in_bytes()).div_ceil(std::mem::size_of::<u64>())
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the storage holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Size of the element data in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.len * self.dtype.size_in_bytes()
    }

    /// Raw pointer to the first element
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.words.as_ptr() as *const u8
    }

    /// Mutable raw pointer to the first element
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.words.as_mut_ptr() as *mut u8
    }

    /// View the elements as `&[T]`
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        self.check_dtype::<T>()?;
        Ok(self.typed::<T>())
    }

    /// View the elements as `&mut [T]`
    pub fn as_mut_slice<T: Element>(&mut self) -> Result<&mut [T]> {
        self.check_dtype::<T>()?;
        Ok(self.typed_mut::<T>())
    }

    /// Grow to hold at least `len` elements; new slots are zeroed
    pub fn grow(&mut self, len: usize) {
        if len > self.len {
            self.words.resize(Self::word_count(len, self.dtype), 0);
            self.len = len;
        }
    }

    #[inline]
    fn check_dtype<T: Element>(&self) -> Result<()> {
        if T::DTYPE == self.dtype {
            Ok(())
        } else {
            Err(Error::DTypeMismatch {
                expected: self.dtype,
                got: T::DTYPE,
            })
        }
    }

    #[inline]
    fn typed<T: Element>(&self) -> &[T] {
        debug_assert_eq!(T::DTYPE, self.dtype);
        // SAFETY: the buffer is 8-byte aligned and holds at least `len` elements of
        // `size_of::<T>() == dtype.size_in_bytes()` bytes. Slots were either zeroed
        // (valid for `Zeroable`) or written through a `&mut [T]` of the same type.
        unsafe { std::slice::from_raw_parts(self.as_ptr() as *const T, self.len) }
    }

    #[inline]
    fn typed_mut<T: Element>(&mut self) -> &mut [T] {
        debug_assert_eq!(T::DTYPE, self.dtype);
        // SAFETY: see `typed`; the exclusive borrow of `self` makes the slice unique.
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr() as *mut T, self.len) }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.len)
            .field("dtype", &self.dtype)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_roundtrip() {
        let storage = Storage::from_slice(&[1.5f64, -2.0, 3.25]);
        assert_eq!(storage.len(), 3);
        assert_eq!(storage.dtype(), DType::F64);
        assert_eq!(storage.size_in_bytes(), 24);
        assert_eq!(storage.as_slice::<f64>().unwrap(), &[1.5, -2.0, 3.25]);
    }

    #[test]
    fn test_zeroed_bool() {
        let storage = Storage::zeroed(5, DType::Bool);
        assert_eq!(storage.as_slice::<bool>().unwrap(), &[false; 5]);
    }

    #[test]
    fn test_dtype_mismatch() {
        let storage = Storage::from_slice(&[1i32, 2]);
        assert!(matches!(
            storage.as_slice::<u32>(),
            Err(Error::DTypeMismatch {
                expected: DType::I32,
                got: DType::U32
            })
        ));
    }

    #[test]
    fn test_grow_keeps_data() {
        let mut storage = Storage::from_slice(&[7u8, 8, 9]);
        storage.grow(11);
        assert_eq!(storage.len(), 11);
        let data = storage.as_slice::<u8>().unwrap();
        assert_eq!(&data[..3], &[7, 8, 9]);
        assert!(data[3..].iter().all(|&v| v == 0));

        storage.grow(2);
        assert_eq!(storage.len(), 11);
    }
}
