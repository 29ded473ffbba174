//! Element-wise less-than-or-equal
//!
//! One operation, two call shapes: `a <= b` for a tensor `b` (broadcast) and
//! for a scalar `b`. Both write into a caller-provided output that is resized
//! first; a resize failure is reported as [`Error::InvalidArgument`] for `out`
//! and leaves `out` untouched.
//!
//! [`Error::InvalidArgument`]: crate::error::Error::InvalidArgument

use crate::dtype::{DType, Scalar};
use crate::error::Result;
use crate::runtime::cpu::helpers::{le_scalar_impl, le_tensor_impl};
use crate::tensor::Tensor;

/// Right-hand side accepted by [`compare_le`]
///
/// Implemented for `&Tensor` (tensor form), [`Scalar`] and Rust primitives
/// (scalar form).
pub trait LeRhs {
    /// Compute `out = a <= self`
    fn le_into(self, a: &Tensor, out: &mut Tensor) -> Result<()>;
}

impl LeRhs for &Tensor {
    #[inline]
    fn le_into(self, a: &Tensor, out: &mut Tensor) -> Result<()> {
        le_tensor_impl(a, self, out)
    }
}

impl LeRhs for Scalar {
    #[inline]
    fn le_into(self, a: &Tensor, out: &mut Tensor) -> Result<()> {
        le_scalar_impl(a, self, out)
    }
}

macro_rules! impl_le_rhs_primitive {
    ($($t:ty),+) => {
        $(
            impl LeRhs for $t {
                #[inline]
                fn le_into(self, a: &Tensor, out: &mut Tensor) -> Result<()> {
                    le_scalar_impl(a, Scalar::from(self), out)
                }
            }
        )+
    };
}

impl_le_rhs_primitive!(f64, f32, i64, i32, i16, i8, u64, u32, u16, u8, bool);

/// Element-wise `a <= b`, written into `out`
///
/// `out` is resized to the broadcast shape (tensor `b`) or to `a`'s shape
/// (scalar `b`). Each element is `promote(a[i]) <= promote(b[i])` cast to
/// `out`'s dtype: `true`/`false` for `Bool`, `1`/`0` otherwise. A NaN on
/// either side compares false.
///
/// # Example
///
/// ```
/// use elemcmp::prelude::*;
///
/// let a = Tensor::from_slice(&[1i32, 2, 3], &[3])?;
/// let b = Tensor::from_slice(&[3i32, 2, 1], &[3])?;
/// let mut out = Tensor::zeros(&[0], DType::Bool);
///
/// compare_le(&a, &b, &mut out)?;
/// assert_eq!(out.to_vec::<bool>()?, vec![true, true, false]);
///
/// compare_le(&a, 2i64, &mut out)?;
/// assert_eq!(out.to_vec::<bool>()?, vec![true, true, false]);
/// # Ok::<(), elemcmp::error::Error>(())
/// ```
pub fn compare_le<'o>(a: &Tensor, b: impl LeRhs, out: &'o mut Tensor) -> Result<&'o mut Tensor> {
    b.le_into(a, out)?;
    Ok(out)
}

/// Tensor form of [`compare_le`]
pub fn le_tensor_out<'o>(a: &Tensor, b: &Tensor, out: &'o mut Tensor) -> Result<&'o mut Tensor> {
    le_tensor_impl(a, b, out)?;
    Ok(out)
}

/// Scalar form of [`compare_le`]
pub fn le_scalar_out<'o>(
    a: &Tensor,
    b: impl Into<Scalar>,
    out: &'o mut Tensor,
) -> Result<&'o mut Tensor> {
    le_scalar_impl(a, b.into(), out)?;
    Ok(out)
}

impl Tensor {
    /// Element-wise `self <= other` into a new `Bool` tensor
    pub fn le(&self, other: &Tensor) -> Result<Tensor> {
        let mut out = Tensor::zeros(&[0], DType::Bool);
        le_tensor_impl(self, other, &mut out)?;
        Ok(out)
    }

    /// Element-wise `self <= value` into a new `Bool` tensor
    pub fn le_scalar(&self, value: impl Into<Scalar>) -> Result<Tensor> {
        let mut out = Tensor::zeros(&[0], DType::Bool);
        le_scalar_impl(self, value.into(), &mut out)?;
        Ok(out)
    }
}
