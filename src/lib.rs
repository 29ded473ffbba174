//! # elemcmp
//!
//! **Element-wise less-than-or-equal over typed n-dimensional arrays.**
//!
//! elemcmp compares two tensors, or a tensor and a scalar, and writes the
//! result into a caller-provided output tensor that is resized to fit.
//!
//! ## Features
//!
//! - **Broadcasting**: NumPy-style pairwise broadcasting of tensor operands
//! - **Type promotion**: mixed dtypes compare in a common promoted type
//! - **Tiered execution**: vectorized kernels (AVX2, NEON, portable lanes) when
//!   dtypes and layouts allow, a promoting strided loop otherwise; both give
//!   identical results
//! - **Multiple dtypes**: f64, f32, f16, bf16, signed and unsigned integers, bool
//!
//! ## Quick Start
//!
//! ```rust
//! use elemcmp::prelude::*;
//!
//! let a = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2])?;
//! let b = Tensor::from_slice(&[2.5f32, 2.5], &[2])?;
//!
//! let mut out = Tensor::zeros(&[0], DType::Bool);
//! compare_le(&a, &b, &mut out)?;
//! assert_eq!(out.to_vec::<bool>()?, vec![true, true, false, false]);
//! # Ok::<(), elemcmp::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `simd` (default): AVX2/NEON kernels selected at runtime
//! - `f16`: Half-precision floats (F16, BF16)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element, Scalar};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{compare_le, le_scalar_out, le_tensor_out};
    pub use crate::tensor::{Layout, ShapeDynamism, Tensor};
}
