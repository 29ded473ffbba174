//! CPU kernel implementations
//!
//! This module provides the low-level compute kernels for `le`. The vectorized
//! kernels are generic over `T: Element` and need matching dtypes; the
//! promoting kernels accept any dtype combination and layout.

pub mod compare;
pub mod promote;
pub mod simd;

pub use compare::{le_broadcast, le_flat, le_flat_scalar};
pub use promote::{le_promoting_strided, le_scalar_promoting};
