//! Tensor operations
//!
//! # Design
//!
//! ```text
//! compare_le(a, b, out)
//!   ├── b: &Tensor  → le_tensor_out: resize to broadcast shape, select path
//!   │                 ├── FlattenAs1d / Broadcast → vectorized kernels
//!   │                 └── None                   → promoting strided kernel
//!   └── b: Scalar   → le_scalar_out: resize to a's shape, promote
//!                     ├── a == promoted == out  → vectorized kernel
//!                     └── otherwise             → promoting scalar loop
//! ```
//!
//! Runtime dtypes become concrete element types through [`dispatch`]: the
//! `dispatch_dtype!` macro or the [`DTypeVisitor`] strategy.

mod compare;
pub mod dispatch;

pub use compare::{LeRhs, compare_le, le_scalar_out, le_tensor_out};
pub use dispatch::{DTypeVisitor, visit_dtype};
