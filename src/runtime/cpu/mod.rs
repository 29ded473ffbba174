//! CPU runtime implementation
//!
//! # Broadcasting
//!
//! NumPy-style broadcasting is supported for `le`. Shapes are right-aligned
//! and expanded where one operand has size 1. Broadcasts where a single
//! operand expands along one block of dimensions run on the vectorized
//! kernels segment by segment; every other broadcast uses the promoting
//! strided kernel.
//!
//! # Non-contiguous Tensors
//!
//! Non-contiguous operands are read through their strides by the promoting
//! kernels. Outputs are always contiguous after the resize step.

pub(crate) mod helpers;
pub mod kernels;
pub mod path;

pub use path::{OptimizedPath, select_optimized_path};
