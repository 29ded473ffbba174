//! Runtime backends for tensor computation
//!
//! Only the CPU backend exists. Its kernels, path selection and orchestration
//! live in [`cpu`]; this module keeps the shape helpers they share.

pub mod cpu;

use crate::error::Result;
use crate::tensor::{Shape, Tensor, broadcast_shapes};

/// Compute broadcast shape for binary operations.
#[inline]
pub(crate) fn compute_broadcast_shape(a: &Tensor, b: &Tensor) -> Result<Shape> {
    broadcast_shapes(a.shape(), b.shape())
}
