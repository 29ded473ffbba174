//! Tensor types and the shape services comparisons rely on
//!
//! This module provides the core `Tensor` type, an n-dimensional array in host
//! memory, together with broadcasting and stride-aware iteration helpers.

mod broadcast;
mod core;
mod iter;
mod layout;
mod storage;

pub use broadcast::{
    BroadcastKind, BroadcastPlan, Operand, Segment, SegmentSource, Segments, broadcast_shapes,
};
pub use core::{ShapeDynamism, Tensor};
pub use iter::StridedOffsets;
pub use layout::{Layout, Shape, Strides};
pub use storage::Storage;
