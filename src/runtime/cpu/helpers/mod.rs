//! Helper functions for CPU tensor operations
//!
//! Shared orchestration used by the public operation entry points.

pub mod compare;

pub use compare::{le_scalar_impl, le_tensor_impl};
