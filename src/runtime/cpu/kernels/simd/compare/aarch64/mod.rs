//! ARM64 comparison kernels

pub(super) mod neon;
