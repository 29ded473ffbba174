//! NEON less-than-or-equal kernels for ARM64
//!
//! Uses 128-bit NEON registers. Results are stored as 1.0 for true and 0.0 for
//! false; `vcleq` is false for NaN lanes.

use std::arch::aarch64::*;

use super::super::{LeVector, Source, sweep};

#[derive(Copy, Clone)]
struct F32x4(float32x4_t);

impl LeVector<f32> for F32x4 {
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self(unsafe { vld1q_f32(ptr) })
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self(unsafe { vdupq_n_f32(value) })
    }

    #[inline(always)]
    unsafe fn le(self, rhs: Self) -> Self {
        unsafe {
            let mask = vcleq_f32(self.0, rhs.0);
            Self(vbslq_f32(mask, vdupq_n_f32(1.0), vdupq_n_f32(0.0)))
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { vst1q_f32(ptr, self.0) }
    }
}

#[derive(Copy, Clone)]
struct F64x2(float64x2_t);

impl LeVector<f64> for F64x2 {
    const LANES: usize = 2;

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        Self(unsafe { vld1q_f64(ptr) })
    }

    #[inline(always)]
    unsafe fn splat(value: f64) -> Self {
        Self(unsafe { vdupq_n_f64(value) })
    }

    #[inline(always)]
    unsafe fn le(self, rhs: Self) -> Self {
        unsafe {
            let mask = vcleq_f64(self.0, rhs.0);
            Self(vbslq_f64(mask, vdupq_n_f64(1.0), vdupq_n_f64(0.0)))
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f64) {
        unsafe { vst1q_f64(ptr, self.0) }
    }
}

/// NEON less-than-or-equal for f32
///
/// # Safety
/// - CPU must support NEON (always true on AArch64)
/// - Pointer sources and `out` must be valid for `len` elements
#[target_feature(enable = "neon")]
pub(in super::super) unsafe fn le_f32(lhs: Source<f32>, rhs: Source<f32>, out: *mut f32, len: usize) {
    unsafe { sweep::<f32, F32x4>(lhs, rhs, out, len) }
}

/// NEON less-than-or-equal for f64
///
/// # Safety
/// - CPU must support NEON (always true on AArch64)
/// - Pointer sources and `out` must be valid for `len` elements
#[target_feature(enable = "neon")]
pub(in super::super) unsafe fn le_f64(lhs: Source<f64>, rhs: Source<f64>, out: *mut f64, len: usize) {
    unsafe { sweep::<f64, F64x2>(lhs, rhs, out, len) }
}
