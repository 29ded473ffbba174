//! AVX2 less-than-or-equal kernels
//!
//! Uses vector comparison intrinsics and blend operations.

use std::arch::x86_64::*;

use super::{LeVector, Source, sweep};

// Less than or equal (ordered, signaling): false when either lane is NaN
const CMP_LE_OS: i32 = 2;

#[derive(Copy, Clone)]
struct F32x8(__m256);

impl LeVector<f32> for F32x8 {
    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self(unsafe { _mm256_loadu_ps(ptr) })
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self(unsafe { _mm256_set1_ps(value) })
    }

    #[inline(always)]
    unsafe fn le(self, rhs: Self) -> Self {
        unsafe {
            // _mm256_cmp_ps returns all 1s (0xFFFFFFFF) for true, all 0s for false
            let mask = _mm256_cmp_ps::<{ CMP_LE_OS }>(self.0, rhs.0);
            Self(_mm256_blendv_ps(_mm256_setzero_ps(), _mm256_set1_ps(1.0), mask))
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { _mm256_storeu_ps(ptr, self.0) }
    }
}

#[derive(Copy, Clone)]
struct F64x4(__m256d);

impl LeVector<f64> for F64x4 {
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        Self(unsafe { _mm256_loadu_pd(ptr) })
    }

    #[inline(always)]
    unsafe fn splat(value: f64) -> Self {
        Self(unsafe { _mm256_set1_pd(value) })
    }

    #[inline(always)]
    unsafe fn le(self, rhs: Self) -> Self {
        unsafe {
            let mask = _mm256_cmp_pd::<{ CMP_LE_OS }>(self.0, rhs.0);
            Self(_mm256_blendv_pd(_mm256_setzero_pd(), _mm256_set1_pd(1.0), mask))
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f64) {
        unsafe { _mm256_storeu_pd(ptr, self.0) }
    }
}

/// AVX2 less-than-or-equal for f32
///
/// # Safety
/// - CPU must support AVX2
/// - Pointer sources and `out` must be valid for `len` elements
#[target_feature(enable = "avx2")]
pub(super) unsafe fn le_f32(lhs: Source<f32>, rhs: Source<f32>, out: *mut f32, len: usize) {
    unsafe { sweep::<f32, F32x8>(lhs, rhs, out, len) }
}

/// AVX2 less-than-or-equal for f64
///
/// # Safety
/// - CPU must support AVX2
/// - Pointer sources and `out` must be valid for `len` elements
#[target_feature(enable = "avx2")]
pub(super) unsafe fn le_f64(lhs: Source<f64>, rhs: Source<f64>, out: *mut f64, len: usize) {
    unsafe { sweep::<f64, F64x4>(lhs, rhs, out, len) }
}
