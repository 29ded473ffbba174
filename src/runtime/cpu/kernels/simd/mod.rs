//! SIMD detection and dispatch for CPU kernels
//!
//! This module provides runtime CPU feature detection. Each operation has its
//! own submodule with a portable implementation plus architecture kernels.
//!
//! # Module Structure
//!
//! ```text
//! simd/
//! ├── mod.rs              # This file: detection only
//! └── compare/
//!     ├── mod.rs          # Lane abstraction, sweeps, dispatch
//!     ├── avx2.rs         # x86-64
//!     └── aarch64/
//!         ├── mod.rs
//!         └── neon.rs
//! ```
//!
//! # Architecture Support
//!
//! | Architecture | Instruction Set | Vector Width | Status    |
//! |--------------|-----------------|--------------|-----------|
//! | x86-64       | AVX2            | 256 bits     | Supported |
//! | ARM64        | NEON            | 128 bits     | Supported |
//! | Any          | Portable lanes  | N/A          | Fallback  |

pub mod compare;

use std::sync::OnceLock;

/// SIMD capability level detected at runtime
///
/// All variants exist on every platform; only the ones matching the target
/// architecture are ever returned by [`detect_simd`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdLevel {
    /// AVX2 (256-bit vectors, 8 f32s or 4 f64s)
    Avx2 = 2,
    /// NEON baseline for AArch64 (128-bit vectors, 4 f32s or 2 f64s)
    Neon = 1,
    /// No architecture kernels
    Scalar = 0,
}

impl SimdLevel {
    /// Returns the name of this SIMD level as a string
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avx2 => "AVX2",
            Self::Neon => "NEON",
            Self::Scalar => "Scalar",
        }
    }
}

impl std::fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached SIMD level detection
static SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

/// Detect the best available SIMD level for the current CPU
///
/// The first call performs detection; later calls return the cached result.
/// Without the `simd` feature this is always [`SimdLevel::Scalar`].
#[inline]
pub fn detect_simd() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(|| {
        let level = detect_simd_uncached();
        tracing::debug!(%level, "detected SIMD level");
        level
    })
}

/// Perform actual CPU feature detection (called once)
#[cold]
fn detect_simd_uncached() -> SimdLevel {
    if !cfg!(feature = "simd") {
        return SimdLevel::Scalar;
    }

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return SimdLevel::Avx2;
        }
    }

    // NEON is mandatory on AArch64
    if cfg!(target_arch = "aarch64") {
        return SimdLevel::Neon;
    }

    SimdLevel::Scalar
}
