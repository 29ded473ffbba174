//! SIMD-accelerated less-than-or-equal
//!
//! # SIMD Approach
//!
//! - [`LeVector`] abstracts one vector register of `T`: load, splat, compare,
//!   store. The comparison yields `T::one()` in lanes where `x <= y` holds and
//!   `T::zero()` elsewhere, matching the scalar loop.
//! - One generic sweep per operand pairing (vector/vector, vector/splat,
//!   splat/vector) runs whole registers and finishes with a scalar tail.
//! - [`Lanes`] is the portable register used for every element type. AVX2 and
//!   NEON registers for `f32`/`f64` are picked at runtime when the `simd`
//!   feature is on and the run is at least [`SIMD_THRESHOLD`] long.
//!
//! Every implementation uses the element type's native ordering, so a NaN on
//! either side compares false.

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod avx2;

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod aarch64;

use crate::dtype::Element;

/// Minimum length to justify architecture kernels
pub const SIMD_THRESHOLD: usize = 32;

/// Register width, in elements, of the portable path
pub const PORTABLE_LANES: usize = 8;

/// One vector register of `T`
///
/// # Safety
///
/// All methods require the CPU to support the instruction set the
/// implementing type is built on. Pointers passed to `load` and `store` must
/// be valid for `LANES` consecutive elements.
pub trait LeVector<T: Element>: Copy {
    /// Elements per register
    const LANES: usize;

    /// Load `LANES` elements starting at `ptr`
    unsafe fn load(ptr: *const T) -> Self;

    /// Broadcast one value to every lane
    unsafe fn splat(value: T) -> Self;

    /// Lane-wise `self <= rhs`, as `T::one()` / `T::zero()`
    unsafe fn le(self, rhs: Self) -> Self;

    /// Store `LANES` elements starting at `ptr`
    unsafe fn store(self, ptr: *mut T);
}

/// Portable register of `N` elements
///
/// `N` must be at least 1.
#[derive(Copy, Clone, Debug)]
pub struct Lanes<T, const N: usize>(pub [T; N]);

impl<T: Element, const N: usize> LeVector<T> for Lanes<T, N> {
    const LANES: usize = {
        assert!(N > 0, "Lanes needs at least one lane");
        N
    };

    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        Self(unsafe { ptr.cast::<[T; N]>().read() })
    }

    #[inline(always)]
    unsafe fn splat(value: T) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    unsafe fn le(self, rhs: Self) -> Self {
        let mut out = [T::zero(); N];
        for ((o, &x), &y) in out.iter_mut().zip(self.0.iter()).zip(rhs.0.iter()) {
            *o = T::from_bool(x <= y);
        }
        Self(out)
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut T) {
        unsafe { ptr.cast::<[T; N]>().write(self.0) }
    }
}

/// One side of a comparison run
#[derive(Copy, Clone, Debug)]
pub enum LeInput<'a, T> {
    /// Element-wise operand, as long as the output
    Vector(&'a [T]),
    /// A single value compared against every position
    Splat(T),
}

/// Raw form of [`LeInput`] used inside the sweeps
#[derive(Copy, Clone)]
enum Source<T> {
    Ptr(*const T),
    Splat(T),
}

impl<T: Element> Source<T> {
    fn from_input(input: LeInput<'_, T>, len: usize) -> Self {
        match input {
            LeInput::Vector(data) => {
                assert_eq!(data.len(), len, "operand length must match output length");
                Self::Ptr(data.as_ptr())
            }
            LeInput::Splat(value) => Self::Splat(value),
        }
    }

    #[inline(always)]
    unsafe fn element(self, i: usize) -> T {
        match self {
            Self::Ptr(p) => unsafe { *p.add(i) },
            Self::Splat(v) => v,
        }
    }

    /// Reinterpret as the element type with the same dtype
    #[cfg(feature = "simd")]
    #[inline]
    fn retag<U: Element>(self) -> Source<U> {
        debug_assert_eq!(T::DTYPE, U::DTYPE);
        match self {
            Self::Ptr(p) => Source::Ptr(p as *const U),
            Self::Splat(v) => Source::Splat(v.cast::<U>()),
        }
    }
}

/// Compute `out[i] = lhs[i] <= rhs[i]` as `T::one()` / `T::zero()`
///
/// Uses the best register available for `T` on this CPU.
///
/// # Panics
///
/// Panics if a [`LeInput::Vector`] operand is not as long as `out`.
pub fn le<T: Element>(lhs: LeInput<'_, T>, rhs: LeInput<'_, T>, out: &mut [T]) {
    let len = out.len();
    let lhs = Source::from_input(lhs, len);
    let rhs = Source::from_input(rhs, len);
    let out = out.as_mut_ptr();

    #[cfg(feature = "simd")]
    if len >= SIMD_THRESHOLD {
        // SAFETY: operands were checked against `len` above
        if unsafe { le_arch(super::detect_simd(), lhs, rhs, out, len) } {
            return;
        }
    }

    // SAFETY: operands were checked against `len` above
    unsafe { sweep::<T, Lanes<T, PORTABLE_LANES>>(lhs, rhs, out, len) }
}

/// [`le`] on the portable path with `N` lanes per register
///
/// # Panics
///
/// Panics if a [`LeInput::Vector`] operand is not as long as `out`.
pub fn le_lanes<T: Element, const N: usize>(
    lhs: LeInput<'_, T>,
    rhs: LeInput<'_, T>,
    out: &mut [T],
) {
    let len = out.len();
    let lhs = Source::from_input(lhs, len);
    let rhs = Source::from_input(rhs, len);
    // SAFETY: operands were checked against `len` above; `Lanes` is plain Rust
    unsafe { sweep::<T, Lanes<T, N>>(lhs, rhs, out.as_mut_ptr(), len) }
}

/// Route to an architecture kernel; returns false if none covers `T`
#[cfg(feature = "simd")]
#[inline]
unsafe fn le_arch<T: Element>(
    level: super::SimdLevel,
    lhs: Source<T>,
    rhs: Source<T>,
    out: *mut T,
    len: usize,
) -> bool {
    use crate::dtype::DType;

    #[cfg(target_arch = "x86_64")]
    if level == super::SimdLevel::Avx2 {
        match T::DTYPE {
            DType::F32 => {
                unsafe { avx2::le_f32(lhs.retag(), rhs.retag(), out as *mut f32, len) };
                return true;
            }
            DType::F64 => {
                unsafe { avx2::le_f64(lhs.retag(), rhs.retag(), out as *mut f64, len) };
                return true;
            }
            _ => {}
        }
    }

    #[cfg(target_arch = "aarch64")]
    if level == super::SimdLevel::Neon {
        match T::DTYPE {
            DType::F32 => {
                unsafe { aarch64::neon::le_f32(lhs.retag(), rhs.retag(), out as *mut f32, len) };
                return true;
            }
            DType::F64 => {
                unsafe { aarch64::neon::le_f64(lhs.retag(), rhs.retag(), out as *mut f64, len) };
                return true;
            }
            _ => {}
        }
    }

    let _ = (level, lhs, rhs, out, len);
    false
}

/// Generic sweep: whole registers, then a scalar tail
///
/// # Safety
/// - `Ptr` sources and `out` must be valid for `len` elements
/// - The CPU must support `V`'s instruction set
#[inline(always)]
unsafe fn sweep<T: Element, V: LeVector<T>>(lhs: Source<T>, rhs: Source<T>, out: *mut T, len: usize) {
    let chunks = len / V::LANES;

    unsafe {
        match (lhs, rhs) {
            (Source::Ptr(a), Source::Ptr(b)) => {
                for c in 0..chunks {
                    let offset = c * V::LANES;
                    let va = V::load(a.add(offset));
                    let vb = V::load(b.add(offset));
                    va.le(vb).store(out.add(offset));
                }
            }
            (Source::Ptr(a), Source::Splat(b)) => {
                let vb = V::splat(b);
                for c in 0..chunks {
                    let offset = c * V::LANES;
                    V::load(a.add(offset)).le(vb).store(out.add(offset));
                }
            }
            (Source::Splat(a), Source::Ptr(b)) => {
                let va = V::splat(a);
                for c in 0..chunks {
                    let offset = c * V::LANES;
                    va.le(V::load(b.add(offset))).store(out.add(offset));
                }
            }
            (Source::Splat(a), Source::Splat(b)) => {
                let value = T::from_bool(a <= b);
                for i in 0..len {
                    *out.add(i) = value;
                }
                return;
            }
        }

        // Scalar tail
        for i in chunks * V::LANES..len {
            *out.add(i) = T::from_bool(lhs.element(i) <= rhs.element(i));
        }
    }
}
