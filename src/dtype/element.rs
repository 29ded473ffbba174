//! Element trait for mapping Rust types to DType

use super::{DType, Scalar};
use bytemuck::Zeroable;
use std::fmt;

/// Trait for types that can be elements of a tensor
///
/// This trait connects Rust's type system to elemcmp's runtime dtype system.
/// It's implemented for all primitive numeric types and `bool`.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Zeroable` - A zero-filled buffer is a valid slice of this type, which is
///   what [`crate::tensor::Storage`] hands out
/// - `PartialOrd` - The native ordering used by `le` (IEEE for floats)
///
/// # Casting
///
/// Conversions go through the canonical [`Scalar`] value: signed integers widen
/// to `i64`, unsigned to `u64`, floats to `f64`. Every widening step is exact, so
/// `cast` produces the same value as a direct `as` cast between the two types.
pub trait Element:
    Copy + Clone + Send + Sync + Zeroable + PartialOrd + fmt::Debug + 'static
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Zero value (`false` for bool)
    fn zero() -> Self;

    /// One value (`true` for bool)
    fn one() -> Self;

    /// Widen to the canonical scalar of the same kind
    fn to_scalar(self) -> Scalar;

    /// Narrow a canonical scalar into this type with `as` semantics
    ///
    /// Float to integer saturates (NaN becomes 0), integer narrowing wraps, and
    /// anything to bool is `value != 0`.
    fn from_scalar(value: Scalar) -> Self;

    /// Encode a comparison result: `one()` for true, `zero()` for false
    #[inline]
    fn from_bool(value: bool) -> Self {
        if value { Self::one() } else { Self::zero() }
    }

    /// Convert to another element type
    #[inline]
    fn cast<U: Element>(self) -> U {
        U::from_scalar(self.to_scalar())
    }
}

macro_rules! impl_primitive_element {
    ($t:ty, $dtype:ident, $variant:ident, $wide:ty, $zero:expr, $one:expr) => {
        impl Element for $t {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn zero() -> Self {
                $zero
            }

            #[inline]
            fn one() -> Self {
                $one
            }

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::$variant(self as $wide)
            }

            #[inline]
            fn from_scalar(value: Scalar) -> Self {
                match value {
                    Scalar::Bool(v) => v as u8 as Self,
                    Scalar::Int(v) => v as Self,
                    Scalar::UInt(v) => v as Self,
                    Scalar::Float(v) => v as Self,
                }
            }
        }
    };
}

impl_primitive_element!(f64, F64, Float, f64, 0.0, 1.0);
impl_primitive_element!(f32, F32, Float, f64, 0.0, 1.0);
impl_primitive_element!(i64, I64, Int, i64, 0, 1);
impl_primitive_element!(i32, I32, Int, i64, 0, 1);
impl_primitive_element!(i16, I16, Int, i64, 0, 1);
impl_primitive_element!(i8, I8, Int, i64, 0, 1);
impl_primitive_element!(u64, U64, UInt, u64, 0, 1);
impl_primitive_element!(u32, U32, UInt, u64, 0, 1);
impl_primitive_element!(u16, U16, UInt, u64, 0, 1);
impl_primitive_element!(u8, U8, UInt, u64, 0, 1);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    #[inline]
    fn zero() -> Self {
        false
    }

    #[inline]
    fn one() -> Self {
        true
    }

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }

    #[inline]
    fn from_scalar(value: Scalar) -> Self {
        match value {
            Scalar::Bool(v) => v,
            Scalar::Int(v) => v != 0,
            Scalar::UInt(v) => v != 0,
            // NaN is truthy
            Scalar::Float(v) => v != 0.0,
        }
    }

    #[inline]
    fn from_bool(value: bool) -> Self {
        value
    }
}

#[cfg(feature = "f16")]
macro_rules! impl_half_element {
    ($t:ty, $dtype:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn zero() -> Self {
                <$t>::ZERO
            }

            #[inline]
            fn one() -> Self {
                <$t>::ONE
            }

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::Float(self.to_f64())
            }

            #[inline]
            fn from_scalar(value: Scalar) -> Self {
                match value {
                    Scalar::Bool(v) => {
                        if v {
                            <$t>::ONE
                        } else {
                            <$t>::ZERO
                        }
                    }
                    Scalar::Int(v) => <$t>::from_f64(v as f64),
                    Scalar::UInt(v) => <$t>::from_f64(v as f64),
                    Scalar::Float(v) => <$t>::from_f64(v),
                }
            }
        }
    };
}

#[cfg(feature = "f16")]
impl_half_element!(half::f16, F16);
#[cfg(feature = "f16")]
impl_half_element!(half::bf16, BF16);
