//! DType dispatch utilities
//!
//! Converts a runtime [`DType`] into a concrete [`Element`] type. Two forms are
//! provided:
//!
//! - `dispatch_dtype!`: a macro that runs a block with `T` bound to the type,
//!   used inside kernels where the body needs direct access to locals.
//! - [`DTypeVisitor`] / [`visit_dtype`]: a strategy interface for callers that
//!   want a generic instantiation per dtype without writing a macro body, such
//!   as the per-dtype load and store function pointers of the promoting kernel.
//!
//! # Usage
//!
//! ```ignore
//! fn my_operation(dtype: DType) -> Result<usize> {
//!     dispatch_dtype!(dtype, T => {
//!         // T is now a concrete type (f32, f64, i32, bool, etc.)
//!         Ok(std::mem::size_of::<T>())
//!     })
//! }
//! ```
//!
//! ## Supported Types
//!
//! - `F64` -> `f64`
//! - `F32` -> `f32`
//! - `F16` -> `half::f16` (requires "f16" feature)
//! - `BF16` -> `half::bf16` (requires "f16" feature)
//! - `I64`/`I32`/`I16`/`I8` -> `i64`/`i32`/`i16`/`i8`
//! - `U64`/`U32`/`U16`/`U8` -> `u64`/`u32`/`u16`/`u8`
//! - `Bool` -> `bool`
//!
//! Without the "f16" feature the half-precision arms return
//! `Error::FeatureRequired` from the enclosing function.

use crate::dtype::{DType, Element};
use crate::error::Result;

/// Internal helper macro for the half-precision arms (feature enabled)
#[cfg(feature = "f16")]
#[macro_export]
#[doc(hidden)]
macro_rules! dispatch_f16_type {
    ($T:ident, $body:block, $dtype:expr, $type:ty) => {{
        type $T = $type;
        $body
    }};
}

/// Internal helper macro for the half-precision arms (feature disabled)
#[cfg(not(feature = "f16"))]
#[macro_export]
#[doc(hidden)]
macro_rules! dispatch_f16_type {
    ($T:ident, $body:block, $dtype:expr, $type:ty) => {{
        return Err($crate::error::Error::FeatureRequired {
            dtype: $dtype,
            feature: "f16",
        });
    }};
}

/// Macro for runtime dtype dispatch to typed operations.
///
/// Takes a `DType` value and executes a code block with `T` bound to the
/// corresponding Rust type. Must be used inside a function returning
/// `crate::error::Result<_>`.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F16 => {
                $crate::dispatch_f16_type!($T, $body, $dtype, half::f16)
            }
            $crate::dtype::DType::BF16 => {
                $crate::dispatch_f16_type!($T, $body, $dtype, half::bf16)
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::U64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::U32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::U16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
            $crate::dtype::DType::Bool => {
                type $T = bool;
                $body
            }
        }
    };
}

/// Strategy invoked once with the concrete element type of a dtype
pub trait DTypeVisitor {
    /// Value produced by the visit
    type Output;

    /// Run the strategy for element type `T`
    fn visit<T: Element>(self) -> Self::Output;
}

/// Invoke `visitor` with the element type matching `dtype`
pub fn visit_dtype<V: DTypeVisitor>(dtype: DType, visitor: V) -> Result<V::Output> {
    dispatch_dtype!(dtype, T => {
        Ok(visitor.visit::<T>())
    })
}
