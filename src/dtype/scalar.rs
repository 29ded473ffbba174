//! Tagged scalar values

use super::{DType, Element};

/// A single numeric value carrying its own type tag
///
/// Used as the right-hand side of tensor-scalar operations and as the canonical
/// widened form for element casts. Rust literals convert via `From`, keeping
/// their kind: `2i32` becomes `Int(2)`, `2.0f32` becomes `Float(2.0)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Boolean value, tagged `DType::Bool`
    Bool(bool),
    /// Signed integer, tagged `DType::I64`
    Int(i64),
    /// Unsigned integer, tagged `DType::U64`
    UInt(u64),
    /// Floating point, tagged `DType::F64`
    Float(f64),
}

impl Scalar {
    /// The dtype this scalar participates in promotion as
    #[inline]
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::Int(_) => DType::I64,
            Self::UInt(_) => DType::U64,
            Self::Float(_) => DType::F64,
        }
    }

    /// Extract the value as element type `T` with `as` semantics
    #[inline]
    pub fn to_element<T: Element>(self) -> T {
        T::from_scalar(self)
    }
}

macro_rules! impl_scalar_from {
    ($variant:ident, $wide:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Scalar {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::$variant(value as $wide)
                }
            }
        )+
    };
}

impl_scalar_from!(Int, i64: i64, i32, i16, i8);
impl_scalar_from!(UInt, u64: u64, u32, u16, u8);
impl_scalar_from!(Float, f64: f64, f32);

impl From<bool> for Scalar {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
