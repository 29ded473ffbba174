//! Type-promoting less-than-or-equal kernels
//!
//! The generic path: any dtype combination, any strides, any output dtype.
//! Both operands are converted to the promoted compute type before comparing,
//! and the result is written with the output type's `from_bool`.

use crate::dispatch_dtype;
use crate::dtype::{DType, Element, Scalar, promote};
use crate::error::{Error, Result};
use crate::ops::{DTypeVisitor, visit_dtype};
use crate::tensor::{StridedOffsets, Tensor};
use std::marker::PhantomData;

/// Reads the element at an offset of a storage base and converts it to `C`
type Load<C> = unsafe fn(*const u8, isize) -> C;

/// Writes a comparison result at an index of a storage base
type Store = unsafe fn(*mut u8, usize, bool);

unsafe fn load_as<S: Element, C: Element>(base: *const u8, offset: isize) -> C {
    unsafe { (*(base as *const S).offset(offset)).cast::<C>() }
}

unsafe fn store_bool<O: Element>(base: *mut u8, index: usize, value: bool) {
    unsafe { *(base as *mut O).add(index) = O::from_bool(value) }
}

/// Builds the [`Load`] for a source dtype
struct Loader<C>(PhantomData<C>);

impl<C: Element> DTypeVisitor for Loader<C> {
    type Output = Load<C>;

    fn visit<S: Element>(self) -> Load<C> {
        load_as::<S, C>
    }
}

/// Builds the [`Store`] for an output dtype
struct BoolStore;

impl DTypeVisitor for BoolStore {
    type Output = Store;

    fn visit<O: Element>(self) -> Store {
        store_bool::<O>
    }
}

fn loader<C: Element>(src: DType) -> Result<Load<C>> {
    visit_dtype(src, Loader(PhantomData))
}

fn bool_store(dst: DType) -> Result<Store> {
    visit_dtype(dst, BoolStore)
}

/// `out = a <= b` with broadcasting, strided operands and promotion
///
/// `out` must be contiguous with the broadcast shape of `a` and `b`.
pub fn le_promoting_strided(a: &Tensor, b: &Tensor, out: &mut Tensor) -> Result<()> {
    if !out.is_contiguous() {
        return Err(Error::NotContiguous);
    }
    let shape = out.shape().to_vec();
    let a_layout = a
        .layout()
        .broadcast_to(&shape)
        .ok_or_else(|| Error::broadcast(a.shape(), &shape))?;
    let b_layout = b
        .layout()
        .broadcast_to(&shape)
        .ok_or_else(|| Error::broadcast(b.shape(), &shape))?;

    let compute = promote(a.dtype(), b.dtype());
    dispatch_dtype!(compute, C => {
        let load_a = loader::<C>(a.dtype())?;
        let load_b = loader::<C>(b.dtype())?;
        let store = bool_store(out.dtype())?;

        let a_base = a.storage_ptr();
        let b_base = b.storage_ptr();
        let out_base = out.storage_mut_ptr();

        let offsets = StridedOffsets::new(&a_layout).zip(StridedOffsets::new(&b_layout));
        for (i, (a_off, b_off)) in offsets.enumerate() {
            // SAFETY: the loaders match each operand's dtype, the broadcast layouts
            // only produce offsets inside the operands' storage, and `out` holds
            // `shape.product()` elements of its dtype.
            unsafe { store(out_base, i, load_a(a_base, a_off) <= load_b(b_base, b_off)) };
        }
        Ok(())
    })
}

/// `out = a <= b` for a scalar `b`, promoting both sides
///
/// The compute type is `promote(a.dtype(), b.dtype())`. With a scalar tag of
/// `Bool`, `I64`, `U64` or `F64` that is always `a`'s own type or one of those
/// three, so only four compute types are instantiated per `(a, out)` pair.
///
/// `out` must be contiguous with `a`'s shape.
pub fn le_scalar_promoting(a: &Tensor, b: Scalar, out: &mut Tensor) -> Result<()> {
    let compute = promote(a.dtype(), b.dtype());

    dispatch_dtype!(a.dtype(), A => {
        dispatch_dtype!(out.dtype(), O => {
            match compute {
                c if c == A::DTYPE => le_scalar_typed::<A, A, O>(a, b, out),
                DType::I64 => le_scalar_typed::<A, i64, O>(a, b, out),
                DType::U64 => le_scalar_typed::<A, u64, O>(a, b, out),
                DType::F64 => le_scalar_typed::<A, f64, O>(a, b, out),
                other => Err(Error::Internal(format!(
                    "unexpected compute type {other} for {} <= {}",
                    a.dtype(),
                    b.dtype()
                ))),
            }
        })
    })
}

/// Scalar loop with input type `A`, compute type `C` and output type `O`
fn le_scalar_typed<A: Element, C: Element, O: Element>(
    a: &Tensor,
    b: Scalar,
    out: &mut Tensor,
) -> Result<()> {
    let rhs = b.to_element::<C>();
    let src = a.storage().as_slice::<A>()?;
    let dst = out.as_mut_slice::<O>()?;

    if a.is_contiguous() {
        for (o, &x) in dst.iter_mut().zip(src) {
            *o = O::from_bool(x.cast::<C>() <= rhs);
        }
    } else {
        for (o, offset) in dst.iter_mut().zip(StridedOffsets::new(a.layout())) {
            *o = O::from_bool(src[offset as usize].cast::<C>() <= rhs);
        }
    }
    Ok(())
}
