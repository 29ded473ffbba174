//! Common test utilities
#![allow(dead_code)]

use elemcmp::dtype::{DType, Element};
use elemcmp::ops::compare_le;
use elemcmp::runtime::cpu::kernels::le_promoting_strided;
use elemcmp::tensor::Tensor;

/// Build a contiguous tensor, panicking on a shape mismatch
pub fn tensor<T: Element>(data: &[T], shape: &[usize]) -> Tensor {
    Tensor::from_slice(data, shape).unwrap()
}

/// Empty, growable output of the given dtype
pub fn out_of(dtype: DType) -> Tensor {
    Tensor::zeros(&[0], dtype)
}

/// Run `compare_le` into a fresh `Bool` output and return its data
pub fn le_bools(a: &Tensor, b: &Tensor) -> Vec<bool> {
    let mut out = out_of(DType::Bool);
    compare_le(a, b, &mut out).unwrap();
    out.to_vec::<bool>().unwrap()
}

/// Assert that the public entry point and the promoting kernel agree
///
/// The output dtype is `T`, so when `a` and `b` are `T` as well the public
/// entry point takes a vectorized path whenever one applies.
pub fn assert_paths_agree<T: Element>(a: &Tensor, b: &Tensor, msg: &str) {
    let mut fast = out_of(T::DTYPE);
    compare_le(a, b, &mut fast).unwrap();

    let mut slow = Tensor::zeros(fast.shape(), T::DTYPE);
    le_promoting_strided(a, b, &mut slow).unwrap();

    assert_eq!(
        fast.to_vec::<T>().unwrap(),
        slow.to_vec::<T>().unwrap(),
        "{msg}: vectorized and promoting results differ"
    );
}

/// Reference `le` for same-shape slices, as `T::one()` / `T::zero()`
pub fn reference_le<T: Element>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| T::from_bool(x <= y))
        .collect()
}
