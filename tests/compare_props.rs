//! Property tests for `le`
//!
//! The vectorized and promoting paths must agree for every broadcastable
//! shape pair, and the vector kernels must not depend on lane width or on how
//! the input is chunked.

mod common;

use common::{assert_paths_agree, reference_le, tensor};
use elemcmp::dtype::{DType, Element, Scalar, promote};
use elemcmp::ops::compare_le;
use elemcmp::runtime::cpu::kernels::le_scalar_promoting;
use elemcmp::runtime::cpu::kernels::simd::compare::{LeInput, le, le_lanes};
use elemcmp::tensor::{Tensor, broadcast_shapes};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// A shape of rank 1..=4 and a second shape derived from it so the pair
/// always broadcasts: each trailing dim is kept, set to 1, or dropped.
fn broadcastable_pair() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    prop::collection::vec(1usize..5, 1..=4).prop_flat_map(|big| {
        let rank = big.len();
        (
            Just(big),
            prop::collection::vec(prop::bool::ANY, rank),
            0..=rank,
            any::<bool>(),
        )
            .prop_map(|(big, ones, drop, swap)| {
                let small: Vec<usize> = big
                    .iter()
                    .zip(&ones)
                    .skip(drop)
                    .map(|(&d, &one)| if one { 1 } else { d })
                    .collect();
                if swap { (small, big) } else { (big, small) }
            })
    })
}

fn any_dtype() -> impl Strategy<Value = DType> {
    prop_oneof![
        Just(DType::F64),
        Just(DType::F32),
        Just(DType::I64),
        Just(DType::I32),
        Just(DType::I16),
        Just(DType::I8),
        Just(DType::U64),
        Just(DType::U32),
        Just(DType::U16),
        Just(DType::U8),
        Just(DType::Bool),
    ]
}

fn small_values(n: usize) -> impl Strategy<Value = Vec<i8>> {
    prop::collection::vec(-4i8..4, n)
}

/// Tensor of `dtype` holding `values` converted with `as` semantics
fn typed(values: &[i8], shape: &[usize], dtype: DType) -> Tensor {
    macro_rules! build {
        ($t:ty) => {
            tensor(
                &values
                    .iter()
                    .map(|&v| Scalar::Int(v as i64).to_element::<$t>())
                    .collect::<Vec<$t>>(),
                shape,
            )
        };
    }
    match dtype {
        DType::F64 => build!(f64),
        DType::F32 => build!(f32),
        DType::I64 => build!(i64),
        DType::I32 => build!(i32),
        DType::I16 => build!(i16),
        DType::I8 => build!(i8),
        DType::U64 => build!(u64),
        DType::U32 => build!(u32),
        DType::U16 => build!(u16),
        DType::U8 => build!(u8),
        DType::Bool => build!(bool),
        other => panic!("no test builder for {other}"),
    }
}

fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

fn lane_value() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => -50.0f32..50.0,
        1 => Just(f32::NAN),
        1 => Just(0.0f32),
    ]
}

fn width_case() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (0usize..200).prop_flat_map(|n| {
        (
            prop::collection::vec(lane_value(), n),
            prop::collection::vec(lane_value(), n),
        )
    })
}

fn as_bits(values: &[f32]) -> Vec<u32> {
    values.iter().map(|v| v.to_bits()).collect()
}

// ============================================================================
// Path equivalence
// ============================================================================

proptest! {
    #[test]
    fn prop_paths_agree_same_dtype(
        ((sa, sb), dtype) in (broadcastable_pair(), any_dtype()),
        seed in small_values(512),
    ) {
        let a = typed(&seed[..numel(&sa)], &sa, dtype);
        let b = typed(&seed[numel(&sa)..numel(&sa) + numel(&sb)], &sb, dtype);
        match dtype {
            DType::F64 => assert_paths_agree::<f64>(&a, &b, "f64"),
            DType::F32 => assert_paths_agree::<f32>(&a, &b, "f32"),
            DType::I64 => assert_paths_agree::<i64>(&a, &b, "i64"),
            DType::I32 => assert_paths_agree::<i32>(&a, &b, "i32"),
            DType::I16 => assert_paths_agree::<i16>(&a, &b, "i16"),
            DType::I8 => assert_paths_agree::<i8>(&a, &b, "i8"),
            DType::U64 => assert_paths_agree::<u64>(&a, &b, "u64"),
            DType::U32 => assert_paths_agree::<u32>(&a, &b, "u32"),
            DType::U16 => assert_paths_agree::<u16>(&a, &b, "u16"),
            DType::U8 => assert_paths_agree::<u8>(&a, &b, "u8"),
            _ => assert_paths_agree::<bool>(&a, &b, "bool"),
        }
    }

    #[test]
    fn prop_output_shape_is_broadcast_shape(
        ((sa, sb), da, db) in (broadcastable_pair(), any_dtype(), any_dtype()),
    ) {
        let a = Tensor::zeros(&sa, da);
        let b = Tensor::zeros(&sb, db);
        let mut out = Tensor::zeros(&[0], DType::Bool);
        compare_le(&a, &b, &mut out).unwrap();
        let expected = broadcast_shapes(&sa, &sb).unwrap();
        prop_assert_eq!(out.shape(), expected.as_slice());
        // Equal zeros compare true in every promoted type
        prop_assert!(out.to_vec::<bool>().unwrap().iter().all(|&v| v));
    }

    #[test]
    fn prop_mixed_dtypes_match_promoted_reference(
        (sa, da, db) in (prop::collection::vec(1usize..5, 1..=3), any_dtype(), any_dtype()),
        seed in small_values(128),
    ) {
        let n = numel(&sa);
        let a = typed(&seed[..n], &sa, da);
        let b = typed(&seed[n..2 * n], &sa, db);

        let mut out = Tensor::zeros(&[0], DType::Bool);
        compare_le(&a, &b, &mut out).unwrap();

        let c = promote(da, db);
        let ca = a.to_vec_as(c);
        let cb = b.to_vec_as(c);
        let expected: Vec<bool> = ca.iter().zip(&cb).map(|(x, y)| x <= y).collect();
        prop_assert_eq!(out.to_vec::<bool>().unwrap(), expected);
    }

    #[test]
    fn prop_promote_commutes(a in any_dtype(), b in any_dtype()) {
        prop_assert_eq!(promote(a, b), promote(b, a));
        let c = promote(a, b);
        prop_assert_eq!(promote(c, a), c);
        prop_assert_eq!(promote(c, b), c);
    }

    #[test]
    fn prop_scalar_paths_agree(
        (shape, dtype) in (prop::collection::vec(1usize..6, 0..=3), any_dtype()),
        seed in small_values(216),
        rhs in -5i64..5,
    ) {
        let a = typed(&seed[..numel(&shape)], &shape, dtype);
        let scalar = match dtype {
            DType::F64 | DType::F32 => Scalar::Float(rhs as f64 + 0.5),
            DType::U64 | DType::U32 | DType::U16 | DType::U8 => Scalar::UInt(rhs.unsigned_abs()),
            DType::Bool => Scalar::Bool(rhs > 0),
            _ => Scalar::Int(rhs),
        };

        let mut fast = Tensor::zeros(&[0], promote(dtype, scalar.dtype()));
        compare_le(&a, scalar, &mut fast).unwrap();

        let mut slow = Tensor::zeros(&shape, fast.dtype());
        le_scalar_promoting(&a, scalar, &mut slow).unwrap();

        let mut bools = Tensor::zeros(&[0], DType::Bool);
        compare_le(&a, scalar, &mut bools).unwrap();
        let expected: Vec<bool> = fast
            .to_vec_as(DType::Bool)
            .into_iter()
            .map(|v| v == Cmp::Bool(true))
            .collect();

        prop_assert_eq!(fast.to_vec_as(fast.dtype()), slow.to_vec_as(slow.dtype()));
        prop_assert_eq!(bools.to_vec::<bool>().unwrap(), expected);
    }
}

// ============================================================================
// Lane width independence
// ============================================================================

proptest! {
    #[test]
    fn prop_lane_width_independent((a, b) in width_case()) {
        let n = a.len();
        let expected = reference_le(&a, &b);

        let mut out = vec![0.0f32; n];
        le(LeInput::Vector(&a), LeInput::Vector(&b), &mut out);
        prop_assert_eq!(as_bits(&out), as_bits(&expected));

        macro_rules! check_width {
            ($($n:literal),+) => {$(
                let mut out = vec![0.0f32; n];
                le_lanes::<f32, $n>(LeInput::Vector(&a), LeInput::Vector(&b), &mut out);
                prop_assert_eq!(as_bits(&out), as_bits(&expected), "width {}", $n);
            )+};
        }
        check_width!(1, 4, 8, 16, 32);
    }

    #[test]
    fn prop_chunking_independent(
        (a, b) in width_case(),
        cuts in prop::collection::vec(0usize..200, 0..6),
    ) {
        let n = a.len();
        let expected = reference_le(&a, &b);

        let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c.min(n)).collect();
        cuts.push(0);
        cuts.push(n);
        cuts.sort_unstable();
        cuts.dedup();

        let mut out = vec![0.0f32; n];
        for w in cuts.windows(2) {
            let (lo, hi) = (w[0], w[1]);
            le(
                LeInput::Vector(&a[lo..hi]),
                LeInput::Vector(&b[lo..hi]),
                &mut out[lo..hi],
            );
        }
        prop_assert_eq!(as_bits(&out), as_bits(&expected));
    }

    #[test]
    fn prop_splat_matches_vector((a, _) in width_case(), s in -50.0f32..50.0) {
        let n = a.len();
        let rep = vec![s; n];

        let mut splat = vec![0.0f32; n];
        let mut vector = vec![0.0f32; n];
        le(LeInput::Vector(&a), LeInput::Splat(s), &mut splat);
        le(LeInput::Vector(&a), LeInput::Vector(&rep), &mut vector);
        prop_assert_eq!(as_bits(&splat), as_bits(&vector));

        le(LeInput::Splat(s), LeInput::Vector(&a), &mut splat);
        le(LeInput::Vector(&rep), LeInput::Vector(&a), &mut vector);
        prop_assert_eq!(as_bits(&splat), as_bits(&vector));
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Promoted element, comparable across dtypes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Cmp {
    Float(f64),
    Int(i64),
    UInt(u64),
    Bool(bool),
}

trait ToVecAs {
    /// Read every element, converted to `dtype` with `as` semantics
    fn to_vec_as(&self, dtype: DType) -> Vec<Cmp>;
}

impl ToVecAs for Tensor {
    fn to_vec_as(&self, dtype: DType) -> Vec<Cmp> {
        macro_rules! read {
            ($t:ty) => {
                self.to_vec::<$t>()
                    .unwrap()
                    .into_iter()
                    .map(|v| convert(v.to_scalar(), dtype))
                    .collect()
            };
        }
        match self.dtype() {
            DType::F64 => read!(f64),
            DType::F32 => read!(f32),
            DType::I64 => read!(i64),
            DType::I32 => read!(i32),
            DType::I16 => read!(i16),
            DType::I8 => read!(i8),
            DType::U64 => read!(u64),
            DType::U32 => read!(u32),
            DType::U16 => read!(u16),
            DType::U8 => read!(u8),
            DType::Bool => read!(bool),
            other => panic!("no test reader for {other}"),
        }
    }
}

fn convert(value: Scalar, dtype: DType) -> Cmp {
    match dtype {
        DType::F64 => Cmp::Float(value.to_element::<f64>()),
        DType::F32 => Cmp::Float(value.to_element::<f32>() as f64),
        DType::I64 => Cmp::Int(value.to_element::<i64>()),
        DType::I32 => Cmp::Int(value.to_element::<i32>() as i64),
        DType::I16 => Cmp::Int(value.to_element::<i16>() as i64),
        DType::I8 => Cmp::Int(value.to_element::<i8>() as i64),
        DType::U64 => Cmp::UInt(value.to_element::<u64>()),
        DType::U32 => Cmp::UInt(value.to_element::<u32>() as u64),
        DType::U16 => Cmp::UInt(value.to_element::<u16>() as u64),
        DType::U8 => Cmp::UInt(value.to_element::<u8>() as u64),
        DType::Bool => Cmp::Bool(value.to_element::<bool>()),
        other => panic!("no test conversion to {other}"),
    }
}
