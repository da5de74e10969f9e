//! 后端一致性测试
//!
//! 每个为当前目标编译的存储后端都与通用数组后端逐项比较：
//! 算术精确一致，比较遵循IEEE-754，点积在重结合误差内一致。

use lanemath_simd::backend::scalar::ArrayStorage;
use lanemath_simd::{Element, LaneStorage, Lanes};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn finite_f32() -> impl Strategy<Value = f32> {
    (-1.0e6f32..1.0e6).prop_filter("must be finite", |x| x.is_finite())
}

fn finite_f64() -> impl Strategy<Value = f64> {
    (-1.0e12f64..1.0e12).prop_filter("must be finite", |x| x.is_finite())
}

fn non_zero_f32() -> impl Strategy<Value = f32> {
    finite_f32().prop_filter("must be non-zero", |x| x.abs() > 1.0e-3)
}

fn non_zero_f64() -> impl Strategy<Value = f64> {
    finite_f64().prop_filter("must be non-zero", |x| x.abs() > 1.0e-3)
}

fn bits_equal<T: Element>(a: [T; 4], b: [T; 4]) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| x.to_f64().to_bits() == y.to_f64().to_bits())
}

/// 点积的重结合容差：按乘积绝对值之和缩放
fn dot_tolerance<T: Element>(a: [T; 4], b: [T; 4], lanes: usize) -> f64 {
    let magnitude: f64 = (0..lanes).map(|i| (a[i].to_f64() * b[i].to_f64()).abs()).sum();
    magnitude * T::EPSILON.to_f64() * 4.0 + f64::MIN_POSITIVE
}

macro_rules! backend_properties {
    ($module:ident, $elem:ty, $storage:ty, $finite:ident, $non_zero:ident) => {
        mod $module {
            use super::*;

            type V = Lanes<$elem, $storage>;
            type Reference = Lanes<$elem, ArrayStorage<$elem>>;

            proptest! {
                #[test]
                fn add_is_exact(a in prop::array::uniform4($finite()), b in prop::array::uniform4($finite())) {
                    let sum = (V::from_array(a) + V::from_array(b)).to_array();
                    let expected = [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]];
                    prop_assert!(bits_equal(sum, expected));
                }

                #[test]
                fn arithmetic_matches_reference(
                    a in prop::array::uniform4($finite()),
                    b in prop::array::uniform4($non_zero()),
                ) {
                    let (va, vb) = (V::from_array(a), V::from_array(b));
                    let (ra, rb) = (Reference::from_array(a), Reference::from_array(b));
                    prop_assert!(bits_equal((va - vb).to_array(), (ra - rb).to_array()));
                    prop_assert!(bits_equal((va * vb).to_array(), (ra * rb).to_array()));
                    prop_assert!(bits_equal((va / vb).to_array(), (ra / rb).to_array()));
                    prop_assert!(bits_equal(va.min(vb).to_array(), ra.min(rb).to_array()));
                    prop_assert!(bits_equal(va.max(vb).to_array(), ra.max(rb).to_array()));
                    prop_assert!(bits_equal(va.abs().to_array(), ra.abs().to_array()));
                }

                #[test]
                fn negation_is_involution(a in prop::array::uniform4($finite())) {
                    let v = V::from_array(a);
                    prop_assert!(bits_equal((-(-v)).to_array(), a));
                    prop_assert_eq!(-(-v), v);
                }

                #[test]
                fn shuffle_identity(a in prop::array::uniform4($finite())) {
                    let v = V::from_array(a);
                    prop_assert_eq!(v.shuffle::<0, 1, 2, 3>(), v);
                    prop_assert_eq!(v.shuffle::<3, 2, 1, 0>().to_array(), [a[3], a[2], a[1], a[0]]);
                }

                #[test]
                fn shuffle_matches_reference(a in prop::array::uniform4($finite())) {
                    let (v, r) = (V::from_array(a), Reference::from_array(a));
                    prop_assert_eq!(v.shuffle::<3, 0, 2, 1>().to_array(), r.shuffle::<3, 0, 2, 1>().to_array());
                    prop_assert_eq!(v.shuffle::<0, 3, 1, 2>().to_array(), r.shuffle::<0, 3, 1, 2>().to_array());
                    prop_assert_eq!(v.shuffle::<2, 2, 1, 1>().to_array(), r.shuffle::<2, 2, 1, 1>().to_array());
                    prop_assert_eq!(v.shuffle::<1, 3, 0, 2>().to_array(), r.shuffle::<1, 3, 0, 2>().to_array());
                }

                #[test]
                fn round_trip_is_bit_exact(a in prop::array::uniform4($finite())) {
                    let v = V::new(a[0], a[1], a[2], a[3]);
                    prop_assert!(bits_equal([v.x(), v.y(), v.z(), v.w()], a));
                    prop_assert!(bits_equal([v[0], v[1], v[2], v[3]], a));
                }

                #[test]
                fn comparisons_match_reference(
                    a in prop::array::uniform4($finite()),
                    b in prop::array::uniform4($finite()),
                ) {
                    let (va, vb) = (V::from_array(a), V::from_array(b));
                    let (ra, rb) = (Reference::from_array(a), Reference::from_array(b));
                    prop_assert_eq!(va.cmp_eq(vb).to_array(), ra.cmp_eq(rb).to_array());
                    prop_assert_eq!(va.cmp_ne(vb).to_array(), ra.cmp_ne(rb).to_array());
                    prop_assert_eq!(va.cmp_lt(vb).to_array(), ra.cmp_lt(rb).to_array());
                    prop_assert_eq!(va.cmp_le(vb).to_array(), ra.cmp_le(rb).to_array());
                    prop_assert_eq!(va.cmp_gt(vb).to_array(), ra.cmp_gt(rb).to_array());
                    prop_assert_eq!(va.cmp_ge(vb).to_array(), ra.cmp_ge(rb).to_array());
                }

                #[test]
                fn nan_lane_is_never_equal(a in prop::array::uniform4($finite()), lane in 0usize..4) {
                    let mut values = a;
                    values[lane] = <$elem>::NAN;
                    let v = V::from_array(values);
                    let eq = v.cmp_eq(v);
                    let ne = v.cmp_ne(v);
                    for i in 0..4 {
                        prop_assert_eq!(eq[i], i != lane);
                        prop_assert_eq!(ne[i], i == lane);
                    }
                    prop_assert!(v != v);
                }

                #[test]
                fn dot_agrees_with_reference(
                    a in prop::array::uniform4($finite()),
                    b in prop::array::uniform4($finite()),
                ) {
                    let (va, vb) = (V::from_array(a), V::from_array(b));
                    let (ra, rb) = (Reference::from_array(a), Reference::from_array(b));

                    let d2 = (va.dot2(vb).to_f64() - ra.dot2(rb).to_f64()).abs();
                    let d3 = (va.dot3(vb).to_f64() - ra.dot3(rb).to_f64()).abs();
                    let d4 = (va.dot4(vb).to_f64() - ra.dot4(rb).to_f64()).abs();
                    prop_assert!(d2 <= dot_tolerance(a, b, 2));
                    prop_assert!(d3 <= dot_tolerance(a, b, 3));
                    prop_assert!(d4 <= dot_tolerance(a, b, 4));
                }

                #[test]
                fn select_matches_mask(
                    a in prop::array::uniform4($finite()),
                    b in prop::array::uniform4($finite()),
                ) {
                    let (va, vb) = (V::from_array(a), V::from_array(b));
                    let picked = V::select(va.cmp_lt(vb), va, vb).to_array();
                    for i in 0..4 {
                        let expected = if a[i] < b[i] { a[i] } else { b[i] };
                        prop_assert_eq!(picked[i], expected);
                    }
                }
            }

            #[test]
            fn dot3_sampled_accuracy() {
                let mut rng = StdRng::seed_from_u64(0x5eed_1a9e);
                for _ in 0..10_000 {
                    let x: $elem = rng.gen_range(-1000.0..1000.0);
                    let y: $elem = rng.gen_range(-1000.0..1000.0);
                    let z: $elem = rng.gen_range(-1000.0..1000.0);
                    let v = V::new(x, y, z, rng.gen_range(-1000.0..1000.0));

                    let expected = x * x + y * y + z * z;
                    let actual = v.dot3(v);
                    let relative = ((actual - expected) / expected.max(<$elem>::MIN_POSITIVE)).abs();
                    assert!(
                        relative <= 1.0e-6,
                        "dot3 of {:?}: expected {}, got {}",
                        v,
                        expected,
                        actual
                    );
                }
            }

            #[test]
            fn copy_to_and_from_slice() {
                let mut v = V::zero();
                let mut storage = *v.storage();
                storage.copy_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
                v = V::from_storage(storage);
                let mut out = [0.0 as $elem; 4];
                v.copy_to_slice(&mut out);
                assert_eq!(out, [1.0, 2.0, 3.0, 4.0]);
            }
        }
    };
}

backend_properties!(array_f32, f32, ArrayStorage<f32>, finite_f32, non_zero_f32);
backend_properties!(array_f64, f64, ArrayStorage<f64>, finite_f64, non_zero_f64);

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
backend_properties!(
    sse_f32,
    f32,
    lanemath_simd::backend::x86::SseF32x4,
    finite_f32,
    non_zero_f32
);

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
backend_properties!(
    sse_f64,
    f64,
    lanemath_simd::backend::x86::SseF64x4,
    finite_f64,
    non_zero_f64
);

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx"))]
backend_properties!(
    avx_f64,
    f64,
    lanemath_simd::backend::avx::AvxF64x4,
    finite_f64,
    non_zero_f64
);

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
backend_properties!(
    neon_f32,
    f32,
    lanemath_simd::backend::arm::NeonF32x4,
    finite_f32,
    non_zero_f32
);

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
backend_properties!(
    neon_f64,
    f64,
    lanemath_simd::backend::arm::NeonF64x4,
    finite_f64,
    non_zero_f64
);
