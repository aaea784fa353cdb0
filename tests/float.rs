//! Float value vectors on every compiled backend, with the IEEE-754 corner
//! cases checked lane by lane.

use simdtier::simd::{Float32, SimdCompare};

macro_rules! float_tests {
    ($module:ident, $backend:ty) => {
        mod $module {
            use super::*;

            type F = Float32<$backend>;

            fn assert_all(v: F, expected: f32) {
                for (i, lane) in v.to_vec().into_iter().enumerate() {
                    assert_eq!(lane.to_bits(), expected.to_bits(), "lane {i} of {v}");
                }
            }

            fn one_hot(index: usize, value: f32) -> F {
                let mut v = F::default();
                v.insert(index, value).unwrap();
                v
            }

            #[test]
            fn test_default_is_positive_zero() {
                assert_all(F::default(), 0.0);
            }

            #[test]
            fn test_division_by_zero_is_infinite() {
                let zero = F::zero();
                assert_all(F::splat(1.0) / zero, f32::INFINITY);
                assert_all(F::splat(-1.0) / zero, f32::NEG_INFINITY);
                assert_all(F::splat(1.0) / -zero, f32::NEG_INFINITY);
            }

            #[test]
            fn test_indeterminate_forms_are_nan() {
                let zero = F::zero();
                let inf = F::splat(f32::INFINITY);
                for v in [zero / zero, inf / inf, inf - inf, zero * inf] {
                    assert_ne!(v, v);
                    assert!(v.is_nan().all());
                    assert!(v.simd_ne(v).all());
                    assert!(v.simd_eq(v).none());
                }
            }

            #[test]
            fn test_overflow_at_float_max() {
                let max = F::splat(f32::MAX);
                let half = max / 2.0;

                assert!((max + half).simd_eq(max).none());
                assert!((max + half).is_inf().all());
                assert_eq!(half + half, max);
                assert_all(-max + max, 0.0);
            }

            #[test]
            fn test_one_hot_sum() {
                let sum = one_hot(0, 1.0) + one_hot(1, 2.0) + one_hot(2, 3.0) + one_hot(3, 4.0);
                let lanes = sum.to_vec();
                assert_eq!(&lanes[..4], &[1.0, 2.0, 3.0, 4.0]);
                assert!(lanes[4..].iter().all(|&lane| lane == 0.0));
            }

            #[test]
            fn test_scalar_operands() {
                let v = F::from_slice(&[1.0, 2.0, 4.0, 8.0]);
                assert_eq!((v * 0.5).lane(3), 4.0);
                assert_eq!((1.0 / v).lane(2), 0.25);
                assert_eq!((10.0 - v).lane(1), 8.0);

                let mut w = v;
                w += 1.0;
                w *= F::splat(2.0);
                w -= 2.0;
                w /= 2.0;
                assert_eq!(w, v);
            }

            #[test]
            fn test_negate_and_abs_work_on_the_sign_bit() {
                let v = F::from_slice(&[0.0, -0.0, -3.0, f32::NAN]);
                let negated = (-v).to_vec();
                assert_eq!(negated[0].to_bits(), 0x8000_0000);
                assert_eq!(negated[1].to_bits(), 0);
                assert_eq!(negated[2], 3.0);
                assert_eq!(negated[3].to_bits(), f32::NAN.to_bits() ^ 0x8000_0000);

                let abs = (-v).abs().to_vec();
                assert_eq!(abs[0].to_bits(), 0);
                assert_eq!(abs[2], 3.0);
                assert_eq!(abs[3].to_bits(), f32::NAN.to_bits());
            }

            #[test]
            fn test_min_max_return_rhs_on_nan_and_zeros() {
                let nan = F::splat(f32::NAN);
                let one = F::splat(1.0);
                assert_all(nan.min(one), 1.0);
                assert!(one.min(nan).is_nan().all());
                assert_all(nan.max(one), 1.0);
                assert_all(F::splat(0.0).min(F::splat(-0.0)), -0.0);
                assert_all(F::splat(-0.0).max(F::splat(0.0)), 0.0);
                assert_all(F::splat(-2.0).min(one), -2.0);
                assert_all(F::splat(-2.0).max(one), 1.0);
            }

            #[test]
            fn test_rounding() {
                let v = F::from_slice(&[2.5, -2.5, 1.4, -1.6]);
                assert_eq!(&v.round().to_vec()[..4], &[2.0, -2.0, 1.0, -2.0]);
                assert_eq!(&v.floor().to_vec()[..4], &[2.0, -3.0, 1.0, -2.0]);
                assert_eq!(&v.ceil().to_vec()[..4], &[3.0, -2.0, 2.0, -1.0]);
                assert_eq!(&F::splat(3.5).round().to_vec()[..1], &[4.0]);
            }

            #[test]
            fn test_sqrt_is_exact_and_rsqrt_is_close() {
                assert_all(F::splat(16.0).sqrt(), 4.0);
                assert!(F::splat(-1.0).sqrt().is_nan().all());

                for lane in F::splat(4.0).rsqrt().to_vec() {
                    assert!((lane - 0.5).abs() < 1e-3, "rsqrt(4) = {lane}");
                }
            }

            #[test]
            fn test_ln_and_powi() {
                assert_all(F::splat(1.0).ln(), 0.0);
                assert_all(F::splat(0.0).ln(), f32::NEG_INFINITY);
                assert_all(F::splat(2.0).powi(10), 1024.0);
                assert_all(F::splat(2.0).powi(-1), 0.5);
            }

            #[test]
            fn test_classification() {
                let v = F::from_slice(&[f32::INFINITY, f32::NEG_INFINITY, f32::NAN, -3.5]);
                assert_eq!(v.is_inf().bitmask(), 0b0011);
                assert_eq!(v.is_nan().bitmask(), 0b0100);
                assert_eq!(v.is_finite().bitmask() & 0b1111, 0b1000);
            }

            #[test]
            fn test_nan_comparisons_are_false_except_ne() {
                let nan = F::splat(f32::NAN);
                let one = F::splat(1.0);
                assert!(nan.simd_lt(one).none());
                assert!(nan.simd_le(one).none());
                assert!(nan.simd_gt(one).none());
                assert!(nan.simd_ge(one).none());
                assert!(nan.simd_eq(one).none());
                assert!(nan.simd_ne(one).all());
            }

            #[test]
            fn test_signed_zero_compares_equal() {
                assert!(F::splat(0.0).simd_eq(-0.0).all());
                assert!(F::splat(-0.0).simd_lt(0.0).none());
            }

            #[test]
            fn test_bitwise_ops() {
                let v = F::splat(-1.5);
                let sign = F::splat(-0.0);
                assert_all(v & !sign, 1.5);
                assert_all(v ^ sign, 1.5);
                assert_all(F::splat(1.5) | sign, -1.5);
            }

            #[test]
            fn test_lane_movement() {
                let data: Vec<f32> = (0..F::LANES).map(|i| i as f32 + 1.0).collect();
                let v = F::from_slice(&data);

                let rotated = v.rotate_lanes(1).to_vec();
                assert_eq!(rotated[0], 2.0);
                assert_eq!(rotated[F::LANES - 1], 1.0);

                let shifted = v.shift_lanes(1).to_vec();
                assert_eq!(shifted[0], 2.0);
                assert_eq!(shifted[F::LANES - 1], 0.0);

                let cut = v.cutoff(2).to_vec();
                assert_eq!(&cut[..2], &[1.0, 2.0]);
                assert!(cut[2..].iter().all(|&lane| lane == 0.0));
            }

            #[test]
            fn test_gather_and_scatter() {
                let table: Vec<f32> = (0..32).map(|i| i as f32).collect();
                let indices = simdtier::simd::Index32::<$backend>::iota(0) * 3;
                let picked = F::gather(&table, indices);
                for (i, lane) in picked.to_vec().into_iter().enumerate() {
                    assert_eq!(lane, (i * 3) as f32);
                }

                let mut out = vec![0.0f32; 32];
                picked.scatter(&mut out, indices + 1);
                for i in 0..F::LANES {
                    assert_eq!(out[i * 3 + 1], (i * 3) as f32);
                }
            }

            #[test]
            fn test_display_and_debug() {
                let text = F::splat(1.5).to_string();
                assert!(text.starts_with("[1.5, 1.5"));
                assert!(text.ends_with("1.5]"));
                assert_eq!(text.matches(", ").count(), F::LANES - 1);
                assert!(format!("{:?}", F::zero()).starts_with("Float32<"));
            }
        }
    };
}

float_tests!(scalar, simdtier::simd::scalar::Scalar);

#[cfg(simd_sse2)]
float_tests!(sse, simdtier::simd::sse::Sse);

#[cfg(simd_avx)]
float_tests!(avx, simdtier::simd::avx::Avx);
