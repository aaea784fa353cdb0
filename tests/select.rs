//! `select` over every mask pattern of every compiled backend.

use simdtier::simd::{select, Float32, Index32, Int32, Mask32, SimdCompare};

fn pattern(bits: u32, lanes: usize) -> Vec<bool> {
    (0..lanes).map(|i| bits & (1 << i) != 0).collect()
}

macro_rules! select_tests {
    ($module:ident, $backend:ty) => {
        mod $module {
            use super::*;

            type M = Mask32<$backend>;
            type I = Int32<$backend>;
            type F = Float32<$backend>;

            #[test]
            fn test_exhaustive_int_select() {
                let a = I::iota(100);
                let b = -I::iota(1);
                for bits in 0..1u32 << M::LANES {
                    let bools = pattern(bits, M::LANES);
                    let mask = M::from_bools(&bools);
                    assert_eq!(mask.bitmask(), bits);

                    let blended = select(mask, a, b);
                    for (i, &take_a) in bools.iter().enumerate() {
                        let expected = if take_a { a.lane(i) } else { b.lane(i) };
                        assert_eq!(blended.lane(i), expected, "lane {i} of pattern {bits:#b}");
                    }
                }
            }

            #[test]
            fn test_exhaustive_float_select() {
                let a = F::splat(f32::NAN);
                let b = F::splat(-0.0);
                for bits in 0..1u32 << M::LANES {
                    let mask = M::from_bools(&pattern(bits, M::LANES));
                    let blended = mask.select(a, b);
                    assert_eq!(blended.is_nan().bitmask(), bits);
                    assert_eq!(blended.sign_bits(), !bits & ((1 << M::LANES) - 1));
                }
            }

            #[test]
            fn test_select_indices_and_masks() {
                let below = Index32::<$backend>::iota(0).simd_lt(2);
                let picked = select(below, Index32::splat(7), Index32::splat(9));
                assert_eq!(picked.lane(0), 7);
                assert_eq!(picked.lane(M::LANES - 1), 9);

                let all = M::new(true);
                let none = M::new(false);
                assert_eq!(select(below, all, none), below);
                assert_eq!(select(below, none, all), !below);
            }

            #[test]
            fn test_clamp_negative_to_zero() {
                let v = I::iota(-2);
                let clamped = select(v.simd_lt(0), I::zero(), v);
                assert_eq!(clamped.lane(0), 0);
                assert_eq!(clamped.lane(1), 0);
                assert_eq!(clamped.lane(3), 1);
                assert_eq!(clamped, v.max(I::zero()));
            }
        }
    };
}

select_tests!(scalar, simdtier::simd::scalar::Scalar);

#[cfg(simd_sse2)]
select_tests!(sse, simdtier::simd::sse::Sse);

#[cfg(simd_avx)]
select_tests!(avx, simdtier::simd::avx::Avx);
