//! Properties of the vectors of the active tier against plain scalar code.

use proptest::array::uniform8;
use proptest::collection::vec;
use proptest::num::f32::ANY;
use simdtier::simd::{select, type_cast, value_cast, Float, Int, Mask, SimdAdd, SimdCompare};
use test_strategy::proptest;

fn same_float(a: f32, b: f32) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

fn truncate(x: f32) -> i32 {
    if x.is_nan() || x >= 2_147_483_648.0 || x < -2_147_483_648.0 {
        i32::MIN
    } else {
        x as i32
    }
}

#[proptest]
fn load_then_store_reproduces_lanes(values: [i32; 8]) {
    let mut out = [0i32; 8];
    unsafe { Int::load(values.as_ptr()).store_at(out.as_mut_ptr()) };
    assert_eq!(out[..Int::LANES], values[..Int::LANES]);
}

#[proptest]
fn partial_load_zero_fills(values: [i32; 8], #[strategy(0..=8usize)] n: usize) {
    let v = unsafe { Int::load_partial(values.as_ptr(), n) }.to_vec();
    for (i, lane) in v.into_iter().enumerate() {
        assert_eq!(lane, if i < n { values[i] } else { 0 });
    }
}

#[proptest]
fn insert_then_extract_is_identity(
    values: [i32; 8],
    #[strategy(0..Int::LANES)] index: usize,
    value: i32,
) {
    let before = Int::from_slice(&values);
    let mut after = before;
    after.insert(index, value).unwrap();
    for i in 0..Int::LANES {
        let expected = if i == index { value } else { before.lane(i) };
        assert_eq!(after.extract(i), Ok(expected));
    }
}

#[proptest]
fn int_arithmetic_wraps_like_scalar(a: [i32; 8], b: [i32; 8]) {
    let (va, vb) = (Int::from_slice(&a), Int::from_slice(&b));
    let (sum, difference, product) = (va + vb, va - vb, va * vb);
    for i in 0..Int::LANES {
        assert_eq!(sum.lane(i), a[i].wrapping_add(b[i]));
        assert_eq!(difference.lane(i), a[i].wrapping_sub(b[i]));
        assert_eq!(product.lane(i), a[i].wrapping_mul(b[i]));
    }
}

#[proptest]
fn int_division_truncates_like_scalar(
    a: [i32; 8],
    #[strategy(uniform8(1..=i32::MAX))] b: [i32; 8],
    negate: bool,
) {
    let b = b.map(|x| if negate { -x } else { x });
    let quotient = Int::from_slice(&a) / Int::from_slice(&b);
    for i in 0..Int::LANES {
        assert_eq!(quotient.lane(i), a[i].wrapping_div(b[i]));
    }
}

#[proptest]
fn float_arithmetic_is_ieee(
    #[strategy(uniform8(ANY))] a: [f32; 8],
    #[strategy(uniform8(ANY))] b: [f32; 8],
) {
    let (va, vb) = (Float::from_slice(&a), Float::from_slice(&b));
    let (sum, product, quotient) = (va + vb, va * vb, va / vb);
    for i in 0..Float::LANES {
        assert!(same_float(sum.lane(i), a[i] + b[i]));
        assert!(same_float(product.lane(i), a[i] * b[i]));
        assert!(same_float(quotient.lane(i), a[i] / b[i]));
    }
}

#[proptest]
fn comparisons_match_scalar(
    #[strategy(uniform8(ANY))] a: [f32; 8],
    #[strategy(uniform8(ANY))] b: [f32; 8],
) {
    let (va, vb) = (Float::from_slice(&a), Float::from_slice(&b));
    let (lt, ge, ne) = (va.simd_lt(vb), va.simd_ge(vb), va.simd_ne(vb));
    for i in 0..Float::LANES {
        assert_eq!(lt.lane(i), a[i] < b[i]);
        assert_eq!(ge.lane(i), a[i] >= b[i]);
        assert_eq!(ne.lane(i), a[i] != b[i]);
    }
}

#[proptest]
fn select_picks_per_lane(mask: [bool; 8], a: [i32; 8], b: [i32; 8]) {
    let blended = select(
        Mask::from_bools(&mask),
        Int::from_slice(&a),
        Int::from_slice(&b),
    );
    for i in 0..Int::LANES {
        assert_eq!(blended.lane(i), if mask[i] { a[i] } else { b[i] });
    }
}

#[proptest]
fn value_cast_truncates(#[strategy(uniform8(ANY))] values: [f32; 8]) {
    let ints: Int = value_cast(Float::from_slice(&values));
    for i in 0..Int::LANES {
        assert_eq!(ints.lane(i), truncate(values[i]));
    }
}

#[proptest]
fn type_cast_round_trips_bits(values: [i32; 8]) {
    let ints = Int::from_slice(&values);
    let floats: Float = type_cast(ints);
    for i in 0..Float::LANES {
        assert_eq!(floats.lane(i).to_bits(), values[i] as u32);
    }
    assert_eq!(type_cast::<Int, _>(floats), ints);
}

#[proptest(cases = 64)]
fn slice_add_matches_scalar(
    #[strategy(vec(-1.0e6f32..1.0e6, 0..100))] a: Vec<f32>,
    #[strategy(vec(-1.0e6f32..1.0e6, #a.len()))] b: Vec<f32>,
) {
    let expected = a.as_slice().scalar_add(b.as_slice()).unwrap();
    assert_eq!(a.as_slice().simd_add(b.as_slice()).unwrap(), expected);
    assert_eq!(a.as_slice().par_simd_add(b.as_slice()).unwrap(), expected);
}
