use super::{mask, I32x4, LANE_COUNT, SCALAR_ALIGNMENT};
use crate::simd::traits::{FloatLanes, RawLanes};

/// Four `f32` lanes in a 16-byte aligned array.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct F32x4(pub [f32; LANE_COUNT]);

impl F32x4 {
    #[inline(always)]
    fn map2(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(f32, f32) -> bool) -> I32x4 {
        I32x4(std::array::from_fn(|i| mask(f(self.0[i], rhs.0[i]))))
    }
}

/// Truncation with the x86 "integer indefinite" result for NaN and
/// out-of-range inputs.
#[inline(always)]
fn truncate(value: f32) -> i32 {
    if value.is_nan() || value >= 2_147_483_648.0 || value < -2_147_483_648.0 {
        i32::MIN
    } else {
        value as i32
    }
}

impl RawLanes for F32x4 {
    type Elem = f32;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn zero() -> Self {
        Self([0.0; LANE_COUNT])
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self([value; LANE_COUNT])
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self(std::ptr::read_unaligned(ptr as *const [f32; LANE_COUNT]))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(
            ptr as usize % SCALAR_ALIGNMENT == 0,
            "Pointer must be {SCALAR_ALIGNMENT}-byte aligned"
        );
        Self(std::ptr::read(ptr as *const [f32; LANE_COUNT]))
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut f32) {
        std::ptr::write_unaligned(ptr as *mut [f32; LANE_COUNT], self.0)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        debug_assert!(
            ptr as usize % SCALAR_ALIGNMENT == 0,
            "Pointer must be {SCALAR_ALIGNMENT}-byte aligned"
        );
        std::ptr::write(ptr as *mut [f32; LANE_COUNT], self.0)
    }

    #[inline(always)]
    fn extract(self, index: usize) -> f32 {
        self.0[index]
    }

    #[inline(always)]
    fn insert(mut self, index: usize, value: f32) -> Self {
        self.0[index] = value;
        self
    }

    #[inline(always)]
    fn rotate_lanes(mut self, n: usize) -> Self {
        self.0.rotate_left(n % LANE_COUNT);
        self
    }

    #[inline(always)]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self(self.0.map(f))
    }

    #[inline(always)]
    fn zip_map(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        self.map2(rhs, f)
    }
}

impl FloatLanes for F32x4 {
    type Bits = I32x4;

    #[inline(always)]
    fn to_bits(self) -> I32x4 {
        I32x4(bytemuck::cast(self.0))
    }

    #[inline(always)]
    fn from_bits(bits: I32x4) -> Self {
        Self(bytemuck::cast(bits.0))
    }

    #[inline(always)]
    fn from_i32(value: I32x4) -> Self {
        Self(value.0.map(|lane| lane as f32))
    }

    #[inline(always)]
    fn to_i32(self) -> I32x4 {
        I32x4(self.0.map(truncate))
    }

    #[inline(always)]
    fn to_i32_nearest(self) -> I32x4 {
        I32x4(self.0.map(|lane| truncate(lane.round_ties_even())))
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a + b)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a - b)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a * b)
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a / b)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| if a < b { a } else { b })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| if a > b { a } else { b })
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.map(f32::sqrt)
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        self.map(|a| 1.0 / a.sqrt())
    }

    #[inline(always)]
    fn round(self) -> Self {
        self.map(f32::round_ties_even)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        self.map(f32::floor)
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        self.map(f32::ceil)
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> I32x4 {
        self.compare(rhs, |a, b| a == b)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> I32x4 {
        self.compare(rhs, |a, b| a != b)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> I32x4 {
        self.compare(rhs, |a, b| a < b)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> I32x4 {
        self.compare(rhs, |a, b| a <= b)
    }
}
