use super::{mask, LANE_COUNT, SCALAR_ALIGNMENT};
use crate::simd::traits::{IntLanes, RawLanes};

/// Four `i32` lanes in a 16-byte aligned array.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct I32x4(pub [i32; LANE_COUNT]);

impl I32x4 {
    #[inline(always)]
    fn map2(self, rhs: Self, f: impl Fn(i32, i32) -> i32) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    #[inline(always)]
    fn map1(self, f: impl Fn(i32) -> i32) -> Self {
        Self(self.0.map(f))
    }
}

impl RawLanes for I32x4 {
    type Elem = i32;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn zero() -> Self {
        Self([0; LANE_COUNT])
    }

    #[inline(always)]
    fn splat(value: i32) -> Self {
        Self([value; LANE_COUNT])
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const i32) -> Self {
        Self(std::ptr::read_unaligned(ptr as *const [i32; LANE_COUNT]))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> Self {
        debug_assert!(
            ptr as usize % SCALAR_ALIGNMENT == 0,
            "Pointer must be {SCALAR_ALIGNMENT}-byte aligned"
        );
        Self(std::ptr::read(ptr as *const [i32; LANE_COUNT]))
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut i32) {
        std::ptr::write_unaligned(ptr as *mut [i32; LANE_COUNT], self.0)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut i32) {
        debug_assert!(
            ptr as usize % SCALAR_ALIGNMENT == 0,
            "Pointer must be {SCALAR_ALIGNMENT}-byte aligned"
        );
        std::ptr::write(ptr as *mut [i32; LANE_COUNT], self.0)
    }

    #[inline(always)]
    fn extract(self, index: usize) -> i32 {
        self.0[index]
    }

    #[inline(always)]
    fn insert(mut self, index: usize, value: i32) -> Self {
        self.0[index] = value;
        self
    }

    #[inline(always)]
    fn rotate_lanes(mut self, n: usize) -> Self {
        self.0.rotate_left(n % LANE_COUNT);
        self
    }

    #[inline(always)]
    fn map(self, f: impl Fn(i32) -> i32) -> Self {
        self.map1(f)
    }

    #[inline(always)]
    fn zip_map(self, rhs: Self, f: impl Fn(i32, i32) -> i32) -> Self {
        self.map2(rhs, f)
    }
}

impl IntLanes for I32x4 {
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.map2(rhs, i32::wrapping_add)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.map2(rhs, i32::wrapping_sub)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.map2(rhs, std::cmp::min)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.map2(rhs, std::cmp::max)
    }

    #[inline(always)]
    fn wrapping_abs(self) -> Self {
        self.map1(i32::wrapping_abs)
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a & b)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a | b)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a ^ b)
    }

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        self.map1(|a| if count >= 32 { 0 } else { a << count })
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        self.map1(|a| a >> count.min(31))
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| mask(a == b))
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| mask(a > b))
    }

    #[inline(always)]
    fn sign_bits(self) -> u32 {
        self.0
            .iter()
            .enumerate()
            .fold(0, |bits, (i, &lane)| bits | (((lane as u32) >> 31) << i))
    }
}
