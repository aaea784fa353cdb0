//! Float lanes on `__m256`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{partial_mask, AVX_ALIGNMENT, LANE_COUNT};
use crate::simd::traits::{FloatLanes, IntLanes, RawLanes};

impl RawLanes for __m256 {
    type Elem = f32;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { _mm256_setzero_ps() }
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { _mm256_set1_ps(value) }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        _mm256_loadu_ps(ptr)
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(
            ptr as usize % AVX_ALIGNMENT == 0,
            "Pointer must be {AVX_ALIGNMENT}-byte aligned"
        );
        _mm256_load_ps(ptr)
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        debug_assert!(
            ptr as usize % AVX_ALIGNMENT == 0,
            "Pointer must be {AVX_ALIGNMENT}-byte aligned"
        );
        _mm256_store_ps(ptr, self)
    }

    #[inline(always)]
    unsafe fn stream(self, ptr: *mut f32) {
        debug_assert!(
            ptr as usize % AVX_ALIGNMENT == 0,
            "Pointer must be {AVX_ALIGNMENT}-byte aligned"
        );
        _mm256_stream_ps(ptr, self)
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, n: usize) -> Self {
        if n >= LANE_COUNT {
            return Self::load_unaligned(ptr);
        }
        _mm256_maskload_ps(ptr, partial_mask(n))
    }

    #[inline(always)]
    unsafe fn store_partial(self, ptr: *mut f32, n: usize) {
        if n >= LANE_COUNT {
            return self.store_unaligned(ptr);
        }
        _mm256_maskstore_ps(ptr, partial_mask(n), self)
    }

    #[inline(always)]
    fn extract(self, index: usize) -> f32 {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        unsafe {
            let half = if index < 4 {
                _mm256_castps256_ps128(self)
            } else {
                _mm256_extractf128_ps(self, 1)
            };
            half.extract(index % 4)
        }
    }

    #[inline(always)]
    fn insert(self, index: usize, value: f32) -> Self {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        Self::select(__m256i::lane_mask(index), Self::splat(value), self)
    }

    #[inline(always)]
    fn rotate_lanes(self, n: usize) -> Self {
        Self::from_bits(self.to_bits().rotate_lanes(n))
    }

    #[inline(always)]
    fn shift_lanes(self, n: usize) -> Self {
        Self::from_bits(self.to_bits().shift_lanes(n))
    }
}

impl FloatLanes for __m256 {
    type Bits = __m256i;

    #[inline(always)]
    fn to_bits(self) -> __m256i {
        unsafe { _mm256_castps_si256(self) }
    }

    #[inline(always)]
    fn from_bits(bits: __m256i) -> Self {
        unsafe { _mm256_castsi256_ps(bits) }
    }

    #[inline(always)]
    fn from_i32(value: __m256i) -> Self {
        unsafe { _mm256_cvtepi32_ps(value) }
    }

    #[inline(always)]
    fn to_i32(self) -> __m256i {
        unsafe { _mm256_cvttps_epi32(self) }
    }

    #[inline(always)]
    fn to_i32_nearest(self) -> __m256i {
        unsafe { _mm256_cvtps_epi32(self) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { _mm256_add_ps(self, rhs) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { _mm256_sub_ps(self, rhs) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { _mm256_mul_ps(self, rhs) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { _mm256_div_ps(self, rhs) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { _mm256_min_ps(self, rhs) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { _mm256_max_ps(self, rhs) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { _mm256_sqrt_ps(self) }
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        unsafe { _mm256_rsqrt_ps(self) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { _mm256_xor_ps(self, _mm256_set1_ps(-0.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), self) }
    }

    #[inline(always)]
    fn round(self) -> Self {
        unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { _mm256_floor_ps(self) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { _mm256_ceil_ps(self) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> __m256i {
        unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_EQ_OQ>(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> __m256i {
        unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_NEQ_UQ>(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> __m256i {
        unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_LT_OQ>(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> __m256i {
        unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_LE_OQ>(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> __m256i {
        unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_GT_OQ>(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> __m256i {
        unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_GE_OQ>(self, rhs)) }
    }

    #[inline(always)]
    fn select(mask: __m256i, a: Self, b: Self) -> Self {
        unsafe { _mm256_blendv_ps(b, a, _mm256_castsi256_ps(mask)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_elements(v: __m256) -> [f32; 8] {
        let mut result = [0.0; 8];
        unsafe { _mm256_storeu_ps(result.as_mut_ptr(), v) };
        result
    }

    fn from_lanes(lanes: [f32; 8]) -> __m256 {
        unsafe { _mm256_loadu_ps(lanes.as_ptr()) }
    }

    #[test]
    fn test_load_partial_never_reads_past_count() {
        let data = [1.5f32, 2.5, 3.5];
        let v = unsafe { __m256::load_partial(data.as_ptr(), data.len()) };
        assert_eq!(extract_elements(v), [1.5, 2.5, 3.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_insert_extract_upper_half() {
        let v = __m256::splat(1.0).insert(6, 9.0);
        assert_eq!(v.extract(6), 9.0);
        assert_eq!(v.extract(5), 1.0);
        assert_eq!(extract_elements(v)[6], 9.0);
    }

    #[test]
    fn test_rotate_lanes() {
        let v = from_lanes([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(
            extract_elements(v.rotate_lanes(5)),
            [5.0, 6.0, 7.0, 0.0, 1.0, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_rounding_family() {
        let v = from_lanes([2.5, -2.5, -0.3, 7.9, 0.5, 1.5, -1.5, -7.9]);
        assert_eq!(
            extract_elements(v.round()),
            [2.0, -2.0, -0.0, 8.0, 0.0, 2.0, -2.0, -8.0]
        );
        assert_eq!(
            extract_elements(v.floor()),
            [2.0, -3.0, -1.0, 7.0, 0.0, 1.0, -2.0, -8.0]
        );
        assert!(extract_elements(v.ceil())[2].is_sign_negative());
    }

    #[test]
    fn test_nearest_conversion_rounds_half_to_even() {
        let v = from_lanes([0.99976, 2.5, -1.5, 3.5, 1.7320508, -0.5, f32::NAN, 7.0]);
        let mut lanes = [0; 8];
        unsafe { _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, v.to_i32_nearest()) };
        assert_eq!(lanes, [1, 2, -2, 4, 2, 0, i32::MIN, 7]);
    }

    #[test]
    fn test_nan_comparisons() {
        let a = from_lanes([f32::NAN, 1.0, 2.0, 3.0, f32::NAN, 5.0, 6.0, 7.0]);
        let b = from_lanes([0.0, 1.0, 3.0, 3.0, f32::NAN, 4.0, 6.0, 8.0]);
        assert_eq!(a.cmp_eq(b).sign_bits(), 0b0100_1010);
        assert_eq!(a.cmp_ne(b).sign_bits(), 0b1011_0101);
        assert_eq!(a.cmp_lt(b).sign_bits(), 0b1000_0100);
        assert_eq!(a.cmp_gt(b).sign_bits(), 0b0010_0000);
    }

    #[test]
    fn test_min_max_return_second_operand_when_unordered() {
        let a = from_lanes([f32::NAN, 1.0, -0.0, 0.0, 4.0, 5.0, 6.0, 7.0]);
        let b = from_lanes([2.0, f32::NAN, 0.0, -0.0, 3.0, 6.0, 6.0, 8.0]);
        let min = extract_elements(a.min(b));
        assert_eq!(min[0], 2.0);
        assert!(min[1].is_nan());
        assert!(min[2].is_sign_positive());
        assert!(min[3].is_sign_negative());
        assert_eq!(&min[4..], &[3.0, 5.0, 6.0, 7.0]);
    }
}
