//! Float lanes on `__m128`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{LANE_COUNT, SSE_ALIGNMENT};
use crate::simd::traits::{FloatLanes, IntLanes, RawLanes};

impl RawLanes for __m128 {
    type Elem = f32;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { _mm_setzero_ps() }
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { _mm_set1_ps(value) }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        _mm_loadu_ps(ptr)
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(
            ptr as usize % SSE_ALIGNMENT == 0,
            "Pointer must be {SSE_ALIGNMENT}-byte aligned"
        );
        _mm_load_ps(ptr)
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut f32) {
        _mm_storeu_ps(ptr, self)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        debug_assert!(
            ptr as usize % SSE_ALIGNMENT == 0,
            "Pointer must be {SSE_ALIGNMENT}-byte aligned"
        );
        _mm_store_ps(ptr, self)
    }

    #[inline(always)]
    unsafe fn stream(self, ptr: *mut f32) {
        debug_assert!(
            ptr as usize % SSE_ALIGNMENT == 0,
            "Pointer must be {SSE_ALIGNMENT}-byte aligned"
        );
        _mm_stream_ps(ptr, self)
    }

    #[inline(always)]
    fn extract(self, index: usize) -> f32 {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        unsafe {
            let lane = match index {
                0 => self,
                1 => _mm_shuffle_ps(self, self, 0b01),
                2 => _mm_shuffle_ps(self, self, 0b10),
                _ => _mm_shuffle_ps(self, self, 0b11),
            };
            _mm_cvtss_f32(lane)
        }
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn insert(self, index: usize, value: f32) -> Self {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        unsafe {
            let value = _mm_set_ss(value);
            match index {
                0 => _mm_insert_ps(self, value, 0x00),
                1 => _mm_insert_ps(self, value, 0x10),
                2 => _mm_insert_ps(self, value, 0x20),
                _ => _mm_insert_ps(self, value, 0x30),
            }
        }
    }

    #[cfg(not(simd_sse41))]
    #[inline(always)]
    fn insert(self, index: usize, value: f32) -> Self {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        Self::select(__m128i::lane_mask(index), Self::splat(value), self)
    }

    #[inline(always)]
    fn rotate_lanes(self, n: usize) -> Self {
        unsafe {
            match n % LANE_COUNT {
                0 => self,
                1 => _mm_shuffle_ps(self, self, 0b00_11_10_01),
                2 => _mm_shuffle_ps(self, self, 0b01_00_11_10),
                _ => _mm_shuffle_ps(self, self, 0b10_01_00_11),
            }
        }
    }

    #[inline(always)]
    fn shift_lanes(self, n: usize) -> Self {
        Self::from_bits(self.to_bits().shift_lanes(n))
    }
}

impl FloatLanes for __m128 {
    type Bits = __m128i;

    #[inline(always)]
    fn to_bits(self) -> __m128i {
        unsafe { _mm_castps_si128(self) }
    }

    #[inline(always)]
    fn from_bits(bits: __m128i) -> Self {
        unsafe { _mm_castsi128_ps(bits) }
    }

    #[inline(always)]
    fn from_i32(value: __m128i) -> Self {
        unsafe { _mm_cvtepi32_ps(value) }
    }

    #[inline(always)]
    fn to_i32(self) -> __m128i {
        unsafe { _mm_cvttps_epi32(self) }
    }

    #[inline(always)]
    fn to_i32_nearest(self) -> __m128i {
        unsafe { _mm_cvtps_epi32(self) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { _mm_add_ps(self, rhs) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { _mm_sub_ps(self, rhs) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { _mm_mul_ps(self, rhs) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { _mm_div_ps(self, rhs) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { _mm_min_ps(self, rhs) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { _mm_max_ps(self, rhs) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { _mm_sqrt_ps(self) }
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        unsafe { _mm_rsqrt_ps(self) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { _mm_xor_ps(self, _mm_set1_ps(-0.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), self) }
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn round(self) -> Self {
        unsafe { _mm_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self) }
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { _mm_floor_ps(self) }
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { _mm_ceil_ps(self) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> __m128i {
        unsafe { _mm_castps_si128(_mm_cmpeq_ps(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> __m128i {
        unsafe { _mm_castps_si128(_mm_cmpneq_ps(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> __m128i {
        unsafe { _mm_castps_si128(_mm_cmplt_ps(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> __m128i {
        unsafe { _mm_castps_si128(_mm_cmple_ps(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> __m128i {
        unsafe { _mm_castps_si128(_mm_cmpgt_ps(self, rhs)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> __m128i {
        unsafe { _mm_castps_si128(_mm_cmpge_ps(self, rhs)) }
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn select(mask: __m128i, a: Self, b: Self) -> Self {
        unsafe { _mm_blendv_ps(b, a, _mm_castsi128_ps(mask)) }
    }

    #[cfg(not(simd_sse41))]
    #[inline(always)]
    fn select(mask: __m128i, a: Self, b: Self) -> Self {
        unsafe {
            let mask = _mm_castsi128_ps(mask);
            _mm_or_ps(_mm_and_ps(mask, a), _mm_andnot_ps(mask, b))
        }
    }
}
