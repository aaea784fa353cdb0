//! Integer lanes on `__m128i`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{LANE_COUNT, SSE_ALIGNMENT};
use crate::simd::traits::{IntLanes, RawLanes};

impl RawLanes for __m128i {
    type Elem = i32;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { _mm_setzero_si128() }
    }

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { _mm_set1_epi32(value) }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const i32) -> Self {
        _mm_loadu_si128(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> Self {
        debug_assert!(
            ptr as usize % SSE_ALIGNMENT == 0,
            "Pointer must be {SSE_ALIGNMENT}-byte aligned"
        );
        _mm_load_si128(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut i32) {
        _mm_storeu_si128(ptr as *mut __m128i, self)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut i32) {
        debug_assert!(
            ptr as usize % SSE_ALIGNMENT == 0,
            "Pointer must be {SSE_ALIGNMENT}-byte aligned"
        );
        _mm_store_si128(ptr as *mut __m128i, self)
    }

    #[inline(always)]
    unsafe fn stream(self, ptr: *mut i32) {
        debug_assert!(
            ptr as usize % SSE_ALIGNMENT == 0,
            "Pointer must be {SSE_ALIGNMENT}-byte aligned"
        );
        _mm_stream_si128(ptr as *mut __m128i, self)
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn extract(self, index: usize) -> i32 {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        unsafe {
            match index {
                0 => _mm_extract_epi32(self, 0),
                1 => _mm_extract_epi32(self, 1),
                2 => _mm_extract_epi32(self, 2),
                _ => _mm_extract_epi32(self, 3),
            }
        }
    }

    #[cfg(not(simd_sse41))]
    #[inline(always)]
    fn extract(self, index: usize) -> i32 {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        unsafe {
            let lane = match index {
                0 => self,
                1 => _mm_shuffle_epi32(self, 0b01),
                2 => _mm_shuffle_epi32(self, 0b10),
                _ => _mm_shuffle_epi32(self, 0b11),
            };
            _mm_cvtsi128_si32(lane)
        }
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn insert(self, index: usize, value: i32) -> Self {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        unsafe {
            match index {
                0 => _mm_insert_epi32(self, value, 0),
                1 => _mm_insert_epi32(self, value, 1),
                2 => _mm_insert_epi32(self, value, 2),
                _ => _mm_insert_epi32(self, value, 3),
            }
        }
    }

    #[cfg(not(simd_sse41))]
    #[inline(always)]
    fn insert(self, index: usize, value: i32) -> Self {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        Self::select(Self::lane_mask(index), Self::splat(value), self)
    }

    #[inline(always)]
    fn rotate_lanes(self, n: usize) -> Self {
        unsafe {
            match n % LANE_COUNT {
                0 => self,
                1 => _mm_shuffle_epi32(self, 0b00_11_10_01),
                2 => _mm_shuffle_epi32(self, 0b01_00_11_10),
                _ => _mm_shuffle_epi32(self, 0b10_01_00_11),
            }
        }
    }

    #[inline(always)]
    fn shift_lanes(self, n: usize) -> Self {
        unsafe {
            match n {
                0 => self,
                1 => _mm_srli_si128(self, 4),
                2 => _mm_srli_si128(self, 8),
                3 => _mm_srli_si128(self, 12),
                _ => _mm_setzero_si128(),
            }
        }
    }
}

impl IntLanes for __m128i {
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { _mm_add_epi32(self, rhs) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { _mm_sub_epi32(self, rhs) }
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { _mm_mullo_epi32(self, rhs) }
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { _mm_min_epi32(self, rhs) }
    }

    #[cfg(simd_sse41)]
    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { _mm_max_epi32(self, rhs) }
    }

    #[cfg(simd_ssse3)]
    #[inline(always)]
    fn wrapping_abs(self) -> Self {
        unsafe { _mm_abs_epi32(self) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { _mm_and_si128(self, rhs) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { _mm_or_si128(self, rhs) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { _mm_xor_si128(self, rhs) }
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { _mm_andnot_si128(self, rhs) }
    }

    // The count register holds a 64-bit value; anything >= 32 clears the lane.
    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe { _mm_sll_epi32(self, _mm_cvtsi32_si128(count as i32)) }
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe { _mm_sra_epi32(self, _mm_cvtsi32_si128(count as i32)) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        unsafe { _mm_cmpeq_epi32(self, rhs) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        unsafe { _mm_cmpgt_epi32(self, rhs) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        unsafe { _mm_cmplt_epi32(self, rhs) }
    }

    // Mask lanes are all ones or all zeros, so a byte blend is a lane blend.
    #[cfg(simd_sse41)]
    #[inline(always)]
    fn select(mask: Self, a: Self, b: Self) -> Self {
        unsafe { _mm_blendv_epi8(b, a, mask) }
    }

    #[inline(always)]
    fn sign_bits(self) -> u32 {
        unsafe { _mm_movemask_ps(_mm_castsi128_ps(self)) as u32 }
    }

    #[inline(always)]
    fn iota(start: i32) -> Self {
        unsafe { _mm_add_epi32(_mm_setr_epi32(0, 1, 2, 3), _mm_set1_epi32(start)) }
    }

    #[inline(always)]
    fn lane_mask(index: usize) -> Self {
        unsafe { _mm_cmpeq_epi32(_mm_setr_epi32(0, 1, 2, 3), _mm_set1_epi32(index as i32)) }
    }
}
