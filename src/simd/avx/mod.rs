//! AVX-family backend: eight 32-bit lanes in a 256-bit register.
//!
//! # Architecture Requirements
//!
//! - **AVX**: float lanes, bitwise operations, blends and masked loads/stores
//!   (through their `ps` forms, which are type-agnostic)
//! - **AVX2**: 256-bit integer arithmetic, comparisons, shifts and lane
//!   permutes
//!
//! On AVX without AVX2 the integer operations split the register into two
//! 128-bit halves and run the SSE-family implementation on each.
//!
//! # Memory Alignment
//!
//! Aligned loads and stores require 32-byte alignment. Partial loads and
//! stores use `_mm256_maskload_ps` / `_mm256_maskstore_ps`, which never touch
//! memory behind a cleared mask lane.

mod f32x8;
mod i32x8;

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::tier::Tier;
use crate::simd::traits::Backend;

/// AVX memory alignment requirement in bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Number of 32-bit lanes that fit in a 256-bit register.
pub(crate) const LANE_COUNT: usize = 8;

/// Marker for the AVX-family backend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Avx;

impl Backend for Avx {
    const TIER: Tier = Tier::highest_avx();
    const LANES: usize = LANE_COUNT;

    type I32 = __m256i;
    type F32 = __m256;
}

/// Load/store mask enabling the first `n` lanes.
#[inline(always)]
pub(crate) fn partial_mask(n: usize) -> __m256i {
    debug_assert!(n < LANE_COUNT, "Size must be < {LANE_COUNT}");

    unsafe {
        match n {
            0 => _mm256_setzero_si256(),
            1 => _mm256_setr_epi32(-1, 0, 0, 0, 0, 0, 0, 0),
            2 => _mm256_setr_epi32(-1, -1, 0, 0, 0, 0, 0, 0),
            3 => _mm256_setr_epi32(-1, -1, -1, 0, 0, 0, 0, 0),
            4 => _mm256_setr_epi32(-1, -1, -1, -1, 0, 0, 0, 0),
            5 => _mm256_setr_epi32(-1, -1, -1, -1, -1, 0, 0, 0),
            6 => _mm256_setr_epi32(-1, -1, -1, -1, -1, -1, 0, 0),
            _ => _mm256_setr_epi32(-1, -1, -1, -1, -1, -1, -1, 0),
        }
    }
}

/// Lower and upper 128-bit halves.
#[inline(always)]
pub(crate) fn split(a: __m256i) -> (__m128i, __m128i) {
    unsafe { (_mm256_castsi256_si128(a), _mm256_extractf128_si256(a, 1)) }
}

#[cfg(not(simd_avx2))]
#[inline(always)]
pub(crate) fn join(lo: __m128i, hi: __m128i) -> __m256i {
    unsafe { _mm256_set_m128i(hi, lo) }
}

/// Applies a 128-bit integer operation to both halves.
#[cfg(not(simd_avx2))]
#[inline(always)]
pub(crate) fn halves(a: __m256i, b: __m256i, op: impl Fn(__m128i, __m128i) -> __m128i) -> __m256i {
    let (a_lo, a_hi) = split(a);
    let (b_lo, b_hi) = split(b);
    join(op(a_lo, b_lo), op(a_hi, b_hi))
}

#[cfg(not(simd_avx2))]
#[inline(always)]
pub(crate) fn halves1(a: __m256i, op: impl Fn(__m128i) -> __m128i) -> __m256i {
    let (lo, hi) = split(a);
    join(op(lo), op(hi))
}
