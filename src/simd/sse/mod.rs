//! SSE-family backend: four 32-bit lanes in a 128-bit register.
//!
//! Lane storage is the native `__m128i` / `__m128` pair, so a vector of this
//! backend can be handed to raw intrinsics without conversion.
//!
//! # Capability cascade
//!
//! SSE2 is the floor. Higher levels switch individual operations to native
//! instructions when the build enables them:
//!
//! - **SSSE3**: `_mm_abs_epi32` for two's-complement absolute value
//! - **SSE4.1**: `_mm_mullo_epi32`, `_mm_min_epi32`/`_mm_max_epi32`,
//!   `blendv` selects, lane insert/extract, `_mm_round_ps`/floor/ceil
//!
//! Without them the operations fall back to compare + select, per-lane
//! emulation, or the magic-number rounding of [`FloatLanes::round`].
//! Integer division is emulated per lane at every level.
//!
//! [`FloatLanes::round`]: crate::simd::traits::FloatLanes::round

mod f32x4;
mod i32x4;

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::tier::Tier;
use crate::simd::traits::Backend;

/// SSE memory alignment requirement in bytes.
pub(crate) const SSE_ALIGNMENT: usize = 16;

/// Number of 32-bit lanes in a 128-bit register.
pub(crate) const LANE_COUNT: usize = 4;

/// Marker for the SSE-family backend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sse;

impl Backend for Sse {
    const TIER: Tier = Tier::highest_sse();
    const LANES: usize = LANE_COUNT;

    type I32 = __m128i;
    type F32 = __m128;
}
