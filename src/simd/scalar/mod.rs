//! Portable software backend.
//!
//! Emulates four 32-bit lanes with plain arrays so that it is lane-compatible
//! with the SSE family. Every operation reproduces the bit-level result of the
//! SSE instructions (min/max operand order, truncating conversion of NaN and
//! out-of-range values, shift counts past the lane width), which makes this
//! backend the reference the vector backends are tested against.

mod f32x4;
mod i32x4;

pub use f32x4::F32x4;
pub use i32x4::I32x4;

use crate::simd::tier::Tier;
use crate::simd::traits::Backend;

/// Number of emulated lanes.
pub(crate) const LANE_COUNT: usize = 4;

/// Alignment of the lane arrays, matching a 128-bit register.
pub(crate) const SCALAR_ALIGNMENT: usize = 16;

/// Marker for the portable backend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scalar;

impl Backend for Scalar {
    const TIER: Tier = Tier::Scalar;
    const LANES: usize = LANE_COUNT;

    type I32 = I32x4;
    type F32 = F32x4;
}

#[inline(always)]
pub(crate) fn mask(condition: bool) -> i32 {
    -(condition as i32)
}
