//! Value vector of `i32` lanes.
//!
//! Arithmetic wraps on overflow and division truncates toward zero, exactly
//! like `i32::wrapping_*` applied lane by lane. Shifts take one count for
//! every lane.

use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Neg, Not, Shl, ShlAssign,
    Shr, ShrAssign,
};

use crate::error::{cast_error, check_lane, Result};
use crate::simd::index::Index32;
use crate::simd::mask::{full_bitmask, Mask32};
use crate::simd::traits::{
    Alignment, Backend, FloatLanes, IntLanes, LaneBuffer, RawLanes, SimdCompare, SimdVector,
};
use crate::simd::vector::{
    impl_arith_ops, impl_gather_scatter, impl_simd_compare, impl_vector_common,
};

/// `B::LANES` lanes of `i32`.
///
/// The layout is the raw lane storage of the backend (`__m128i` for SSE,
/// `__m256i` for AVX), so `into_raw` can be handed straight to intrinsics.
///
/// # Examples
///
/// ```rust
/// use simdtier::simd::{scalar::Scalar, Int32};
///
/// let a = Int32::<Scalar>::iota(1);
/// let b = a * 10 - 1;
/// assert_eq!(b.to_vec(), vec![9, 19, 29, 39]);
/// ```
#[repr(transparent)]
pub struct Int32<B: Backend> {
    pub(crate) elements: B::I32,
}

impl_vector_common!(Int32, i32, I32, IntLanes, "Int32");
impl_arith_ops!(Int32, i32, I32, IntLanes);
impl_gather_scatter!(Int32, i32, I32);
impl_simd_compare!(Int32, i32);

impl<B: Backend> Int32<B> {
    /// Lanes `start, start + 1, ...`, wrapping at `i32::MAX`.
    #[inline(always)]
    pub fn iota(start: i32) -> Self {
        Self::from_raw(B::I32::iota(start))
    }

    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        Self::from_raw(self.elements.min(rhs.elements))
    }

    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        Self::from_raw(self.elements.max(rhs.elements))
    }

    /// Clears the sign bit of every lane.
    ///
    /// This is a bit operation, not two's-complement abs: `-5` becomes
    /// `0x7FFF_FFFB` and `i32::MIN` becomes `0`. Use [`Self::wrapping_abs`]
    /// for the arithmetic absolute value.
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self::from_raw(self.elements.clear_sign())
    }

    /// Two's-complement absolute value; `i32::MIN` stays `i32::MIN`.
    #[inline(always)]
    pub fn wrapping_abs(self) -> Self {
        Self::from_raw(self.elements.wrapping_abs())
    }

    #[inline(always)]
    fn to_float(self) -> B::F32 {
        B::F32::from_i32(self.elements)
    }

    /// Square root through float lanes, rounded to nearest. Negative lanes
    /// become `i32::MIN`.
    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self::from_raw(self.to_float().sqrt().to_i32_nearest())
    }

    /// Approximate reciprocal square root through float lanes, rounded to
    /// nearest. Accuracy depends on the tier.
    #[inline(always)]
    pub fn rsqrt(self) -> Self {
        Self::from_raw(self.to_float().rsqrt().to_i32_nearest())
    }

    /// Natural logarithm through float lanes, truncated.
    #[inline(always)]
    pub fn ln(self) -> Self {
        Self::from_raw(self.to_float().ln().to_i32())
    }

    /// `self^exp` through float lanes, truncated.
    #[inline(always)]
    pub fn powi(self, exp: i32) -> Self {
        Self::from_raw(self.to_float().powi(exp).to_i32())
    }

    /// One bit per lane, set when the lane is negative. Lane 0 is bit 0.
    #[inline(always)]
    pub fn sign_bits(self) -> u32 {
        self.elements.sign_bits()
    }

    /// Keeps only the sign bit of every lane.
    #[inline(always)]
    pub fn sign(self) -> Self {
        Self::from_raw(self.elements.sign())
    }
}

impl<B: Backend> Neg for Int32<B> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_raw(self.elements.neg())
    }
}

impl<B: Backend> Not for Int32<B> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self::from_raw(self.elements.not())
    }
}

macro_rules! impl_bit_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $lanes_fn:ident) => {
        impl<B: Backend> $op for Int32<B> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::from_raw(self.elements.$lanes_fn(rhs.elements))
            }
        }

        impl<B: Backend> $op<i32> for Int32<B> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: i32) -> Self {
                Self::from_raw(self.elements.$lanes_fn(B::I32::splat(rhs)))
            }
        }

        impl<B: Backend> $assign for Int32<B> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                self.elements = self.elements.$lanes_fn(rhs.elements);
            }
        }

        impl<B: Backend> $assign<i32> for Int32<B> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: i32) {
                self.elements = self.elements.$lanes_fn(B::I32::splat(rhs));
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, BitAndAssign, bitand_assign, and);
impl_bit_op!(BitOr, bitor, BitOrAssign, bitor_assign, or);
impl_bit_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, xor);

impl<B: Backend> Shl<u32> for Int32<B> {
    type Output = Self;

    /// Logical shift; counts of 32 or more give zero.
    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        Self::from_raw(self.elements.shl(count))
    }
}

impl<B: Backend> Shr<u32> for Int32<B> {
    type Output = Self;

    /// Arithmetic shift; counts of 32 or more fill with the sign bit.
    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        Self::from_raw(self.elements.shr(count))
    }
}

impl<B: Backend> ShlAssign<u32> for Int32<B> {
    #[inline(always)]
    fn shl_assign(&mut self, count: u32) {
        self.elements = self.elements.shl(count);
    }
}

impl<B: Backend> ShrAssign<u32> for Int32<B> {
    #[inline(always)]
    fn shr_assign(&mut self, count: u32) {
        self.elements = self.elements.shr(count);
    }
}

impl<B: Backend> SimdCompare for Int32<B> {
    type Mask = Mask32<B>;

    #[inline(always)]
    fn simd_eq(self, rhs: Self) -> Mask32<B> {
        Mask32::from_raw(self.elements.cmp_eq(rhs.elements))
    }

    #[inline(always)]
    fn simd_ne(self, rhs: Self) -> Mask32<B> {
        Mask32::from_raw(self.elements.cmp_ne(rhs.elements))
    }

    #[inline(always)]
    fn simd_lt(self, rhs: Self) -> Mask32<B> {
        Mask32::from_raw(self.elements.cmp_lt(rhs.elements))
    }

    #[inline(always)]
    fn simd_le(self, rhs: Self) -> Mask32<B> {
        Mask32::from_raw(self.elements.cmp_le(rhs.elements))
    }

    #[inline(always)]
    fn simd_gt(self, rhs: Self) -> Mask32<B> {
        Mask32::from_raw(self.elements.cmp_gt(rhs.elements))
    }

    #[inline(always)]
    fn simd_ge(self, rhs: Self) -> Mask32<B> {
        Mask32::from_raw(self.elements.cmp_ge(rhs.elements))
    }
}

impl<B: Backend> PartialEq for Int32<B> {
    /// `true` when every lane is equal.
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.elements.cmp_eq(other.elements).sign_bits() == full_bitmask(B::LANES)
    }
}

impl<B: Backend> Eq for Int32<B> {}
