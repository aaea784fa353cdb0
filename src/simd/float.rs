//! Value vector of `f32` lanes.
//!
//! Arithmetic is IEEE-754 single precision on every tier: division by zero
//! gives a signed infinity, `0/0` and `inf/inf` give NaN, and nothing is
//! clamped. Negation and `abs` work on the sign bit, so they keep NaN
//! payloads and treat `-0.0` correctly.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Neg, Not};

use crate::error::{cast_error, check_lane, Result};
use crate::simd::index::Index32;
use crate::simd::mask::{full_bitmask, Mask32};
use crate::simd::traits::{
    Alignment, Backend, FloatLanes, IntLanes, LaneBuffer, RawLanes, SimdCompare, SimdVector,
    INF_BITS,
};
use crate::simd::vector::{
    impl_arith_ops, impl_gather_scatter, impl_simd_compare, impl_vector_common,
};

/// `B::LANES` lanes of `f32`.
///
/// # Examples
///
/// ```rust
/// use simdtier::simd::{scalar::Scalar, Float32};
///
/// let x = Float32::<Scalar>::from_slice(&[1.0, -0.0, 0.0, -2.0]);
/// let y = 1.0 / x;
/// assert_eq!(y.to_vec(), vec![1.0, f32::NEG_INFINITY, f32::INFINITY, -0.5]);
/// assert_eq!(y.is_inf().count(), 2);
/// ```
#[repr(transparent)]
pub struct Float32<B: Backend> {
    pub(crate) elements: B::F32,
}

impl_vector_common!(Float32, f32, F32, FloatLanes, "Float32");
impl_arith_ops!(Float32, f32, F32, FloatLanes);
impl_gather_scatter!(Float32, f32, F32);
impl_simd_compare!(Float32, f32);

impl<B: Backend> Float32<B> {
    /// `self < rhs ? self : rhs` per lane, so a NaN in either operand or a
    /// pair of zeros yields `rhs`.
    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        Self::from_raw(self.elements.min(rhs.elements))
    }

    /// `self > rhs ? self : rhs` per lane.
    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        Self::from_raw(self.elements.max(rhs.elements))
    }

    /// Clears the sign bit.
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self::from_raw(self.elements.abs())
    }

    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self::from_raw(self.elements.sqrt())
    }

    /// Approximate `1 / sqrt(x)`. The SSE and AVX instructions have about
    /// 12 bits of relative accuracy; the Scalar tier is exact.
    #[inline(always)]
    pub fn rsqrt(self) -> Self {
        Self::from_raw(self.elements.rsqrt())
    }

    /// Round half to even.
    #[inline(always)]
    pub fn round(self) -> Self {
        Self::from_raw(self.elements.round())
    }

    #[inline(always)]
    pub fn floor(self) -> Self {
        Self::from_raw(self.elements.floor())
    }

    #[inline(always)]
    pub fn ceil(self) -> Self {
        Self::from_raw(self.elements.ceil())
    }

    #[inline(always)]
    pub fn ln(self) -> Self {
        Self::from_raw(self.elements.ln())
    }

    #[inline(always)]
    pub fn powi(self, exp: i32) -> Self {
        Self::from_raw(self.elements.powi(exp))
    }

    /// Lanes holding `+inf` or `-inf`.
    #[inline(always)]
    pub fn is_inf(self) -> Mask32<B> {
        let magnitude = self.elements.to_bits().clear_sign();
        Mask32::from_raw(magnitude.cmp_eq(B::I32::splat(INF_BITS)))
    }

    /// Lanes that are neither infinite nor NaN.
    #[inline(always)]
    pub fn is_finite(self) -> Mask32<B> {
        let magnitude = self.elements.to_bits().clear_sign();
        Mask32::from_raw(magnitude.cmp_lt(B::I32::splat(INF_BITS)))
    }

    /// Lanes holding NaN, found as the lanes unequal to themselves.
    #[inline(always)]
    pub fn is_nan(self) -> Mask32<B> {
        Mask32::from_raw(self.elements.cmp_ne(self.elements))
    }

    /// One bit per lane, set when the sign bit is set (including `-0.0`
    /// and negative NaN). Lane 0 is bit 0.
    #[inline(always)]
    pub fn sign_bits(self) -> u32 {
        self.elements.to_bits().sign_bits()
    }

    /// Keeps only the sign bit of every lane: `-0.0` for negative lanes,
    /// `0.0` otherwise.
    #[inline(always)]
    pub fn sign(self) -> Self {
        Self::from_raw(B::F32::from_bits(self.elements.to_bits().sign()))
    }

    #[inline(always)]
    fn map_bits(self, f: impl Fn(B::I32) -> B::I32) -> Self {
        Self::from_raw(B::F32::from_bits(f(self.elements.to_bits())))
    }
}

impl<B: Backend> Neg for Float32<B> {
    type Output = Self;

    /// Flips the sign bit, so `-(0.0)` is `-0.0`.
    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_raw(self.elements.neg())
    }
}

impl<B: Backend> Not for Float32<B> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        self.map_bits(IntLanes::not)
    }
}

macro_rules! impl_bit_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $lanes_fn:ident) => {
        impl<B: Backend> $op for Float32<B> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                let rhs = rhs.elements.to_bits();
                self.map_bits(|bits| bits.$lanes_fn(rhs))
            }
        }

        impl<B: Backend> $assign for Float32<B> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = <Self as $op>::$method(*self, rhs);
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, BitAndAssign, bitand_assign, and);
impl_bit_op!(BitOr, bitor, BitOrAssign, bitor_assign, or);
impl_bit_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, xor);

// NaN compares unequal to everything; `simd_ne` is the unordered compare.
impl<B: Backend> SimdCompare for Float32<B> {
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

impl<B: Backend> PartialEq for Float32<B> {
    /// IEEE equality in every lane: a NaN lane makes the vectors unequal,
    /// `0.0 == -0.0`.
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.elements.cmp_eq(other.elements).sign_bits() == full_bitmask(B::LANES)
    }
}
