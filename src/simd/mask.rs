//! Mask vector: one boolean per lane.
//!
//! A lane is stored as `0` (false) or `-1` (all bits set, true) in the
//! integer lane storage of the backend, which is what the compare
//! instructions produce and what `select` consumes. The combinators `&`,
//! `|`, `^` and `!` work lane by lane; [`Mask32::all`] and [`Mask32::any`]
//! reduce to a single `bool`.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::error::{cast_error, check_lane, Result};
use crate::simd::float::Float32;
use crate::simd::index::Index32;
use crate::simd::int::Int32;
use crate::simd::traits::{Backend, FloatLanes, IntLanes, LaneBuffer, RawLanes, TRUE_BITS};

/// Bitmask with one bit set for each of `lanes` lanes.
#[inline(always)]
pub(crate) const fn full_bitmask(lanes: usize) -> u32 {
    (1u32 << lanes) - 1
}

/// `B::LANES` boolean lanes.
#[repr(transparent)]
pub struct Mask32<B: Backend> {
    pub(crate) bits: B::I32,
}

impl<B: Backend> Clone for Mask32<B> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Backend> Copy for Mask32<B> {}

impl<B: Backend> Mask32<B> {
    pub const LANES: usize = B::LANES;

    /// Wraps compare output. Every lane must be `0` or `-1`.
    #[inline(always)]
    pub fn from_raw(bits: B::I32) -> Self {
        Self { bits }
    }

    #[inline(always)]
    pub fn into_raw(self) -> B::I32 {
        self.bits
    }

    /// Every lane set to `value`.
    #[inline(always)]
    pub fn new(value: bool) -> Self {
        Self::from_raw(B::I32::splat(-(value as i32)))
    }

    /// Lane `i` is `values[i]`; lanes past the end of `values` are false.
    pub fn from_bools(values: &[bool]) -> Self {
        let mut buffer = LaneBuffer::<i32>::zeroed();
        for (lane, &value) in buffer.0.iter_mut().zip(values).take(B::LANES) {
            *lane = -(value as i32);
        }
        Self::from_raw(B::I32::from_buffer(&buffer))
    }

    /// True in every lane that is not zero.
    #[inline(always)]
    pub fn from_int(value: Int32<B>) -> Self {
        Self::from_raw(value.elements.cmp_ne(B::I32::zero()))
    }

    /// True in every lane that does not compare equal to `0.0`. NaN lanes
    /// are true, `-0.0` lanes are false.
    #[inline(always)]
    pub fn from_float(value: Float32<B>) -> Self {
        Self::from_raw(value.elements.cmp_ne(B::F32::zero()))
    }

    /// One bit per lane, lane 0 in bit 0.
    #[inline(always)]
    pub fn bitmask(self) -> u32 {
        self.bits.sign_bits()
    }

    /// Number of true lanes, in `0..=LANES`.
    #[inline(always)]
    pub fn count(self) -> usize {
        self.bitmask().count_ones() as usize
    }

    /// `true` when every lane is true.
    #[inline(always)]
    pub fn all(self) -> bool {
        self.bitmask() == full_bitmask(B::LANES)
    }

    /// `true` when at least one lane is true.
    #[inline(always)]
    pub fn any(self) -> bool {
        self.bitmask() != 0
    }

    #[inline(always)]
    pub fn none(self) -> bool {
        !self.any()
    }

    /// Lane `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`.
    #[inline(always)]
    pub fn lane(self, index: usize) -> bool {
        assert!(
            index < B::LANES,
            "Lane index {} out of range for {} lanes",
            index,
            B::LANES
        );
        self.bitmask() & (1 << index) != 0
    }

    #[inline(always)]
    pub fn extract(self, index: usize) -> Result<bool> {
        check_lane("extract", index, B::LANES)?;
        Ok(self.bitmask() & (1 << index) != 0)
    }

    /// `a` where the mask is true, else `b`.
    #[inline(always)]
    pub fn select<T: Select<B>>(self, a: T, b: T) -> T {
        T::select(self, a, b)
    }

    pub fn to_backend<C: Backend>(self) -> Result<Mask32<C>> {
        if C::LANES != B::LANES {
            return Err(cast_error(
                format!("Mask32<{}>", B::TIER),
                format!("Mask32<{}>", C::TIER),
                format!("lane counts differ ({} vs {})", B::LANES, C::LANES),
            ));
        }
        Ok(Mask32::from_raw(C::I32::from_buffer(&self.bits.to_buffer())))
    }
}

/// Vector types that can be blended lane by lane under a [`Mask32`].
pub trait Select<B: Backend>: Copy {
    fn select(mask: Mask32<B>, a: Self, b: Self) -> Self;
}

impl<B: Backend> Select<B> for Int32<B> {
    #[inline(always)]
    fn select(mask: Mask32<B>, a: Self, b: Self) -> Self {
        Int32::from_raw(B::I32::select(mask.bits, a.elements, b.elements))
    }
}

impl<B: Backend> Select<B> for Float32<B> {
    #[inline(always)]
    fn select(mask: Mask32<B>, a: Self, b: Self) -> Self {
        Float32::from_raw(B::F32::select(mask.bits, a.elements, b.elements))
    }
}

impl<B: Backend> Select<B> for Index32<B> {
    #[inline(always)]
    fn select(mask: Mask32<B>, a: Self, b: Self) -> Self {
        Index32::from_raw(B::I32::select(mask.bits, a.elements, b.elements))
    }
}

impl<B: Backend> Select<B> for Mask32<B> {
    #[inline(always)]
    fn select(mask: Mask32<B>, a: Self, b: Self) -> Self {
        Mask32::from_raw(B::I32::select(mask.bits, a.bits, b.bits))
    }
}

/// Lane `i` is `a[i]` where `mask[i]` is true, else `b[i]`. Branch free.
#[inline(always)]
pub fn select<B: Backend, T: Select<B>>(mask: Mask32<B>, a: T, b: T) -> T {
    T::select(mask, a, b)
}

impl<B: Backend> Default for Mask32<B> {
    /// All lanes false.
    #[inline(always)]
    fn default() -> Self {
        Self::new(false)
    }
}

impl<B: Backend> From<bool> for Mask32<B> {
    #[inline(always)]
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl<B: Backend> BitAnd for Mask32<B> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Self::from_raw(self.bits.and(rhs.bits))
    }
}

impl<B: Backend> BitOr for Mask32<B> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self::from_raw(self.bits.or(rhs.bits))
    }
}

impl<B: Backend> BitXor for Mask32<B> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Self::from_raw(self.bits.xor(rhs.bits))
    }
}

impl<B: Backend> Not for Mask32<B> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self::from_raw(self.bits.xor(B::I32::splat(TRUE_BITS)))
    }
}

impl<B: Backend> BitAndAssign for Mask32<B> {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl<B: Backend> BitOrAssign for Mask32<B> {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl<B: Backend> BitXorAssign for Mask32<B> {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl<B: Backend> PartialEq for Mask32<B> {
    /// `true` when every lane matches.
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.bitmask() == other.bitmask()
    }
}

impl<B: Backend> Eq for Mask32<B> {}

impl<B: Backend> fmt::Display for Mask32<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bitmask = self.bitmask();
        write!(f, "[")?;
        for i in 0..B::LANES {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", bitmask & (1 << i) != 0)?;
        }
        write!(f, "]")
    }
}

impl<B: Backend> fmt::Debug for Mask32<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask32<{}>{}", B::TIER, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::scalar::Scalar;

    type M = Mask32<Scalar>;

    #[test]
    fn test_lanes_are_all_or_nothing() {
        let lanes = M::from_bools(&[true, false, true]).into_raw().0;
        assert_eq!(lanes, [-1, 0, -1, 0]);
        assert_eq!(M::new(true).into_raw().0, [-1; 4]);
    }

    #[test]
    fn test_reductions() {
        let mixed = M::from_bools(&[false, false, true, false]);
        assert_eq!((M::new(false).count(), M::new(true).count(), mixed.count()), (0, 4, 1));
        assert!(!mixed.all() && mixed.any() && !mixed.none());
        assert!(M::default().none());
    }

    #[test]
    fn test_combinators_are_lanewise() {
        let a = M::from_bools(&[true, true, false, false]);
        let b = M::from_bools(&[true, false, true, false]);
        assert_eq!((a & b).bitmask(), 0b0001);
        assert_eq!((a | b).bitmask(), 0b0111);
        assert_eq!((a ^ b).bitmask(), 0b0110);
        assert_eq!((!a).bitmask(), 0b1100);
    }

    #[test]
    fn test_from_vectors_treats_nonzero_as_true() {
        let ints = Int32::<Scalar>::from_slice(&[0, 7, -1, 0]);
        assert_eq!(M::from_int(ints).bitmask(), 0b0110);

        let floats = Float32::<Scalar>::from_slice(&[-0.0, f32::NAN, 0.5, 0.0]);
        assert_eq!(M::from_float(floats).bitmask(), 0b0110);
    }

    #[test]
    fn test_display() {
        let mask = M::from_bools(&[true, false, false, true]);
        assert_eq!(mask.to_string(), "[true, false, false, true]");
        assert_eq!(format!("{mask:?}"), "Mask32<Scalar>[true, false, false, true]");
    }

    #[test]
    fn test_lane_access() {
        let mask = M::from_bools(&[false, true]);
        assert!(mask.lane(1));
        assert_eq!(mask.extract(0), Ok(false));
        assert!(mask.extract(4).is_err());
    }
}
