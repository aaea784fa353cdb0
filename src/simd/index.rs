//! Index vector: `i32` lanes used as offsets by `gather` and `scatter`.
//!
//! Shares its layout with [`Int32`], so conversion between the two is free.
//! Comparisons against another index vector or a bare `i32` both produce a
//! [`Mask32`].

use crate::error::{cast_error, check_lane, Result};
use crate::simd::int::Int32;
use crate::simd::mask::{full_bitmask, Mask32};
use crate::simd::traits::{Alignment, Backend, IntLanes, RawLanes, SimdCompare, SimdVector};
use crate::simd::vector::{impl_arith_ops, impl_simd_compare, impl_vector_common};

/// `B::LANES` lane offsets.
///
/// # Examples
///
/// ```rust
/// use simdtier::simd::{scalar::Scalar, Float32, Index32};
///
/// let table: Vec<f32> = (0..16).map(|i| i as f32 * 0.5).collect();
/// let stride = Index32::<Scalar>::iota(0) * 4 + 1;
/// let picked = Float32::gather(&table, stride);
/// assert_eq!(picked.to_vec(), vec![0.5, 2.5, 4.5, 6.5]);
/// ```
#[repr(transparent)]
pub struct Index32<B: Backend> {
    pub(crate) elements: B::I32,
}

impl_vector_common!(Index32, i32, I32, IntLanes, "Index32");
impl_arith_ops!(Index32, i32, I32, IntLanes);
impl_simd_compare!(Index32, i32);

impl<B: Backend> Index32<B> {
    /// Offsets `start, start + 1, ...`.
    #[inline(always)]
    pub fn iota(start: i32) -> Self {
        Self::from_raw(B::I32::iota(start))
    }
}

impl<B: Backend> SimdCompare for Index32<B> {
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

impl<B: Backend> PartialEq for Index32<B> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.elements.cmp_eq(other.elements).sign_bits() == full_bitmask(B::LANES)
    }
}

impl<B: Backend> Eq for Index32<B> {}

impl<B: Backend> From<Int32<B>> for Index32<B> {
    #[inline(always)]
    fn from(value: Int32<B>) -> Self {
        Self::from_raw(value.elements)
    }
}

impl<B: Backend> From<Index32<B>> for Int32<B> {
    #[inline(always)]
    fn from(value: Index32<B>) -> Self {
        Int32::from_raw(value.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::scalar::Scalar;

    type X = Index32<Scalar>;

    #[test]
    fn test_arithmetic_with_scalars_on_both_sides() {
        let x = X::iota(2);
        assert_eq!((x * 3).to_vec(), vec![6, 9, 12, 15]);
        assert_eq!((100 - x).to_vec(), vec![98, 97, 96, 95]);
        assert_eq!((x / X::splat(2)).to_vec(), vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_compare_against_scalar_and_vector() {
        let x = X::from_slice(&[0, 5, 2, 9]);
        assert_eq!(x.simd_lt(3).bitmask(), 0b0101);
        assert_eq!(x.simd_ge(X::splat(5)).bitmask(), 0b1010);
        assert_eq!(x.simd_eq(x).count(), 4);
    }

    #[test]
    fn test_int_round_trip_keeps_bits() {
        let ints = Int32::<Scalar>::from_slice(&[-1, i32::MIN, 7, 0]);
        let x = X::from(ints);
        assert_eq!(x.to_vec(), ints.to_vec());
        assert_eq!(Int32::from(x), ints);
    }
}
