//! Conversions between vector types of one backend.
//!
//! Two kinds of conversion exist and are never mixed up:
//!
//! - [`type_cast`] reinterprets the lane bits. `1.0f32` becomes
//!   `0x3F80_0000`. Useful for bit tricks on floats.
//! - [`value_cast`] converts the numbers. `1.9f32` becomes `1`, truncating
//!   toward zero; NaN and out-of-range lanes become `i32::MIN`. Int to
//!   float rounds to nearest, and so does float to [`Index32`].
//!
//! Both are resolved at compile time: a pair of types without an
//! implementation simply does not compile. Moving lanes between backends
//! is `to_backend`, which returns an error when the lane counts differ.

use crate::simd::float::Float32;
use crate::simd::index::Index32;
use crate::simd::int::Int32;
use crate::simd::mask::Mask32;
use crate::simd::traits::{Backend, FloatLanes};

/// Bit reinterpretation into `To`.
pub trait TypeCast<To> {
    fn type_cast(self) -> To;
}

/// Numeric conversion into `To`.
pub trait ValueCast<To> {
    fn value_cast(self) -> To;
}

/// Reinterprets the bits of `from` as `To`.
///
/// # Examples
///
/// ```rust
/// use simdtier::simd::{cast::type_cast, scalar::Scalar, Float32, Int32};
///
/// let bits: Int32<Scalar> = type_cast(Float32::<Scalar>::splat(1.0));
/// assert_eq!(bits.lane(0), 0x3F80_0000);
/// ```
#[inline(always)]
pub fn type_cast<To, Src: TypeCast<To>>(from: Src) -> To {
    from.type_cast()
}

/// Converts the values of `from` to `To`.
///
/// # Examples
///
/// ```rust
/// use simdtier::simd::{cast::value_cast, scalar::Scalar, Float32, Int32};
///
/// let ints: Int32<Scalar> = value_cast(Float32::<Scalar>::from_slice(&[1.9, -1.9, 2.5, f32::NAN]));
/// assert_eq!(ints.to_vec(), vec![1, -1, 2, i32::MIN]);
/// ```
#[inline(always)]
pub fn value_cast<To, Src: ValueCast<To>>(from: Src) -> To {
    from.value_cast()
}

impl<T> TypeCast<T> for T {
    #[inline(always)]
    fn type_cast(self) -> T {
        self
    }
}

impl<T> ValueCast<T> for T {
    #[inline(always)]
    fn value_cast(self) -> T {
        self
    }
}

impl<B: Backend> TypeCast<Int32<B>> for Float32<B> {
    #[inline(always)]
    fn type_cast(self) -> Int32<B> {
        Int32::from_raw(self.elements.to_bits())
    }
}

impl<B: Backend> TypeCast<Float32<B>> for Int32<B> {
    #[inline(always)]
    fn type_cast(self) -> Float32<B> {
        Float32::from_raw(B::F32::from_bits(self.elements))
    }
}

impl<B: Backend> TypeCast<Index32<B>> for Float32<B> {
    #[inline(always)]
    fn type_cast(self) -> Index32<B> {
        Index32::from_raw(self.elements.to_bits())
    }
}

impl<B: Backend> TypeCast<Float32<B>> for Index32<B> {
    #[inline(always)]
    fn type_cast(self) -> Float32<B> {
        Float32::from_raw(B::F32::from_bits(self.elements))
    }
}

impl<B: Backend> TypeCast<Index32<B>> for Int32<B> {
    #[inline(always)]
    fn type_cast(self) -> Index32<B> {
        Index32::from(self)
    }
}

impl<B: Backend> TypeCast<Int32<B>> for Index32<B> {
    #[inline(always)]
    fn type_cast(self) -> Int32<B> {
        Int32::from(self)
    }
}

/// True lanes become `-1`.
impl<B: Backend> TypeCast<Int32<B>> for Mask32<B> {
    #[inline(always)]
    fn type_cast(self) -> Int32<B> {
        Int32::from_raw(self.bits)
    }
}

/// True lanes become the all-ones bit pattern, a NaN.
impl<B: Backend> TypeCast<Float32<B>> for Mask32<B> {
    #[inline(always)]
    fn type_cast(self) -> Float32<B> {
        Float32::from_raw(B::F32::from_bits(self.bits))
    }
}

impl<B: Backend> ValueCast<Int32<B>> for Float32<B> {
    #[inline(always)]
    fn value_cast(self) -> Int32<B> {
        Int32::from_raw(self.elements.to_i32())
    }
}

impl<B: Backend> ValueCast<Float32<B>> for Int32<B> {
    #[inline(always)]
    fn value_cast(self) -> Float32<B> {
        Float32::from_raw(B::F32::from_i32(self.elements))
    }
}

/// Offsets round to the nearest index, ties to even.
impl<B: Backend> ValueCast<Index32<B>> for Float32<B> {
    #[inline(always)]
    fn value_cast(self) -> Index32<B> {
        Index32::from_raw(self.elements.to_i32_nearest())
    }
}

impl<B: Backend> ValueCast<Float32<B>> for Index32<B> {
    #[inline(always)]
    fn value_cast(self) -> Float32<B> {
        Float32::from_raw(B::F32::from_i32(self.elements))
    }
}

impl<B: Backend> ValueCast<Index32<B>> for Int32<B> {
    #[inline(always)]
    fn value_cast(self) -> Index32<B> {
        Index32::from(self)
    }
}

impl<B: Backend> ValueCast<Int32<B>> for Index32<B> {
    #[inline(always)]
    fn value_cast(self) -> Int32<B> {
        Int32::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::scalar::Scalar;

    #[test]
    fn test_type_cast_is_bitwise() {
        let floats = Float32::<Scalar>::from_slice(&[1.0, -0.0, f32::INFINITY, 0.0]);
        let bits: Int32<Scalar> = type_cast(floats);
        assert_eq!(bits.to_vec(), vec![0x3F80_0000, i32::MIN, 0x7F80_0000, 0]);

        let back: Float32<Scalar> = type_cast(bits);
        assert_eq!(back.sign_bits(), floats.sign_bits());
        assert_eq!(back, floats);
    }

    #[test]
    fn test_value_cast_converts_numbers() {
        let ints = Int32::<Scalar>::from_slice(&[1, -3, 16_777_217, 0]);
        let floats: Float32<Scalar> = value_cast(ints);
        assert_eq!(floats.to_vec(), vec![1.0, -3.0, 16_777_216.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_truncation() {
        let floats = Float32::<Scalar>::from_slice(&[3.0e9, -3.0e9, -2_147_483_648.0, 2.1e9]);
        let ints: Int32<Scalar> = floats.value_cast();
        assert_eq!(ints.to_vec(), vec![i32::MIN, i32::MIN, i32::MIN, 2_100_000_000]);
    }

    #[test]
    fn test_float_to_index_rounds() {
        let floats = Float32::<Scalar>::from_slice(&[0.4, 1.5, 2.5, 2.99]);
        let indices: Index32<Scalar> = floats.value_cast();
        assert_eq!(indices.to_vec(), vec![0, 2, 2, 3]);
    }

    #[test]
    fn test_mask_type_cast() {
        let mask = Mask32::<Scalar>::from_bools(&[true, false, true, false]);
        let ints: Int32<Scalar> = mask.type_cast();
        assert_eq!(ints.to_vec(), vec![-1, 0, -1, 0]);
    }

    #[test]
    fn test_identity_casts() {
        let v = Int32::<Scalar>::iota(3);
        assert_eq!(type_cast::<Int32<Scalar>, _>(v), v);
        assert_eq!(value_cast::<Int32<Scalar>, _>(v), v);
    }
}
