//! Backend dispatch traits.
//!
//! Every backend provides raw lane storage for `i32` and `f32` and
//! implements [`IntLanes`] / [`FloatLanes`] on it. Each method is a pure
//! function from lane storage to lane storage. Default bodies are the
//! fallback emulation; a backend overrides a method when its instruction
//! set has a native form, so the highest available specialisation wins at
//! compile time and nothing is dispatched at run time.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::simd::tier::Tier;

/// Largest lane count of any backend.
pub const MAX_LANES: usize = 8;

/// Only the sign bit of an `f32`/`i32` lane.
pub(crate) const SIGN_MASK: i32 = i32::MIN;

/// Every bit except the sign bit.
pub(crate) const ABS_MASK: i32 = i32::MAX;

/// Exponent all ones, mantissa zero: the bit pattern of `f32::INFINITY`.
pub(crate) const INF_BITS: i32 = 0x7F80_0000;

/// A lane that is `true` in a mask.
pub(crate) const TRUE_BITS: i32 = -1;

/// Scalar types that can live in a lane.
pub trait LaneElement:
    Pod + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

impl LaneElement for i32 {}
impl LaneElement for f32 {}

/// Stack buffer large enough for the lanes of any backend, aligned for
/// aligned loads and stores of the widest one.
#[derive(Copy, Clone, Debug)]
#[repr(C, align(32))]
pub struct LaneBuffer<T: LaneElement>(pub [T; MAX_LANES]);

impl<T: LaneElement> LaneBuffer<T> {
    #[inline(always)]
    pub fn zeroed() -> Self {
        Self([T::zeroed(); MAX_LANES])
    }
}

/// Raw lane storage of one backend, shared by integer and float lanes.
pub trait RawLanes: Copy + Send + Sync + 'static {
    type Elem: LaneElement;

    const LANES: usize;

    fn zero() -> Self;

    fn splat(value: Self::Elem) -> Self;

    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANES` elements.
    unsafe fn load_unaligned(ptr: *const Self::Elem) -> Self;

    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANES` elements and aligned to
    /// `LANES * 4` bytes.
    unsafe fn load_aligned(ptr: *const Self::Elem) -> Self;

    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANES` elements.
    unsafe fn store_unaligned(self, ptr: *mut Self::Elem);

    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANES` elements and aligned to
    /// `LANES * 4` bytes.
    unsafe fn store_aligned(self, ptr: *mut Self::Elem);

    /// Non-temporal store. Falls back to a regular aligned store.
    ///
    /// # Safety
    ///
    /// Same contract as [`RawLanes::store_aligned`].
    #[inline(always)]
    unsafe fn stream(self, ptr: *mut Self::Elem) {
        self.store_aligned(ptr)
    }

    /// Loads `min(n, LANES)` elements and zero-fills the other lanes.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `min(n, LANES)` elements. Nothing past
    /// that is read.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const Self::Elem, n: usize) -> Self {
        let n = n.min(Self::LANES);
        let mut buffer = LaneBuffer::<Self::Elem>::zeroed();
        std::ptr::copy_nonoverlapping(ptr, buffer.0.as_mut_ptr(), n);
        Self::from_buffer(&buffer)
    }

    /// Stores the first `min(n, LANES)` lanes and leaves the rest of `ptr`
    /// untouched.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `min(n, LANES)` elements.
    #[inline(always)]
    unsafe fn store_partial(self, ptr: *mut Self::Elem, n: usize) {
        let n = n.min(Self::LANES);
        let buffer = self.to_buffer();
        std::ptr::copy_nonoverlapping(buffer.0.as_ptr(), ptr, n);
    }

    #[inline(always)]
    fn to_buffer(self) -> LaneBuffer<Self::Elem> {
        let mut buffer = LaneBuffer::<Self::Elem>::zeroed();
        // SAFETY: the buffer holds MAX_LANES >= LANES elements and is 32-byte aligned.
        unsafe { self.store_aligned(buffer.0.as_mut_ptr()) };
        buffer
    }

    #[inline(always)]
    fn from_buffer(buffer: &LaneBuffer<Self::Elem>) -> Self {
        // SAFETY: see `to_buffer`.
        unsafe { Self::load_aligned(buffer.0.as_ptr()) }
    }

    /// Reads lane `index`. The caller has checked `index < LANES`.
    #[inline(always)]
    fn extract(self, index: usize) -> Self::Elem {
        debug_assert!(index < Self::LANES, "Lane index must be < {}", Self::LANES);
        self.to_buffer().0[index]
    }

    /// Replaces lane `index`. The caller has checked `index < LANES`.
    #[inline(always)]
    fn insert(self, index: usize, value: Self::Elem) -> Self {
        debug_assert!(index < Self::LANES, "Lane index must be < {}", Self::LANES);
        let mut buffer = self.to_buffer();
        buffer.0[index] = value;
        Self::from_buffer(&buffer)
    }

    /// Lane `i` of the result is lane `(i + n) % LANES` of `self`.
    #[inline(always)]
    fn rotate_lanes(self, n: usize) -> Self {
        let n = n % Self::LANES;
        let source = self.to_buffer();
        let mut buffer = LaneBuffer::<Self::Elem>::zeroed();
        for i in 0..Self::LANES {
            buffer.0[i] = source.0[(i + n) % Self::LANES];
        }
        Self::from_buffer(&buffer)
    }

    /// Lane `i` of the result is lane `i + n` of `self`, or zero past the end.
    #[inline(always)]
    fn shift_lanes(self, n: usize) -> Self {
        let source = self.to_buffer();
        let mut buffer = LaneBuffer::<Self::Elem>::zeroed();
        for i in 0..Self::LANES.saturating_sub(n) {
            buffer.0[i] = source.0[i + n];
        }
        Self::from_buffer(&buffer)
    }

    /// Applies `f` to every lane, one lane at a time.
    #[inline(always)]
    fn map(self, f: impl Fn(Self::Elem) -> Self::Elem) -> Self {
        let mut buffer = self.to_buffer();
        for lane in buffer.0.iter_mut().take(Self::LANES) {
            *lane = f(*lane);
        }
        Self::from_buffer(&buffer)
    }

    /// Applies `f` lane by lane to `self` and `rhs`.
    #[inline(always)]
    fn zip_map(self, rhs: Self, f: impl Fn(Self::Elem, Self::Elem) -> Self::Elem) -> Self {
        let mut buffer = self.to_buffer();
        let rhs = rhs.to_buffer();
        for (lane, other) in buffer.0.iter_mut().zip(rhs.0).take(Self::LANES) {
            *lane = f(*lane, other);
        }
        Self::from_buffer(&buffer)
    }
}

/// Operations on 32-bit integer lanes.
///
/// Comparison results are masks: each lane is `0` or `-1`.
pub trait IntLanes: RawLanes<Elem = i32> {
    fn add(self, rhs: Self) -> Self;

    fn sub(self, rhs: Self) -> Self;

    /// Wrapping multiply, lane by lane when there is no native instruction.
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip_map(rhs, i32::wrapping_mul)
    }

    /// Truncating, wrapping division. No tier has a vector form.
    ///
    /// # Panics
    ///
    /// Panics if any lane of `rhs` is zero.
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip_map(rhs, i32::wrapping_div)
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self::zero().sub(self)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self::select(self.cmp_gt(rhs), rhs, self)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self::select(self.cmp_gt(rhs), self, rhs)
    }

    /// Clears the sign bit of every lane.
    #[inline(always)]
    fn clear_sign(self) -> Self {
        self.and(Self::splat(ABS_MASK))
    }

    /// Two's-complement absolute value; `i32::MIN` stays `i32::MIN`.
    #[inline(always)]
    fn wrapping_abs(self) -> Self {
        let sign = self.shr(31);
        self.xor(sign).sub(sign)
    }

    fn and(self, rhs: Self) -> Self;

    fn or(self, rhs: Self) -> Self;

    fn xor(self, rhs: Self) -> Self;

    /// `!self & rhs`
    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        self.not().and(rhs)
    }

    /// No tier has a bitwise not; XOR with all ones.
    #[inline(always)]
    fn not(self) -> Self {
        self.xor(Self::splat(TRUE_BITS))
    }

    /// Logical shift left. Counts of 32 or more clear the lane.
    fn shl(self, count: u32) -> Self;

    /// Arithmetic shift right. Counts of 32 or more fill the lane with its sign.
    fn shr(self, count: u32) -> Self;

    fn cmp_eq(self, rhs: Self) -> Self;

    fn cmp_gt(self, rhs: Self) -> Self;

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        rhs.cmp_gt(self)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self {
        self.cmp_eq(rhs).not()
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        self.cmp_gt(rhs).not()
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        self.cmp_lt(rhs).not()
    }

    /// Lane `i` is `a[i]` where `mask[i]` is all ones, else `b[i]`.
    #[inline(always)]
    fn select(mask: Self, a: Self, b: Self) -> Self {
        mask.and(a).or(mask.andnot(b))
    }

    /// One bit per lane, set when the lane's top bit is set.
    fn sign_bits(self) -> u32;

    /// Keeps only the sign bit of every lane.
    #[inline(always)]
    fn sign(self) -> Self {
        self.and(Self::splat(SIGN_MASK))
    }

    /// `start, start + 1, ...` with wrapping.
    #[inline(always)]
    fn iota(start: i32) -> Self {
        let mut buffer = LaneBuffer::<i32>::zeroed();
        for (i, lane) in buffer.0.iter_mut().enumerate().take(Self::LANES) {
            *lane = start.wrapping_add(i as i32);
        }
        Self::from_buffer(&buffer)
    }

    /// Mask with only lane `index` set.
    #[inline(always)]
    fn lane_mask(index: usize) -> Self {
        Self::iota(0).cmp_eq(Self::splat(index as i32))
    }
}

/// Operations on single-precision float lanes.
///
/// Masks are integer lanes ([`FloatLanes::Bits`]) holding `0` or `-1`.
pub trait FloatLanes: RawLanes<Elem = f32> {
    type Bits: IntLanes;

    /// Reinterprets the lanes as integers.
    fn to_bits(self) -> Self::Bits;

    /// Reinterprets integer lanes as floats.
    fn from_bits(bits: Self::Bits) -> Self;

    /// Numeric conversion, rounding to nearest.
    fn from_i32(value: Self::Bits) -> Self;

    /// Numeric conversion, truncating toward zero. NaN and out-of-range
    /// lanes become `i32::MIN`.
    fn to_i32(self) -> Self::Bits;

    /// Numeric conversion, rounding half to even. NaN and out-of-range
    /// lanes become `i32::MIN`.
    fn to_i32_nearest(self) -> Self::Bits;

    fn add(self, rhs: Self) -> Self;

    fn sub(self, rhs: Self) -> Self;

    fn mul(self, rhs: Self) -> Self;

    fn div(self, rhs: Self) -> Self;

    /// `self < rhs ? self : rhs`, so NaN or equal zeros yield `rhs`.
    fn min(self, rhs: Self) -> Self;

    /// `self > rhs ? self : rhs`, so NaN or equal zeros yield `rhs`.
    fn max(self, rhs: Self) -> Self;

    fn sqrt(self) -> Self;

    /// Approximate reciprocal square root where the tier has one.
    fn rsqrt(self) -> Self;

    /// Flips the sign bit.
    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_bits(self.to_bits().xor(Self::Bits::splat(SIGN_MASK)))
    }

    /// Clears the sign bit.
    #[inline(always)]
    fn abs(self) -> Self {
        Self::from_bits(self.to_bits().and(Self::Bits::splat(ABS_MASK)))
    }

    /// Round half to even.
    ///
    /// Adding and removing 2^23 drops the fraction bits under the default
    /// rounding mode. Magnitudes at or above 2^23 are already integral.
    #[inline(always)]
    fn round(self) -> Self {
        let magic = Self::splat(8_388_608.0);
        let sign = self.to_bits().and(Self::Bits::splat(SIGN_MASK));
        let magnitude = self.abs();
        let rounded = magnitude.add(magic).sub(magic);
        let rounded = Self::from_bits(rounded.to_bits().or(sign));
        Self::select(magnitude.cmp_lt(magic), rounded, self)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        let rounded = self.round();
        let overshoot = rounded.cmp_gt(self);
        rounded.sub(Self::from_bits(overshoot.and(Self::splat(1.0).to_bits())))
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        let rounded = self.round();
        let undershoot = rounded.cmp_lt(self);
        let raised = rounded.sub(Self::from_bits(undershoot.and(Self::splat(-1.0).to_bits())));
        // ceil(-0.5) is -0.0, and the result never changes sign.
        let sign = self.to_bits().and(Self::Bits::splat(SIGN_MASK));
        Self::from_bits(raised.to_bits().or(sign))
    }

    fn cmp_eq(self, rhs: Self) -> Self::Bits;

    /// Unordered: true when either lane is NaN.
    fn cmp_ne(self, rhs: Self) -> Self::Bits;

    fn cmp_lt(self, rhs: Self) -> Self::Bits;

    fn cmp_le(self, rhs: Self) -> Self::Bits;

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self::Bits {
        rhs.cmp_lt(self)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self::Bits {
        rhs.cmp_le(self)
    }

    #[inline(always)]
    fn select(mask: Self::Bits, a: Self, b: Self) -> Self {
        Self::from_bits(Self::Bits::select(mask, a.to_bits(), b.to_bits()))
    }

    /// Natural logarithm, one lane at a time.
    #[inline(always)]
    fn ln(self) -> Self {
        self.map(f32::ln)
    }

    /// Integer power, one lane at a time.
    #[inline(always)]
    fn powi(self, exp: i32) -> Self {
        self.map(|x| x.powi(exp))
    }
}

/// A backend: one family of lane storage plus its tier.
///
/// Implemented by the zero-sized markers [`Scalar`](crate::simd::scalar::Scalar),
/// `Sse` and `Avx`. Vector types are generic over it, so every operation is
/// resolved by monomorphisation.
pub trait Backend:
    Copy + Clone + Default + fmt::Debug + PartialEq + Eq + Send + Sync + 'static
{
    /// Highest tier of this family enabled at compile time.
    const TIER: Tier;

    const LANES: usize;

    type I32: IntLanes;

    type F32: FloatLanes<Bits = Self::I32>;
}

/// Alignment check for the pointer-based loads and stores.
pub trait Alignment<T> {
    /// `true` if `ptr` meets the natural alignment of the vector type.
    fn is_aligned(ptr: *const T) -> bool;
}

/// Lanewise comparisons producing a mask.
///
/// `PartialOrd` can only return `bool`, so vectors compare through this
/// trait. Implemented against another vector and against a scalar, which is
/// broadcast first.
pub trait SimdCompare<Rhs = Self> {
    type Mask;

    fn simd_eq(self, rhs: Rhs) -> Self::Mask;

    fn simd_ne(self, rhs: Rhs) -> Self::Mask;

    fn simd_lt(self, rhs: Rhs) -> Self::Mask;

    fn simd_le(self, rhs: Rhs) -> Self::Mask;

    fn simd_gt(self, rhs: Rhs) -> Self::Mask;

    fn simd_ge(self, rhs: Rhs) -> Self::Mask;
}

/// Vector types usable by the slice kernels.
pub trait SimdVector: Copy {
    type Elem: LaneElement;

    const LANES: usize;

    fn splat(value: Self::Elem) -> Self;

    /// Loads `min(slice.len(), LANES)` elements, zero-filling the rest.
    fn from_slice(slice: &[Self::Elem]) -> Self;

    /// Stores `min(slice.len(), LANES)` lanes.
    fn write_to_slice(&self, slice: &mut [Self::Elem]);
}

/// Elementwise addition of two slices.
///
/// `simd_add` runs on the vectors of the active tier, `par_simd_add` splits
/// the work across the rayon pool and `scalar_add` is the plain loop the
/// other two are checked against.
pub trait SimdAdd<Rhs = Self> {
    type Output;

    fn simd_add(self, rhs: Rhs) -> Self::Output;
    fn par_simd_add(self, rhs: Rhs) -> Self::Output;
    fn scalar_add(self, rhs: Rhs) -> Self::Output;
}

pub trait SimdSub<Rhs = Self> {
    type Output;

    fn simd_sub(self, rhs: Rhs) -> Self::Output;
    fn par_simd_sub(self, rhs: Rhs) -> Self::Output;
    fn scalar_sub(self, rhs: Rhs) -> Self::Output;
}

pub trait SimdMul<Rhs = Self> {
    type Output;

    fn simd_mul(self, rhs: Rhs) -> Self::Output;
    fn par_simd_mul(self, rhs: Rhs) -> Self::Output;
    fn scalar_mul(self, rhs: Rhs) -> Self::Output;
}

pub trait SimdDiv<Rhs = Self> {
    type Output;

    fn simd_div(self, rhs: Rhs) -> Self::Output;
    fn par_simd_div(self, rhs: Rhs) -> Self::Output;
    fn scalar_div(self, rhs: Rhs) -> Self::Output;
}

pub trait SimdAbs {
    type Output;

    fn simd_abs(self) -> Self::Output;
    fn par_simd_abs(self) -> Self::Output;
    fn scalar_abs(self) -> Self::Output;
}
