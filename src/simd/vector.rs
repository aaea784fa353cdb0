//! Code shared by the value and index vector types.
//!
//! `Int32`, `Float32` and `Index32` are thin wrappers around the raw lane
//! storage of a backend. Everything that does not depend on the element
//! kind (construction, memory access, lane access, formatting) is stamped
//! out by the macros below.

/// Construction, load/store, lane access and formatting for a vector type
/// wrapping `B::$raw` lanes of `$elem`, where `$lanes` is the operation
/// trait of the raw storage.
macro_rules! impl_vector_common {
    ($vector:ident, $elem:ty, $raw:ident, $lanes:ident, $name:literal) => {
        impl<B: Backend> Clone for $vector<B> {
            #[inline(always)]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<B: Backend> Copy for $vector<B> {}

        impl<B: Backend> $vector<B> {
            /// Number of lanes.
            pub const LANES: usize = B::LANES;

            /// Wraps raw backend lanes.
            #[inline(always)]
            pub fn from_raw(elements: B::$raw) -> Self {
                Self { elements }
            }

            /// Unwraps to the raw backend lanes, e.g. to pass to intrinsics.
            #[inline(always)]
            pub fn into_raw(self) -> B::$raw {
                self.elements
            }

            /// Broadcasts `value` into every lane.
            #[inline(always)]
            pub fn splat(value: $elem) -> Self {
                Self::from_raw(<B::$raw as RawLanes>::splat(value))
            }

            /// All lanes zero.
            #[inline(always)]
            pub fn zero() -> Self {
                Self::from_raw(<B::$raw as RawLanes>::zero())
            }

            /// Loads `min(slice.len(), LANES)` elements and zero-fills the rest.
            #[inline(always)]
            pub fn from_slice(slice: &[$elem]) -> Self {
                // SAFETY: load_partial reads at most `slice.len()` elements.
                unsafe { Self::load_partial(slice.as_ptr(), slice.len()) }
            }

            /// Loads `LANES` elements, using an aligned load when `ptr` allows it.
            ///
            /// # Safety
            ///
            /// `ptr` must be valid for reading `LANES` elements.
            #[inline(always)]
            pub unsafe fn load(ptr: *const $elem) -> Self {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                if Self::is_aligned(ptr) {
                    Self::load_aligned(ptr)
                } else {
                    Self::load_unaligned(ptr)
                }
            }

            /// # Safety
            ///
            /// `ptr` must be valid for reading `LANES` elements and aligned to
            /// `LANES * 4` bytes.
            #[inline(always)]
            pub unsafe fn load_aligned(ptr: *const $elem) -> Self {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                debug_assert!(Self::is_aligned(ptr), "Pointer must be aligned");
                Self::from_raw(<B::$raw as RawLanes>::load_aligned(ptr))
            }

            /// # Safety
            ///
            /// `ptr` must be valid for reading `LANES` elements.
            #[inline(always)]
            pub unsafe fn load_unaligned(ptr: *const $elem) -> Self {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                Self::from_raw(<B::$raw as RawLanes>::load_unaligned(ptr))
            }

            /// Loads `min(n, LANES)` elements and zero-fills the remaining lanes.
            ///
            /// # Safety
            ///
            /// `ptr` must be valid for reading `min(n, LANES)` elements.
            #[inline(always)]
            pub unsafe fn load_partial(ptr: *const $elem, n: usize) -> Self {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                Self::from_raw(<B::$raw as RawLanes>::load_partial(ptr, n))
            }

            /// Stores all lanes, using an aligned store when `ptr` allows it.
            ///
            /// # Safety
            ///
            /// `ptr` must be valid for writing `LANES` elements.
            #[inline(always)]
            pub unsafe fn store_at(self, ptr: *mut $elem) {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                if Self::is_aligned(ptr) {
                    self.store_aligned_at(ptr)
                } else {
                    self.store_unaligned_at(ptr)
                }
            }

            /// # Safety
            ///
            /// `ptr` must be valid for writing `LANES` elements and aligned to
            /// `LANES * 4` bytes.
            #[inline(always)]
            pub unsafe fn store_aligned_at(self, ptr: *mut $elem) {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                debug_assert!(Self::is_aligned(ptr), "Pointer must be aligned");
                self.elements.store_aligned(ptr)
            }

            /// # Safety
            ///
            /// `ptr` must be valid for writing `LANES` elements.
            #[inline(always)]
            pub unsafe fn store_unaligned_at(self, ptr: *mut $elem) {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                self.elements.store_unaligned(ptr)
            }

            /// Writes the first `min(n, LANES)` lanes and nothing past them.
            ///
            /// # Safety
            ///
            /// `ptr` must be valid for writing `min(n, LANES)` elements.
            #[inline(always)]
            pub unsafe fn store_at_partial(self, ptr: *mut $elem, n: usize) {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                self.elements.store_partial(ptr, n)
            }

            /// Non-temporal store. Follow a batch of these with a store fence
            /// before other threads read the memory.
            ///
            /// # Safety
            ///
            /// Same contract as [`Self::store_aligned_at`].
            #[inline(always)]
            pub unsafe fn stream_at(self, ptr: *mut $elem) {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                debug_assert!(Self::is_aligned(ptr), "Pointer must be aligned");
                self.elements.stream(ptr)
            }

            /// Stores `min(slice.len(), LANES)` lanes into `slice`.
            #[inline(always)]
            pub fn write_to_slice(&self, slice: &mut [$elem]) {
                // SAFETY: store_partial writes at most `slice.len()` elements.
                unsafe { self.elements.store_partial(slice.as_mut_ptr(), slice.len()) }
            }

            pub fn to_vec(self) -> Vec<$elem> {
                self.elements.to_buffer().0[..B::LANES].to_vec()
            }

            /// Lane `index`, or [`SimdError::LaneOutOfRange`](crate::error::SimdError::LaneOutOfRange).
            #[inline(always)]
            pub fn extract(self, index: usize) -> Result<$elem> {
                check_lane("extract", index, B::LANES)?;
                Ok(self.elements.extract(index))
            }

            /// Lane `index`.
            ///
            /// # Panics
            ///
            /// Panics if `index >= LANES`.
            #[inline(always)]
            pub fn lane(self, index: usize) -> $elem {
                assert!(
                    index < B::LANES,
                    "Lane index {} out of range for {} lanes",
                    index,
                    B::LANES
                );
                self.elements.extract(index)
            }

            /// Replaces lane `index` with `value`; other lanes are unchanged.
            #[inline(always)]
            pub fn insert(&mut self, index: usize, value: $elem) -> Result<()> {
                check_lane("insert", index, B::LANES)?;
                self.elements = self.elements.insert(index, value);
                Ok(())
            }

            /// Copy of `self` with lane `index` replaced.
            ///
            /// # Panics
            ///
            /// Panics if `index >= LANES`.
            #[inline(always)]
            pub fn with_lane(self, index: usize, value: $elem) -> Self {
                assert!(
                    index < B::LANES,
                    "Lane index {} out of range for {} lanes",
                    index,
                    B::LANES
                );
                Self::from_raw(self.elements.insert(index, value))
            }

            /// Keeps the first `n` lanes and zeroes the others.
            #[inline(always)]
            pub fn cutoff(self, n: usize) -> Self {
                let n = n.min(B::LANES) as i32;
                let keep = <B::I32 as IntLanes>::iota(0).cmp_lt(<B::I32 as RawLanes>::splat(n));
                Self::from_raw(<B::$raw as $lanes>::select(
                    keep,
                    self.elements,
                    <B::$raw as RawLanes>::zero(),
                ))
            }

            /// Lane `i` of the result is lane `(i + n) % LANES` of `self`.
            #[inline(always)]
            pub fn rotate_lanes(self, n: usize) -> Self {
                Self::from_raw(self.elements.rotate_lanes(n))
            }

            /// Lane `i` of the result is lane `i + n` of `self`, zero past the end.
            #[inline(always)]
            pub fn shift_lanes(self, n: usize) -> Self {
                Self::from_raw(self.elements.shift_lanes(n))
            }

            /// Moves the lanes to another backend with the same lane count.
            pub fn to_backend<C: Backend>(self) -> Result<$vector<C>> {
                if C::LANES != B::LANES {
                    return Err(cast_error(
                        format!("{}<{}>", $name, B::TIER),
                        format!("{}<{}>", $name, C::TIER),
                        format!("lane counts differ ({} vs {})", B::LANES, C::LANES),
                    ));
                }
                let buffer = self.elements.to_buffer();
                Ok($vector::from_raw(<C::$raw as RawLanes>::from_buffer(&buffer)))
            }
        }

        impl<B: Backend> Default for $vector<B> {
            #[inline(always)]
            fn default() -> Self {
                Self::zero()
            }
        }

        impl<B: Backend> From<$elem> for $vector<B> {
            #[inline(always)]
            fn from(value: $elem) -> Self {
                Self::splat(value)
            }
        }

        impl<B: Backend> From<&[$elem]> for $vector<B> {
            #[inline(always)]
            fn from(slice: &[$elem]) -> Self {
                Self::from_slice(slice)
            }
        }

        impl<B: Backend> Alignment<$elem> for $vector<B> {
            #[inline(always)]
            fn is_aligned(ptr: *const $elem) -> bool {
                (ptr as usize) % (B::LANES * std::mem::size_of::<$elem>()) == 0
            }
        }

        impl<B: Backend> SimdVector for $vector<B> {
            type Elem = $elem;

            const LANES: usize = B::LANES;

            #[inline(always)]
            fn splat(value: $elem) -> Self {
                Self::splat(value)
            }

            #[inline(always)]
            fn from_slice(slice: &[$elem]) -> Self {
                Self::from_slice(slice)
            }

            #[inline(always)]
            fn write_to_slice(&self, slice: &mut [$elem]) {
                Self::write_to_slice(self, slice)
            }
        }

        impl<B: Backend> std::fmt::Display for $vector<B> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let buffer = self.elements.to_buffer();
                write!(f, "[")?;
                for (i, lane) in buffer.0[..B::LANES].iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", lane)?;
                }
                write!(f, "]")
            }
        }

        impl<B: Backend> std::fmt::Debug for $vector<B> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}<{}>{}", $name, B::TIER, self)
            }
        }
    };
}

/// Elementwise `+ - * /` against the same vector type and against a scalar
/// on either side, plus the compound assignments.
macro_rules! impl_arith_ops {
    ($vector:ident, $elem:ty, $raw:ident, $lanes:ident) => {
        impl_arith_ops!(@op $vector, $elem, $raw, $lanes, Add, add, AddAssign, add_assign);
        impl_arith_ops!(@op $vector, $elem, $raw, $lanes, Sub, sub, SubAssign, sub_assign);
        impl_arith_ops!(@op $vector, $elem, $raw, $lanes, Mul, mul, MulAssign, mul_assign);
        impl_arith_ops!(@op $vector, $elem, $raw, $lanes, Div, div, DivAssign, div_assign);
    };
    (@op $vector:ident, $elem:ty, $raw:ident, $lanes:ident,
        $op:ident, $method:ident, $assign:ident, $assign_method:ident) => {
        impl<B: Backend> std::ops::$op for $vector<B> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::from_raw(<B::$raw as $lanes>::$method(self.elements, rhs.elements))
            }
        }

        impl<B: Backend> std::ops::$op<$elem> for $vector<B> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: $elem) -> Self {
                <Self as std::ops::$op>::$method(self, Self::splat(rhs))
            }
        }

        impl<B: Backend> std::ops::$op<$vector<B>> for $elem {
            type Output = $vector<B>;

            #[inline(always)]
            fn $method(self, rhs: $vector<B>) -> $vector<B> {
                <$vector<B> as std::ops::$op>::$method($vector::splat(self), rhs)
            }
        }

        impl<B: Backend> std::ops::$assign for $vector<B> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = <Self as std::ops::$op>::$method(*self, rhs);
            }
        }

        impl<B: Backend> std::ops::$assign<$elem> for $vector<B> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: $elem) {
                *self = <Self as std::ops::$op<$elem>>::$method(*self, rhs);
            }
        }
    };
}

/// Indexed loads and stores through an [`Index32`](crate::simd::index::Index32).
///
/// No tier has a gather/scatter for these widths, so both walk the lanes.
macro_rules! impl_gather_scatter {
    ($vector:ident, $elem:ty, $raw:ident) => {
        impl<B: Backend> $vector<B> {
            /// Lane `i` is `slice[indices[i]]`.
            ///
            /// # Panics
            ///
            /// Panics if an index is negative or out of bounds for `slice`.
            pub fn gather(slice: &[$elem], indices: Index32<B>) -> Self {
                let offsets = indices.into_raw().to_buffer();
                let mut buffer = LaneBuffer::<$elem>::zeroed();
                for (lane, &offset) in buffer.0.iter_mut().zip(offsets.0.iter()).take(B::LANES) {
                    *lane = slice[offset as usize];
                }
                Self::from_raw(<B::$raw as RawLanes>::from_buffer(&buffer))
            }

            /// Lane `i` is `*base.offset(indices[i])`.
            ///
            /// # Safety
            ///
            /// Every `base + indices[i]` must be valid for reading.
            pub unsafe fn gather_ptr(base: *const $elem, indices: Index32<B>) -> Self {
                debug_assert!(!base.is_null(), "Pointer must not be null");
                let offsets = indices.into_raw().to_buffer();
                let mut buffer = LaneBuffer::<$elem>::zeroed();
                for (lane, &offset) in buffer.0.iter_mut().zip(offsets.0.iter()).take(B::LANES) {
                    *lane = *base.offset(offset as isize);
                }
                Self::from_raw(<B::$raw as RawLanes>::from_buffer(&buffer))
            }

            /// Writes lane `i` to `slice[indices[i]]`, lowest lane first, so
            /// a repeated index keeps the highest lane.
            ///
            /// # Panics
            ///
            /// Panics if an index is negative or out of bounds for `slice`.
            pub fn scatter(self, slice: &mut [$elem], indices: Index32<B>) {
                let offsets = indices.into_raw().to_buffer();
                let values = self.elements.to_buffer();
                for (&value, &offset) in values.0.iter().zip(offsets.0.iter()).take(B::LANES) {
                    slice[offset as usize] = value;
                }
            }

            /// Writes lane `i` to `*base.offset(indices[i])`.
            ///
            /// # Safety
            ///
            /// Every `base + indices[i]` must be valid for writing.
            pub unsafe fn scatter_ptr(self, base: *mut $elem, indices: Index32<B>) {
                debug_assert!(!base.is_null(), "Pointer must not be null");
                let offsets = indices.into_raw().to_buffer();
                let values = self.elements.to_buffer();
                for (&value, &offset) in values.0.iter().zip(offsets.0.iter()).take(B::LANES) {
                    *base.offset(offset as isize) = value;
                }
            }
        }
    };
}

/// `SimdCompare` against the same vector type and against a broadcast scalar.
macro_rules! impl_simd_compare {
    ($vector:ident, $elem:ty) => {
        impl<B: Backend> SimdCompare<$elem> for $vector<B> {
            type Mask = Mask32<B>;

            #[inline(always)]
            fn simd_eq(self, rhs: $elem) -> Mask32<B> {
                <Self as SimdCompare>::simd_eq(self, Self::splat(rhs))
            }

            #[inline(always)]
            fn simd_ne(self, rhs: $elem) -> Mask32<B> {
                <Self as SimdCompare>::simd_ne(self, Self::splat(rhs))
            }

            #[inline(always)]
            fn simd_lt(self, rhs: $elem) -> Mask32<B> {
                <Self as SimdCompare>::simd_lt(self, Self::splat(rhs))
            }

            #[inline(always)]
            fn simd_le(self, rhs: $elem) -> Mask32<B> {
                <Self as SimdCompare>::simd_le(self, Self::splat(rhs))
            }

            #[inline(always)]
            fn simd_gt(self, rhs: $elem) -> Mask32<B> {
                <Self as SimdCompare>::simd_gt(self, Self::splat(rhs))
            }

            #[inline(always)]
            fn simd_ge(self, rhs: $elem) -> Mask32<B> {
                <Self as SimdCompare>::simd_ge(self, Self::splat(rhs))
            }
        }
    };
}

pub(crate) use impl_arith_ops;
pub(crate) use impl_gather_scatter;
pub(crate) use impl_simd_compare;
pub(crate) use impl_vector_common;
