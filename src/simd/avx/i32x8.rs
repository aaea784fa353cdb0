//! Integer lanes on `__m256i`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(not(simd_avx2))]
use super::{halves, halves1};
use super::{partial_mask, split, AVX_ALIGNMENT, LANE_COUNT};
use crate::simd::traits::{IntLanes, RawLanes};

#[inline(always)]
fn as_ps(a: __m256i) -> __m256 {
    unsafe { _mm256_castsi256_ps(a) }
}

#[inline(always)]
fn as_si(a: __m256) -> __m256i {
    unsafe { _mm256_castps_si256(a) }
}

impl RawLanes for __m256i {
    type Elem = i32;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { _mm256_setzero_si256() }
    }

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { _mm256_set1_epi32(value) }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const i32) -> Self {
        _mm256_loadu_si256(ptr as *const __m256i)
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> Self {
        debug_assert!(
            ptr as usize % AVX_ALIGNMENT == 0,
            "Pointer must be {AVX_ALIGNMENT}-byte aligned"
        );
        _mm256_load_si256(ptr as *const __m256i)
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut i32) {
        _mm256_storeu_si256(ptr as *mut __m256i, self)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut i32) {
        debug_assert!(
            ptr as usize % AVX_ALIGNMENT == 0,
            "Pointer must be {AVX_ALIGNMENT}-byte aligned"
        );
        _mm256_store_si256(ptr as *mut __m256i, self)
    }

    #[inline(always)]
    unsafe fn stream(self, ptr: *mut i32) {
        debug_assert!(
            ptr as usize % AVX_ALIGNMENT == 0,
            "Pointer must be {AVX_ALIGNMENT}-byte aligned"
        );
        _mm256_stream_si256(ptr as *mut __m256i, self)
    }

    // Masked lanes are neither read nor faulted on.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const i32, n: usize) -> Self {
        if n >= LANE_COUNT {
            return Self::load_unaligned(ptr);
        }
        as_si(_mm256_maskload_ps(ptr as *const f32, partial_mask(n)))
    }

    #[inline(always)]
    unsafe fn store_partial(self, ptr: *mut i32, n: usize) {
        if n >= LANE_COUNT {
            return self.store_unaligned(ptr);
        }
        _mm256_maskstore_ps(ptr as *mut f32, partial_mask(n), as_ps(self))
    }

    #[inline(always)]
    fn extract(self, index: usize) -> i32 {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        let (lo, hi) = split(self);
        if index < 4 {
            lo.extract(index)
        } else {
            hi.extract(index - 4)
        }
    }

    #[inline(always)]
    fn insert(self, index: usize, value: i32) -> Self {
        debug_assert!(index < LANE_COUNT, "Lane index must be < {LANE_COUNT}");
        Self::select(Self::lane_mask(index), Self::splat(value), self)
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn rotate_lanes(self, n: usize) -> Self {
        unsafe {
            let indices = _mm256_add_epi32(
                _mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7),
                _mm256_set1_epi32((n % LANE_COUNT) as i32),
            );
            // permutevar only reads the low three bits of each index
            _mm256_permutevar8x32_epi32(self, indices)
        }
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn shift_lanes(self, n: usize) -> Self {
        if n >= LANE_COUNT {
            return Self::zero();
        }
        unsafe {
            let indices = _mm256_add_epi32(
                _mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7),
                _mm256_set1_epi32(n as i32),
            );
            let keep = _mm256_cmpgt_epi32(_mm256_set1_epi32(LANE_COUNT as i32), indices);
            _mm256_and_si256(_mm256_permutevar8x32_epi32(self, indices), keep)
        }
    }
}

impl IntLanes for __m256i {
    #[cfg(simd_avx2)]
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { _mm256_add_epi32(self, rhs) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        halves(self, rhs, <__m128i as IntLanes>::add)
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { _mm256_sub_epi32(self, rhs) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        halves(self, rhs, <__m128i as IntLanes>::sub)
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { _mm256_mullo_epi32(self, rhs) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        halves(self, rhs, <__m128i as IntLanes>::mul)
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { _mm256_min_epi32(self, rhs) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        halves(self, rhs, <__m128i as IntLanes>::min)
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { _mm256_max_epi32(self, rhs) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        halves(self, rhs, <__m128i as IntLanes>::max)
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn wrapping_abs(self) -> Self {
        unsafe { _mm256_abs_epi32(self) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn wrapping_abs(self) -> Self {
        halves1(self, <__m128i as IntLanes>::wrapping_abs)
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { as_si(_mm256_and_ps(as_ps(self), as_ps(rhs))) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { as_si(_mm256_or_ps(as_ps(self), as_ps(rhs))) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { as_si(_mm256_xor_ps(as_ps(self), as_ps(rhs))) }
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { as_si(_mm256_andnot_ps(as_ps(self), as_ps(rhs))) }
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe { _mm256_sll_epi32(self, _mm_cvtsi32_si128(count as i32)) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        halves1(self, |half| half.shl(count))
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe { _mm256_sra_epi32(self, _mm_cvtsi32_si128(count as i32)) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        halves1(self, |half| half.shr(count))
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        unsafe { _mm256_cmpeq_epi32(self, rhs) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        halves(self, rhs, <__m128i as IntLanes>::cmp_eq)
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        unsafe { _mm256_cmpgt_epi32(self, rhs) }
    }

    #[cfg(not(simd_avx2))]
    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        halves(self, rhs, <__m128i as IntLanes>::cmp_gt)
    }

    #[inline(always)]
    fn select(mask: Self, a: Self, b: Self) -> Self {
        unsafe { as_si(_mm256_blendv_ps(as_ps(b), as_ps(a), as_ps(mask))) }
    }

    #[inline(always)]
    fn sign_bits(self) -> u32 {
        unsafe { _mm256_movemask_ps(as_ps(self)) as u32 }
    }

    #[cfg(simd_avx2)]
    #[inline(always)]
    fn iota(start: i32) -> Self {
        unsafe {
            _mm256_add_epi32(
                _mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7),
                _mm256_set1_epi32(start),
            )
        }
    }

    // Small lane numbers are exact in f32, so a float compare works on plain AVX.
    #[inline(always)]
    fn lane_mask(index: usize) -> Self {
        unsafe {
            as_si(_mm256_cmp_ps::<_CMP_EQ_OQ>(
                _mm256_setr_ps(0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0),
                _mm256_set1_ps(index as f32),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C, align(32))]
    struct Aligned([i32; 16]);

    /// Helper function to extract vector elements for comparison in tests
    fn extract_elements(v: __m256i) -> [i32; 8] {
        let mut result = [0; 8];
        unsafe { _mm256_storeu_si256(result.as_mut_ptr() as *mut __m256i, v) };
        result
    }

    fn from_lanes(lanes: [i32; 8]) -> __m256i {
        unsafe { _mm256_loadu_si256(lanes.as_ptr() as *const __m256i) }
    }

    mod simd_load_tests {
        use super::*;

        #[test]
        fn test_load_aligned() {
            let data = Aligned(std::array::from_fn(|i| i as i32));
            let v = unsafe { __m256i::load_aligned(data.0.as_ptr().add(8)) };
            assert_eq!(extract_elements(v), [8, 9, 10, 11, 12, 13, 14, 15]);
        }

        #[test]
        fn test_load_partial_multiple_elements() {
            for size in 0..=8 {
                let data: Vec<i32> = (1..=size as i32).collect();
                let v = unsafe { __m256i::load_partial(data.as_ptr(), size) };
                let lanes = extract_elements(v);

                for (i, lane) in lanes.iter().enumerate() {
                    let expected = if i < size { i as i32 + 1 } else { 0 };
                    assert_eq!(*lane, expected, "Mismatch at index {i} for size {size}");
                }
            }
        }
    }

    mod simd_store_tests {
        use super::*;

        #[test]
        fn test_store_partial_multiple_elements() {
            let v = from_lanes([1, 2, 3, 4, 5, 6, 7, 8]);
            for size in 0..=8 {
                let mut out = [-1; 9];
                unsafe { v.store_partial(out.as_mut_ptr(), size) };
                for (i, lane) in out.iter().enumerate() {
                    let expected = if i < size { i as i32 + 1 } else { -1 };
                    assert_eq!(*lane, expected, "Mismatch at index {i} for size {size}");
                }
            }
        }

        #[test]
        fn test_stream_at_aligned() {
            let mut data = Aligned([0; 16]);
            unsafe {
                from_lanes([1, 2, 3, 4, 5, 6, 7, 8]).stream(data.0.as_mut_ptr());
                _mm_sfence();
            }
            assert_eq!(&data.0[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        }
    }

    mod lane_tests {
        use super::*;

        #[test]
        fn test_insert_extract_every_lane() {
            for index in 0..8 {
                let v = __m256i::iota(10).insert(index, -1);
                let mut expected: [i32; 8] = std::array::from_fn(|i| 10 + i as i32);
                expected[index] = -1;
                assert_eq!(extract_elements(v), expected);
                assert_eq!(v.extract(index), -1);
            }
        }

        #[test]
        fn test_rotate_and_shift_cross_halves() {
            let v = __m256i::iota(0);
            assert_eq!(extract_elements(v.rotate_lanes(3)), [3, 4, 5, 6, 7, 0, 1, 2]);
            assert_eq!(extract_elements(v.rotate_lanes(8)), [0, 1, 2, 3, 4, 5, 6, 7]);
            assert_eq!(extract_elements(v.shift_lanes(5)), [5, 6, 7, 0, 0, 0, 0, 0]);
            assert_eq!(extract_elements(v.shift_lanes(9)), [0; 8]);
        }
    }

    mod arithmetic_tests {
        use super::*;

        #[test]
        fn test_arithmetic_across_halves() {
            let a = from_lanes([1, -2, 3, -4, i32::MAX, 6, -7, 8]);
            let b = from_lanes([8, 7, -6, 5, 1, -3, 2, 0]);
            assert_eq!(extract_elements(a.add(b)), [9, 5, -3, 1, i32::MIN, 3, -5, 8]);
            assert_eq!(extract_elements(a.mul(b)), [8, -14, -18, -20, i32::MAX, -18, -14, 0]);
            assert_eq!(extract_elements(a.min(b)), [1, -2, -6, -4, 1, -3, -7, 0]);
            assert_eq!(extract_elements(a.cmp_lt(b)), [-1, -1, 0, -1, 0, 0, -1, 0]);
            assert_eq!(a.cmp_lt(b).sign_bits(), 0b0100_1011);
        }

        #[test]
        fn test_shifts() {
            let v = from_lanes([1, -1, i32::MIN, 3, 1, -1, i32::MIN, 3]);
            assert_eq!(extract_elements(v.shl(1)), [2, -2, 0, 6, 2, -2, 0, 6]);
            assert_eq!(extract_elements(v.shr(33)), [0, -1, -1, 0, 0, -1, -1, 0]);
        }
    }
}
