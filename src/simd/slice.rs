//! Elementwise kernels over slices, built on the vectors of the active tier.
//!
//! Every kernel comes in three flavours:
//!
//! | Method | Strategy |
//! |--------|----------|
//! | `simd_*` | one thread, full vectors plus a scalar tail |
//! | `par_simd_*` | rayon `par_chunks`, each chunk processed like `simd_*` |
//! | `scalar_*` | plain iterator loop |
//!
//! All three produce the same values. Integer kernels wrap on overflow and
//! panic on division by zero exactly like `i32::wrapping_div`. Binary
//! kernels reject slices of different lengths with
//! [`SimdError::ValidationError`](crate::error::SimdError::ValidationError).
//!
//! # Examples
//!
//! ```rust
//! use simdtier::simd::{SimdAdd, SimdDiv};
//!
//! let a = [1.0f32, 2.0, 3.0, 4.0, 5.0];
//! let b = [0.5f32; 5];
//! assert_eq!(a.as_slice().simd_add(b.as_slice()).unwrap(), vec![1.5, 2.5, 3.5, 4.5, 5.5]);
//! assert!(a.as_slice().par_simd_div(&b[..4]).is_err());
//! ```

use rayon::prelude::*;

use crate::error::{validation_error, Result};
use crate::simd::traits::{
    LaneElement, SimdAbs, SimdAdd, SimdDiv, SimdMul, SimdSub, SimdVector,
};
use crate::simd::{Float, Int};

/// Elements handed to one rayon task. Rounded down to whole vectors.
pub(crate) const PARALLEL_CHUNK_SIZE: usize = 16 * 1024;

#[inline(always)]
fn check_lengths<T>(a: &[T], b: &[T]) -> Result<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(validation_error(format!(
            "Slices must be the same length ({} vs {})",
            a.len(),
            b.len()
        )))
    }
}

#[inline(always)]
fn chunk_size<V: SimdVector>() -> usize {
    ((PARALLEL_CHUNK_SIZE / V::LANES) * V::LANES).max(V::LANES)
}

/// Writes `vector_op` of every full vector of `a` and `b` into `c`, and
/// `scalar_op` of the leftover elements.
///
/// The tail never goes through a vector, so padding lanes can't trap
/// integer division.
#[inline(always)]
fn binary_block<V: SimdVector>(
    a: &[V::Elem],
    b: &[V::Elem],
    c: &mut [V::Elem],
    vector_op: fn(V, V) -> V,
    scalar_op: fn(V::Elem, V::Elem) -> V::Elem,
) {
    debug_assert!(a.len() == b.len() && a.len() == c.len());

    let full = (a.len() / V::LANES) * V::LANES;
    let (a_body, a_tail) = a.split_at(full);
    let (b_body, b_tail) = b.split_at(full);
    let (c_body, c_tail) = c.split_at_mut(full);

    for ((a, b), c) in a_body
        .chunks_exact(V::LANES)
        .zip(b_body.chunks_exact(V::LANES))
        .zip(c_body.chunks_exact_mut(V::LANES))
    {
        vector_op(V::from_slice(a), V::from_slice(b)).write_to_slice(c);
    }

    for ((a, b), c) in a_tail.iter().zip(b_tail).zip(c_tail) {
        *c = scalar_op(*a, *b);
    }
}

#[inline(always)]
fn unary_block<V: SimdVector>(
    a: &[V::Elem],
    c: &mut [V::Elem],
    vector_op: fn(V) -> V,
    scalar_op: fn(V::Elem) -> V::Elem,
) {
    debug_assert_eq!(a.len(), c.len());

    let full = (a.len() / V::LANES) * V::LANES;
    let (a_body, a_tail) = a.split_at(full);
    let (c_body, c_tail) = c.split_at_mut(full);

    for (a, c) in a_body
        .chunks_exact(V::LANES)
        .zip(c_body.chunks_exact_mut(V::LANES))
    {
        vector_op(V::from_slice(a)).write_to_slice(c);
    }

    for (a, c) in a_tail.iter().zip(c_tail) {
        *c = scalar_op(*a);
    }
}

fn simd_binary<V: SimdVector>(
    a: &[V::Elem],
    b: &[V::Elem],
    vector_op: fn(V, V) -> V,
    scalar_op: fn(V::Elem, V::Elem) -> V::Elem,
) -> Result<Vec<V::Elem>> {
    check_lengths(a, b)?;

    let mut c = vec![V::Elem::default(); a.len()];
    binary_block(a, b, &mut c, vector_op, scalar_op);
    Ok(c)
}

fn parallel_simd_binary<V: SimdVector>(
    a: &[V::Elem],
    b: &[V::Elem],
    vector_op: fn(V, V) -> V,
    scalar_op: fn(V::Elem, V::Elem) -> V::Elem,
) -> Result<Vec<V::Elem>> {
    check_lengths(a, b)?;

    let chunk_size = chunk_size::<V>();
    let mut c = vec![V::Elem::default(); a.len()];

    // Chunks are whole vectors, so only the last one has a tail.
    c.par_chunks_mut(chunk_size)
        .zip(a.par_chunks(chunk_size))
        .zip(b.par_chunks(chunk_size))
        .for_each(|((c, a), b)| binary_block(a, b, c, vector_op, scalar_op));

    Ok(c)
}

fn scalar_binary<T: LaneElement>(a: &[T], b: &[T], op: fn(T, T) -> T) -> Result<Vec<T>> {
    check_lengths(a, b)?;

    Ok(a.iter().zip(b).map(|(x, y)| op(*x, *y)).collect())
}

fn simd_unary<V: SimdVector>(
    a: &[V::Elem],
    vector_op: fn(V) -> V,
    scalar_op: fn(V::Elem) -> V::Elem,
) -> Vec<V::Elem> {
    let mut c = vec![V::Elem::default(); a.len()];
    unary_block(a, &mut c, vector_op, scalar_op);
    c
}

fn parallel_simd_unary<V: SimdVector>(
    a: &[V::Elem],
    vector_op: fn(V) -> V,
    scalar_op: fn(V::Elem) -> V::Elem,
) -> Vec<V::Elem> {
    let chunk_size = chunk_size::<V>();
    let mut c = vec![V::Elem::default(); a.len()];

    c.par_chunks_mut(chunk_size)
        .zip(a.par_chunks(chunk_size))
        .for_each(|(c, a)| unary_block(a, c, vector_op, scalar_op));

    c
}

macro_rules! impl_slice_binary {
    ($trait:ident, $simd:ident, $par:ident, $scalar:ident,
        $elem:ty, $vector:ty, $vector_op:expr, $scalar_op:expr) => {
        impl<'b> $trait<&'b [$elem]> for &[$elem] {
            type Output = Result<Vec<$elem>>;

            #[inline(always)]
            fn $simd(self, rhs: &'b [$elem]) -> Self::Output {
                simd_binary::<$vector>(self, rhs, $vector_op, $scalar_op)
            }

            #[inline(always)]
            fn $par(self, rhs: &'b [$elem]) -> Self::Output {
                parallel_simd_binary::<$vector>(self, rhs, $vector_op, $scalar_op)
            }

            #[inline(always)]
            fn $scalar(self, rhs: &'b [$elem]) -> Self::Output {
                scalar_binary(self, rhs, $scalar_op)
            }
        }
    };
}

impl_slice_binary!(SimdAdd, simd_add, par_simd_add, scalar_add, f32, Float, |a, b| a + b, |a, b| a + b);
impl_slice_binary!(SimdSub, simd_sub, par_simd_sub, scalar_sub, f32, Float, |a, b| a - b, |a, b| a - b);
impl_slice_binary!(SimdMul, simd_mul, par_simd_mul, scalar_mul, f32, Float, |a, b| a * b, |a, b| a * b);
impl_slice_binary!(SimdDiv, simd_div, par_simd_div, scalar_div, f32, Float, |a, b| a / b, |a, b| a / b);

impl_slice_binary!(SimdAdd, simd_add, par_simd_add, scalar_add, i32, Int, |a, b| a + b, i32::wrapping_add);
impl_slice_binary!(SimdSub, simd_sub, par_simd_sub, scalar_sub, i32, Int, |a, b| a - b, i32::wrapping_sub);
impl_slice_binary!(SimdMul, simd_mul, par_simd_mul, scalar_mul, i32, Int, |a, b| a * b, i32::wrapping_mul);
impl_slice_binary!(SimdDiv, simd_div, par_simd_div, scalar_div, i32, Int, |a, b| a / b, i32::wrapping_div);

/// Absolute value by clearing the sign bit, so `-0.0` becomes `0.0` and
/// NaN payloads are kept.
impl SimdAbs for &[f32] {
    type Output = Vec<f32>;

    #[inline(always)]
    fn simd_abs(self) -> Self::Output {
        simd_unary::<Float>(self, Float::abs, f32::abs)
    }

    #[inline(always)]
    fn par_simd_abs(self) -> Self::Output {
        parallel_simd_unary::<Float>(self, Float::abs, f32::abs)
    }

    #[inline(always)]
    fn scalar_abs(self) -> Self::Output {
        self.iter().map(|x| x.abs()).collect()
    }
}
