//! Width-independent `i32`/`f32` SIMD vectors for x86.
//!
//! One set of vector types ([`Int32`](simd::Int32), [`Float32`](simd::Float32),
//! [`Mask32`](simd::Mask32), [`Index32`](simd::Index32)) runs on three
//! backends:
//!
//! | Family | Lanes | Storage |
//! |--------|-------|---------|
//! | Scalar | 4 | 16-byte aligned arrays |
//! | SSE (SSE2 to SSE4.2) | 4 | `__m128i` / `__m128` |
//! | AVX (AVX, AVX2) | 8 | `__m256i` / `__m256` |
//!
//! The build script picks the highest tier the compile target enables. Set
//! `SIMDTIER` (e.g. `SIMDTIER=sse4.1`) to cap it, or enable the
//! `force-scalar` feature. Inside a family each operation uses the most
//! capable instruction of the selected tier; nothing is dispatched at run
//! time.
//!
//! # Examples
//!
//! ```rust
//! use simdtier::simd::{select, Float, Mask, SimdCompare};
//!
//! let x = Float::from_slice(&[-2.0, -1.0, 0.0, 1.5]);
//! let positive = x.simd_gt(0.0);
//! let clamped = select(positive, x, Float::splat(0.0));
//! assert_eq!(clamped.lane(0), 0.0);
//! assert_eq!(clamped.lane(3), 1.5);
//! assert_eq!(positive.count(), 1);
//! assert_eq!(Mask::new(true).count(), Float::LANES);
//! ```

#[cfg(not(any(
    simd_family = "scalar",
    simd_family = "sse",
    simd_family = "avx"
)))]
compile_error!("no SIMD family selected; the build script must set `simd_family`");

#[cfg(any(
    all(simd_family = "scalar", simd_family = "sse"),
    all(simd_family = "scalar", simd_family = "avx"),
    all(simd_family = "sse", simd_family = "avx")
))]
compile_error!("more than one SIMD family selected; Scalar, SSE and AVX are mutually exclusive");

#[cfg(all(simd_sse2, not(target_feature = "sse2")))]
compile_error!("the SSE backend needs `target_feature = \"sse2\"`");

#[cfg(all(simd_avx, not(target_feature = "avx")))]
compile_error!("the AVX backend needs `target_feature = \"avx\"`");

#[cfg(all(simd_avx2, not(target_feature = "avx2")))]
compile_error!("AVX2 code paths need `target_feature = \"avx2\"`");

pub mod error;
pub mod simd;

pub use error::{Result, SimdError};
pub use simd::tier::Tier;
