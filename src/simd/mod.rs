//! Vector types and the backends behind them.
//!
//! The vector types ([`Int32`], [`Float32`], [`Mask32`], [`Index32`]) are
//! generic over a [`Backend`](traits::Backend). The backend modules are
//! compiled according to the tier the build script selected:
//!
//! - [`scalar`] is always available.
//! - `sse` requires the SSE2 cfg.
//! - `avx` requires the AVX cfg.
//!
//! [`Active`] names the backend of the selected family, and [`Int`],
//! [`Float`], [`Mask`] and [`Index`] are the vector types on it.

pub mod cast;
pub mod float;
pub mod index;
pub mod int;
pub mod mask;
pub mod scalar;
pub mod slice;
pub mod tier;
pub mod traits;

mod vector;

#[cfg(simd_sse2)]
pub mod sse;

#[cfg(simd_avx)]
pub mod avx;

pub use cast::{type_cast, value_cast, TypeCast, ValueCast};
pub use float::Float32;
pub use index::Index32;
pub use int::Int32;
pub use mask::{select, Mask32, Select};
pub use tier::{Family, Tier};
pub use traits::{
    Alignment, Backend, SimdAbs, SimdAdd, SimdCompare, SimdDiv, SimdMul, SimdSub, SimdVector,
};

/// Backend of the family selected at build time.
#[cfg(simd_family = "scalar")]
pub type Active = scalar::Scalar;

/// Backend of the family selected at build time.
#[cfg(simd_family = "sse")]
pub type Active = sse::Sse;

/// Backend of the family selected at build time.
#[cfg(simd_family = "avx")]
pub type Active = avx::Avx;

/// `i32` vector of the active tier.
pub type Int = Int32<Active>;

/// `f32` vector of the active tier.
pub type Float = Float32<Active>;

/// Mask vector of the active tier.
pub type Mask = Mask32<Active>;

/// Index vector of the active tier.
pub type Index = Index32<Active>;
