//! Instruction-set tiers.
//!
//! A [`Tier`] is one step of the x86 capability cascade. Every tier implies
//! all the tiers below it, so `Avx2` can use anything `Sse41` can. The crate
//! picks its tier at build time (see the build script); [`Tier::ACTIVE`]
//! reports that choice and [`Tier::detect`] reports what the running CPU
//! could have used.

use std::fmt;
use std::str::FromStr;

use crate::error::{validation_error, SimdError};

/// Backend family a tier belongs to. Each family has its own lane storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// Portable software lanes.
    Scalar,
    /// 128-bit registers, 4 lanes.
    Sse,
    /// 256-bit registers, 8 lanes.
    Avx,
}

impl Family {
    /// Number of 32-bit lanes in one vector of this family.
    pub const fn lanes(self) -> usize {
        match self {
            Family::Scalar | Family::Sse => 4,
            Family::Avx => 8,
        }
    }

    /// Natural alignment in bytes of one vector of this family.
    pub const fn alignment(self) -> usize {
        self.lanes() * 4
    }
}

/// An instruction-set capability level, ordered from least to most capable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Scalar,
    Sse2,
    Sse3,
    Ssse3,
    Sse41,
    Sse42,
    Avx,
    Avx2,
}

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Tier; 8] = [
        Tier::Scalar,
        Tier::Sse2,
        Tier::Sse3,
        Tier::Ssse3,
        Tier::Sse41,
        Tier::Sse42,
        Tier::Avx,
        Tier::Avx2,
    ];

    /// The tier this build of the crate was compiled for.
    pub const ACTIVE: Tier = if cfg!(simd_family = "avx") {
        Tier::highest_avx()
    } else if cfg!(simd_family = "sse") {
        Tier::highest_sse()
    } else {
        Tier::Scalar
    };

    /// Highest SSE-family level enabled at compile time.
    pub(crate) const fn highest_sse() -> Tier {
        if cfg!(simd_sse42) {
            Tier::Sse42
        } else if cfg!(simd_sse41) {
            Tier::Sse41
        } else if cfg!(simd_ssse3) {
            Tier::Ssse3
        } else if cfg!(simd_sse3) {
            Tier::Sse3
        } else {
            Tier::Sse2
        }
    }

    /// Highest AVX-family level enabled at compile time.
    pub(crate) const fn highest_avx() -> Tier {
        if cfg!(simd_avx2) {
            Tier::Avx2
        } else {
            Tier::Avx
        }
    }

    /// Numeric level, `0` for Scalar up to `7` for AVX2.
    pub const fn level(self) -> u8 {
        self as u8
    }

    pub const fn family(self) -> Family {
        match self {
            Tier::Scalar => Family::Scalar,
            Tier::Sse2 | Tier::Sse3 | Tier::Ssse3 | Tier::Sse41 | Tier::Sse42 => Family::Sse,
            Tier::Avx | Tier::Avx2 => Family::Avx,
        }
    }

    pub const fn lanes(self) -> usize {
        self.family().lanes()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tier::Scalar => "Scalar",
            Tier::Sse2 => "SSE2",
            Tier::Sse3 => "SSE3",
            Tier::Ssse3 => "SSSE3",
            Tier::Sse41 => "SSE4.1",
            Tier::Sse42 => "SSE4.2",
            Tier::Avx => "AVX",
            Tier::Avx2 => "AVX2",
        }
    }

    /// Best tier the running CPU supports.
    ///
    /// This is a report only: the vector types never dispatch at run time.
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub fn detect() -> Tier {
        let cascade = [
            (Tier::Sse2, std::is_x86_feature_detected!("sse2")),
            (Tier::Sse3, std::is_x86_feature_detected!("sse3")),
            (Tier::Ssse3, std::is_x86_feature_detected!("ssse3")),
            (Tier::Sse41, std::is_x86_feature_detected!("sse4.1")),
            (Tier::Sse42, std::is_x86_feature_detected!("sse4.2")),
            (Tier::Avx, std::is_x86_feature_detected!("avx")),
            (Tier::Avx2, std::is_x86_feature_detected!("avx2")),
        ];

        cascade
            .iter()
            .take_while(|(_, detected)| *detected)
            .last()
            .map_or(Tier::Scalar, |(tier, _)| *tier)
    }

    /// Best tier the running CPU supports.
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    pub fn detect() -> Tier {
        Tier::Scalar
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = SimdError;

    /// Parses the names accepted by the `SIMDTIER` build override.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tier = match s.trim().to_ascii_lowercase().as_str() {
            "scalar" | "0" => Tier::Scalar,
            "sse2" | "1" => Tier::Sse2,
            "sse3" | "2" => Tier::Sse3,
            "ssse3" | "3" => Tier::Ssse3,
            "sse4.1" | "sse41" | "4" => Tier::Sse41,
            "sse4.2" | "sse42" | "5" => Tier::Sse42,
            "avx" | "6" => Tier::Avx,
            "avx2" | "7" => Tier::Avx2,
            other => return Err(validation_error(format!("unknown tier {other:?}"))),
        };
        Ok(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_order() {
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].level() + 1, pair[1].level());
        }
    }

    #[test]
    fn test_family_lanes() {
        assert_eq!(Tier::Scalar.lanes(), 4);
        assert_eq!(Tier::Sse2.lanes(), 4);
        assert_eq!(Tier::Sse42.lanes(), 4);
        assert_eq!(Tier::Avx.lanes(), 8);
        assert_eq!(Tier::Avx2.family().alignment(), 32);
    }

    #[test]
    fn test_names_parse_back() {
        for tier in Tier::ALL {
            assert_eq!(tier.name().parse::<Tier>(), Ok(tier));
            assert_eq!(tier.level().to_string().parse::<Tier>(), Ok(tier));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let error = "avx512".parse::<Tier>().unwrap_err();
        assert!(error.to_string().contains("avx512"));
    }

    #[test]
    fn test_active_tier_is_supported_by_cpu() {
        // The build only enables features the target promises, and tests run on that target.
        assert!(Tier::ACTIVE <= Tier::detect());
    }
}
