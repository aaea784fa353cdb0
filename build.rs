use std::cmp::Ordering;
use std::env;

/// Environment variable that caps the selected tier.
const TIER_OVERRIDE: &str = "SIMDTIER";

// Instruction-set levels this crate has specialised code paths for
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    target_feature: &'static str,
    cfg_flag: &'static str,
    family: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Position in the capability cascade (Highest number == Highest Priority)
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 7,
            "avx" => 6,
            "sse4.2" => 5,
            "sse4.1" => 4,
            "ssse3" => 3,
            "sse3" => 2,
            "sse2" => 1,
            _ => 0,
        }
    }

    // Every level implies all the levels with a lower priority
    fn features() -> Vec<CpuFeature> {
        [
            ("sse2", "sse2", "simd_sse2", "sse"),
            ("sse3", "sse3", "simd_sse3", "sse"),
            ("ssse3", "ssse3", "simd_ssse3", "sse"),
            ("sse4.1", "sse4.1", "simd_sse41", "sse"),
            ("sse4.2", "sse4.2", "simd_sse42", "sse"),
            ("avx", "avx", "simd_avx", "avx"),
            ("avx2", "avx2", "simd_avx2", "avx"),
        ]
        .into_iter()
        .map(|(name, target_feature, cfg_flag, family)| CpuFeature {
            name,
            target_feature,
            cfg_flag,
            family,
            detected: false,
        })
        .collect()
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Feature detection trait to keep sources of capability information separate
trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Reads the target features rustc compiles this crate with. Only those can be
// used by inlined intrinsics, so the host CPU is not consulted.
struct TargetFeatureDetector;
impl CpuFeatureDetector for TargetFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let enabled = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
        let enabled: Vec<&str> = enabled.split(',').collect();

        for feature in features.iter_mut() {
            feature.detected = enabled.contains(&feature.target_feature);
        }
    }

    fn is_applicable(&self) -> bool {
        matches!(
            env::var("CARGO_CFG_TARGET_ARCH").as_deref(),
            Ok("x86") | Ok("x86_64")
        )
    }
}

// What the user asked for through SIMDTIER / `force-scalar`
#[derive(Debug, PartialEq, Eq)]
enum Request {
    Auto,
    Scalar,
    UpTo(usize),
}

impl Request {
    fn parse(value: &str) -> Request {
        let level = match value.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => return Request::Auto,
            "scalar" | "0" => return Request::Scalar,
            "sse2" | "1" => 1,
            "sse3" | "2" => 2,
            "ssse3" | "3" => 3,
            "sse4.1" | "sse41" | "4" => 4,
            "sse4.2" | "sse42" | "5" => 5,
            "avx" | "6" => 6,
            "avx2" | "7" => 7,
            other => panic!(
                "{TIER_OVERRIDE}={other:?} is not a known tier \
                 (expected scalar, sse2, sse3, ssse3, sse4.1, sse4.2, avx, avx2 or 0..7)"
            ),
        };
        Request::UpTo(level)
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(TargetFeatureDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn request() -> Request {
        let force_scalar = env::var_os("CARGO_FEATURE_FORCE_SCALAR").is_some();
        let requested = env::var(TIER_OVERRIDE)
            .map(|value| Request::parse(&value))
            .unwrap_or(Request::Auto);

        match (force_scalar, requested) {
            (true, Request::UpTo(level)) => panic!(
                "feature `force-scalar` contradicts {TIER_OVERRIDE} (level {level}); pick one backend"
            ),
            (true, _) => Request::Scalar,
            (false, requested) => requested,
        }
    }

    fn apply(features: &mut [CpuFeature], request: Request) {
        // Sort features by priority (lowest first)
        features.sort();

        // A level only counts if every level below it is present as well
        let mut available = 0;
        for feature in features.iter() {
            if !feature.detected {
                break;
            }
            available = feature.priority();
        }

        let selected = match request {
            Request::Auto => available,
            Request::Scalar => 0,
            Request::UpTo(level) if level > available => {
                let name = features
                    .iter()
                    .find(|feature| feature.priority() == level)
                    .map_or("?", |feature| feature.name);
                panic!(
                    "{TIER_OVERRIDE} requests {name} but the target only enables up to level {available}; \
                     add `-C target-feature=+{name}` or `-C target-cpu=native` to RUSTFLAGS"
                )
            }
            Request::UpTo(level) => level,
        };

        let enabled: Vec<&CpuFeature> = features
            .iter()
            .filter(|feature| feature.priority() <= selected)
            .collect();

        let family = enabled.last().map_or("scalar", |feature| feature.family);
        let tier = enabled.last().map_or("scalar", |feature| feature.name);

        println!("selected tier: {tier} (family {family})");

        for feature in &enabled {
            println!("cargo:rustc-cfg={}", feature.cfg_flag);
        }
        println!("cargo:rustc-cfg=simd_family=\"{family}\"");

        for feature in features.iter() {
            println!("cargo::rustc-check-cfg=cfg({})", feature.cfg_flag);
        }
        println!("cargo::rustc-check-cfg=cfg(simd_family, values(\"scalar\", \"sse\", \"avx\"))");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={TIER_OVERRIDE}");

    let mut features = CpuFeature::features();

    PlatformDetector::detect_cpu_features(&mut features);

    let request = PlatformDetector::request();
    PlatformDetector::apply(&mut features, request);
}
