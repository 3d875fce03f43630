//! Runtime capability detection and tier dispatch.
//!
//! Detection runs once per process and is cached; every scan call routes
//! through the cached tier. Explicit per-tier entry points exist so tests
//! and benches can pin a tier.

use std::sync::OnceLock;

use tracing::debug;

use super::scalar;
use super::MARKER;

// =============================================================================
// Cached capability detection
// =============================================================================

/// One instruction-set tier of the marker scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdLevel {
    /// AVX-512F + AVX-512BW, 64-byte lanes with native compare masks
    /// (x86_64 only).
    Avx512,
    /// AVX2, 32-byte lanes (x86_64 only).
    Avx2,
    /// SSE4.2, 16-byte lanes (x86_64 only).
    Sse42,
    /// Byte-wise reference loop, always available.
    Scalar,
}

/// Per-tier availability snapshot for the running CPU.
///
/// Computed lazily once per process; hardware capabilities do not change at
/// runtime, so the snapshot is never invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuCapabilities {
    /// 128-bit tier usable.
    pub sse42: bool,
    /// 256-bit tier usable.
    pub avx2: bool,
    /// 512-bit tier usable.
    pub avx512: bool,
}

impl CpuCapabilities {
    /// Whether `level` can be executed on this CPU.
    #[must_use]
    pub fn supports(self, level: SimdLevel) -> bool {
        match level {
            SimdLevel::Avx512 => self.avx512,
            SimdLevel::Avx2 => self.avx2,
            SimdLevel::Sse42 => self.sse42,
            SimdLevel::Scalar => true,
        }
    }
}

/// Wide-register spills need a 32-byte aligned stack, which the windows-gnu
/// toolchain does not guarantee; the 256- and 512-bit tiers stay off there
/// even when the hardware reports them. Layered on top of, not instead of,
/// the feature probe below.
#[cfg(target_arch = "x86_64")]
const WIDE_TIERS_USABLE: bool = !cfg!(all(target_os = "windows", target_env = "gnu"));

static CAPABILITIES: OnceLock<CpuCapabilities> = OnceLock::new();
static SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

fn probe_capabilities() -> CpuCapabilities {
    #[cfg(target_arch = "x86_64")]
    {
        CpuCapabilities {
            sse42: is_x86_feature_detected!("sse4.2"),
            avx2: WIDE_TIERS_USABLE && is_x86_feature_detected!("avx2"),
            // Byte-granular compare masks come from AVX-512BW; F alone only
            // covers 32-bit lanes.
            avx512: WIDE_TIERS_USABLE
                && is_x86_feature_detected!("avx512f")
                && is_x86_feature_detected!("avx512bw"),
        }
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        CpuCapabilities {
            sse42: false,
            avx2: false,
            avx512: false,
        }
    }
}

/// Returns the cached per-tier availability snapshot.
///
/// The probe is deterministic per machine and side-effect free; it runs at
/// most once per process.
#[inline]
#[must_use]
pub fn detect_capabilities() -> CpuCapabilities {
    *CAPABILITIES.get_or_init(probe_capabilities)
}

/// Returns the cached best available tier.
#[inline]
#[must_use]
pub fn simd_level() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(|| {
        let caps = detect_capabilities();
        let level = if caps.avx512 {
            SimdLevel::Avx512
        } else if caps.avx2 {
            SimdLevel::Avx2
        } else if caps.sse42 {
            SimdLevel::Sse42
        } else {
            SimdLevel::Scalar
        };
        debug!(?level, "selected marker scan tier");
        level
    })
}

/// Forces capability detection and primes the scan path.
///
/// Call once at startup when the first scan sits on a latency-sensitive
/// path; otherwise detection happens lazily on first use.
pub fn warmup_scan_cache() {
    let _ = simd_level();

    let mut frame = [0_u8; 256];
    frame[250..253].copy_from_slice(&MARKER);
    for _ in 0..3 {
        let _ = find_marker(&frame, 0);
    }
}

// =============================================================================
// Public scan API with cached dispatch
// =============================================================================

/// Finds the first marker at or after `offset` using the best available
/// tier.
///
/// Every tier returns exactly what the scalar reference returns: the lowest
/// matching index, or `None` when the window is empty or the marker absent.
#[inline]
#[must_use]
pub fn find_marker(data: &[u8], offset: usize) -> Option<usize> {
    // SAFETY: Each kernel arm is reached only when the cached probe reported
    // its tier available.
    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx512 => unsafe { super::find_marker_avx512(data, offset) },
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { super::find_marker_avx2(data, offset) },
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Sse42 => unsafe { super::find_marker_sse42(data, offset) },
        _ => scalar::find_marker_scalar(data, offset),
    }
}

/// Runs the scan pinned to `level`, with the same signature and boundary
/// semantics as every other tier.
///
/// # Panics
///
/// Panics if `level` is not available on the running CPU. Requesting an
/// unsupported tier is a caller contract violation, not an input error.
#[must_use]
pub fn find_marker_at(level: SimdLevel, data: &[u8], offset: usize) -> Option<usize> {
    assert!(
        detect_capabilities().supports(level),
        "scan tier {level:?} is not available on this CPU"
    );
    // SAFETY: Availability of the requested tier was just asserted.
    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx512 => unsafe { super::find_marker_avx512(data, offset) },
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { super::find_marker_avx2(data, offset) },
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Sse42 => unsafe { super::find_marker_sse42(data, offset) },
        _ => scalar::find_marker_scalar(data, offset),
    }
}

/// Collects every marker position at or after `offset`, in ascending order.
///
/// Runs repeated first-match scans, re-entering one byte past each hit.
#[must_use]
pub fn find_all_markers(data: &[u8], offset: usize) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut pos = offset;
    while let Some(hit) = find_marker(data, pos) {
        positions.push(hit);
        pos = hit + 1;
    }
    positions
}
