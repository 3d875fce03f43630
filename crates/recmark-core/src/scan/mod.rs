//! Marker scanning: one algorithm, four instruction-set tiers.
//!
//! # Module Structure
//!
//! - `scalar` — byte-wise reference scanner and shared tail loop
//! - `x86_sse42` — 128-bit kernel (x86_64 only)
//! - `x86_avx2` — 256-bit kernel (x86_64 only)
//! - `x86_avx512` — 512-bit kernel using native compare masks (x86_64 only)
//! - `dispatch` — capability detection, cached tier selection, public API
//!
//! Every tier scans the same window with the same semantics: the first
//! position `i >= offset` with `data[i..i + 3] == MARKER`, or `None` when
//! the window is empty or the marker absent. The scalar scanner is the
//! ground truth the vector kernels are tested against.

/// Record boundary marker bytes, shared read-only by every tier.
pub const MARKER: [u8; 3] = [145, 141, 76];

/// Marker length in bytes. Kernels derive their stride and the window
/// bound from this.
pub(crate) const MARKER_LEN: usize = MARKER.len();

mod scalar;

// =============================================================================
// Unsafe Invariants Reference
// =============================================================================
// SAFETY: Shared invariants for the unsafe kernels in this module tree.
// - Condition 1: Kernels run only after runtime feature detection confirms
//   their ISA tier, either via `dispatch` or an equivalent gate in tests.
// - Condition 2: All vector loads go through unaligned-load intrinsics.
// - Condition 3: The loop bound `i + WIDTH <= len - 2` keeps the furthest
//   load byte `i + 2 + WIDTH - 1` strictly inside the buffer.

// =============================================================================
// ISA kernel submodules
// =============================================================================

#[cfg(target_arch = "x86_64")]
mod x86_sse42;

#[cfg(target_arch = "x86_64")]
mod x86_avx2;

#[cfg(target_arch = "x86_64")]
mod x86_avx512;

// Re-export ISA kernels so dispatch.rs can reach them via `super::`
#[cfg(target_arch = "x86_64")]
pub(crate) use x86_avx2::find_marker_avx2;
#[cfg(target_arch = "x86_64")]
pub(crate) use x86_avx512::find_marker_avx512;
#[cfg(target_arch = "x86_64")]
pub(crate) use x86_sse42::find_marker_sse42;

// =============================================================================
// Dispatch module (public API)
// =============================================================================

mod dispatch;

pub use dispatch::{
    detect_capabilities, find_all_markers, find_marker, find_marker_at, simd_level,
    warmup_scan_cache, CpuCapabilities, SimdLevel,
};
pub use scalar::find_marker_scalar;

// =============================================================================
// Tests (separate files per project rules)
// =============================================================================

#[cfg(test)]
mod dispatch_tests;
