//! # RecMark Core
//!
//! SIMD-accelerated scanning for record boundary markers in raw byte buffers.
//!
//! Record-oriented storage formats delimit records with a fixed 3-byte magic
//! marker. Finding the next marker is the hot loop of recovery and seek
//! paths, so this crate ships one scan algorithm at four instruction-set
//! tiers (scalar, SSE4.2, AVX2, AVX-512) that return bit-identical results,
//! and routes every call to the fastest tier the running CPU supports.
//!
//! ## Quick Start
//!
//! ```
//! use recmark_core::{find_marker, MARKER};
//!
//! let mut frame = vec![0u8; 64];
//! frame[21..24].copy_from_slice(&MARKER);
//!
//! assert_eq!(find_marker(&frame, 0), Some(21));
//! assert_eq!(find_marker(&frame, 22), None);
//! ```
//!
//! Tier selection happens once per process and is cached; callers never need
//! to know the hardware. Explicit per-tier entry points exist for testing and
//! benchmarking via [`find_marker_at`].

#![warn(missing_docs)]

pub mod scan;

pub use scan::{
    detect_capabilities, find_all_markers, find_marker, find_marker_at, find_marker_scalar,
    simd_level, warmup_scan_cache, CpuCapabilities, SimdLevel, MARKER,
};
