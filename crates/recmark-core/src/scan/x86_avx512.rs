//! 512-bit marker scan kernel.
//!
//! The widest tier compares straight into mask registers
//! (`_mm512_cmpeq_epi8_mask`), skipping the byte-mask extraction step the
//! narrower tiers need. The compare writes one bit per byte lane into a
//! `__mmask64`, so the combined mask indexes lanes 0..64 directly and a
//! trailing-zeros count is the lane offset. Byte-granular compare masks
//! require AVX-512BW; `dispatch` gates this tier on F and BW together.

// Marker bytes broadcast as i8 lanes.
#![allow(clippy::cast_possible_wrap)]

use super::{scalar, MARKER, MARKER_LEN};

/// Lane width of one `__m512i` register in bytes.
const WIDTH: usize = 64;

/// 512-bit scan. Returns exactly what `scalar::find_marker_scalar` returns.
///
/// # Safety
///
/// Caller must ensure the CPU supports AVX-512F and AVX-512BW (runtime
/// detection in `dispatch`, or an equivalent gate in tests).
#[target_feature(enable = "avx512f", enable = "avx512bw")]
pub(crate) unsafe fn find_marker_avx512(data: &[u8], offset: usize) -> Option<usize> {
    // SAFETY: The loop condition `i + WIDTH <= end` bounds the furthest load
    // byte at `i + 2 + WIDTH - 1 = i + WIDTH + 1 <= len - 1`. All loads are
    // unaligned (`_mm512_loadu_si512`).
    use std::arch::x86_64::*;

    let len = data.len();
    if len < MARKER_LEN || offset >= len {
        return None;
    }
    let end = len - (MARKER_LEN - 1);
    let ptr = data.as_ptr();

    let p0 = _mm512_set1_epi8(MARKER[0] as i8);
    let p1 = _mm512_set1_epi8(MARKER[1] as i8);
    let p2 = _mm512_set1_epi8(MARKER[2] as i8);

    let mut i = offset;
    while i + WIDTH <= end {
        let d0 = _mm512_loadu_si512(ptr.add(i).cast::<__m512i>());
        let d1 = _mm512_loadu_si512(ptr.add(i + 1).cast::<__m512i>());
        let d2 = _mm512_loadu_si512(ptr.add(i + 2).cast::<__m512i>());

        let m0: __mmask64 = _mm512_cmpeq_epi8_mask(d0, p0);
        let m1: __mmask64 = _mm512_cmpeq_epi8_mask(d1, p1);
        let m2: __mmask64 = _mm512_cmpeq_epi8_mask(d2, p2);

        let hits = m0 & m1 & m2;
        if hits != 0 {
            return Some(i + hits.trailing_zeros() as usize);
        }

        // Stride re-examines the last MARKER_LEN - 1 lanes so no start
        // position straddling the register boundary is ever skipped.
        i += WIDTH - (MARKER_LEN - 1);
    }

    scalar::find_from(data, i)
}
