//! 128-bit marker scan kernel.
//!
//! Three overlapping 16-byte loads per iteration give every lane a full
//! 3-byte match test; the combined byte-mask plus a trailing-zeros count
//! yields the first matching lane.

// Marker bytes broadcast as i8 lanes; movemask bitmaps are non-negative.
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use super::{scalar, MARKER, MARKER_LEN};

/// Lane width of one `__m128i` register in bytes.
const WIDTH: usize = 16;

/// 128-bit scan. Returns exactly what `scalar::find_marker_scalar` returns.
///
/// # Safety
///
/// Caller must ensure the CPU supports SSE4.2 (runtime detection in
/// `dispatch`, or an equivalent gate in tests).
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn find_marker_sse42(data: &[u8], offset: usize) -> Option<usize> {
    // SAFETY: The loop condition `i + WIDTH <= end` bounds the furthest load
    // byte at `i + 2 + WIDTH - 1 = i + WIDTH + 1 <= len - 1`. All loads are
    // unaligned (`_mm_loadu_si128`).
    use std::arch::x86_64::*;

    let len = data.len();
    if len < MARKER_LEN || offset >= len {
        return None;
    }
    let end = len - (MARKER_LEN - 1);
    let ptr = data.as_ptr();

    let p0 = _mm_set1_epi8(MARKER[0] as i8);
    let p1 = _mm_set1_epi8(MARKER[1] as i8);
    let p2 = _mm_set1_epi8(MARKER[2] as i8);

    let mut i = offset;
    while i + WIDTH <= end {
        let d0 = _mm_loadu_si128(ptr.add(i).cast::<__m128i>());
        let d1 = _mm_loadu_si128(ptr.add(i + 1).cast::<__m128i>());
        let d2 = _mm_loadu_si128(ptr.add(i + 2).cast::<__m128i>());

        let m0 = _mm_cmpeq_epi8(d0, p0);
        let m1 = _mm_cmpeq_epi8(d1, p1);
        let m2 = _mm_cmpeq_epi8(d2, p2);

        let hits = _mm_movemask_epi8(_mm_and_si128(_mm_and_si128(m0, m1), m2)) as u32;
        if hits != 0 {
            return Some(i + hits.trailing_zeros() as usize);
        }

        // Stride re-examines the last MARKER_LEN - 1 lanes so no start
        // position straddling the register boundary is ever skipped.
        i += WIDTH - (MARKER_LEN - 1);
    }

    scalar::find_from(data, i)
}
