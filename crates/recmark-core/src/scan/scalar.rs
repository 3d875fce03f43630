//! Byte-wise reference scanner.
//!
//! This is the ground truth for every vector tier, and the shared tail loop
//! once fewer than a full register of window remains.

use super::{MARKER, MARKER_LEN};

/// Finds the first marker at or after `offset`, one byte at a time.
///
/// Degenerate ranges (`data.len() < 3`, `offset >= data.len()`) return
/// `None`; the function is total over its input domain.
#[inline]
#[must_use]
pub fn find_marker_scalar(data: &[u8], offset: usize) -> Option<usize> {
    find_from(data, offset)
}

/// Shared byte-wise loop. Also the tail handler for the vector kernels,
/// which enter it with `start` already advanced past their last full-width
/// iteration.
#[inline]
pub(crate) fn find_from(data: &[u8], start: usize) -> Option<usize> {
    let end = data.len().saturating_sub(MARKER_LEN - 1);
    for i in start..end {
        if data[i] == MARKER[0] && data[i + 1] == MARKER[1] && data[i + 2] == MARKER[2] {
            return Some(i);
        }
    }
    None
}
