//! Tests for tier selection and the public scan API.

use super::{
    detect_capabilities, find_all_markers, find_marker, find_marker_scalar, simd_level,
    warmup_scan_cache, SimdLevel, MARKER,
};

fn buffer_with_markers(len: usize, positions: &[usize]) -> Vec<u8> {
    let mut data = vec![0_u8; len];
    for &pos in positions {
        data[pos..pos + 3].copy_from_slice(&MARKER);
    }
    data
}

// ============================================================================
// Tier selection
// ============================================================================

#[test]
fn selected_level_is_reported_available() {
    let caps = detect_capabilities();
    assert!(caps.supports(simd_level()));
    assert!(caps.supports(SimdLevel::Scalar));
}

#[test]
fn capability_probe_is_stable() {
    assert_eq!(detect_capabilities(), detect_capabilities());
    assert_eq!(simd_level(), simd_level());
}

#[test]
fn warmup_is_idempotent() {
    warmup_scan_cache();
    warmup_scan_cache();
    assert!(detect_capabilities().supports(simd_level()));
}

// ============================================================================
// Scan semantics
// ============================================================================

#[test]
fn offset_sweep_matches_ground_truth() {
    // Two markers deep inside a 10k frame; a scan from every offset must
    // land on the next one, and past the last one must come back empty.
    let data = buffer_with_markers(10_000, &[9_700, 9_997]);
    for offset in 0..data.len() {
        let expected = if offset <= 9_700 {
            Some(9_700)
        } else if offset <= 9_997 {
            Some(9_997)
        } else {
            None
        };
        assert_eq!(find_marker(&data, offset), expected, "offset {offset}");
    }
}

#[test]
fn degenerate_windows_return_none() {
    assert_eq!(find_marker(&[], 0), None);
    assert_eq!(find_marker(&[0, 1], 0), None);
    assert_eq!(find_marker(&[0, 1], 5), None);
    assert_eq!(find_marker(&[0, 1, 3, 4], 3), None);
    assert_eq!(find_marker(&[0, 1, 3, 4], 4), None);
}

#[test]
fn exact_marker_buffer() {
    assert_eq!(find_marker(&MARKER, 0), Some(0));
    assert_eq!(find_marker(&MARKER, 1), None);
}

#[test]
fn marker_in_tail_of_zeroed_frame() {
    let data = buffer_with_markers(40, &[37]);
    assert_eq!(find_marker(&data, 0), Some(37));
    assert_eq!(find_marker_scalar(&data, 0), Some(37));
}

#[test]
fn absent_marker_returns_none() {
    let data = vec![7_u8; 4096];
    assert_eq!(find_marker(&data, 0), None);
}

// ============================================================================
// find_all_markers
// ============================================================================

#[test]
fn find_all_collects_every_position() {
    let data = buffer_with_markers(200, &[0, 50, 197]);
    assert_eq!(find_all_markers(&data, 0), vec![0, 50, 197]);
    assert_eq!(find_all_markers(&data, 1), vec![50, 197]);
    assert_eq!(find_all_markers(&data, 198), Vec::<usize>::new());
}

#[test]
fn find_all_reports_back_to_back_markers() {
    let data = buffer_with_markers(32, &[10, 13]);
    assert_eq!(find_all_markers(&data, 0), vec![10, 13]);
}

#[test]
fn find_all_on_degenerate_window_is_empty() {
    assert_eq!(find_all_markers(&[0, 1], 0), Vec::<usize>::new());
    assert_eq!(find_all_markers(&[], 9), Vec::<usize>::new());
}
