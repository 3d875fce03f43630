//! Concurrency determinism tests.
//!
//! Scans are pure and share only the one-time capability snapshot, so
//! threaded results must equal sequential results on both shared and
//! disjoint buffers.

use std::sync::Arc;
use std::thread;

use recmark_core::{find_all_markers, find_marker, MARKER};

fn buffer_with_markers(len: usize, positions: &[usize]) -> Vec<u8> {
    let mut data = vec![0_u8; len];
    for &pos in positions {
        data[pos..pos + 3].copy_from_slice(&MARKER);
    }
    data
}

#[test]
fn concurrent_scans_on_shared_buffer_are_deterministic() {
    let len = 64 * 1024;
    let data = Arc::new(buffer_with_markers(len, &[1_000, 40_000, len - 3]));

    let sequential: Vec<Option<usize>> =
        (0_usize..8).map(|t| find_marker(&data, t * 7_000)).collect();

    let handles: Vec<_> = (0_usize..8)
        .map(|t| {
            let data = Arc::clone(&data);
            thread::spawn(move || find_marker(&data, t * 7_000))
        })
        .collect();
    let threaded: Vec<Option<usize>> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(threaded, sequential);
}

#[test]
fn concurrent_scans_on_disjoint_buffers_are_deterministic() {
    let handles: Vec<_> = (0_usize..8)
        .map(|t| {
            thread::spawn(move || {
                let pos = 100 + t * 13;
                let data = buffer_with_markers(4_096, &[pos]);
                (find_marker(&data, 0), find_all_markers(&data, 0), pos)
            })
        })
        .collect();

    for handle in handles {
        let (first, all, pos) = handle.join().unwrap();
        assert_eq!(first, Some(pos));
        assert_eq!(all, vec![pos]);
    }
}
