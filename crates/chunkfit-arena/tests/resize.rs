//! Integration test: resize semantics at the capacity boundary.

use chunkfit_arena::{Arena, ArenaConfig, ArenaError, Handle};
use chunkfit_test_utils::check_tiling;

type Small = Arena<128, 16>;

#[test]
fn resize_fails_where_release_then_allocate_would_succeed() {
    let mut arena = Small::with_config(ArenaConfig::adjacent());
    let h = arena.allocate(100).unwrap();
    arena.bytes_mut(h).unwrap().fill(0x5A);

    // 28 bytes are free. Shrinking to 64 needs 64 fresh bytes first.
    let err = arena.resize(Some(h), 64).unwrap_err();
    assert_eq!(
        err,
        ArenaError::OutOfMemory {
            requested: 64,
            largest_free: 28
        }
    );
    assert!(arena.bytes(h).unwrap().iter().all(|&b| b == 0x5A));
    check_tiling(&arena).unwrap();

    // The manual sequence works.
    arena.release(h);
    assert!(arena.allocate(64).is_ok());
}

#[test]
fn failed_resize_leaves_handle_releasable() {
    let mut arena = Small::with_config(ArenaConfig::adjacent());
    let h = arena.allocate(120).unwrap();
    assert!(arena.resize(Some(h), 16).is_err());
    arena.release(h);
    assert!(arena.used_chunks().is_empty());
    assert_eq!(arena.largest_free(), 128);
}

#[test]
fn resize_moves_data_forward_and_frees_old_range() {
    let mut arena = Small::with_config(ArenaConfig::adjacent());
    let h = arena.allocate(16).unwrap();
    for (i, b) in arena.bytes_mut(h).unwrap().iter_mut().enumerate() {
        *b = i as u8;
    }
    let g = arena.resize(Some(h), 32).unwrap();
    assert_eq!(g.offset(), 16);
    let expected: Vec<u8> = (0..16).collect();
    assert_eq!(&arena.bytes(g).unwrap()[..16], expected.as_slice());

    // The old range is free again, but the tail chunk comes first in directory order.
    let reused = arena.allocate(8).unwrap();
    assert_eq!(reused.offset(), 48);
    check_tiling(&arena).unwrap();
}

#[test]
fn resize_to_zero_keeps_a_live_handle() {
    let mut arena = Small::with_config(ArenaConfig::adjacent());
    let h = arena.allocate(8).unwrap();
    let z = arena.resize(Some(h), 0).unwrap();
    assert_eq!(arena.size_of(z), Some(0));
    assert_eq!(z.offset(), 8);
    assert!(!arena.contains(h));
    check_tiling(&arena).unwrap();
}

#[test]
fn resize_array_overflow_is_an_error_not_a_panic() {
    let mut arena = Small::new();
    let h = arena.allocate(4).unwrap();
    let err = arena.resize_array(Some(h), usize::MAX / 2, 3).unwrap_err();
    assert!(matches!(err, ArenaError::SizeOverflow { .. }));
    assert_eq!(arena.size_of(h), Some(4));
}

#[test]
fn resize_of_released_handle_fails() {
    let mut arena = Small::new();
    let h = arena.allocate(4).unwrap();
    let _keep = arena.allocate(4).unwrap();
    arena.release(h);
    assert_eq!(
        arena.resize(Some(h), 8),
        Err(ArenaError::UnknownHandle { handle: h })
    );
    assert!(arena.resize(Some(Handle::from_offset(99)), 8).is_err());
}
