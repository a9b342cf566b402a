//! Benchmark profiles and utilities for the chunkfit allocator.
//!
//! Provides pre-built [`Workload`] profiles for benchmarking:
//!
//! - [`reference_profile`]: small requests with balanced alloc/release churn
//! - [`stress_profile`]: larger requests and heavier release pressure
//! - [`replay`]: drive an op list through an arena without verification

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use chunkfit_arena::Arena;
use chunkfit_test_utils::{Op, Workload};

/// Reference profile: 10K ops, requests up to 64 bytes, 40% releases.
pub fn reference_profile(seed: u64) -> Workload {
    Workload::new(seed, 10_000, 64)
}

/// Stress profile: 10K ops, requests up to 512 bytes, 55% releases.
///
/// Large requests against the default 4 KiB buffer fail often, which
/// exercises the full first-fit scan on every miss.
pub fn stress_profile(seed: u64) -> Workload {
    Workload::new(seed, 10_000, 512).with_release_pct(55)
}

/// Apply `ops` to `arena`, tracking live handles in a plain `Vec`.
///
/// Returns the number of ops that the arena rejected.
pub fn replay<const MEM: usize, const CHUNKS: usize>(
    arena: &mut Arena<MEM, CHUNKS>,
    ops: &[Op],
) -> usize {
    let mut live = Vec::with_capacity(CHUNKS);
    let mut failures = 0;
    for &op in ops {
        match op {
            Op::Allocate { size } => match arena.allocate(size) {
                Ok(h) => live.push(h),
                Err(_) => failures += 1,
            },
            Op::ZeroAllocate { count, elem_size } => match arena.zero_allocate(count, elem_size) {
                Ok(h) => live.push(h),
                Err(_) => failures += 1,
            },
            Op::Release { pick } => {
                if !live.is_empty() {
                    let h = live.swap_remove(pick % live.len());
                    arena.release(h);
                }
            }
            Op::Resize { pick, new_size } => {
                if !live.is_empty() {
                    let idx = pick % live.len();
                    match arena.resize(Some(live[idx]), new_size) {
                        Ok(h) => live[idx] = h,
                        Err(_) => failures += 1,
                    }
                }
            }
        }
    }
    failures
}
