//! Seeded allocation workloads.
//!
//! A [`Workload`] is a deterministic sequence of [`Op`]s drawn from a
//! ChaCha8 stream, so a failing seed reproduces exactly. Release and resize
//! ops pick their victim by index into the currently live set, which lets
//! the same op list drive any arena size.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One arena operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Allocate { size: usize },
    ZeroAllocate { count: usize, elem_size: usize },
    /// Release the live allocation at `pick % live_count`.
    Release { pick: usize },
    /// Resize the live allocation at `pick % live_count`.
    Resize { pick: usize, new_size: usize },
}

/// Parameters for generating an op sequence.
#[derive(Clone, Copy, Debug)]
pub struct Workload {
    pub seed: u64,
    pub len: usize,
    /// Largest single request in bytes. Requests are never zero-sized.
    pub max_size: usize,
    /// Percent of ops that release (the rest split between the others).
    pub release_pct: u32,
}

impl Workload {
    pub fn new(seed: u64, len: usize, max_size: usize) -> Self {
        Self {
            seed,
            len,
            max_size: max_size.max(1),
            release_pct: 40,
        }
    }

    pub fn with_release_pct(mut self, pct: u32) -> Self {
        self.release_pct = pct.min(100);
        self
    }

    /// Generate the op sequence.
    pub fn ops(&self) -> Vec<Op> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let rest = 100 - self.release_pct;
        (0..self.len)
            .map(|_| {
                let roll = rng.random_range(0..100u32);
                let pick = rng.random_range(0..usize::MAX);
                if roll < self.release_pct {
                    Op::Release { pick }
                } else if roll < self.release_pct + rest / 2 {
                    Op::Allocate {
                        size: rng.random_range(1..=self.max_size),
                    }
                } else if roll < self.release_pct + rest * 3 / 4 {
                    let elem_size = rng.random_range(1..=8usize.min(self.max_size));
                    let count = rng.random_range(1..=(self.max_size / elem_size).max(1));
                    Op::ZeroAllocate { count, elem_size }
                } else {
                    Op::Resize {
                        pick,
                        new_size: rng.random_range(1..=self.max_size),
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_ops() {
        let w = Workload::new(7, 200, 64);
        assert_eq!(w.ops(), w.ops());
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(Workload::new(1, 50, 64).ops(), Workload::new(2, 50, 64).ops());
    }

    #[test]
    fn sizes_respect_bounds() {
        for op in Workload::new(3, 500, 32).ops() {
            match op {
                Op::Allocate { size } | Op::Resize { new_size: size, .. } => {
                    assert!((1..=32).contains(&size));
                }
                Op::ZeroAllocate { count, elem_size } => {
                    assert!(count >= 1 && elem_size >= 1);
                    assert!(count * elem_size <= 32);
                }
                Op::Release { .. } => {}
            }
        }
    }

    #[test]
    fn release_pct_zero_never_releases() {
        let ops = Workload::new(5, 300, 16).with_release_pct(0).ops();
        assert!(ops.iter().all(|op| !matches!(op, Op::Release { .. })));
    }
}
