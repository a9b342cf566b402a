//! Test utilities for chunkfit development.
//!
//! Provides invariant checkers over an [`Arena`]'s directories, a
//! [`ShadowArena`] model that tracks what every live allocation should
//! contain, a seeded [`Workload`] generator, and canned arena
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod shadow;
pub mod workload;

use std::error::Error;
use std::fmt;

use chunkfit_arena::Arena;
use chunkfit_core::Chunk;

pub use shadow::{ShadowArena, ShadowMismatch};
pub use workload::{Op, Workload};

/// Which directory a chunk came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Free,
    Used,
}

/// A broken layout invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TilingViolation {
    /// A chunk extends past the end of the buffer.
    OutOfBounds { side: Side, chunk: Chunk, capacity: usize },
    /// Two chunks share bytes.
    Overlap { first: (Side, Chunk), second: (Side, Chunk) },
    /// Bytes `start..end` belong to no chunk.
    Gap { start: usize, end: usize },
}

impl fmt::Display for TilingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                side,
                chunk,
                capacity,
            } => write!(f, "{side:?} chunk [{chunk}] exceeds capacity {capacity}"),
            Self::Overlap { first, second } => write!(
                f,
                "{:?} chunk [{}] overlaps {:?} chunk [{}]",
                first.0, first.1, second.0, second.1
            ),
            Self::Gap { start, end } => write!(f, "bytes {start}..{end} are untracked"),
        }
    }
}

impl Error for TilingViolation {}

/// Non-empty chunks from both directories, sorted by start.
fn sorted_chunks<const MEM: usize, const CHUNKS: usize>(
    arena: &Arena<MEM, CHUNKS>,
) -> Vec<(Side, Chunk)> {
    let mut chunks: Vec<(Side, Chunk)> = arena
        .free_chunks()
        .iter()
        .map(|c| (Side::Free, *c))
        .chain(arena.used_chunks().iter().map(|c| (Side::Used, *c)))
        .filter(|(_, c)| !c.is_empty())
        .collect();
    chunks.sort_by_key(|(_, c)| c.start);
    chunks
}

/// Check that no two chunks overlap and every chunk lies inside the buffer.
///
/// Holds under every coalescing mode.
pub fn check_disjoint<const MEM: usize, const CHUNKS: usize>(
    arena: &Arena<MEM, CHUNKS>,
) -> Result<(), TilingViolation> {
    let chunks = sorted_chunks(arena);
    for &(side, chunk) in &chunks {
        if chunk.end() > MEM {
            return Err(TilingViolation::OutOfBounds {
                side,
                chunk,
                capacity: MEM,
            });
        }
    }
    for pair in chunks.windows(2) {
        if pair[0].1.overlaps(&pair[1].1) {
            return Err(TilingViolation::Overlap {
                first: pair[0],
                second: pair[1],
            });
        }
    }
    Ok(())
}

/// Check that free and used chunks together cover the buffer exactly once.
///
/// Only guaranteed under `CoalesceMode::Adjacent`.
pub fn check_tiling<const MEM: usize, const CHUNKS: usize>(
    arena: &Arena<MEM, CHUNKS>,
) -> Result<(), TilingViolation> {
    check_disjoint(arena)?;
    let mut cursor = 0;
    for (_, chunk) in sorted_chunks(arena) {
        if chunk.start > cursor {
            return Err(TilingViolation::Gap {
                start: cursor,
                end: chunk.start,
            });
        }
        cursor = chunk.end();
    }
    if cursor < MEM {
        return Err(TilingViolation::Gap {
            start: cursor,
            end: MEM,
        });
    }
    Ok(())
}
