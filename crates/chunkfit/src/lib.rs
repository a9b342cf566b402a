//! Chunkfit: a fixed-capacity, first-fit arena allocator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the chunkfit sub-crates. For most users, adding `chunkfit` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use chunkfit::prelude::*;
//!
//! let mut arena: Arena = Arena::new();
//!
//! let h = arena.allocate(4 * 10).unwrap();
//! arena.bytes_mut(h).unwrap()[..4].copy_from_slice(&7i32.to_le_bytes());
//! assert_eq!(arena.size_of(h), Some(40));
//!
//! arena.release(h);
//! assert_eq!(arena.largest_free(), arena.capacity());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `chunkfit-arena` | [`Arena`](arena::Arena), chunk directories, config, stats |
//! | [`types`] | `chunkfit-core` | [`Handle`](types::Handle), [`Chunk`](types::Chunk), errors, version |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Arena allocator, chunk directories, and configuration (`chunkfit-arena`).
pub use chunkfit_arena as arena;

/// Handles, chunks, errors, and version accessors (`chunkfit-core`).
pub use chunkfit_core as types;

pub use chunkfit_core::{major, minor, version, VERSION, VERSION_MAJOR, VERSION_MINOR};

/// Common imports for typical chunkfit usage.
///
/// ```rust
/// use chunkfit::prelude::*;
///
/// let mut arena = Arena::<256, 16>::with_config(ArenaConfig::adjacent());
/// let h: Handle = arena.zero_allocate(8, 4).unwrap();
/// assert!(arena.bytes(h).unwrap().iter().all(|&b| b == 0));
/// ```
pub mod prelude {
    pub use chunkfit_arena::{Arena, ArenaConfig, ArenaStats, ChunkDirectory, CoalesceMode};
    pub use chunkfit_core::{ArenaError, Chunk, Handle};
}
