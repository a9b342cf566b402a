//! Fixed-capacity, first-fit arena allocation.
//!
//! Provides malloc/free/calloc/realloc-style operations over a single byte
//! buffer embedded in the [`Arena`] value. Bookkeeping lives in two
//! bounded [`ChunkDirectory`] arrays, so nothing here touches the global
//! allocator.
//!
//! # Architecture
//!
//! ```text
//! Arena<MEM, CHUNKS>
//! ├── mem: [u8; MEM]                  (handed out by offset)
//! ├── free: ChunkDirectory<CHUNKS>    (unallocated ranges, insertion order)
//! ├── used: ChunkDirectory<CHUNKS>    (one entry per live handle)
//! └── config: ArenaConfig             (coalescing policy)
//! ```
//!
//! # Operations
//!
//! - **allocate:** first free chunk (directory order) that fits; carve from
//!   its front.
//! - **release:** return the range, merging with free chunks that touch it.
//! - **zero_allocate:** allocate `count * elem_size` bytes and clear them.
//! - **resize / resize_array:** allocate the new range, copy, release the old.
//!
//! # Safety
//!
//! No `unsafe`. Handles are offsets into the buffer and are resolved with
//! [`Arena::bytes`] / [`Arena::bytes_mut`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod directory;
pub mod stats;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use chunkfit_core::{ArenaError, Chunk, Handle};
pub use config::{ArenaConfig, CoalesceMode, DEFAULT_MAX_CHUNKS, DEFAULT_MEM_SIZE};
pub use directory::ChunkDirectory;
pub use stats::ArenaStats;
