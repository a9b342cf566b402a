//! Core types for the chunkfit arena allocator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the rest of the workspace: byte extents
//! ([`Chunk`]), allocation handles ([`Handle`]), the error type
//! ([`ArenaError`]), and version accessors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod handle;
pub mod version;

pub use error::ArenaError;
pub use handle::{Chunk, Handle};
pub use version::{major, minor, version, VERSION, VERSION_MAJOR, VERSION_MINOR};
