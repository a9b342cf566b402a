//! Error types for arena operations.
//!
//! Every failure in the allocator is a return value. Releasing an unknown
//! handle is not an error at all: it is ignored.

use std::error::Error;
use std::fmt;

use crate::handle::Handle;

/// Errors returned by allocating arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// No single free chunk is large enough for the request.
    ///
    /// Returned even when the sum of several smaller free chunks would
    /// cover the request: chunks are never combined at allocation time.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
        /// Size of the largest free chunk at the time of the request.
        largest_free: usize,
    },
    /// A chunk directory has no slot left for another entry.
    DirectoryFull {
        /// Number of usable entries in the directory.
        capacity: usize,
    },
    /// The handle does not name a live allocation.
    UnknownHandle {
        /// The rejected handle.
        handle: Handle,
    },
    /// `count * elem_size` does not fit in a `usize`.
    SizeOverflow {
        /// Number of elements requested.
        count: usize,
        /// Size of each element in bytes.
        elem_size: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                requested,
                largest_free,
            } => {
                write!(
                    f,
                    "out of arena memory: requested {requested} bytes, largest free chunk {largest_free} bytes"
                )
            }
            Self::DirectoryFull { capacity } => {
                write!(f, "chunk directory full: {capacity} entries in use")
            }
            Self::UnknownHandle { handle } => {
                write!(f, "unknown allocation handle: {handle}")
            }
            Self::SizeOverflow { count, elem_size } => {
                write!(
                    f,
                    "allocation size overflow: {count} elements of {elem_size} bytes"
                )
            }
        }
    }
}

impl Error for ArenaError {}
