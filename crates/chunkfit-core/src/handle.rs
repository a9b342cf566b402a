//! Allocation handles and the [`Chunk`] extent type.

use std::fmt;

/// Identifies a live allocation within an arena.
///
/// A handle is the byte offset at which the allocation starts inside the
/// arena's backing buffer. It doubles as the key of the allocation's entry
/// in the arena's used-chunk directory, so two handles are equal exactly
/// when they name the same start offset.
///
/// Handles never expose real pointers; resolve one to bytes through the
/// arena that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct Handle(pub(crate) usize);

impl Handle {
    /// Build a handle from a raw buffer offset.
    ///
    /// Mostly useful in tests and diagnostics. A handle built this way is
    /// only meaningful if the offset is the start of a live allocation.
    pub const fn from_offset(offset: usize) -> Self {
        Self(offset)
    }

    /// Byte offset of the allocation within the backing buffer.
    pub const fn offset(self) -> usize {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

impl From<Handle> for usize {
    fn from(h: Handle) -> Self {
        h.0
    }
}

/// A contiguous byte range inside an arena buffer.
///
/// Chunks carry no type information. They are pure extents used by the
/// free and used directories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Chunk {
    /// Offset of the first byte.
    pub start: usize,
    /// Number of bytes covered.
    pub size: usize,
}

impl Chunk {
    /// Create a chunk covering `start..start + size`.
    pub const fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// Offset one past the last byte.
    pub const fn end(&self) -> usize {
        self.start + self.size
    }

    /// Whether the chunk covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The chunk's start offset as an allocation handle.
    pub const fn handle(&self) -> Handle {
        Handle(self.start)
    }

    /// Whether two chunks share at least one byte.
    ///
    /// Zero-size chunks never overlap anything.
    pub fn overlaps(&self, other: &Chunk) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end()
            && other.start < self.end()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "start = {:#06x}, size = {}", self.start, self.size)
    }
}
