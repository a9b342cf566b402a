//! The first-fit arena allocator.
//!
//! [`Arena`] owns a fixed byte buffer and two [`ChunkDirectory`] instances:
//! `free` for unallocated ranges and `used` for live allocations. Every
//! operation is a method on an explicit arena value; there is no global
//! allocator state.
//!
//! ```text
//! mem:   [ A:40 | B:10 | C:69 |            free: 3977             ]
//! used:  (0,40) (40,10) (50,69)
//! free:  (119,3977)
//! ```

use std::fmt;

use chunkfit_core::{ArenaError, Chunk, Handle};

use crate::config::{ArenaConfig, CoalesceMode, DEFAULT_MAX_CHUNKS, DEFAULT_MEM_SIZE};
use crate::directory::ChunkDirectory;
use crate::stats::ArenaStats;

/// Fixed-capacity, first-fit allocator over an embedded byte buffer.
///
/// `MEM` is the buffer size in bytes and `CHUNKS` the slot count of each
/// chunk directory. Both are fixed at compile time; nothing here ever
/// reallocates. `CHUNKS` must be at least 2 for the arena to hold its
/// initial free chunk.
///
/// The arena is plain data: it is `Send`, and all mutation goes through
/// `&mut self`. Share it across threads only behind external
/// synchronisation.
#[derive(Clone)]
pub struct Arena<const MEM: usize = DEFAULT_MEM_SIZE, const CHUNKS: usize = DEFAULT_MAX_CHUNKS> {
    /// Backing storage handed out to callers.
    mem: [u8; MEM],
    /// Unallocated ranges, in the order they were created.
    free: ChunkDirectory<CHUNKS>,
    /// Live allocations, one entry per outstanding handle.
    used: ChunkDirectory<CHUNKS>,
    config: ArenaConfig,
}

impl<const MEM: usize, const CHUNKS: usize> Arena<MEM, CHUNKS> {
    /// Create an initialised arena with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    /// Create an initialised arena with the given configuration.
    pub fn with_config(config: ArenaConfig) -> Self {
        let mut arena = Self {
            mem: [0; MEM],
            free: ChunkDirectory::new(),
            used: ChunkDirectory::new(),
            config,
        };
        arena.initialize();
        arena
    }

    /// Reset both directories and seed `free` with the whole buffer.
    ///
    /// Every outstanding handle becomes invalid. Buffer contents are left
    /// as they are.
    pub fn initialize(&mut self) {
        self.free.reset();
        self.used.reset();
        // Only fails when CHUNKS < 2, which leaves an arena with no free space.
        let _ = self.free.add(0, MEM);
    }

    /// Allocate `size` bytes from the first free chunk large enough.
    ///
    /// Free chunks are scanned in directory order, not by address or size.
    /// The allocation is carved from the front of the chosen chunk; a chunk
    /// shrunk to zero bytes stays in the free directory. A zero-byte request
    /// succeeds and returns a handle to an empty range.
    pub fn allocate(&mut self, size: usize) -> Result<Handle, ArenaError> {
        let Some(idx) = self.free.iter().position(|c| c.size >= size) else {
            let largest_free = self.largest_free();
            tracing::debug!(size, largest_free, "allocation failed: no free chunk fits");
            return Err(ArenaError::OutOfMemory {
                requested: size,
                largest_free,
            });
        };

        let start = self.free.as_slice()[idx].start;
        if self.used.add(start, size).is_none() {
            tracing::debug!(size, "allocation failed: used directory full");
            return Err(ArenaError::DirectoryFull {
                capacity: self.used.capacity(),
            });
        }
        if let Some(chunk) = self.free.get_at_mut(idx) {
            chunk.start += size;
            chunk.size -= size;
        }

        let handle = Handle::from_offset(start);
        tracing::debug!(handle = %handle, size, "allocated");
        Ok(handle)
    }

    /// Return an allocation to the free directory.
    ///
    /// Unknown or already released handles are ignored. The released range
    /// merges with a free chunk that ends where it starts (`before`) and/or
    /// one that starts where it ends (`after`). When both exist the outcome
    /// depends on [`CoalesceMode`].
    ///
    /// If the range has no free neighbour and the free directory is full,
    /// [`CoalesceMode::Legacy`] drops the used entry anyway and the range is
    /// lost; [`CoalesceMode::Adjacent`] abandons the release and the
    /// allocation stays live.
    pub fn release(&mut self, handle: Handle) {
        let Some(released) = self.used.get(handle.offset()).copied() else {
            tracing::trace!(handle = %handle, "release of unknown handle ignored");
            return;
        };

        let mut before = None;
        let mut after = None;
        for (idx, chunk) in self.free.iter().enumerate() {
            if chunk.start == released.end() {
                after = Some(idx);
            }
            if chunk.end() == released.start {
                before = Some(idx);
            }
        }

        match (before, after) {
            (Some(before), Some(after)) => self.coalesce_both(released, before, after),
            (Some(before), None) => {
                if let Some(chunk) = self.free.get_at_mut(before) {
                    chunk.size += released.size;
                }
                self.used.remove(released.start);
                tracing::debug!(handle = %handle, size = released.size, "released into preceding free chunk");
            }
            (None, Some(after)) => {
                if let Some(chunk) = self.free.get_at_mut(after) {
                    chunk.start = released.start;
                    chunk.size += released.size;
                }
                self.used.remove(released.start);
                tracing::debug!(handle = %handle, size = released.size, "released into following free chunk");
            }
            (None, None) => {
                if self.free.add(released.start, released.size).is_some() {
                    self.used.remove(released.start);
                    tracing::debug!(handle = %handle, size = released.size, "released as new free chunk");
                    return;
                }
                match self.config.coalesce {
                    CoalesceMode::Legacy => {
                        self.used.remove(released.start);
                        tracing::warn!(
                            handle = %handle,
                            lost = released.size,
                            "free directory full: released range dropped"
                        );
                    }
                    CoalesceMode::Adjacent => {
                        tracing::warn!(
                            handle = %handle,
                            size = released.size,
                            "release abandoned: free directory full"
                        );
                    }
                }
            }
        }
    }

    fn coalesce_both(&mut self, released: Chunk, before: usize, after: usize) {
        let after_size = self.free.as_slice()[after].size;
        let merged_start = self.free.as_slice()[before].start;
        match self.config.coalesce {
            CoalesceMode::Legacy => {
                let mut merged_size = 0;
                if let Some(chunk) = self.free.get_at_mut(before) {
                    chunk.size += released.size + after_size;
                    merged_size = chunk.size;
                }
                self.used.remove(released.start);
                self.free.remove(merged_start);
                tracing::debug!(
                    start = merged_start,
                    size = released.size,
                    "released between two free chunks"
                );
                let lost = merged_size.saturating_sub(after_size);
                if lost > 0 {
                    tracing::warn!(
                        start = merged_start,
                        lost,
                        "legacy coalescing dropped the merged free range"
                    );
                }
            }
            CoalesceMode::Adjacent => {
                // A zero-size free chunk can sit on both sides of a zero-size release.
                let extra = if before == after { 0 } else { after_size };
                if let Some(chunk) = self.free.get_at_mut(before) {
                    chunk.size += released.size + extra;
                }
                if before != after {
                    self.free.remove_at(after);
                }
                self.used.remove(released.start);
                tracing::debug!(
                    start = merged_start,
                    size = released.size,
                    "released between two free chunks"
                );
            }
        }
    }

    /// Allocate `count * elem_size` bytes and zero them.
    ///
    /// An overflowing product is reported as [`ArenaError::SizeOverflow`].
    pub fn zero_allocate(&mut self, count: usize, elem_size: usize) -> Result<Handle, ArenaError> {
        let size = checked_size(count, elem_size)?;
        let handle = self.allocate(size)?;
        let start = handle.offset();
        self.mem[start..start + size].fill(0);
        Ok(handle)
    }

    /// Move an allocation into a new range of `new_size` bytes.
    ///
    /// `None` behaves like [`allocate`](Arena::allocate). Otherwise the new
    /// range is allocated before the old one is released, so the arena must
    /// briefly hold both. The first `min(old, new_size)` bytes are copied
    /// across. On failure the original allocation is untouched.
    pub fn resize(&mut self, handle: Option<Handle>, new_size: usize) -> Result<Handle, ArenaError> {
        let Some(handle) = handle else {
            return self.allocate(new_size);
        };
        let old = *self
            .used
            .get(handle.offset())
            .ok_or(ArenaError::UnknownHandle { handle })?;

        let new = self.allocate(new_size)?;
        let keep = old.size.min(new_size);
        self.mem
            .copy_within(old.start..old.start + keep, new.offset());
        self.release(handle);

        tracing::debug!(
            old = %handle,
            new = %new,
            old_size = old.size,
            new_size,
            "resized"
        );
        Ok(new)
    }

    /// [`resize`](Arena::resize) to `count * elem_size` bytes.
    pub fn resize_array(
        &mut self,
        handle: Option<Handle>,
        count: usize,
        elem_size: usize,
    ) -> Result<Handle, ArenaError> {
        let size = checked_size(count, elem_size)?;
        self.resize(handle, size)
    }

    /// Bytes of a live allocation.
    ///
    /// Zero-size allocations share their start with the next allocation
    /// carved from the same free chunk; a shared handle resolves to the
    /// oldest of them.
    pub fn bytes(&self, handle: Handle) -> Option<&[u8]> {
        let chunk = self.used.get(handle.offset())?;
        Some(&self.mem[chunk.start..chunk.end()])
    }

    /// Mutable bytes of a live allocation.
    pub fn bytes_mut(&mut self, handle: Handle) -> Option<&mut [u8]> {
        let chunk = *self.used.get(handle.offset())?;
        Some(&mut self.mem[chunk.start..chunk.end()])
    }

    /// Size in bytes of a live allocation.
    pub fn size_of(&self, handle: Handle) -> Option<usize> {
        self.used.get(handle.offset()).map(|c| c.size)
    }

    /// Whether `handle` names a live allocation.
    pub fn contains(&self, handle: Handle) -> bool {
        self.used.get(handle.offset()).is_some()
    }

    /// Size of the largest free chunk, or 0 if there is none.
    pub fn largest_free(&self) -> usize {
        self.free.iter().map(|c| c.size).max().unwrap_or(0)
    }

    /// Read-only view of the free directory.
    pub fn free_chunks(&self) -> &ChunkDirectory<CHUNKS> {
        &self.free
    }

    /// Read-only view of the used directory.
    pub fn used_chunks(&self) -> &ChunkDirectory<CHUNKS> {
        &self.used
    }

    /// Occupancy summary.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            total_bytes: MEM,
            used_bytes: self.used.total_size(),
            free_bytes: self.free.total_size(),
            largest_free: self.largest_free(),
            free_chunks: self.free.len(),
            used_chunks: self.used.len(),
        }
    }

    /// Size of the backing buffer in bytes.
    pub const fn capacity(&self) -> usize {
        MEM
    }

    /// The active configuration.
    pub fn config(&self) -> ArenaConfig {
        self.config
    }
}

fn checked_size(count: usize, elem_size: usize) -> Result<usize, ArenaError> {
    count
        .checked_mul(elem_size)
        .ok_or(ArenaError::SizeOverflow { count, elem_size })
}

impl<const MEM: usize, const CHUNKS: usize> Default for Arena<MEM, CHUNKS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MEM: usize, const CHUNKS: usize> fmt::Debug for Arena<MEM, CHUNKS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &MEM)
            .field("config", &self.config)
            .field("free", &self.free)
            .field("used", &self.used)
            .finish()
    }
}

/// Diagnostic dump of both directories.
impl<const MEM: usize, const CHUNKS: usize> fmt::Display for Arena<MEM, CHUNKS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Arena debug {:-<46}//", "")?;
        write!(f, "Free {}", self.free)?;
        write!(f, "Used {}", self.used)?;
        writeln!(f, "// {:-<58}//", "")
    }
}
