//! Arena configuration parameters.
//!
//! Buffer size and directory capacity are compile-time const generics on
//! [`Arena`](crate::Arena) and [`ChunkDirectory`](crate::ChunkDirectory);
//! the defaults live here. The only runtime knob is the coalescing policy.

/// Default backing buffer size in bytes.
pub const DEFAULT_MEM_SIZE: usize = 4096;

/// Default number of slots in each chunk directory.
///
/// One slot is always held back, so a directory built with this capacity
/// holds at most `DEFAULT_MAX_CHUNKS - 1` entries.
pub const DEFAULT_MAX_CHUNKS: usize = 1024;

/// How `release` treats a chunk that has free neighbours on both sides, or
/// none while the free directory is full.
///
/// The single-neighbour paths are identical in both modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoalesceMode {
    /// Reproduces the historical allocator bit for bit.
    ///
    /// The preceding free chunk absorbs the released chunk and the following
    /// free chunk, then the preceding chunk's entry is removed from the free
    /// directory. The merged range is lost and the following free chunk is
    /// left in place, so `before + released` bytes leak on every such
    /// release. A release that needs a new free entry when the free
    /// directory is full drops the range.
    #[default]
    Legacy,
    /// Merges all three ranges into the preceding free chunk and removes the
    /// following one. A release that cannot get a free entry is abandoned
    /// and the allocation stays live. Free and used chunks keep tiling the
    /// buffer.
    Adjacent,
}

/// Runtime configuration for an arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Policy for releasing a chunk between two free chunks.
    ///
    /// Default: [`CoalesceMode::Legacy`].
    pub coalesce: CoalesceMode,
}

impl ArenaConfig {
    /// Config with the given coalescing policy.
    pub fn new(coalesce: CoalesceMode) -> Self {
        Self { coalesce }
    }

    /// Config that keeps free and used chunks tiling the whole buffer.
    pub fn adjacent() -> Self {
        Self::new(CoalesceMode::Adjacent)
    }
}
