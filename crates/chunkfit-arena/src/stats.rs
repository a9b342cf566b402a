//! Occupancy statistics.

use std::fmt;

/// Point-in-time summary of an arena's directories.
///
/// `used_bytes + free_bytes == total_bytes` holds whenever the free and
/// used chunks tile the buffer. Under legacy coalescing the sum can fall
/// short; the difference is the number of leaked bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Size of the backing buffer.
    pub total_bytes: usize,
    /// Bytes held by live allocations.
    pub used_bytes: usize,
    /// Bytes recorded in the free directory.
    pub free_bytes: usize,
    /// Largest single free chunk: the biggest request that can succeed.
    pub largest_free: usize,
    /// Entries in the free directory, including zero-size ones.
    pub free_chunks: usize,
    /// Entries in the used directory.
    pub used_chunks: usize,
}

impl ArenaStats {
    /// Bytes tracked by neither directory.
    pub fn leaked_bytes(&self) -> usize {
        self.total_bytes
            .saturating_sub(self.used_bytes + self.free_bytes)
    }

    /// Share of free bytes outside the largest free chunk, in `[0, 1]`.
    ///
    /// 0 means all free space is contiguous.
    pub fn fragmentation(&self) -> f64 {
        if self.free_bytes == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.free_bytes as f64
    }
}

impl fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} bytes used in {} chunks, {} free in {} chunks (largest {})",
            self.used_bytes,
            self.total_bytes,
            self.used_chunks,
            self.free_bytes,
            self.free_chunks,
            self.largest_free
        )
    }
}
