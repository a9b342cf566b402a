//! Bounded, insertion-ordered chunk directories.
//!
//! A [`ChunkDirectory`] is a fixed `[Chunk; N]` array with a length cursor.
//! Entries are appended at the cursor and removed by compacting the tail
//! left, so the live entries are always `chunks[..len]` in insertion order.
//! The arena keeps two of them: one for free ranges, one for allocations.

use std::fmt;

use chunkfit_core::Chunk;

use crate::config::DEFAULT_MAX_CHUNKS;

/// Fixed-capacity, order-preserving list of chunks.
///
/// Capacity is the const parameter `N`. One slot is never handed out:
/// [`add`](ChunkDirectory::add) refuses once `len + 1 >= N`, so at most
/// `N - 1` entries are live at a time.
#[derive(Clone)]
pub struct ChunkDirectory<const N: usize = DEFAULT_MAX_CHUNKS> {
    /// Backing slots. Only `chunks[..len]` is meaningful.
    chunks: [Chunk; N],
    /// Number of live entries.
    len: usize,
}

impl<const N: usize> ChunkDirectory<N> {
    /// Create an empty directory.
    pub const fn new() -> Self {
        Self {
            chunks: [Chunk::new(0, 0); N],
            len: 0,
        }
    }

    /// Append a chunk.
    ///
    /// Returns the new entry, or `None` if the directory is at capacity.
    /// Existing entries are untouched on failure.
    pub fn add(&mut self, start: usize, size: usize) -> Option<&mut Chunk> {
        if self.len + 1 >= N {
            return None;
        }
        let idx = self.len;
        self.chunks[idx] = Chunk::new(start, size);
        self.len += 1;
        Some(&mut self.chunks[idx])
    }

    /// Remove the first entry whose start is `start`.
    ///
    /// Later entries shift left by one. Does nothing if no entry matches.
    pub fn remove(&mut self, start: usize) {
        if let Some(idx) = self.position(start) {
            self.remove_at(idx);
        }
    }

    /// Remove the entry at `index`, shifting later entries left.
    ///
    /// Does nothing if `index` is out of range.
    pub fn remove_at(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.chunks.copy_within(index + 1..self.len, index);
        self.len -= 1;
    }

    /// First entry whose start is `start`.
    pub fn get(&self, start: usize) -> Option<&Chunk> {
        self.as_slice().iter().find(|c| c.start == start)
    }

    /// Mutable access to the first entry whose start is `start`.
    pub fn get_mut(&mut self, start: usize) -> Option<&mut Chunk> {
        let idx = self.position(start)?;
        Some(&mut self.chunks[idx])
    }

    /// Mutable access to the entry at `index`.
    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut Chunk> {
        if index >= self.len {
            return None;
        }
        Some(&mut self.chunks[index])
    }

    /// Index of the first entry whose start is `start`.
    pub fn position(&self, start: usize) -> Option<usize> {
        self.as_slice().iter().position(|c| c.start == start)
    }

    /// Drop every entry. Slot contents are left as they are.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of live entries (`N - 1`).
    pub fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    /// Whether the next [`add`](ChunkDirectory::add) would fail.
    pub fn is_full(&self) -> bool {
        self.len + 1 >= N
    }

    /// Live entries in insertion order.
    pub fn as_slice(&self) -> &[Chunk] {
        &self.chunks[..self.len]
    }

    /// Iterate over live entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.as_slice().iter()
    }

    /// Sum of all entry sizes in bytes.
    pub fn total_size(&self) -> usize {
        self.iter().map(|c| c.size).sum()
    }
}

impl<const N: usize> Default for ChunkDirectory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for ChunkDirectory<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkDirectory")
            .field("len", &self.len)
            .field("chunks", &self.as_slice())
            .finish()
    }
}

impl<const N: usize> fmt::Display for ChunkDirectory<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chunk list len: {}", self.len)?;
        for chunk in self.iter() {
            writeln!(f, "- {chunk}")?;
        }
        Ok(())
    }
}

impl<'a, const N: usize> IntoIterator for &'a ChunkDirectory<N> {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_directory_is_empty() {
        let dir = ChunkDirectory::<8>::new();
        assert!(dir.is_empty());
        assert_eq!(dir.len(), 0);
        assert_eq!(dir.capacity(), 7);
    }

    #[test]
    fn add_appends_in_order() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 10).unwrap();
        dir.add(30, 5).unwrap();
        dir.add(10, 20).unwrap();
        let starts: Vec<usize> = dir.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 30, 10]);
    }

    #[test]
    fn add_returns_the_new_entry() {
        let mut dir = ChunkDirectory::<8>::new();
        let chunk = dir.add(16, 4).unwrap();
        assert_eq!(*chunk, Chunk::new(16, 4));
        chunk.size = 8;
        assert_eq!(dir.get(16).unwrap().size, 8);
    }

    #[test]
    fn add_reserves_last_slot() {
        let mut dir = ChunkDirectory::<4>::new();
        assert!(dir.add(0, 1).is_some());
        assert!(dir.add(1, 1).is_some());
        assert!(dir.add(2, 1).is_some());
        assert!(dir.is_full());
        assert!(dir.add(3, 1).is_none());
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn add_beyond_capacity_keeps_entries_intact() {
        let mut dir = ChunkDirectory::<3>::new();
        dir.add(0, 1).unwrap();
        dir.add(5, 2).unwrap();
        let before: Vec<Chunk> = dir.as_slice().to_vec();
        assert!(dir.add(9, 9).is_none());
        assert_eq!(dir.as_slice(), before.as_slice());
    }

    #[test]
    fn remove_compacts_tail() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 1).unwrap();
        dir.add(1, 2).unwrap();
        dir.add(3, 3).unwrap();
        dir.remove(1);
        assert_eq!(dir.as_slice(), &[Chunk::new(0, 1), Chunk::new(3, 3)]);
    }

    #[test]
    fn remove_last_entry() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 1).unwrap();
        dir.add(1, 2).unwrap();
        dir.remove(1);
        assert_eq!(dir.as_slice(), &[Chunk::new(0, 1)]);
    }

    #[test]
    fn remove_missing_start_is_noop() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 1).unwrap();
        dir.add(1, 2).unwrap();
        dir.remove(42);
        assert_eq!(dir.as_slice(), &[Chunk::new(0, 1), Chunk::new(1, 2)]);
    }

    #[test]
    fn remove_takes_first_duplicate() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(7, 0).unwrap();
        dir.add(7, 5).unwrap();
        dir.remove(7);
        assert_eq!(dir.as_slice(), &[Chunk::new(7, 5)]);
    }

    #[test]
    fn remove_at_out_of_range_is_noop() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 1).unwrap();
        dir.remove_at(3);
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn get_finds_by_start() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 1).unwrap();
        dir.add(4, 2).unwrap();
        assert_eq!(dir.get(4), Some(&Chunk::new(4, 2)));
        assert!(dir.get(2).is_none());
    }

    #[test]
    fn get_ignores_removed_slots() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 1).unwrap();
        dir.add(4, 2).unwrap();
        dir.remove(4);
        assert!(dir.get(4).is_none());
        assert_eq!(dir.position(4), None);
    }

    #[test]
    fn reset_clears_visibility() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 1).unwrap();
        dir.add(4, 2).unwrap();
        dir.reset();
        assert!(dir.is_empty());
        assert!(dir.get(0).is_none());
        // Slots are reusable after reset.
        dir.add(9, 9).unwrap();
        assert_eq!(dir.as_slice(), &[Chunk::new(9, 9)]);
    }

    #[test]
    fn total_size_sums_entries() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 10).unwrap();
        dir.add(20, 5).unwrap();
        assert_eq!(dir.total_size(), 15);
    }

    #[test]
    fn display_lists_entries() {
        let mut dir = ChunkDirectory::<8>::new();
        dir.add(0, 10).unwrap();
        let text = dir.to_string();
        assert!(text.starts_with("Chunk list len: 1\n"));
        assert!(text.contains("- start = 0x0000, size = 10"));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn len_never_exceeds_capacity(
                adds in proptest::collection::vec((0usize..64, 0usize..64), 0..40),
            ) {
                let mut dir = ChunkDirectory::<16>::new();
                for (start, size) in adds {
                    let _ = dir.add(start, size);
                    prop_assert!(dir.len() <= dir.capacity());
                }
            }

            #[test]
            fn remove_preserves_relative_order(
                starts in proptest::collection::hash_set(0usize..1000, 1..20),
                pick in 0usize..20,
            ) {
                let starts: Vec<usize> = starts.into_iter().collect();
                let mut dir = ChunkDirectory::<32>::new();
                for &s in &starts {
                    dir.add(s, 1).unwrap();
                }
                let victim = starts[pick % starts.len()];
                dir.remove(victim);
                let expected: Vec<usize> =
                    starts.iter().copied().filter(|&s| s != victim).collect();
                let actual: Vec<usize> = dir.iter().map(|c| c.start).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
