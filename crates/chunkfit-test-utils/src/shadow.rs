//! Shadow model of expected allocation contents.
//!
//! [`ShadowArena`] mirrors every live allocation with the bytes it should
//! hold. Applying an [`Op`] runs it against the real arena, writes a fresh
//! byte pattern into whatever was allocated, and records the expectation.
//! [`verify`](ShadowArena::verify) then compares the whole live set.

use std::error::Error;
use std::fmt;

use chunkfit_arena::Arena;
use chunkfit_core::Handle;
use indexmap::IndexMap;

use crate::workload::Op;

/// A live allocation whose bytes or size differ from the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowMismatch {
    pub handle: Handle,
    pub reason: String,
}

impl fmt::Display for ShadowMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allocation {}: {}", self.handle, self.reason)
    }
}

impl Error for ShadowMismatch {}

/// Expected contents of every live allocation, in allocation order.
#[derive(Debug, Default)]
pub struct ShadowArena {
    live: IndexMap<Handle, Vec<u8>>,
    next_pattern: u8,
    /// Ops that returned an error from the arena.
    pub failures: usize,
}

impl ShadowArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_bytes(&self) -> usize {
        self.live.values().map(Vec::len).sum()
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.live.keys().copied()
    }

    fn pattern(&mut self) -> u8 {
        // Never 0, so a freshly zeroed range is distinguishable.
        self.next_pattern = self.next_pattern.wrapping_add(1).max(1);
        self.next_pattern
    }

    fn pick(&self, pick: usize) -> Option<Handle> {
        if self.live.is_empty() {
            return None;
        }
        self.live.get_index(pick % self.live.len()).map(|(h, _)| *h)
    }

    fn stamp<const MEM: usize, const CHUNKS: usize>(
        &mut self,
        arena: &mut Arena<MEM, CHUNKS>,
        handle: Handle,
        keep: &[u8],
    ) -> Result<(), ShadowMismatch> {
        let fill = self.pattern();
        let bytes = arena.bytes_mut(handle).ok_or_else(|| ShadowMismatch {
            handle,
            reason: "fresh allocation not found in used directory".into(),
        })?;
        bytes.fill(fill);
        bytes[..keep.len()].copy_from_slice(keep);
        self.live.insert(handle, bytes.to_vec());
        Ok(())
    }

    /// Run `op` against `arena` and update the model.
    ///
    /// Returns a mismatch if the op's own postconditions fail (a zeroed
    /// range is not zero, a resize lost its prefix, a failed resize touched
    /// the old range).
    pub fn apply<const MEM: usize, const CHUNKS: usize>(
        &mut self,
        arena: &mut Arena<MEM, CHUNKS>,
        op: Op,
    ) -> Result<(), ShadowMismatch> {
        match op {
            Op::Allocate { size } => match arena.allocate(size) {
                Ok(h) => self.stamp(arena, h, &[])?,
                Err(_) => self.failures += 1,
            },
            Op::ZeroAllocate { count, elem_size } => match arena.zero_allocate(count, elem_size) {
                Ok(h) => {
                    let zeroed = arena.bytes(h).is_some_and(|b| b.iter().all(|&x| x == 0));
                    if !zeroed {
                        return Err(ShadowMismatch {
                            handle: h,
                            reason: "zero_allocate returned non-zero bytes".into(),
                        });
                    }
                    self.stamp(arena, h, &[])?;
                }
                Err(_) => self.failures += 1,
            },
            Op::Release { pick } => {
                if let Some(h) = self.pick(pick) {
                    arena.release(h);
                    self.live.shift_remove(&h);
                }
            }
            Op::Resize { pick, new_size } => {
                let Some(old) = self.pick(pick) else {
                    return Ok(());
                };
                let expected = self.live[&old].clone();
                match arena.resize(Some(old), new_size) {
                    Ok(new) => {
                        let keep = expected.len().min(new_size);
                        let copied = arena
                            .bytes(new)
                            .is_some_and(|b| b[..keep] == expected[..keep]);
                        if !copied {
                            return Err(ShadowMismatch {
                                handle: new,
                                reason: format!("resize lost the first {keep} bytes"),
                            });
                        }
                        self.live.shift_remove(&old);
                        self.stamp(arena, new, &expected[..keep])?;
                    }
                    Err(_) => {
                        self.failures += 1;
                        if arena.bytes(old) != Some(expected.as_slice()) {
                            return Err(ShadowMismatch {
                                handle: old,
                                reason: "failed resize modified the old range".into(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Compare every live allocation against the model.
    pub fn verify<const MEM: usize, const CHUNKS: usize>(
        &self,
        arena: &Arena<MEM, CHUNKS>,
    ) -> Result<(), ShadowMismatch> {
        for (&handle, expected) in &self.live {
            match arena.bytes(handle) {
                Some(actual) if actual == expected.as_slice() => {}
                Some(actual) => {
                    return Err(ShadowMismatch {
                        handle,
                        reason: format!(
                            "contents differ ({} bytes expected, {} found)",
                            expected.len(),
                            actual.len()
                        ),
                    })
                }
                None => {
                    return Err(ShadowMismatch {
                        handle,
                        reason: "live allocation missing from used directory".into(),
                    })
                }
            }
        }
        if arena.used_chunks().len() != self.live.len() {
            return Err(ShadowMismatch {
                handle: Handle::from_offset(0),
                reason: format!(
                    "used directory has {} entries, model has {}",
                    arena.used_chunks().len(),
                    self.live.len()
                ),
            });
        }
        Ok(())
    }
}
