//! Canned arena states.
//!
//! - [`reference_allocations`]: the 40/10/69-byte smoke-test sequence.
//! - [`fragmented`]: alternating live and free chunks of equal size.
//! - [`run_workload`]: drive a [`Workload`] through a [`ShadowArena`].

use chunkfit_arena::Arena;
use chunkfit_core::Handle;

use crate::shadow::{ShadowArena, ShadowMismatch};
use crate::workload::Workload;

/// Allocate 40, 10 and 69 bytes in order and return the three handles.
pub fn reference_allocations<const MEM: usize, const CHUNKS: usize>(
    arena: &mut Arena<MEM, CHUNKS>,
) -> [Handle; 3] {
    let a = arena.allocate(40).expect("40-byte allocation");
    let b = arena.allocate(10).expect("10-byte allocation");
    let c = arena.allocate(69).expect("69-byte allocation");
    [a, b, c]
}

/// Fill the arena with `slots` chunks of `size` bytes and free every other one.
///
/// Returns the handles that are still live. The free directory ends up with
/// `slots / 2` isolated holes plus the tail chunk.
pub fn fragmented<const MEM: usize, const CHUNKS: usize>(
    arena: &mut Arena<MEM, CHUNKS>,
    slots: usize,
    size: usize,
) -> Vec<Handle> {
    let handles: Vec<Handle> = (0..slots)
        .map(|_| arena.allocate(size).expect("fragmented fixture fits"))
        .collect();
    let mut live = Vec::with_capacity(slots / 2 + 1);
    for (i, h) in handles.into_iter().enumerate() {
        if i % 2 == 0 {
            arena.release(h);
        } else {
            live.push(h);
        }
    }
    live
}

/// Apply every op of `workload`, verifying contents after each step.
pub fn run_workload<const MEM: usize, const CHUNKS: usize>(
    arena: &mut Arena<MEM, CHUNKS>,
    workload: &Workload,
) -> Result<ShadowArena, ShadowMismatch> {
    let mut shadow = ShadowArena::new();
    for op in workload.ops() {
        shadow.apply(arena, op)?;
        shadow.verify(arena)?;
    }
    Ok(shadow)
}
