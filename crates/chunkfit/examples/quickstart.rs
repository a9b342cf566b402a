//! Allocate room for ten `i32`s, fill them, dump the arena, release.
//!
//! Run with `RUST_LOG=trace` to see the allocator's own events.

use chunkfit::prelude::*;

fn main() -> Result<(), ArenaError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("chunkfit v{}.{}", chunkfit::major(), chunkfit::minor());

    let mut arena: Arena = Arena::new();
    let h = arena.allocate(std::mem::size_of::<i32>() * 10)?;

    if let Some(bytes) = arena.bytes_mut(h) {
        for (i, word) in bytes.chunks_exact_mut(4).enumerate() {
            word.copy_from_slice(&(i as i32).to_le_bytes());
        }
    }

    print!("{arena}");
    arena.release(h);
    print!("{arena}");
    println!("{}", arena.stats());
    Ok(())
}
