//! Global allocator.
//!
//! Whole files are held in memory while they are transformed, so the binary
//! uses mimalloc instead of the system allocator.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
