#![no_std]
//! Capability-allocated DMA buffers outside of any managed heap.
//!
//! LCD buses read pixel memory directly, so the memory backing a transfer
//! has to come from the platform's capability allocator with the right
//! flags set, and it must stay alive until it is explicitly released.
//! [`Blob`] is the owning handle for one such block; [`HeapCaps`] is the
//! seam a platform (or a test mock) implements to provide the memory.

mod blob;
mod error;
mod heap;

pub use blob::{Blob, MemRegion};
pub use error::AllocError;
pub use heap::{HeapCaps, MemCaps};
