use bitflags::bitflags;

bitflags! {
    /// Capability bits for a platform allocation request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MemCaps: u32 {
        /// Memory the CPU can address byte-by-byte.
        const BYTE_ADDRESSABLE = 1 << 0;
        /// Memory a DMA engine may read from directly.
        const DMA = 1 << 1;
        /// Place the block in internal RAM.
        const INTERNAL = 1 << 2;
        /// Place the block in external (SPI) RAM.
        const SPIRAM = 1 << 3;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MemCaps {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "MemCaps {0:b}", self.bits())
    }
}

/// Platform capability allocator.
///
/// Implementors map [`MemCaps`] onto whatever their heap understands and
/// hand back raw blocks. No zero-initialization and no alignment beyond
/// what the platform itself guarantees.
pub trait HeapCaps {
    /// Allocate `size` bytes satisfying `caps`.
    ///
    /// Returns a null pointer when the request cannot be satisfied.
    ///
    /// # Safety
    ///
    /// `size` must be nonzero.
    unsafe fn alloc(&self, size: usize, caps: MemCaps) -> *mut u8;

    /// Release a block previously returned by [`alloc`](HeapCaps::alloc).
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `alloc` on this same allocator and
    /// must not be freed more than once.
    unsafe fn free(&self, ptr: *mut u8);
}

impl<T: HeapCaps> HeapCaps for &T {
    unsafe fn alloc(&self, size: usize, caps: MemCaps) -> *mut u8 {
        T::alloc(self, size, caps)
    }

    unsafe fn free(&self, ptr: *mut u8) {
        T::free(self, ptr)
    }
}
