use core::ptr;

use crate::error::AllocError;
use crate::heap::{HeapCaps, MemCaps};

/// Where a blob's backing memory lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemRegion {
    /// Internal RAM.
    Internal,
    /// External SPI RAM.
    Spiram,
}

/// Owning handle for one DMA-capable block of memory.
///
/// A blob holds its block until [`free`](Blob::free) is called (or the
/// blob is dropped) and exposes it through [`as_slice`](Blob::as_slice)
/// and [`as_mut_slice`](Blob::as_mut_slice) only while it is held, so a
/// view can never outlive the allocation behind it.
pub struct Blob<A: HeapCaps> {
    alloc: A,
    ptr: *mut u8,
    len: usize,
    region: MemRegion,
}

impl<A: HeapCaps> Blob<A> {
    /// A blob that holds no memory yet.
    pub const fn empty(alloc: A) -> Self {
        Self {
            alloc,
            ptr: ptr::null_mut(),
            len: 0,
            region: MemRegion::Internal,
        }
    }

    /// Allocate a DMA-capable block and wrap it in one step.
    pub fn new_dma(
        alloc: A,
        size: usize,
        spiram: bool,
    ) -> Result<Self, AllocError> {
        let mut blob = Self::empty(alloc);
        blob.malloc_dma(size, spiram)?;
        Ok(blob)
    }

    /// Fill an empty blob with a freshly allocated DMA-capable block.
    ///
    /// The block is byte-addressable and DMA-capable, placed in external
    /// RAM when `spiram` is set and in internal RAM otherwise. The
    /// contents are uninitialized; callers must not assume zeroed memory.
    ///
    /// Fails with [`AllocError::InUse`] while the blob still owns a
    /// block, and with [`AllocError::ZeroSize`] for `size == 0` without
    /// touching the platform allocator.
    pub fn malloc_dma(
        &mut self,
        size: usize,
        spiram: bool,
    ) -> Result<(), AllocError> {
        if !self.ptr.is_null() {
            return Err(AllocError::InUse);
        }
        if size == 0 {
            return Err(AllocError::ZeroSize);
        }

        let mut caps = MemCaps::BYTE_ADDRESSABLE | MemCaps::DMA;
        if spiram {
            caps |= MemCaps::SPIRAM;
        } else {
            caps |= MemCaps::INTERNAL;
        }

        // SAFETY: size is nonzero, checked above.
        let data = unsafe { self.alloc.alloc(size, caps) };
        if data.is_null() {
            return Err(AllocError::OutOfMemory);
        }

        self.ptr = data;
        self.len = size;
        self.region = if spiram {
            MemRegion::Spiram
        } else {
            MemRegion::Internal
        };
        Ok(())
    }

    /// Release the block, if one is held.
    ///
    /// Safe to call repeatedly and on a blob that never held memory.
    pub fn free(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        // SAFETY: ptr came from self.alloc and is cleared below, so the
        // block cannot be freed a second time.
        unsafe { self.alloc.free(self.ptr) };
        self.ptr = ptr::null_mut();
        self.len = 0;
    }

    /// Length of the held block in bytes, 0 when empty.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the blob currently holds no memory.
    pub fn is_empty(&self) -> bool {
        self.ptr.is_null()
    }

    /// Raw address of the held block, null when empty.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr
    }

    /// Which memory region backs the held block, `None` when empty.
    pub fn region(&self) -> Option<MemRegion> {
        if self.ptr.is_null() {
            None
        } else {
            Some(self.region)
        }
    }

    /// Read view of the held block, `None` once released.
    pub fn as_slice(&self) -> Option<&[u8]> {
        if self.ptr.is_null() {
            return None;
        }
        // SAFETY: ptr/len describe a live allocation owned exclusively by
        // this blob, and the borrow is bounded by &self.
        Some(unsafe { core::slice::from_raw_parts(self.ptr, self.len) })
    }

    /// Read-write view of the held block, `None` once released.
    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        if self.ptr.is_null() {
            return None;
        }
        // SAFETY: as for as_slice, and &mut self guarantees the view is
        // the only live access to the block.
        Some(unsafe { core::slice::from_raw_parts_mut(self.ptr, self.len) })
    }
}

impl<A: HeapCaps> Drop for Blob<A> {
    fn drop(&mut self) {
        self.free();
    }
}

// SAFETY: A Blob exclusively owns its block; moving it to another thread
// moves the only path to the memory along with it.
unsafe impl<A: HeapCaps + Send> Send for Blob<A> {}

// SAFETY: Through &Blob the block is only readable (as_slice), which is
// fine to share as long as the allocator handle itself is shareable.
unsafe impl<A: HeapCaps + Sync> Sync for Blob<A> {}
