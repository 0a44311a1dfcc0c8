/// Errors from DMA blob allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AllocError {
    /// A zero-byte allocation was requested.
    ZeroSize,
    /// The blob already owns a block; free it first.
    InUse,
    /// The platform allocator could not satisfy the request.
    OutOfMemory,
}

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AllocError::ZeroSize => write!(f, "size should be positive"),
            AllocError::InUse => write!(f, "free blob before reuse"),
            AllocError::OutOfMemory => {
                write!(f, "cannot allocate DMA-capable memory")
            }
        }
    }
}
