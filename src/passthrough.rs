//! Pass-through strategy: no pooling at all

use crate::buffer::Buffer;

/// Strategy used when pooling is explicitly disabled (zero budget).
/// Every take is a fresh allocation and every give-back a drop.
#[derive(Debug, Default)]
pub struct PassThroughPool;

impl PassThroughPool {
    /// Create the pass-through strategy
    pub fn new() -> Self {
        Self
    }

    /// Allocate a fresh buffer of exactly `size` bytes
    pub fn take(&self, size: usize) -> Buffer {
        Buffer::zeroed(size)
    }

    /// Discard the buffer
    pub fn give_back(&self, buffer: Buffer) {
        drop(buffer);
    }

    /// Nothing to release
    pub fn clear(&self) {}
}
