//! Buffer type handed across the pool boundary

use std::fmt;
use std::ops::{Deref, DerefMut};

/// A contiguous byte block of fixed length.
///
/// Between `take` and `give_back` the caller owns the buffer exclusively;
/// the pool never reads or mutates its contents, only its length. The
/// backing storage is a heap allocation whose address is stable for the
/// buffer's lifetime, which is what scatter/gather I/O needs from it.
pub struct Buffer {
    data: Box<[u8]>,
}

impl Buffer {
    /// Allocate a zero-filled buffer of exactly `len` bytes
    pub fn zeroed(len: usize) -> Self {
        Self {
            data: vec![0u8; len].into_boxed_slice(),
        }
    }

    /// Length of the buffer in bytes (fixed for its lifetime)
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is zero-length
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the buffer as a byte slice
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer as a mutable byte slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Take ownership of the backing storage
    pub fn into_boxed_slice(self) -> Box<[u8]> {
        self.data
    }
}

impl Deref for Buffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl DerefMut for Buffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl From<Box<[u8]>> for Buffer {
    fn from(data: Box<[u8]>) -> Self {
        Self { data }
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer").field("len", &self.len()).finish()
    }
}
