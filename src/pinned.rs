//! Pinned fixed strategy: three preallocated tiers, no runtime resizing

use parking_lot::Mutex;
use tracing::debug;

use crate::buffer::Buffer;
use crate::error::{Result, SeuratError};
use crate::stats::{PinnedPoolStats, PinnedTierStats};

/// One fixed tier: a bounded stack of preallocated buffers
#[derive(Debug)]
struct Tier {
    buffer_size: usize,
    capacity: usize,
    slots: Mutex<Vec<Buffer>>,
}

impl Tier {
    fn new(buffer_size: usize, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            slots.push(Buffer::zeroed(buffer_size));
        }
        Self {
            buffer_size,
            capacity,
            slots: Mutex::new(slots),
        }
    }

    fn pop(&self) -> Option<Buffer> {
        self.slots.lock().pop()
    }

    /// Push only while below the fixed capacity; excess buffers are
    /// dropped so resident memory never grows past the preallocation
    fn push(&self, buffer: Buffer) {
        let mut slots = self.slots.lock();
        if slots.len() < self.capacity {
            slots.push(buffer);
        }
    }

    fn snapshot(&self) -> PinnedTierStats {
        PinnedTierStats {
            buffer_size: self.buffer_size,
            capacity: self.capacity,
            available: self.slots.lock().len(),
        }
    }
}

/// Fixed three-tier pool, preallocated once at construction.
///
/// Tiers are large = `max_buffer_size`, medium = `max/4`, small =
/// `max/16`, each funded with an equal third of the budget. The pool
/// never grows: an exhausted tier signals unavailable and the caller
/// falls back to an ad-hoc allocation the pool does not track. Buffers
/// live on the heap at stable addresses for their whole lifetime, which
/// is what scatter/gather I/O needs from a "pinned" buffer; nothing here
/// can relocate them.
///
/// Trades the adaptive strategy's flexibility for deterministic,
/// allocation-free steady-state operation.
#[derive(Debug)]
pub struct PinnedPool {
    /// Ascending: small, medium, large
    tiers: [Tier; 3],
    max_buffer_size: usize,
}

impl PinnedPool {
    /// Preallocate all three tiers from an equal budget split
    pub fn new(total_budget: usize, max_buffer_size: usize) -> Self {
        let large = max_buffer_size;
        let medium = (max_buffer_size / 4).max(1);
        let small = (max_buffer_size / 16).max(1);

        let third = total_budget / 3;
        let tiers = [
            Tier::new(small, third / small),
            Tier::new(medium, third / medium),
            Tier::new(large, third / large),
        ];

        debug!(
            total_budget,
            max_buffer_size,
            small_count = tiers[0].capacity,
            medium_count = tiers[1].capacity,
            large_count = tiers[2].capacity,
            "pinned pool preallocated"
        );

        Self {
            tiers,
            max_buffer_size,
        }
    }

    /// The largest buffer size any tier serves
    pub fn max_buffer_size(&self) -> usize {
        self.max_buffer_size
    }

    /// Pop a buffer from the smallest tier that fits `size`. `None`
    /// means unavailable: either `size` exceeds the largest tier or the
    /// selected tier is exhausted. The pool never grows; the caller must
    /// allocate ad hoc and that buffer is never tracked here.
    pub fn take(&self, size: usize) -> Option<Buffer> {
        if size > self.max_buffer_size {
            return None;
        }
        let tier = self.tiers.iter().find(|t| t.buffer_size >= size)?;
        tier.pop()
    }

    /// The length an ad-hoc fallback allocation should use so it stays
    /// returnable: the matching tier size, or the exact size for
    /// oversize requests
    pub fn fallback_len(&self, size: usize) -> usize {
        self.tiers
            .iter()
            .find(|t| t.buffer_size >= size)
            .map_or(size, |t| t.buffer_size)
    }

    /// Push a buffer onto the tier its length exactly matches. A length
    /// matching no tier is a caller contract violation.
    pub fn give_back(&self, buffer: Buffer) -> Result<()> {
        let length = buffer.len();
        let tier = self
            .tiers
            .iter()
            .find(|t| t.buffer_size == length)
            .ok_or_else(|| SeuratError::foreign_buffer(length))?;

        tier.push(buffer);
        Ok(())
    }

    /// Release every buffer across all tiers
    pub fn clear(&self) {
        for tier in &self.tiers {
            tier.slots.lock().clear();
        }
    }

    /// Snapshot of tier occupancy
    pub fn stats(&self) -> PinnedPoolStats {
        PinnedPoolStats {
            tiers: self.tiers.iter().map(Tier::snapshot).collect(),
        }
    }
}
