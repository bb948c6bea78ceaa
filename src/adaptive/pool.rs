//! Tiered adaptive pool: a ladder of size classes sharing one byte budget

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::buffer::Buffer;
use crate::error::{Result, SeuratError};
use crate::stats::AdaptivePoolStats;

use super::size_class::SizeClass;

/// Smallest size class in the ladder
const MIN_CLASS_SIZE: usize = 128;

/// Pool-wide miss count that triggers a tuning pass
const TUNING_TRIGGER: usize = 8;

/// Adaptive multi-class buffer pool.
///
/// Size classes double from 128 bytes up to the configured maximum, each
/// with its own free list and quota. A fixed byte budget is shared across
/// all quotas; a miss-driven tuning pass continuously shifts quota toward
/// whichever class is under the most allocation pressure, never exceeding
/// the original budget:
///
/// `sum(limit * buffer_size) + remaining_budget == total_budget`
///
/// Take and give-back are safe to call from many threads. Tuning is
/// single-flight and best-effort: a thread that cannot acquire the tuning
/// lock skips tuning and proceeds.
#[derive(Debug)]
pub struct AdaptivePool {
    /// Size classes in ascending buffer-size order
    classes: Vec<SizeClass>,
    /// Budget bytes not reserved by any class quota
    remaining_budget: AtomicUsize,
    total_budget: usize,
    max_buffer_size: usize,
    /// Misses across all classes since the last tuning pass
    total_misses: AtomicUsize,
    /// Single-flight gate for the tuning pass
    tuning_gate: Mutex<()>,
    tuning_passes: AtomicU64,
}

impl AdaptivePool {
    /// Create a pool with the given byte budget and buffer-size ceiling.
    ///
    /// Every class starts with a quota of one buffer if the remaining
    /// budget affords it, zero otherwise; buffers themselves are created
    /// lazily on first miss.
    pub fn new(total_budget: usize, max_buffer_size: usize) -> Self {
        let mut sizes = Vec::new();
        let mut size = MIN_CLASS_SIZE;
        while size < max_buffer_size {
            sizes.push(size);
            size *= 2;
        }
        // Final class clamped to the exact ceiling
        sizes.push(max_buffer_size);

        let mut remaining = total_budget;
        let classes = sizes
            .into_iter()
            .map(|buffer_size| {
                let limit = if remaining >= buffer_size {
                    remaining -= buffer_size;
                    1
                } else {
                    0
                };
                SizeClass::new(buffer_size, limit)
            })
            .collect::<Vec<_>>();

        debug!(
            total_budget,
            max_buffer_size,
            classes = classes.len(),
            remaining,
            "adaptive pool created"
        );

        Self {
            classes,
            remaining_budget: AtomicUsize::new(remaining),
            total_budget,
            max_buffer_size,
            total_misses: AtomicUsize::new(0),
            tuning_gate: Mutex::new(()),
            tuning_passes: AtomicU64::new(0),
        }
    }

    /// The largest buffer size served from a class; requests above this
    /// bypass pooling entirely
    pub fn max_buffer_size(&self) -> usize {
        self.max_buffer_size
    }

    /// The fixed byte budget shared across all class quotas
    pub fn total_budget(&self) -> usize {
        self.total_budget
    }

    /// Take a buffer of at least `size` bytes. Never fails: a pool miss
    /// falls back to a fresh class-sized allocation, and an oversize
    /// request is served by an exact-size allocation that bypasses
    /// pooling.
    pub fn take(&self, size: usize) -> Buffer {
        let Some(class) = self.classes.iter().find(|c| c.buffer_size() >= size) else {
            return Buffer::zeroed(size);
        };

        if let Some(buffer) = class.take() {
            return buffer;
        }

        // Only a saturated class records a real miss; an unsaturated one
        // is merely waiting for lazily-created buffers to come back.
        if class.is_saturated() {
            class.record_miss();
            let misses = self.total_misses.fetch_add(1, Ordering::Relaxed) + 1;
            if misses >= TUNING_TRIGGER {
                self.try_tune();
            }
        }

        // Always the class boundary, never the requested size, so the
        // buffer stays returnable.
        Buffer::zeroed(class.buffer_size())
    }

    /// Return a buffer to the class whose size exactly matches its
    /// length. A length matching no class is a caller contract violation:
    /// pooled buffers always carry a class-exact length.
    pub fn give_back(&self, buffer: Buffer) -> Result<()> {
        let length = buffer.len();
        let class = self
            .classes
            .iter()
            .find(|c| c.buffer_size() == length)
            .ok_or_else(|| SeuratError::foreign_buffer(length))?;

        class.give_back(buffer);
        Ok(())
    }

    /// Drop every class's free buffers; quotas survive
    pub fn clear(&self) {
        for class in &self.classes {
            class.clear();
        }
        self.total_misses.store(0, Ordering::Relaxed);
    }

    /// Snapshot of per-class counters and budget state
    pub fn stats(&self) -> AdaptivePoolStats {
        AdaptivePoolStats {
            classes: self.classes.iter().map(SizeClass::snapshot).collect(),
            remaining_budget: self.remaining_budget.load(Ordering::Relaxed),
            total_misses: self.total_misses.load(Ordering::Relaxed),
            tuning_passes: self.tuning_passes.load(Ordering::Relaxed),
        }
    }

    /// Run the tuning pass if no other thread currently is. Losing the
    /// race is fine: miss counters keep accumulating until the active
    /// pass finishes and resets them.
    fn try_tune(&self) {
        let Some(_guard) = self.tuning_gate.try_lock() else {
            trace!("tuning pass already in flight, skipping");
            return;
        };
        self.tune();
    }

    /// Shift quota toward the class under the most allocation pressure.
    /// Caller holds the tuning gate.
    fn tune(&self) {
        // Most starved: saturated class wasting the most allocation bytes
        let starved = self
            .classes
            .iter()
            .filter(|c| c.is_saturated() && c.misses() > 0)
            .max_by_key(|c| c.misses() * c.buffer_size());

        if let Some(starved) = starved {
            let needed = starved.buffer_size();

            if self.remaining_budget.load(Ordering::Relaxed) < needed {
                // Most excessive: class with the most unused reserved bytes
                let excessive = self
                    .classes
                    .iter()
                    .filter(|c| c.peak() < c.limit())
                    .max_by_key(|c| (c.limit() - c.peak()) * c.buffer_size());

                if let Some(excessive) = excessive {
                    let new_limit = excessive.limit() - 1;
                    excessive.resize(new_limit);
                    self.remaining_budget
                        .fetch_add(excessive.buffer_size(), Ordering::Relaxed);
                    trace!(
                        buffer_size = excessive.buffer_size(),
                        new_limit,
                        "shrank excessive class"
                    );
                }
            }

            if self.remaining_budget.load(Ordering::Relaxed) >= needed {
                self.remaining_budget.fetch_sub(needed, Ordering::Relaxed);
                let new_limit = starved.limit() + 1;
                starved.resize(new_limit);
                debug!(
                    buffer_size = starved.buffer_size(),
                    new_limit,
                    "grew starved class"
                );
            }
        }

        // Counters always restart, even on a no-op pass; otherwise the
        // trigger would re-fire on every subsequent miss.
        for class in &self.classes {
            class.reset_misses();
        }
        self.total_misses.store(0, Ordering::Relaxed);
        self.tuning_passes.fetch_add(1, Ordering::Relaxed);
    }
}
