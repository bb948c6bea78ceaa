//! Size class leaf: one fixed-length free list with quota tracking

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use crossbeam_queue::ArrayQueue;
use parking_lot::Mutex;

use crate::buffer::Buffer;
use crate::stats::SizeClassStats;

/// Classes at or above this buffer size use a mutex-guarded stack instead
/// of the lock-free queue. Buffers this large are requested infrequently
/// enough that lock overhead is immaterial.
pub const LARGE_CLASS_THRESHOLD: usize = 85_000;

/// Free-list storage for one size class.
///
/// The lock-free queue is bounded at the class quota, so a push past the
/// quota fails and the buffer is dropped instead of being stashed
/// uncounted. The mutex stack enforces the same bound explicitly.
#[derive(Debug)]
enum FreeList {
    /// Lock-free bounded queue for small and medium classes
    Queue(ArrayQueue<Buffer>),
    /// Mutex-guarded stack for large classes
    Stack {
        slots: Mutex<Vec<Buffer>>,
        limit: usize,
    },
    /// A class whose quota is currently zero holds nothing
    Empty,
}

impl FreeList {
    fn with_quota(buffer_size: usize, limit: usize) -> Self {
        if limit == 0 {
            FreeList::Empty
        } else if buffer_size < LARGE_CLASS_THRESHOLD {
            FreeList::Queue(ArrayQueue::new(limit))
        } else {
            FreeList::Stack {
                slots: Mutex::new(Vec::with_capacity(limit)),
                limit,
            }
        }
    }

    fn pop(&self) -> Option<Buffer> {
        match self {
            FreeList::Queue(queue) => queue.pop(),
            FreeList::Stack { slots, .. } => slots.lock().pop(),
            FreeList::Empty => None,
        }
    }

    /// Push a buffer, returning false if the list is at quota
    fn push(&self, buffer: Buffer) -> bool {
        match self {
            FreeList::Queue(queue) => queue.push(buffer).is_ok(),
            FreeList::Stack { slots, limit } => {
                let mut slots = slots.lock();
                if slots.len() < *limit {
                    slots.push(buffer);
                    true
                } else {
                    false
                }
            }
            FreeList::Empty => false,
        }
    }

    fn len(&self) -> usize {
        match self {
            FreeList::Queue(queue) => queue.len(),
            FreeList::Stack { slots, .. } => slots.lock().len(),
            FreeList::Empty => 0,
        }
    }
}

/// One buffer-length tier of the adaptive pool.
///
/// Holds the free list plus the quota counters the tuning pass reads:
/// `limit` (current quota), `peak` (historical max free-list population)
/// and `misses` (failed takes while saturated, since the last tuning
/// pass). Take and give-back are lock-free for classes below
/// [`LARGE_CLASS_THRESHOLD`]; only the tuning pass calls `resize`, under
/// the pool-wide tuning lock.
#[derive(Debug)]
pub(crate) struct SizeClass {
    buffer_size: usize,
    limit: AtomicUsize,
    free: ArcSwap<FreeList>,
    peak: AtomicUsize,
    misses: AtomicUsize,
}

impl SizeClass {
    pub(crate) fn new(buffer_size: usize, limit: usize) -> Self {
        Self {
            buffer_size,
            limit: AtomicUsize::new(limit),
            free: ArcSwap::from_pointee(FreeList::with_quota(buffer_size, limit)),
            peak: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub(crate) fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    #[inline]
    pub(crate) fn limit(&self) -> usize {
        self.limit.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Buffers currently in the free list
    pub(crate) fn count(&self) -> usize {
        self.free.load().len()
    }

    /// Whether the class has at some point held its full quota. A class
    /// with a zero quota is saturated by definition: it can never hold a
    /// buffer, so every take against it misses.
    #[inline]
    pub(crate) fn is_saturated(&self) -> bool {
        self.peak.load(Ordering::Relaxed) >= self.limit.load(Ordering::Relaxed)
    }

    /// Pop a buffer from the free list. `None` means the list was empty
    /// at the time of the call; the caller decides whether that counts as
    /// a real miss (class saturated) or a transient absence.
    pub(crate) fn take(&self) -> Option<Buffer> {
        self.free.load().pop()
    }

    /// Return a buffer to the free list. A push past the quota drops the
    /// buffer, keeping `count <= limit` at all times.
    pub(crate) fn give_back(&self, buffer: Buffer) {
        debug_assert_eq!(buffer.len(), self.buffer_size);

        let free = self.free.load();
        if free.push(buffer) {
            let count = free.len().min(self.limit.load(Ordering::Relaxed));
            self.peak.fetch_max(count, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn reset_misses(&self) {
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Rebuild the free list with a new quota, transferring up to
    /// `new_limit` currently-free buffers and dropping the rest. `peak`
    /// is re-seeded to the transferred count: a resized class must refill
    /// to its new quota before it is again considered saturated.
    ///
    /// Caller must hold the pool-wide tuning lock. Concurrent take and
    /// give-back proceed against whichever list they loaded; a give-back
    /// that lands on the retired list is dropped with it.
    pub(crate) fn resize(&self, new_limit: usize) {
        let fresh = Arc::new(FreeList::with_quota(self.buffer_size, new_limit));
        self.limit.store(new_limit, Ordering::Relaxed);
        let retired = self.free.swap(Arc::clone(&fresh));

        let mut moved = 0;
        while moved < new_limit {
            match retired.pop() {
                Some(buffer) => {
                    if !fresh.push(buffer) {
                        break;
                    }
                    moved += 1;
                }
                None => break,
            }
        }
        self.peak.store(moved, Ordering::Relaxed);
    }

    /// Drop every free buffer while keeping the quota layout intact
    pub(crate) fn clear(&self) {
        let limit = self.limit.load(Ordering::Relaxed);
        self.free
            .store(Arc::new(FreeList::with_quota(self.buffer_size, limit)));
        self.peak.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> SizeClassStats {
        SizeClassStats {
            buffer_size: self.buffer_size,
            limit: self.limit.load(Ordering::Relaxed),
            count: self.count(),
            peak: self.peak.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_from_empty_class() {
        let class = SizeClass::new(256, 1);
        assert!(class.take().is_none());
        assert_eq!(class.count(), 0);
        assert!(!class.is_saturated());
    }

    #[test]
    fn test_round_trip_updates_peak() {
        let class = SizeClass::new(256, 2);
        class.give_back(Buffer::zeroed(256));
        assert_eq!(class.count(), 1);
        assert_eq!(class.peak(), 1);

        let buf = class.take().unwrap();
        assert_eq!(buf.len(), 256);
        assert_eq!(class.count(), 0);
        // Peak is historical, not current
        assert_eq!(class.peak(), 1);
    }

    #[test]
    fn test_push_past_quota_is_dropped() {
        let class = SizeClass::new(128, 2);
        for _ in 0..5 {
            class.give_back(Buffer::zeroed(128));
        }
        assert_eq!(class.count(), 2);
        assert_eq!(class.peak(), 2);
        assert!(class.is_saturated());
    }

    #[test]
    fn test_zero_quota_class_holds_nothing() {
        let class = SizeClass::new(128, 0);
        class.give_back(Buffer::zeroed(128));
        assert_eq!(class.count(), 0);
        // Zero quota means saturated by definition
        assert!(class.is_saturated());
    }

    #[test]
    fn test_resize_grow_transfers_free_buffers() {
        let class = SizeClass::new(128, 1);
        class.give_back(Buffer::zeroed(128));
        assert_eq!(class.count(), 1);

        class.resize(2);
        assert_eq!(class.limit(), 2);
        assert_eq!(class.count(), 1);
        assert_eq!(class.peak(), 1);
        // The transferred buffer is still usable
        assert_eq!(class.take().unwrap().len(), 128);
    }

    #[test]
    fn test_resize_shrink_drops_excess() {
        let class = SizeClass::new(128, 3);
        for _ in 0..3 {
            class.give_back(Buffer::zeroed(128));
        }
        class.resize(1);
        assert_eq!(class.limit(), 1);
        assert_eq!(class.count(), 1);
        assert!(class.take().is_some());
        assert!(class.take().is_none());
    }

    #[test]
    fn test_resize_to_zero() {
        let class = SizeClass::new(128, 1);
        class.give_back(Buffer::zeroed(128));
        class.resize(0);
        assert_eq!(class.limit(), 0);
        assert_eq!(class.count(), 0);
        assert!(class.take().is_none());
    }

    #[test]
    fn test_large_class_uses_mutex_stack() {
        let class = SizeClass::new(LARGE_CLASS_THRESHOLD, 2);
        class.give_back(Buffer::zeroed(LARGE_CLASS_THRESHOLD));
        class.give_back(Buffer::zeroed(LARGE_CLASS_THRESHOLD));
        class.give_back(Buffer::zeroed(LARGE_CLASS_THRESHOLD));
        assert_eq!(class.count(), 2);
        assert_eq!(class.take().unwrap().len(), LARGE_CLASS_THRESHOLD);
    }

    #[test]
    fn test_clear_keeps_quota() {
        let class = SizeClass::new(256, 2);
        class.give_back(Buffer::zeroed(256));
        class.clear();
        assert_eq!(class.count(), 0);
        assert_eq!(class.limit(), 2);
        assert_eq!(class.peak(), 0);
    }
}
