//! Pool statistics snapshots for monitoring and tests

/// Point-in-time view of a single size class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeClassStats {
    /// Fixed buffer length for this class in bytes
    pub buffer_size: usize,
    /// Current quota: max buffers the free list may hold
    pub limit: usize,
    /// Buffers currently sitting in the free list
    pub count: usize,
    /// Historical maximum of `count`
    pub peak: usize,
    /// Misses accumulated since the last tuning pass
    pub misses: usize,
}

impl SizeClassStats {
    /// Bytes currently reserved by this class's quota
    pub fn reserved_bytes(&self) -> usize {
        self.limit * self.buffer_size
    }

    /// Whether the class has at some point been stocked to its full quota
    pub fn is_saturated(&self) -> bool {
        self.peak == self.limit
    }
}

/// Point-in-time view of the adaptive pool
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptivePoolStats {
    /// Per-class statistics, ascending by buffer size
    pub classes: Vec<SizeClassStats>,
    /// Budget bytes not currently reserved by any class quota
    pub remaining_budget: usize,
    /// Pool-wide misses accumulated since the last tuning pass
    pub total_misses: usize,
    /// Number of tuning passes that have run to completion
    pub tuning_passes: u64,
}

impl AdaptivePoolStats {
    /// Bytes reserved across all class quotas
    pub fn reserved_bytes(&self) -> usize {
        self.classes.iter().map(SizeClassStats::reserved_bytes).sum()
    }

    /// Get a summary string of the statistics
    pub fn summary(&self) -> String {
        format!(
            "AdaptivePoolStats {{ classes: {}, reserved: {}, remaining: {}, \
             misses: {}, tuning_passes: {} }}",
            self.classes.len(),
            self.reserved_bytes(),
            self.remaining_budget,
            self.total_misses,
            self.tuning_passes,
        )
    }
}

/// Point-in-time view of one pinned tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinnedTierStats {
    /// Fixed buffer length for this tier in bytes
    pub buffer_size: usize,
    /// Preallocated buffer count (fixed at construction)
    pub capacity: usize,
    /// Buffers currently available in the tier
    pub available: usize,
}

/// Point-in-time view of the pinned fixed pool
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinnedPoolStats {
    /// Per-tier statistics: small, medium, large
    pub tiers: Vec<PinnedTierStats>,
}

/// Snapshot exposed by the facade, one variant per strategy
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ManagerStats {
    /// Pooling disabled; nothing tracked
    PassThrough,
    /// Fixed three-tier strategy
    Pinned(PinnedPoolStats),
    /// Adaptive multi-class strategy
    Adaptive(AdaptivePoolStats),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_bytes() {
        let stats = AdaptivePoolStats {
            classes: vec![
                SizeClassStats {
                    buffer_size: 128,
                    limit: 2,
                    ..Default::default()
                },
                SizeClassStats {
                    buffer_size: 256,
                    limit: 1,
                    ..Default::default()
                },
            ],
            remaining_budget: 100,
            total_misses: 0,
            tuning_passes: 0,
        };
        assert_eq!(stats.reserved_bytes(), 512);
        assert!(stats.summary().contains("reserved: 512"));
    }

    #[test]
    fn test_saturation() {
        let class = SizeClassStats {
            buffer_size: 128,
            limit: 3,
            count: 1,
            peak: 3,
            misses: 0,
        };
        assert!(class.is_saturated());
    }
}
