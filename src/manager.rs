//! Buffer manager facade: one strategy selected at construction

use tracing::debug;

use crate::adaptive::AdaptivePool;
use crate::buffer::Buffer;
use crate::config::PoolConfig;
use crate::error::Result;
use crate::passthrough::PassThroughPool;
use crate::pinned::PinnedPool;
use crate::stats::ManagerStats;

/// The closed set of pooling strategies. Selection happens exactly once
/// at construction; there is no runtime polymorphism beyond these three.
#[derive(Debug)]
enum Strategy {
    PassThrough(PassThroughPool),
    Pinned(PinnedPool),
    Adaptive(AdaptivePool),
}

/// Facade over the three pooling strategies.
///
/// Transport callers ask for a buffer of a requested size before an I/O
/// read or write and return it afterward:
///
/// ```
/// use seurat::{BufferManager, PoolConfig};
///
/// let manager = BufferManager::new(PoolConfig::new(1 << 20, 1 << 16)).unwrap();
/// let buffer = manager.take(60_000);
/// assert!(buffer.len() >= 60_000);
/// manager.give_back(buffer).unwrap();
/// ```
///
/// `take` never fails: strategy-level exhaustion and oversize requests
/// degrade to un-pooled heap allocations inside the facade.
#[derive(Debug)]
pub struct BufferManager {
    config: PoolConfig,
    strategy: Strategy,
}

impl BufferManager {
    /// Select and construct a strategy from the configuration:
    /// zero budget selects pass-through, `prefer_pinned` the fixed
    /// three-tier pool, anything else the adaptive pool.
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;

        let strategy = if config.total_budget == 0 {
            Strategy::PassThrough(PassThroughPool::new())
        } else if config.prefer_pinned {
            Strategy::Pinned(PinnedPool::new(config.total_budget, config.max_buffer_size))
        } else {
            Strategy::Adaptive(AdaptivePool::new(
                config.total_budget,
                config.max_buffer_size,
            ))
        };

        let manager = Self { config, strategy };
        debug!(strategy = manager.strategy_name(), "buffer manager ready");
        Ok(manager)
    }

    /// The configuration this manager was built from
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Name of the selected strategy
    pub fn strategy_name(&self) -> &'static str {
        match &self.strategy {
            Strategy::PassThrough(_) => "pass_through",
            Strategy::Pinned(_) => "pinned",
            Strategy::Adaptive(_) => "adaptive",
        }
    }

    /// Take a buffer of at least `size` bytes. Never fails.
    pub fn take(&self, size: usize) -> Buffer {
        match &self.strategy {
            Strategy::PassThrough(pool) => pool.take(size),
            Strategy::Pinned(pool) => pool
                .take(size)
                .unwrap_or_else(|| Buffer::zeroed(pool.fallback_len(size))),
            Strategy::Adaptive(pool) => pool.take(size),
        }
    }

    /// Return a buffer to the pool it came from. Errors only on the
    /// caller contract violation of handing back a buffer whose length
    /// matches no size class or tier.
    pub fn give_back(&self, buffer: Buffer) -> Result<()> {
        match &self.strategy {
            Strategy::PassThrough(pool) => {
                pool.give_back(buffer);
                Ok(())
            }
            Strategy::Pinned(pool) => pool.give_back(buffer),
            Strategy::Adaptive(pool) => pool.give_back(buffer),
        }
    }

    /// Tear down pooled buffers at shutdown
    pub fn clear(&self) {
        match &self.strategy {
            Strategy::PassThrough(pool) => pool.clear(),
            Strategy::Pinned(pool) => pool.clear(),
            Strategy::Adaptive(pool) => pool.clear(),
        }
    }

    /// Snapshot of the selected strategy's counters
    pub fn stats(&self) -> ManagerStats {
        match &self.strategy {
            Strategy::PassThrough(_) => ManagerStats::PassThrough,
            Strategy::Pinned(pool) => ManagerStats::Pinned(pool.stats()),
            Strategy::Adaptive(pool) => ManagerStats::Adaptive(pool.stats()),
        }
    }
}
