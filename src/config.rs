//! Buffer manager configuration

/// Configuration for a [`BufferManager`](crate::BufferManager)
///
/// Consumed once at construction; the selected strategy keeps a copy for
/// its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    /// Total memory budget in bytes shared by all size classes.
    /// Zero disables pooling entirely (pass-through strategy).
    pub total_budget: usize,
    /// The largest buffer the pool will manage; requests above this are
    /// served by one-off heap allocations that bypass pooling.
    pub max_buffer_size: usize,
    /// Prefer the fixed preallocated strategy over the adaptive one when
    /// pooling is enabled
    pub prefer_pinned: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            total_budget: 1024 * 1024,
            max_buffer_size: 64 * 1024,
            prefer_pinned: false,
        }
    }
}

impl PoolConfig {
    /// Create a configuration with the given budget and buffer ceiling
    pub fn new(total_budget: usize, max_buffer_size: usize) -> Self {
        Self {
            total_budget,
            max_buffer_size,
            prefer_pinned: false,
        }
    }

    /// Set the total memory budget
    pub fn with_total_budget(mut self, budget: usize) -> Self {
        self.total_budget = budget;
        self
    }

    /// Set the maximum pooled buffer size
    pub fn with_max_buffer_size(mut self, size: usize) -> Self {
        self.max_buffer_size = size;
        self
    }

    /// Select the pinned fixed strategy when pooling is enabled
    pub fn with_prefer_pinned(mut self, prefer: bool) -> Self {
        self.prefer_pinned = prefer;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SeuratError;

        if self.max_buffer_size == 0 {
            return Err(SeuratError::invalid_parameter(
                "max_buffer_size",
                "Maximum buffer size cannot be zero",
            ));
        }

        Ok(())
    }
}

/// Builder pattern for buffer manager configuration
pub struct PoolConfigBuilder {
    config: PoolConfig,
}

impl PoolConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: PoolConfig::default(),
        }
    }

    /// Set the total memory budget
    pub fn total_budget(mut self, budget: usize) -> Self {
        self.config.total_budget = budget;
        self
    }

    /// Set the maximum pooled buffer size
    pub fn max_buffer_size(mut self, size: usize) -> Self {
        self.config.max_buffer_size = size;
        self
    }

    /// Select the pinned fixed strategy
    pub fn prefer_pinned(mut self, prefer: bool) -> Self {
        self.config.prefer_pinned = prefer;
        self
    }

    /// Build the configuration, validating it first
    pub fn build(self) -> crate::error::Result<PoolConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for PoolConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
