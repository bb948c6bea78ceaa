//! # Seurat - Adaptive Buffer Pooling for Transport I/O
//!
//! Seurat supplies and reclaims reusable byte buffers for a transport
//! layer's hot I/O path. Three interchangeable strategies sit behind one
//! facade, selected once at construction:
//!
//! - **Pass-through**: no pooling; every take is a fresh allocation
//!   (budget of zero).
//! - **Pinned fixed**: three preallocated tiers, no runtime resizing;
//!   deterministic, allocation-free steady state for I/O that needs
//!   address-stable buffers.
//! - **Tiered adaptive**: size classes doubling from 128 bytes up to a
//!   configured ceiling, sharing one byte budget. A miss-driven tuning
//!   pass continuously shifts quota toward the classes under the most
//!   allocation pressure without ever exceeding the budget.
//!
//! ## Usage
//!
//! ```
//! use seurat::{BufferManager, PoolConfigBuilder};
//!
//! let config = PoolConfigBuilder::new()
//!     .total_budget(1 << 20)
//!     .max_buffer_size(1 << 16)
//!     .build()
//!     .unwrap();
//! let manager = BufferManager::new(config).unwrap();
//!
//! let mut buffer = manager.take(60_000);
//! buffer[0] = 0x42;
//! manager.give_back(buffer).unwrap();
//! ```
//!
//! ## Guarantees
//!
//! - `take` never fails: exhaustion and oversize requests degrade to
//!   un-pooled heap allocations.
//! - A pooled take for `size <= max_buffer_size` returns a buffer of the
//!   selected class's exact length (always `>= size`).
//! - Free lists never hold more buffers than their quota.
//! - All strategies tolerate concurrent take/give-back from many
//!   threads; nothing in the crate suspends or blocks indefinitely.

pub mod adaptive;
pub mod buffer;
pub mod config;
pub mod error;
pub mod manager;
pub mod passthrough;
pub mod pinned;
pub mod stats;

// Main API re-exports
pub use adaptive::{AdaptivePool, LARGE_CLASS_THRESHOLD};
pub use buffer::Buffer;
pub use config::{PoolConfig, PoolConfigBuilder};
pub use error::{Result, SeuratError};
pub use manager::BufferManager;
pub use passthrough::PassThroughPool;
pub use pinned::PinnedPool;
pub use stats::{
    AdaptivePoolStats, ManagerStats, PinnedPoolStats, PinnedTierStats, SizeClassStats,
};
