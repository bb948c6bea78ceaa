//! Tiered adaptive buffer pooling
//!
//! A ladder of fixed-size classes shares one byte budget. Each class owns
//! a free list and quota counters; a miss-driven tuning pass redistributes
//! quota toward the classes under the most allocation pressure.

pub mod pool;
pub(crate) mod size_class;

pub use pool::AdaptivePool;
pub use size_class::LARGE_CLASS_THRESHOLD;
