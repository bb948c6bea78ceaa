//! Behavioral tests for the pinned fixed strategy through the facade

use seurat::{BufferManager, ManagerStats, PinnedPoolStats, PoolConfig, SeuratError};

fn pinned_manager(total_budget: usize, max_buffer_size: usize) -> BufferManager {
    let config = PoolConfig::new(total_budget, max_buffer_size).with_prefer_pinned(true);
    BufferManager::new(config).unwrap()
}

fn pinned_stats(manager: &BufferManager) -> PinnedPoolStats {
    match manager.stats() {
        ManagerStats::Pinned(stats) => stats,
        other => panic!("expected pinned stats, got {:?}", other),
    }
}

#[test]
fn three_tiers_from_equal_budget_thirds() {
    // 3MB budget, 64KB ceiling: tiers 4K/16K/64K, 1MB each
    let manager = pinned_manager(3 << 20, 1 << 16);
    let stats = pinned_stats(&manager);

    let sizes: Vec<_> = stats.tiers.iter().map(|t| t.buffer_size).collect();
    assert_eq!(sizes, vec![4096, 16_384, 65_536]);

    let counts: Vec<_> = stats.tiers.iter().map(|t| t.capacity).collect();
    assert_eq!(counts, vec![256, 64, 16]);

    // Everything preallocated up front
    assert!(stats.tiers.iter().all(|t| t.available == t.capacity));
}

#[test]
fn take_covers_request_from_smallest_fitting_tier() {
    let manager = pinned_manager(3 << 20, 1 << 16);
    for (size, expected) in [(1, 4096), (4096, 4096), (5000, 16_384), (60_000, 65_536)] {
        let buffer = manager.take(size);
        assert_eq!(buffer.len(), expected);
        manager.give_back(buffer).unwrap();
    }
}

#[test]
fn exhaustion_falls_back_without_growing_the_pool() {
    let manager = pinned_manager(3 << 20, 1 << 16);
    let capacity = pinned_stats(&manager).tiers[2].capacity;

    // Take twice the tier's capacity; the overflow is served ad hoc
    let held: Vec<_> = (0..capacity * 2).map(|_| manager.take(60_000)).collect();
    assert!(held.iter().all(|b| b.len() == 65_536));

    for buffer in held {
        manager.give_back(buffer).unwrap();
    }

    // Returns past capacity were dropped, not stashed
    let stats = pinned_stats(&manager);
    assert_eq!(stats.tiers[2].available, capacity);
}

#[test]
fn oversize_take_is_exact_and_not_returnable() {
    let manager = pinned_manager(3 << 20, 1 << 16);
    let buffer = manager.take(100_000);
    assert_eq!(buffer.len(), 100_000);

    let err = manager.give_back(buffer).unwrap_err();
    assert!(matches!(err, SeuratError::ForeignBuffer { length: 100_000 }));
}

#[test]
fn clear_releases_all_tiers() {
    let manager = pinned_manager(3 << 20, 1 << 16);
    manager.clear();

    let stats = pinned_stats(&manager);
    assert!(stats.tiers.iter().all(|t| t.available == 0));

    // Still serves requests via fallback
    assert_eq!(manager.take(60_000).len(), 65_536);
}
