/*!
 * Pid Index Shard Sizing
 * Derives the registry's shard count from the host CPU topology instead of
 * hardcoding it, so the same build spreads lock traffic on dense hosts
 * without over-sharding small edge boxes
 */

use std::sync::OnceLock;

/// Computed once; the registry may be constructed from several threads
static PID_INDEX_SHARDS: OnceLock<usize> = OnceLock::new();

/// Shard count for the pid index
///
/// Every charge, policy write, event update, and attribute read resolves an
/// identity through the index, so it is the crate's one contended map. Four
/// shards per CPU keep unrelated pids off the same lock; the count is rounded
/// to a power of two so the map's shard selection stays a mask, and clamped
/// to [8, 512] (1-2 core hosts still spread load, larger counts stop paying
/// for themselves).
#[must_use]
pub fn pid_index_shards() -> usize {
    *PID_INDEX_SHARDS.get_or_init(|| {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or_else(|_| {
                log::warn!("Failed to detect CPU count, defaulting to 8");
                8
            });

        let shards = (cpus * 4).next_power_of_two().clamp(8, 512);
        log::info!("Pid index sharding: {} CPUs -> {} shards", cpus, shards);
        shards
    })
}
