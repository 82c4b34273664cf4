use std::fmt;

use serde::Deserialize;

use crate::window::Window;

/// The replacement policy deciding which way to overwrite on a miss
///
/// `None` is only legal for direct-mapped caches, where there is a single
/// way and therefore no decision to make. The other policies pick a victim
/// from the per-way counters kept by the cache, and all of them resolve
/// ties by taking the lowest way index, so replays are deterministic
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub enum Policy {
    #[serde(alias = "none")]
    None,
    #[serde(alias = "lfu")]
    Lfu,
    #[serde(alias = "lru")]
    Lru,
    #[serde(alias = "fifo")]
    Fifo,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::None
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::None => "none",
            Policy::Lfu => "lfu",
            Policy::Lru => "lru",
            Policy::Fifo => "fifo",
        };
        write!(f, "{name}")
    }
}

impl Policy {
    /// Picks the way to evict from the windowed per-way counters
    ///
    /// * `lfu` takes the minimum use count (used least often)
    /// * `lru` takes the maximum last-access age (aged longest without a hit)
    /// * `fifo` takes the maximum install age (resident longest)
    ///
    /// With no policy there is a single way, so way 0 is the only choice
    pub(crate) fn victim(
        &self,
        use_count: &Window<'_, u64>,
        last_time: &Window<'_, u64>,
        first_time: &Window<'_, u64>,
    ) -> usize {
        match self {
            Policy::None => 0,
            Policy::Lfu => min_way(use_count),
            Policy::Lru => max_way(last_time),
            Policy::Fifo => max_way(first_time),
        }
    }
}

// Strict comparisons keep the first occurrence on ties
fn min_way(counters: &Window<'_, u64>) -> usize {
    let mut best = 0;
    let mut best_value = u64::MAX;
    for (way, &value) in counters.iter().enumerate() {
        if value < best_value {
            best_value = value;
            best = way;
        }
    }
    best
}

fn max_way(counters: &Window<'_, u64>) -> usize {
    let mut best = 0;
    let mut best_value = 0;
    for (way, &value) in counters.iter().enumerate() {
        if value > best_value {
            best_value = value;
            best = way;
        }
    }
    best
}
