use serde::Deserialize;

use crate::replacement::Policy;

/// A cache configuration, usually resulting from parsing JSON
///
/// ```json
/// { "partition_size": 4, "partitions": 8, "ways": 2, "policy": "lru" }
/// ```
///
/// `ways` defaults to 1 (direct mapping) and `policy` to none; the
/// associativity/policy combination is validated when the cache is built,
/// not here
#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    /// Words per storage partition (block size)
    pub partition_size: u64,
    /// Total number of storage partitions
    pub partitions: usize,
    #[serde(default = "default_ways")]
    pub ways: usize,
    #[serde(default)]
    pub policy: Policy,
}

fn default_ways() -> usize {
    1
}
