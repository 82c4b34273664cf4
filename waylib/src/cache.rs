use std::fmt;

use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::{ConfigError, ViewError};
use crate::replacement::Policy;
use crate::window::Window;

/// The outcome of a single access: was it a hit, and which physical slot
/// was touched. Kept around as `last_access` so a presentation layer can
/// highlight the slot; the policy logic never reads it
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Access {
    pub hit: bool,
    pub slot: usize,
}

/// A set-associative cache simulator
///
/// The cache owns one slot per storage partition, each tracking validity,
/// the stored tag, and the three per-way counters the replacement policies
/// derive their decisions from. An address decomposes as
///
/// ```text
/// block = reference / partition_size      offset = reference % partition_size
/// tag   = block / sets                    set    = block % sets
/// ```
///
/// and a tag may only occupy the `ways` slots of its set. Accesses are
/// strictly sequential: every access first ages the target set, then
/// resolves to a hit or an eviction, so replaying a stream in a different
/// order gives different results. Independent instances share nothing and
/// can be driven in parallel when sweeping configurations
#[derive(Debug)]
pub struct Cache {
    partition_size: u64,
    partitions: usize,
    ways: usize,
    sets: usize,
    policy: Policy,
    valid: Vec<bool>,
    tags: Vec<u64>,
    // Counters feeding the policies: accesses since the slot was filled
    // (lfu), ticks since the last access (lru), and ticks since the current
    // tag was installed (fifo). Only meaningful while the slot is valid
    use_count: Vec<u64>,
    last_time: Vec<u64>,
    first_time: Vec<u64>,
    hits: u64,
    misses: u64,
    last_access: Option<Access>,
}

impl Cache {
    /// Creates a cache with `partitions` slots of `partition_size` words,
    /// grouped into sets of `ways` slots each
    ///
    /// Fails when any geometry field is zero, when `partitions` does not
    /// divide evenly into sets of `ways`, or when `ways != 1` without a
    /// replacement policy. A direct-mapped cache needs no policy because a
    /// block maps to exactly one slot
    pub fn new(
        partition_size: u64,
        partitions: usize,
        ways: usize,
        policy: Policy,
    ) -> Result<Self, ConfigError> {
        if partition_size == 0 {
            return Err(ConfigError::Zero {
                field: "partition_size",
            });
        }
        if partitions == 0 {
            return Err(ConfigError::Zero {
                field: "partitions",
            });
        }
        if ways == 0 {
            return Err(ConfigError::Zero { field: "ways" });
        }
        if ways != 1 && policy == Policy::None {
            return Err(ConfigError::PolicyRequired { ways });
        }
        if partitions % ways != 0 {
            return Err(ConfigError::UnevenSets { partitions, ways });
        }
        let sets = partitions / ways;
        debug!(partition_size, partitions, ways, sets, %policy, "built cache");
        Ok(Self {
            partition_size,
            partitions,
            ways,
            sets,
            policy,
            valid: vec![false; partitions],
            tags: vec![0; partitions],
            use_count: vec![0; partitions],
            last_time: vec![0; partitions],
            first_time: vec![0; partitions],
            hits: 0,
            misses: 0,
            last_access: None,
        })
    }

    /// Creates a cache from a parsed configuration, validated identically
    /// to [`Cache::new`]
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.partition_size,
            config.partitions,
            config.ways,
            config.policy,
        )
    }

    /// Accesses a single word reference
    ///
    /// The reference decomposes into a tag and owning set; the set's ways
    /// are then aged by one tick, checked for the tag, and on a miss the
    /// policy picks a victim slot to overwrite. A hit refreshes the use
    /// count and last-access age of its way but never the install age,
    /// which is what makes `fifo` first-in rather than least-recently
    /// installed
    ///
    /// Window errors indicate a violated internal invariant and are
    /// propagated; the counters are only committed on success
    pub fn access(&mut self, reference: u64) -> Result<Access, ViewError> {
        let block = reference / self.partition_size;
        let tag = block / self.sets as u64;
        let set = (block % self.sets as u64) as usize;

        // The slot range owned by the set: with 1 way this is a single
        // partition, with `partitions` ways it is the whole cache
        let start = set * self.ways;
        let end = start + self.ways;

        let mut wvalid = Window::new(&mut self.valid, start, end);
        let mut wtags = Window::new(&mut self.tags, start, end);
        let mut wuse = Window::new(&mut self.use_count, start, end);
        let mut wlast = Window::new(&mut self.last_time, start, end);
        let mut wfirst = Window::new(&mut self.first_time, start, end);

        // Everything in the set just got older, hit or miss
        for way in 0..self.ways as isize {
            wlast.set(way, wlast.get(way)? + 1)?;
            wfirst.set(way, wfirst.get(way)? + 1)?;
        }

        let mut hit_way = None;
        for way in 0..self.ways as isize {
            if wvalid.get(way)? && wtags.get(way)? == tag {
                hit_way = Some(way);
                break;
            }
        }

        let outcome = if let Some(way) = hit_way {
            wuse.set(way, wuse.get(way)? + 1)?;
            wlast.set(way, 0)?;
            // The install age is deliberately left alone
            self.hits += 1;
            Access {
                hit: true,
                slot: wtags.to_absolute(way)?,
            }
        } else {
            let way = self.policy.victim(&wuse, &wlast, &wfirst) as isize;
            wtags.set(way, tag)?;
            wvalid.set(way, true)?;
            wuse.set(way, 1)?;
            wlast.set(way, 0)?;
            wfirst.set(way, 0)?;
            self.misses += 1;
            Access {
                hit: false,
                slot: wtags.to_absolute(way)?,
            }
        };
        self.last_access = Some(outcome);
        trace!(
            reference,
            tag,
            set,
            slot = outcome.slot,
            hit = outcome.hit,
            "access"
        );
        Ok(outcome)
    }

    /// Replays a whole reference stream in order
    ///
    /// Order matters: every replacement decision depends on the history of
    /// earlier accesses
    pub fn access_many<I>(&mut self, references: I) -> Result<(), ViewError>
    where
        I: IntoIterator<Item = u64>,
    {
        for reference in references {
            self.access(reference)?;
        }
        Ok(())
    }

    /// Clears all slot state and counters, leaving the configuration alone
    pub fn reset(&mut self) {
        self.valid.fill(false);
        self.tags.fill(0);
        self.use_count.fill(0);
        self.last_time.fill(0);
        self.first_time.fill(0);
        self.hits = 0;
        self.misses = 0;
        self.last_access = None;
    }

    /// Reconstructs the inclusive word span cached in a slot
    ///
    /// `None` for a slot holding nothing. A slot index outside the cache is
    /// caller misuse and fails loudly rather than being clamped
    pub fn content_of(&self, slot: usize) -> Result<Option<(u64, u64)>, ViewError> {
        if slot >= self.partitions {
            return Err(ViewError::SlotOutOfRange {
                slot,
                partitions: self.partitions,
            });
        }
        if !self.valid[slot] {
            return Ok(None);
        }
        // Inverse of the decomposition in `access`
        let set = (slot / self.ways) as u64;
        let block = self.tags[slot] * self.sets as u64 + set;
        let first = block * self.partition_size;
        Ok(Some((first, first + self.partition_size - 1)))
    }

    pub fn partition_size(&self) -> u64 {
        self.partition_size
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    pub fn ways(&self) -> usize {
        self.ways
    }

    pub fn sets(&self) -> usize {
        self.sets
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn last_access(&self) -> Option<Access> {
        self.last_access
    }
}

impl fmt::Display for Cache {
    /// One-line summary for logging and quick inspection
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Cache(partitions={}, size={}, sets={}, ways={}, hits={}, misses={}, policy=\"{}\"))",
            self.partitions,
            self.partition_size,
            self.sets,
            self.ways,
            self.hits,
            self.misses,
            self.policy
        )
    }
}
