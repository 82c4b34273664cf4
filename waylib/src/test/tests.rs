use crate::cache::{Access, Cache};
use crate::config::CacheConfig;
use crate::error::{ConfigError, ParseError, ViewError};
use crate::refs::parse_refs;
use crate::replacement::Policy;
use crate::window::Window;

#[test]
fn window_clamps_to_backing_bounds() {
    let mut backing = vec![1u64, 2, 3, 4];
    let window = Window::new(&mut backing, 2, 10);
    assert_eq!(window.len(), 2);

    let mut backing = vec![1u64, 2, 3, 4];
    let window = Window::new(&mut backing, 5, 3);
    assert!(window.is_empty());

    let mut backing = vec![1u64, 2, 3, 4];
    let window = Window::full(&mut backing);
    assert_eq!(window.len(), 4);
}

#[test]
fn window_translates_local_and_negative_indices() {
    let mut backing = vec![10u64, 20, 30, 40];
    let window = Window::new(&mut backing, 1, 3);
    assert_eq!(window.get(0), Ok(20));
    assert_eq!(window.get(1), Ok(30));
    assert_eq!(window.get(-1), Ok(30));
    assert_eq!(window.get(-2), Ok(20));
    assert_eq!(window.to_absolute(0), Ok(1));
    assert_eq!(window.to_absolute(-1), Ok(2));
    assert_eq!(window.get(2), Err(ViewError::OutOfRange { local: 2, len: 2 }));
    assert_eq!(
        window.get(-3),
        Err(ViewError::OutOfRange { local: -3, len: 2 })
    );
}

#[test]
fn window_writes_through_to_the_backing_storage() {
    let mut backing = vec![10u64, 20, 30, 40];
    {
        let mut window = Window::new(&mut backing, 1, 3);
        window.set(1, 99).unwrap();
        window.set(-2, 77).unwrap();
    }
    assert_eq!(backing, vec![10, 77, 99, 40]);
}

#[test]
fn window_scans_only_its_own_range() {
    let mut backing = vec![10u64, 20, 30, 40];
    let window = Window::new(&mut backing, 1, 3);
    assert!(window.contains(&20));
    assert!(!window.contains(&10));
    assert_eq!(window.index_of(&30), Ok(1));
    assert_eq!(window.index_of(&40), Err(ViewError::NotFound));
}

#[test]
fn hits_and_misses_account_for_every_access() {
    let mut cache = Cache::new(4, 16, 4, Policy::Lru).unwrap();
    let references: Vec<u64> = (0..100).map(|i| (i * 7) % 200).collect();
    cache.access_many(references).unwrap();
    assert_eq!(cache.hits() + cache.misses(), 100);
}

#[test]
fn direct_mapped_repeat_access_always_hits() {
    let mut cache = Cache::new(2, 4, 1, Policy::None).unwrap();
    assert_eq!(cache.access(5).unwrap().hit, false);
    assert_eq!(cache.access(5).unwrap().hit, true);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
}

#[test]
fn fifo_evicts_the_first_installed_tag_despite_later_hits() {
    // Fully associative, capacity 4, one word per partition so a reference
    // is its own block tag
    let mut cache = Cache::new(1, 4, 4, Policy::Fifo).unwrap();
    cache.access_many([0, 1, 2, 3]).unwrap();
    assert_eq!(cache.misses(), 4);

    // A hit on the oldest entry must not refresh its install age
    assert!(cache.access(0).unwrap().hit);

    // The 5th distinct tag evicts tag 0, installed first
    let eviction = cache.access(4).unwrap();
    assert_eq!(eviction, Access { hit: false, slot: 0 });
    assert!(!cache.access(0).unwrap().hit);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 6);
}

#[test]
fn lru_protects_a_freshly_re_accessed_entry() {
    let mut cache = Cache::new(1, 2, 2, Policy::Lru).unwrap();
    cache.access_many([0, 1]).unwrap();
    assert!(cache.access(0).unwrap().hit);

    // Way 0 was just refreshed, so way 1 (holding tag 1) is the victim
    let eviction = cache.access(2).unwrap();
    assert_eq!(eviction, Access { hit: false, slot: 1 });
    assert!(cache.access(0).unwrap().hit);
    assert_eq!(cache.hits(), 2);
    assert_eq!(cache.misses(), 3);
}

#[test]
fn lfu_resolves_ties_by_the_lowest_way_index() {
    let run = || {
        let mut cache = Cache::new(1, 2, 2, Policy::Lfu).unwrap();
        cache.access_many([0, 1]).unwrap();
        // Both ways were used exactly once, the tie falls to way 0
        cache.access(2).unwrap()
    };
    assert_eq!(run(), Access { hit: false, slot: 0 });
    assert_eq!(run(), run());
}

#[test]
fn lru_conflict_in_one_set_evicts_the_re_accessed_block() {
    // partitions=8, ways=2 gives 4 sets, and blocks 0, 4, and 8 all map to
    // set 0. The third install evicts block 0 (both ways tied at install,
    // way 0 aged longest afterwards), so the final re-access misses too
    let mut cache = Cache::new(4, 8, 2, Policy::Lru).unwrap();
    cache.access_many([0, 16, 32, 0]).unwrap();
    assert_eq!(cache.hits(), 0);
    assert_eq!(cache.misses(), 4);
}

#[test]
fn lru_accesses_in_distinct_sets_never_conflict() {
    // Blocks 0, 1, and 2 land in sets 0, 1, and 2, so nothing is evicted
    // and the re-access to block 0 hits
    let mut cache = Cache::new(4, 8, 2, Policy::Lru).unwrap();
    cache.access_many([0, 4, 8, 0]).unwrap();
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 3);
}

#[test]
fn reset_clears_state_and_is_idempotent() {
    let mut cache = Cache::new(4, 8, 2, Policy::Lru).unwrap();
    cache.access_many([0, 16, 32, 0]).unwrap();
    for _ in 0..2 {
        cache.reset();
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 0);
        assert_eq!(cache.last_access(), None);
        for slot in 0..cache.partitions() {
            assert_eq!(cache.content_of(slot), Ok(None));
        }
    }
    // Configuration survives a reset
    assert_eq!(cache.partitions(), 8);
    assert_eq!(cache.ways(), 2);
    assert_eq!(cache.policy(), Policy::Lru);
}

#[test]
fn content_of_reconstructs_the_cached_word_span() {
    let mut cache = Cache::new(4, 8, 2, Policy::Lru).unwrap();
    // Reference 22: block 5, tag 1, set 1, installed at slot 2 (set 1, way 0)
    let access = cache.access(22).unwrap();
    assert_eq!(access, Access { hit: false, slot: 2 });
    assert_eq!(cache.content_of(2), Ok(Some((20, 23))));
    assert_eq!(cache.content_of(3), Ok(None));
    assert_eq!(
        cache.content_of(8),
        Err(ViewError::SlotOutOfRange {
            slot: 8,
            partitions: 8
        })
    );
}

#[test]
fn construction_rejects_bad_geometry() {
    assert_eq!(
        Cache::new(4, 8, 2, Policy::None).unwrap_err(),
        ConfigError::PolicyRequired { ways: 2 }
    );
    assert_eq!(
        Cache::new(4, 10, 3, Policy::Lru).unwrap_err(),
        ConfigError::UnevenSets {
            partitions: 10,
            ways: 3
        }
    );
    assert_eq!(
        Cache::new(0, 8, 2, Policy::Lru).unwrap_err(),
        ConfigError::Zero {
            field: "partition_size"
        }
    );
    // Direct mapping never needs a policy
    assert!(Cache::new(4, 8, 1, Policy::None).is_ok());
    // Fully associative is just ways == partitions
    assert!(Cache::new(4, 8, 8, Policy::Fifo).is_ok());
}

#[test]
fn summary_renders_on_one_line() {
    let cache = Cache::new(4, 16, 2, Policy::Lru).unwrap();
    assert_eq!(
        cache.to_string(),
        "(Cache(partitions=16, size=4, sets=8, ways=2, hits=0, misses=0, policy=\"lru\"))"
    );
}

#[test]
fn reference_streams_accept_all_separator_forms() {
    assert_eq!(parse_refs("1, 65, 129").unwrap(), vec![1, 65, 129]);
    assert_eq!(parse_refs("1;65; 129").unwrap(), vec![1, 65, 129]);
    assert_eq!(parse_refs("1 65\t129\n193").unwrap(), vec![1, 65, 129, 193]);
    assert_eq!(parse_refs("").unwrap(), Vec::<u64>::new());
    assert_eq!(parse_refs("   \n  ").unwrap(), Vec::<u64>::new());
}

#[test]
fn reference_streams_report_the_malformed_token() {
    assert_eq!(
        parse_refs("1, x, 3").unwrap_err(),
        ParseError::BadToken {
            token: "x".to_string(),
            position: 1
        }
    );
}

#[test]
fn configs_parse_from_json_with_defaults() {
    let config: CacheConfig =
        serde_json::from_str(r#"{ "partition_size": 4, "partitions": 8, "ways": 2, "policy": "lru" }"#)
            .unwrap();
    assert_eq!(config.ways, 2);
    assert_eq!(config.policy, Policy::Lru);

    let config: CacheConfig =
        serde_json::from_str(r#"{ "partition_size": 4, "partitions": 8 }"#).unwrap();
    assert_eq!(config.ways, 1);
    assert_eq!(config.policy, Policy::None);

    let unknown: Result<CacheConfig, _> = serde_json::from_str(
        r#"{ "partition_size": 4, "partitions": 8, "ways": 2, "policy": "mru" }"#,
    );
    assert!(unknown.is_err());
}
