// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Behavior every eviction policy must share, exercised through the public
// API only.

use evictcache::prelude::*;
use strum::IntoEnumIterator;

fn filled(policy: EvictionPolicy, capacity: usize) -> BoundedCache<u32, u32> {
    CacheBuilder::new(capacity)
        .policy(policy)
        .seed(3)
        .try_build_from((0..capacity as u32).map(|k| (k, k * 100)))
        .expect("valid configuration")
}

// ==============================================
// Capacity
// ==============================================

mod capacity {
    use super::*;

    #[test]
    fn zero_capacity_is_a_config_error() {
        for policy in EvictionPolicy::iter() {
            let err = BoundedCache::<u32, u32>::try_new(0, policy).unwrap_err();
            assert_eq!(err.to_string(), "capacity must be greater than zero");
        }
    }

    #[test]
    fn len_never_exceeds_capacity() {
        for policy in EvictionPolicy::iter() {
            let mut cache = filled(policy, 5);
            for k in 5..200 {
                cache.insert(k, k).unwrap();
                cache.touch(&(k / 2));
                assert!(cache.len() <= 5, "{policy}");
            }
            assert_eq!(cache.len(), 5, "{policy}");
            assert_eq!(cache.eviction_count(), 195, "{policy}");
        }
    }

    #[test]
    fn capacity_one_keeps_latest() {
        for policy in EvictionPolicy::iter() {
            let mut cache = filled(policy, 1);
            cache.insert(42, 1).unwrap();
            assert_eq!(cache.keys().copied().collect::<Vec<_>>(), [42], "{policy}");
        }
    }
}

// ==============================================
// Concrete eviction choices (capacity 2)
// ==============================================

mod victims {
    use super::*;

    fn survivors(cache: &BoundedCache<&'static str, i32>) -> Vec<&'static str> {
        let mut keys: Vec<_> = cache.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    fn two(policy: EvictionPolicy) -> BoundedCache<&'static str, i32> {
        let mut cache = BoundedCache::try_new(2, policy).unwrap();
        cache.insert("A", 1).unwrap();
        cache.insert("B", 2).unwrap();
        cache
    }

    #[test]
    fn fifo_evicts_first_inserted() {
        let mut cache = two(EvictionPolicy::Fifo);
        cache.insert("C", 3).unwrap();
        assert_eq!(survivors(&cache), ["B", "C"]);
    }

    #[test]
    fn lru_evicts_least_recently_touched() {
        let mut cache = two(EvictionPolicy::Lru);
        cache.touch(&"A");
        cache.insert("C", 3).unwrap();
        assert_eq!(survivors(&cache), ["A", "C"]);
    }

    #[test]
    fn lfu_evicts_least_frequent() {
        let mut cache = two(EvictionPolicy::Lfu);
        cache.touch(&"B");
        cache.insert("C", 3).unwrap();
        assert_eq!(survivors(&cache), ["B", "C"]);
    }

    #[test]
    fn second_chance_skips_referenced() {
        let mut cache = two(EvictionPolicy::SecondChance);
        cache.touch(&"A");
        cache.insert("C", 3).unwrap();
        assert_eq!(survivors(&cache), ["A", "C"]);
    }

    #[test]
    fn mru_evicts_most_recently_touched() {
        let mut cache = two(EvictionPolicy::Mru);
        cache.touch(&"A");
        cache.insert("C", 3).unwrap();
        assert_eq!(survivors(&cache), ["B", "C"]);
    }

    #[test]
    fn random_evicts_one_of_the_residents() {
        let mut cache = two(EvictionPolicy::Random);
        cache.insert("C", 3).unwrap();
        let kept = survivors(&cache);
        assert_eq!(kept.len(), 2);
        assert!(kept.contains(&"C"));
    }
}

// ==============================================
// Eviction candidate
// ==============================================

mod candidate {
    use super::*;

    #[test]
    fn empty_cache_has_no_candidate() {
        for policy in EvictionPolicy::iter() {
            let cache = BoundedCache::<u32, u32>::try_new(3, policy).unwrap();
            assert_eq!(cache.peek_eviction_candidate(), None, "{policy}");
        }
    }

    #[test]
    fn candidate_does_not_mutate() {
        for policy in EvictionPolicy::iter() {
            let mut cache = filled(policy, 4);
            cache.touch(&0);
            cache.touch(&1);
            let stats = cache.stats();
            let order: Vec<_> = cache.keys().copied().collect();
            let first = cache.peek_eviction_candidate().copied();
            for _ in 0..10 {
                assert_eq!(cache.peek_eviction_candidate().copied(), first, "{policy}");
            }
            assert_eq!(cache.stats(), stats, "{policy}");
            assert_eq!(cache.keys().copied().collect::<Vec<_>>(), order, "{policy}");
        }
    }

    #[test]
    fn candidate_is_the_next_victim() {
        for policy in EvictionPolicy::iter() {
            let mut cache = filled(policy, 4);
            for round in 0..20u32 {
                cache.touch(&(round % 3));
                let candidate = cache.peek_eviction_candidate().copied().expect("full");
                cache.insert(1000 + round, round).unwrap();
                assert!(!cache.contains_key(&candidate), "{policy} round {round}");
            }
        }
    }
}

// ==============================================
// Accounting
// ==============================================

mod accounting {
    use super::*;

    #[test]
    fn only_successful_reads_count_as_touches() {
        for policy in EvictionPolicy::iter() {
            let mut cache = filled(policy, 3);
            assert_eq!(cache.total_touches(), 0, "{policy}");

            cache.fetch(&0).unwrap();
            cache.get(&1);
            cache.touch(&2);
            cache.touch_or_err(&0).unwrap();
            assert_eq!(cache.total_touches(), 4, "{policy}");

            cache.insert(0, 7).unwrap();
            cache.get(&99);
            cache.touch(&99);
            assert!(cache.fetch(&99).is_err());
            assert!(cache.touch_or_err(&99).is_err());
            cache.peek(&1);
            cache.contains_key(&1);
            assert_eq!(cache.total_touches(), 4, "{policy}");
        }
    }

    #[test]
    fn clear_resets_everything_but_configuration() {
        for policy in EvictionPolicy::iter() {
            let mut cache = filled(policy, 2);
            cache.get(&0);
            cache.insert(9, 9).unwrap();
            cache.clear();

            let stats = cache.stats();
            assert_eq!(stats.len, 0);
            assert_eq!(stats.total_touches, 0);
            assert_eq!(stats.evictions, 0);
            assert_eq!(stats.capacity, 2);
            assert_eq!(stats.policy, policy);
            assert_eq!(cache.peek_eviction_candidate(), None);

            cache.insert(1, 1).unwrap();
            cache.insert(2, 2).unwrap();
            assert_eq!(cache.eviction_count(), 0, "{policy}");
            cache.insert(3, 3).unwrap();
            assert_eq!(cache.eviction_count(), 1, "{policy}");
        }
    }

    #[test]
    fn removed_keys_are_never_candidates() {
        for policy in EvictionPolicy::iter() {
            let mut cache = filled(policy, 4);
            cache.remove(&0);
            cache.remove(&2);
            for _ in 0..4 {
                assert_ne!(cache.peek_eviction_candidate(), Some(&0), "{policy}");
                assert_ne!(cache.peek_eviction_candidate(), Some(&2), "{policy}");
                assert!(cache.keys().all(|k| *k != 0 && *k != 2), "{policy}");
            }
            assert_eq!(cache.eviction_count(), 0, "{policy}");
        }
    }

    #[test]
    fn reinserted_then_removed_key_is_never_a_candidate() {
        for policy in EvictionPolicy::iter() {
            let mut cache = BoundedCache::<u32, u32>::try_new(4, policy).unwrap();
            cache.insert(7, 1).unwrap();
            cache.touch(&7);
            assert_eq!(cache.remove(&7), Some(1));
            cache.insert(7, 2).unwrap();
            cache.touch(&7);
            assert_eq!(cache.remove(&7), Some(2));

            for k in 0..4 {
                cache.insert(k, k).unwrap();
                assert_ne!(cache.peek_eviction_candidate(), Some(&7), "{policy}");
            }
            assert_eq!(cache.len(), 4, "{policy}");
            assert!(!cache.contains_key(&7), "{policy}");
            assert!(cache.keys().all(|k| *k != 7), "{policy}");
            assert_eq!(cache.eviction_count(), 0, "{policy}");

            cache.insert(100, 100).unwrap();
            assert_eq!(cache.eviction_count(), 1, "{policy}");
            assert!(!cache.contains_key(&7), "{policy}");
        }
    }
}

// ==============================================
// Comparers
// ==============================================

mod comparers {
    use super::*;

    #[test]
    fn case_insensitive_keys_collapse() {
        let mut cache = BoundedCache::try_with_comparer(2, EvictionPolicy::Lru, CaseInsensitive)
            .unwrap();
        cache.insert("Alpha".to_string(), 1).unwrap();
        assert_eq!(cache.insert("ALPHA".to_string(), 2).unwrap(), Some(1));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.fetch(&"alpha".to_string()).unwrap(), &2);

        // the stored key keeps its original spelling
        assert_eq!(cache.keys().next().map(String::as_str), Some("Alpha"));
        assert_eq!(cache.remove(&"aLpHa".to_string()), Some(2));
        assert!(cache.is_empty());
    }
}
