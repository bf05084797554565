//! Property-Based Tests for the Byte-Budgeted LRU Cache
//!
//! Random operation sequences are applied both to the cache and to a plain
//! `VecDeque` model of the recency order. After every step the two must agree on
//! residents, order, byte total and the entries reported to the eviction callback.

use proptest::prelude::*;
use sized_lru::LruCache;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// == Strategies ==
/// Keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,12}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: String },
    Get { key: String },
    Peek { key: String },
    Remove { key: String },
    RemoveOldest,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Add { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Peek { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => Just(CacheOp::RemoveOldest),
    ]
}

// == Reference Model ==
/// Recency list with the most recently used entry at the front
struct Model {
    max_bytes: u64,
    entries: VecDeque<(String, String)>,
    evicted: Vec<(String, String)>,
}

impl Model {
    fn new(max_bytes: u64) -> Self {
        Model {
            max_bytes,
            entries: VecDeque::new(),
            evicted: Vec::new(),
        }
    }

    fn used_bytes(&self) -> u64 {
        self.entries
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn add(&mut self, key: String, value: String) {
        if let Some(pos) = self.position(&key) {
            self.entries.remove(pos);
        }
        self.entries.push_front((key, value));
        while self.max_bytes != 0 && self.used_bytes() > self.max_bytes {
            self.remove_oldest();
        }
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos)?;
        let value = entry.1.clone();
        self.entries.push_front(entry);
        Some(value)
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.position(key)?;
        self.entries.remove(pos).map(|(_, v)| v)
    }

    fn remove_oldest(&mut self) {
        if let Some(entry) = self.entries.pop_back() {
            self.evicted.push(entry);
        }
    }
}

type EvictionLog = Arc<Mutex<Vec<(String, String)>>>;

fn make_logged(max_bytes: u64) -> (LruCache<String, String>, EvictionLog) {
    let log: EvictionLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let cache: LruCache<String, String> =
        LruCache::with_eviction_callback(max_bytes, move |key, value| {
            sink.lock().unwrap().push((key, value));
        });
    (cache, log)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // The cache behaves exactly like the reference model: same return values,
    // same recency order, same byte total, same evictions in the same order.
    #[test]
    fn prop_matches_reference_model(
        max_bytes in prop_oneof![Just(0u64), 1u64..64],
        ops in prop::collection::vec(cache_op_strategy(), 1..120),
    ) {
        let (mut cache, log) = make_logged(max_bytes);
        let mut model = Model::new(max_bytes);

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    cache.add(key.clone(), value.clone());
                    model.add(key, value);
                }
                CacheOp::Get { key } => {
                    let got = cache.get(key.as_str()).cloned();
                    prop_assert_eq!(got, model.get(&key));
                }
                CacheOp::Peek { key } => {
                    let expected = model.position(&key).map(|pos| model.entries[pos].1.clone());
                    prop_assert_eq!(cache.peek(key.as_str()).cloned(), expected);
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(cache.remove(key.as_str()), model.remove(&key));
                }
                CacheOp::RemoveOldest => {
                    cache.remove_oldest();
                    model.remove_oldest();
                }
            }

            let order: Vec<(String, String)> = cache
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            let expected: Vec<(String, String)> = model.entries.iter().cloned().collect();
            prop_assert_eq!(order, expected);
            prop_assert_eq!(cache.used_bytes(), model.used_bytes());
            prop_assert_eq!(cache.len(), model.entries.len());
            let evicted = log.lock().unwrap().clone();
            prop_assert_eq!(evicted, model.evicted.clone());
        }
    }

    // With a non-zero budget the byte total never exceeds it after an add.
    #[test]
    fn prop_budget_holds_after_every_add(
        max_bytes in 1u64..48,
        ops in prop::collection::vec((key_strategy(), value_strategy()), 1..200),
    ) {
        let mut cache = LruCache::new(max_bytes);
        for (key, value) in ops {
            cache.add(key, value);
            prop_assert!(cache.used_bytes() <= max_bytes);
        }
    }

    // An add immediately followed by a get returns the value and leaves the key
    // most recently used, unless the entry alone exceeds the budget.
    #[test]
    fn prop_read_through(
        max_bytes in prop_oneof![Just(0u64), 8u64..64],
        prefix in prop::collection::vec((key_strategy(), value_strategy()), 0..30),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut cache = LruCache::new(max_bytes);
        for (k, v) in prefix {
            cache.add(k, v);
        }

        let size = (key.len() + value.len()) as u64;
        cache.add(key.clone(), value.clone());

        if max_bytes == 0 || size <= max_bytes {
            prop_assert_eq!(cache.get(key.as_str()), Some(&value));
            prop_assert_eq!(cache.iter().next().map(|(k, _)| k), Some(&key));
        } else {
            prop_assert!(!cache.contains(key.as_str()));
        }
    }

    // Evictions report each evicted entry exactly once, and every key ever added
    // is either resident or evicted.
    #[test]
    fn prop_evictions_account_for_every_entry(
        max_bytes in 1u64..40,
        keys in prop::collection::hash_set("[a-z]{1,6}", 1..40),
    ) {
        let (mut cache, log) = make_logged(max_bytes);
        for key in &keys {
            cache.add(key.clone(), "0123".to_string());
        }

        let evicted = log.lock().unwrap();
        prop_assert_eq!(evicted.len() + cache.len(), keys.len());
        for (key, _) in evicted.iter() {
            prop_assert!(!cache.contains(key.as_str()));
        }
    }
}
