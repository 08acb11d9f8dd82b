#![cfg(test)]

// Property tests for LazyHashTable kept inside the crate so they can check
// structural invariants through `assert_invariants`.

use crate::config::TableConfig;
use crate::error::InsertError;
use crate::lazy_hash_table::LazyHashTable;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// String key that can also be looked up by `&str`, so `contains_key` runs
// through the `Borrow` path while entries sit in older generations.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Operations name keys by index into a shared pool. The pool holds up to 40
// short strings so that runs push the table through several growths and
// later ops hit entries placed under older bucket counts; with only a
// handful of keys the table would rarely leave its original size.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    TryInsert(usize, i32),
    Replace(usize, i32),
    Remove(usize),
    Take(usize),
    Search(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::TryInsert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Replace(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Take),
            idx.clone().prop_map(OpI::Search),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_config() -> impl Strategy<Value = TableConfig> {
    (1usize..=6, 2usize..=4, prop_oneof![Just(0.5), Just(1.0), Just(2.0), Just(3.0)]).prop_map(
        |(n, f, m)| {
            TableConfig::new()
                .original_bucket_count(n)
                .resize_factor(f)
                .max_load_factor(m)
        },
    )
}

fn run_state_machine<S: BuildHasher>(
    mut sut: LazyHashTable<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, i);
                sut.insert(k.clone(), v);
                model.entry(k).or_insert(v);
            }
            OpI::TryInsert(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                match sut.try_insert(k.clone(), v) {
                    Ok(()) => {
                        prop_assert!(!already, "try_insert must fail on duplicate");
                        model.insert(k, v);
                    }
                    Err(InsertError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                }
            }
            OpI::Replace(i, v) => {
                let k = key_from(pool, i);
                sut.replace(k.clone(), v);
                model.insert(k, v);
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                sut.remove(&k);
                model.remove(&k);
            }
            OpI::Take(i) => {
                let k = key_from(pool, i);
                let got = sut.take(&k);
                let expected = model.remove_entry(&k);
                prop_assert_eq!(got, expected);
            }
            OpI::Search(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.search(&k), model.get(&k));
                if let Some(loc) = sut.locate(&k) {
                    // A relocating lookup leaves the entry one probe away.
                    prop_assert_eq!(loc.probes, 1);
                    prop_assert_eq!(loc.generation, sut.bucket_count());
                }
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                match (sut.search_mut(&k), model.get_mut(&k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                }
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.keys().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.load_factor() <= sut.max_load_factor());
        sut.assert_invariants();
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences and table shapes:
// - Keys stay unique; `insert` keeps the first value, `replace` overwrites.
// - `search`/`get`/`contains_key` agree with the model; a relocating lookup
//   leaves the entry reachable in a single probe.
// - `take` returns the owned pair matching the model.
// - `len` equals the number of chained entries; bucket count stays geometric;
//   the load factor never exceeds its bound after an operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(config in arb_config(), (pool, ops) in arb_scenario()) {
        let sut: LazyHashTable<Key, i32> = LazyHashTable::with_config(config).unwrap();
        run_state_machine(sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher). Every entry shares bucket 0 in every
// generation, so lookups rely purely on key equality within one chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(config in arb_config(), (pool, ops) in arb_scenario()) {
        let sut: LazyHashTable<Key, i32, ConstBuildHasher> =
            LazyHashTable::with_config_and_hasher(config, ConstBuildHasher).unwrap();
        run_state_machine(sut, &pool, ops)?;
    }
}

// Property: an entry never looked up after insertion stays reachable through
// any number of growths, and one search moves it to the current generation.
proptest! {
    #[test]
    fn prop_untouched_entry_reachable(
        config in arb_config(),
        target in any::<u64>(),
        fillers in proptest::collection::hash_set(any::<u64>(), 0..300),
    ) {
        let mut t: LazyHashTable<u64, u64> = LazyHashTable::with_config(config).unwrap();
        t.insert(target, 7);
        for f in fillers.iter().filter(|&&f| f != target) {
            t.insert(*f, 0);
        }
        prop_assert_eq!(t.get(&target), Some(&7));
        prop_assert_eq!(t.search(&target), Some(&7));
        let loc = t.locate(&target).unwrap();
        prop_assert_eq!(loc.probes, 1);
        t.assert_invariants();
    }
}
