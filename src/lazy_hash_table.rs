//! LazyHashTable: chained table whose growth never moves existing entries.
//!
//! Growing only appends empty buckets. An entry stays in the bucket it was
//! placed in until a relocating lookup (`search`, `search_mut`, or the
//! duplicate check inside `insert`) finds it, at which point it moves to
//! `hash mod bucket_count`. Lookups therefore probe every generation size
//! from the current bucket count down to the original one.

use crate::bucket_array::BucketArray;
use crate::config::TableConfig;
use crate::error::{ConfigError, InsertError};
use crate::fnv::FnvBuildHasher;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use log::{debug, trace};
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

/// Where a lookup found an entry, without moving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Bucket index the entry currently occupies.
    pub bucket: usize,
    /// Bucket-array size (generation) under which the entry was found.
    pub generation: usize,
    /// Number of distinct buckets scanned before the hit.
    pub probes: usize,
}

// Result of a probe: the entry's arena key plus its position in the chain.
struct Found {
    slot: DefaultKey,
    bucket: usize,
    position: usize,
    generation: usize,
    probes: usize,
}

#[inline]
fn bucket_index(hash: u64, size: usize) -> usize {
    (hash % size as u64) as usize
}

/// Chained hash table with lazy, per-entry rehashing.
///
/// Entries live in a slot arena; each bucket chain holds arena keys, so a
/// relocation moves a key between chains and never the `(K, V)` pair. The
/// hash computed at insertion is stored with the entry and `K: Hash` is not
/// called again for stored keys.
///
/// Lookups that relocate take `&mut self`. `get`, `contains_key` and
/// `locate` only read and leave placement untouched.
#[derive(Clone)]
pub struct LazyHashTable<K, V, S = FnvBuildHasher> {
    hasher: S,
    buckets: BucketArray<DefaultKey>,
    slots: SlotMap<DefaultKey, Entry<K, V>>,
    original_bucket_count: usize,
    resize_factor: usize,
    max_load_factor: f64,
}

impl<K, V> LazyHashTable<K, V>
where
    K: Eq + Hash,
{
    /// Empty table with 4 buckets, resize factor 2 and max load factor 2.0.
    pub fn new() -> Self {
        Self::with_hasher(FnvBuildHasher)
    }

    /// Empty table shaped by `config`.
    ///
    /// Fails with the `ConfigError` from `TableConfig::validate`: zero
    /// buckets, a resize factor below 2, a max load factor that is not
    /// finite, not positive, or below `1 / resize_factor`, or a bucket count
    /// that overflows on its first growth.
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, FnvBuildHasher)
    }
}

impl<K, V> Default for LazyHashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket-array sizes from the current one down to the original one.
#[derive(Debug, Clone)]
pub struct Generations {
    next: Option<usize>,
    floor: usize,
    factor: usize,
}

impl Iterator for Generations {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let size = self.next?;
        debug_assert!(size >= self.floor, "generation below original size");
        self.next = if size > self.floor {
            Some(size / self.factor)
        } else {
            None
        };
        Some(size)
    }
}

/// Iterator over `(&K, &V)` in arena order.
pub struct Iter<'a, K, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

/// Iterator over `(&K, &mut V)` in arena order.
pub struct IterMut<'a, K, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Entry<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| (&e.key, &mut e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V, S> LazyHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Default-shaped table hashing with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(TableConfig::default(), hasher)
    }

    /// `with_config` with a caller-supplied hasher; same validation.
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, hasher))
    }

    fn from_parts(config: TableConfig, hasher: S) -> Self {
        Self {
            hasher,
            buckets: BucketArray::with_len(config.original_bucket_count),
            slots: SlotMap::with_key(),
            original_bucket_count: config.original_bucket_count,
            resize_factor: config.resize_factor,
            max_load_factor: config.max_load_factor,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn original_bucket_count(&self) -> usize {
        self.original_bucket_count
    }

    pub fn resize_factor(&self) -> usize {
        self.resize_factor
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Live entries per bucket, `len() / bucket_count()`.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Every bucket-array size this table has had, newest first, ending at
    /// the original bucket count. Lookups probe in this order.
    pub fn generations(&self) -> Generations {
        Generations {
            next: Some(self.buckets.len()),
            floor: self.original_bucket_count,
            factor: self.resize_factor,
        }
    }

    // Walk generations newest first. Consecutive generations often map a hash
    // to the same index; that chain is scanned once.
    fn probe<Q>(&self, hash: u64, q: &Q) -> Option<Found>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut probes = 0;
        let mut last = None;
        for generation in self.generations() {
            let bucket = bucket_index(hash, generation);
            if last == Some(bucket) {
                continue;
            }
            last = Some(bucket);
            probes += 1;
            let Some(chain) = self.buckets.chain(bucket) else {
                continue;
            };
            let hit = chain.position(|&k| {
                self.slots
                    .get(k)
                    .map(|e| e.hash == hash && e.key.borrow() == q)
                    .unwrap_or(false)
            });
            if let Some(position) = hit {
                let &slot = chain.get(position)?;
                return Some(Found {
                    slot,
                    bucket,
                    position,
                    generation,
                    probes,
                });
            }
        }
        None
    }

    // Probe and, if the hit is not in its current-generation bucket, move it
    // there. Append to the destination first, then unlink from the source.
    fn touch<Q>(&mut self, hash: u64, q: &Q) -> Option<DefaultKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let found = self.probe(hash, q)?;
        let expected = bucket_index(hash, self.buckets.len());
        if found.bucket != expected {
            self.buckets.chain_or_alloc(expected).push(found.slot);
            if let Some(chain) = self.buckets.chain_mut(found.bucket) {
                chain.remove(found.position);
            }
            self.buckets.release_if_empty(found.bucket);
            trace!(
                "relocated entry from bucket {} (generation {}) to bucket {} (generation {})",
                found.bucket,
                found.generation,
                expected,
                self.buckets.len()
            );
        }
        Some(found.slot)
    }

    // Grow until `entries` fit under the max load factor.
    fn reserve_for(&mut self, entries: usize) {
        while entries as f64 / self.buckets.len() as f64 > self.max_load_factor {
            let old = self.buckets.len();
            self.buckets.grow(self.resize_factor);
            debug!(
                "grew bucket array {} -> {} for {} entries",
                old,
                self.buckets.len(),
                entries
            );
        }
    }

    /// Insert `key -> value` unless `key` is already present, in which case
    /// the table keeps its existing value and the arguments are dropped.
    ///
    /// Use `replace` to overwrite, or `try_insert` to observe the duplicate.
    pub fn insert(&mut self, key: K, value: V) {
        let _ = self.try_insert(key, value);
    }

    /// Like `insert`, but reports an existing key as
    /// `InsertError::DuplicateKey`. Growth and the relocation of the existing
    /// entry may still have happened.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), InsertError> {
        self.reserve_for(self.len() + 1);
        let hash = self.make_hash(&key);
        if self.touch(hash, &key).is_some() {
            return Err(InsertError::DuplicateKey);
        }

        let bucket = bucket_index(hash, self.buckets.len());
        let chain = self.buckets.chain_or_alloc(bucket);
        chain.reserve(1);
        let slot = self.slots.insert(Entry { key, value, hash });
        chain.push(slot);
        Ok(())
    }

    /// Look up `q`, moving its entry to the current generation's bucket.
    pub fn search<Q>(&mut self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let slot = self.touch(hash, q)?;
        self.slots.get(slot).map(|e| &e.value)
    }

    pub fn search_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let slot = self.touch(hash, q)?;
        self.slots.get_mut(slot).map(|e| &mut e.value)
    }

    /// Read-only lookup; does not relocate.
    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let found = self.probe(self.make_hash(q), q)?;
        self.slots.get(found.slot).map(|e| &e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.probe(self.make_hash(q), q).is_some()
    }

    /// Report where `q` currently lives and how many buckets a lookup scans
    /// to reach it. Does not relocate.
    pub fn locate<Q>(&self, q: &Q) -> Option<Location>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.probe(self.make_hash(q), q).map(|f| Location {
            bucket: f.bucket,
            generation: f.generation,
            probes: f.probes,
        })
    }

    /// Remove `q` and return the owned pair. The entry is unlinked where it
    /// was found; removal never relocates.
    pub fn take<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let found = self.probe(self.make_hash(q), q)?;
        if let Some(chain) = self.buckets.chain_mut(found.bucket) {
            chain.remove(found.position);
        }
        self.buckets.release_if_empty(found.bucket);
        let entry = self.slots.remove(found.slot)?;
        Some((entry.key, entry.value))
    }

    /// Remove `q` if present; absent keys are a no-op.
    pub fn remove<Q>(&mut self, q: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _ = self.take(q);
    }

    /// `remove(&key)` followed by `insert(key, value)`.
    pub fn replace(&mut self, key: K, value: V) {
        self.remove(&key);
        self.insert(key, value);
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.slots.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Check every structural invariant, panicking on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        // Bucket count is original * factor^n.
        let mut size = self.buckets.len();
        while size > self.original_bucket_count {
            assert_eq!(size % self.resize_factor, 0, "bucket count off-geometric");
            size /= self.resize_factor;
        }
        assert_eq!(size, self.original_bucket_count, "bucket count off-geometric");

        // Chains reference each live slot exactly once.
        assert_eq!(self.buckets.total_len(), self.slots.len(), "entry count drift");
        let mut seen = HashSet::new();
        for (bucket, chain) in self.buckets.iter() {
            assert!(!chain.is_empty(), "empty chain left allocated");
            for &k in chain.iter() {
                assert!(seen.insert(k), "slot linked twice");
                let e = self.slots.get(k).expect("chain links a dead slot");
                assert!(
                    self.generations()
                        .any(|g| bucket_index(e.hash, g) == bucket),
                    "entry outside every generation's bucket"
                );
            }
        }

        // Keys are unique and each one's probe lands on itself.
        for (k, e) in self.slots.iter() {
            let dups = self.slots.values().filter(|o| o.key == e.key).count();
            assert_eq!(dups, 1, "duplicate key");
            let found = self.probe(e.hash, &e.key).expect("entry unreachable");
            assert_eq!(found.slot, k);
        }
    }
}

impl<K, V, S> fmt::Debug for LazyHashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.values().map(|e| (&e.key, &e.value)))
            .finish()
    }
}

impl<K, V, S> Extend<(K, V)> for LazyHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for LazyHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::Hasher;
    use std::collections::BTreeSet;

    // Hashes a u64 key to itself so bucket placement is predictable.
    #[derive(Clone, Copy, Default)]
    struct IdentityBuildHasher;
    #[derive(Default)]
    struct IdentityHasher(u64);
    impl BuildHasher for IdentityBuildHasher {
        type Hasher = IdentityHasher;
        fn build_hasher(&self) -> Self::Hasher {
            IdentityHasher(0)
        }
    }
    impl Hasher for IdentityHasher {
        fn write(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.0 = (self.0 << 8) | u64::from(b);
            }
        }
        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
        fn finish(&self) -> u64 {
            self.0
        }
    }

    fn identity_table() -> LazyHashTable<u64, u64, IdentityBuildHasher> {
        LazyHashTable::with_hasher(IdentityBuildHasher)
    }

    /// Invariant: `insert(k, v)` then `search(k)` yields `v`; replace and
    /// remove behave as documented.
    #[test]
    fn round_trip() {
        let mut t: LazyHashTable<String, i32> = LazyHashTable::new();
        t.insert("a".to_string(), 1);
        assert_eq!(t.search("a"), Some(&1));

        t.replace("a".to_string(), 2);
        assert_eq!(t.search("a"), Some(&2));
        assert_eq!(t.len(), 1);

        t.remove("a");
        assert_eq!(t.search("a"), None);
        assert!(t.is_empty());
        t.assert_invariants();
    }

    /// Invariant: a duplicate insert keeps the first value; `try_insert`
    /// reports it.
    #[test]
    fn duplicate_insert_is_noop() {
        let mut t: LazyHashTable<String, i32> = LazyHashTable::new();
        t.insert("dup".to_string(), 1);
        t.insert("dup".to_string(), 2);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("dup"), Some(&1));
        assert_eq!(
            t.try_insert("dup".to_string(), 3),
            Err(InsertError::DuplicateKey)
        );
        assert_eq!(t.search("dup"), Some(&1));
        assert_eq!(t.try_insert("fresh".to_string(), 4), Ok(()));
        t.assert_invariants();
    }

    /// Growth trigger: (len + 1) / buckets > max_load_factor, real-valued.
    #[test]
    fn growth_trigger_point() {
        let mut t: LazyHashTable<u64, u64> = LazyHashTable::new();
        for k in 0..8 {
            t.insert(k, k);
        }
        // 8 / 4 == 2.0 is not above the threshold.
        assert_eq!(t.bucket_count(), 4);

        t.insert(8, 8);
        // 9 / 4 > 2.0 grows once; 9 / 8 fits.
        assert_eq!(t.bucket_count(), 8);

        for k in 9..16 {
            t.insert(k, k);
        }
        assert_eq!(t.bucket_count(), 8);
        t.insert(16, 16);
        assert_eq!(t.bucket_count(), 16);
        t.assert_invariants();
    }

    /// Invariant: after any insert, len / buckets <= max_load_factor, even for
    /// thresholds below one entry per bucket.
    #[test]
    fn load_factor_bound_with_small_threshold() {
        let config = TableConfig::new()
            .original_bucket_count(1)
            .resize_factor(3)
            .max_load_factor(0.34);
        let mut t: LazyHashTable<u32, ()> = LazyHashTable::with_config(config).unwrap();
        for k in 0..200 {
            t.insert(k, ());
            assert!(t.load_factor() <= t.max_load_factor());
        }
        t.assert_invariants();
    }

    /// Growth never moves entries: an untouched entry keeps its
    /// original-generation bucket until a relocating lookup.
    #[test]
    fn growth_does_not_move_entries() {
        let mut t = identity_table();
        t.insert(5, 50);
        assert_eq!(t.locate(&5).unwrap().bucket, 1);

        // Keys that are multiples of 32 stay in bucket 0 for every generation.
        for i in 1..=63 {
            t.insert(i * 32, 0);
        }
        assert_eq!(t.bucket_count(), 32);
        let loc = t.locate(&5).unwrap();
        assert_eq!(loc.bucket, 1);
        assert_eq!(loc.generation, 4);
        // Bucket 5 is shared by generations 32, 16 and 8; then bucket 1.
        assert_eq!(loc.probes, 2);
        t.assert_invariants();
    }

    /// Invariant: a relocating lookup moves the entry so the next lookup hits
    /// the current generation in one probe.
    #[test]
    fn search_relocates_and_second_lookup_is_single_probe() {
        let mut t = identity_table();
        t.insert(5, 50);
        for i in 1..=8 {
            t.insert(i * 8, 0);
        }
        assert_eq!(t.bucket_count(), 8);

        assert_eq!(
            t.locate(&5),
            Some(Location {
                bucket: 1,
                generation: 4,
                probes: 2
            })
        );
        assert_eq!(t.search(&5), Some(&50));
        assert_eq!(
            t.locate(&5),
            Some(Location {
                bucket: 5,
                generation: 8,
                probes: 1
            })
        );
        // Old chain was emptied and released; entry count unchanged.
        assert_eq!(t.len(), 9);
        t.assert_invariants();
    }

    /// `get`/`contains_key`/`locate` never relocate.
    #[test]
    fn read_only_lookups_do_not_relocate() {
        let mut t = identity_table();
        t.insert(5, 50);
        for i in 1..=8 {
            t.insert(i * 8, 0);
        }
        assert_eq!(t.get(&5), Some(&50));
        assert!(t.contains_key(&5));
        assert_eq!(t.locate(&5).unwrap().bucket, 1);
    }

    /// `search_mut` relocates and mutation is visible afterwards.
    #[test]
    fn search_mut_updates_in_place() {
        let mut t = identity_table();
        t.insert(5, 50);
        for i in 1..=8 {
            t.insert(i * 8, 0);
        }
        *t.search_mut(&5).unwrap() += 1;
        assert_eq!(t.get(&5), Some(&51));
        assert_eq!(t.locate(&5).unwrap().bucket, 5);
        assert!(t.search_mut(&6).is_none());
    }

    /// Removal unlinks the entry from an old generation without relocating.
    #[test]
    fn take_from_old_generation() {
        let mut t = identity_table();
        t.insert(5, 50);
        for i in 1..=8 {
            t.insert(i * 8, 0);
        }
        assert_eq!(t.take(&5), Some((5, 50)));
        assert_eq!(t.take(&5), None);
        assert_eq!(t.len(), 8);
        t.remove(&5);
        assert_eq!(t.len(), 8);
        t.assert_invariants();
    }

    /// A duplicate insert of an old-generation key relocates it but does not
    /// add a second entry.
    #[test]
    fn duplicate_insert_across_generations() {
        let mut t = identity_table();
        t.insert(5, 50);
        for i in 1..=8 {
            t.insert(i * 8, 0);
        }
        t.insert(5, 99);
        assert_eq!(t.len(), 9);
        assert_eq!(t.get(&5), Some(&50));
        assert_eq!(t.locate(&5).unwrap().bucket, 5);
        t.assert_invariants();
    }

    /// Invariant: N unique inserts then M removals leave N - M entries.
    #[test]
    fn size_accounting() {
        let mut t: LazyHashTable<u32, u32> = LazyHashTable::new();
        for k in 0..500 {
            t.insert(k, k * 2);
        }
        for k in (0..500).step_by(3) {
            assert!(t.search(&k).is_some());
            t.remove(&k);
        }
        assert_eq!(t.len(), 500 - 167);
        for k in 0..500 {
            assert_eq!(t.contains_key(&k), k % 3 != 0);
        }
        t.assert_invariants();
    }

    #[test]
    fn generations_run_down_to_original() {
        let config = TableConfig::new()
            .original_bucket_count(3)
            .resize_factor(3)
            .max_load_factor(1.0);
        let mut t: LazyHashTable<u32, ()> = LazyHashTable::with_config(config).unwrap();
        assert_eq!(t.generations().collect::<Vec<_>>(), [3]);
        for k in 0..10 {
            t.insert(k, ());
        }
        assert_eq!(t.bucket_count(), 27);
        assert_eq!(t.generations().collect::<Vec<_>>(), [27, 9, 3]);
        t.assert_invariants();
    }

    #[test]
    fn iteration_and_collect() {
        let mut t: LazyHashTable<String, i32> = [("a", 1), ("b", 2), ("c", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let keys: BTreeSet<String> = t.keys().cloned().collect();
        let expected: BTreeSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(keys, expected);
        for (_, v) in t.iter_mut() {
            *v *= 10;
        }
        let mut values: Vec<i32> = t.values().copied().collect();
        values.sort();
        assert_eq!(values, [10, 20, 30]);
        assert_eq!(t.iter().size_hint(), (3, Some(3)));
        assert_eq!(format!("{:?}", t.clone()), format!("{:?}", t));
    }

    #[test]
    fn clone_is_independent() {
        let mut a: LazyHashTable<u32, u32> = (0..20).map(|k| (k, k)).collect();
        let b = a.clone();
        a.replace(3, 300);
        a.remove(&4);
        assert_eq!(b.get(&3), Some(&3));
        assert_eq!(b.get(&4), Some(&4));
        assert_eq!(a.get(&3), Some(&300));
        assert_eq!(b.bucket_count(), a.bucket_count());
        b.assert_invariants();
    }

    #[test]
    fn invalid_config_rejected() {
        let r: Result<LazyHashTable<u32, u32>, _> =
            LazyHashTable::with_config(TableConfig::new().resize_factor(0));
        assert!(matches!(r, Err(ConfigError::ResizeFactorTooSmall(0))));
    }

    /// A near-zero threshold is refused at construction instead of growing
    /// without bound on the first insert.
    #[test]
    fn tiny_max_load_factor_rejected_before_insert() {
        let r: Result<LazyHashTable<u32, u32>, _> =
            LazyHashTable::with_config(TableConfig::new().max_load_factor(1e-30));
        assert!(matches!(r, Err(ConfigError::MaxLoadFactorTooSmall { .. })));

        // At the floor, an insert into an empty table grows a bounded number
        // of times.
        let config = TableConfig::new()
            .original_bucket_count(1)
            .max_load_factor(0.5);
        let mut t: LazyHashTable<u32, u32> = LazyHashTable::with_config(config).unwrap();
        t.insert(1, 1);
        assert_eq!(t.bucket_count(), 2);
        t.insert(2, 2);
        assert_eq!(t.bucket_count(), 4);
        assert_eq!(t.search(&1), Some(&1));
    }
}
