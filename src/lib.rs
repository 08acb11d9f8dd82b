//! lazy-hashmap: a single-threaded chained hash table that grows without
//! ever rehashing the whole table.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: amortize rehashing. Growing the bucket array only appends empty
//!   buckets; an entry moves to its bucket under the new size the next time
//!   it is looked up ("moved on touch").
//! - Layers:
//!   - Chain<T>: insertion-ordered collision list for one bucket.
//!   - BucketArray<T>: append-only array of optional chains; growth
//!     multiplies its length by the resize factor and allocates nothing
//!     else.
//!   - LazyHashTable<K, V, S>: public API. Owns the bucket array and a slot
//!     arena of entries, decides when to grow, and runs the generational
//!     lookup that finds and relocates entries.
//!
//! Generations
//! - The sizes the bucket array has had form a geometric sequence
//!   `original, original * factor, ..., current`. An entry placed while the
//!   array had size `g` sits at `hash mod g` until relocated.
//! - Lookups probe `hash mod g` for each generation `g`, newest first, and
//!   stop at the original size. Consecutive generations that map a hash to
//!   the same index share one scan.
//! - `search`, `search_mut` and the duplicate check in `insert` relocate the
//!   hit to `hash mod current`; after that one probe suffices. `get`,
//!   `contains_key` and `locate` read without relocating. `remove` unlinks
//!   wherever the entry was found.
//!
//! Invariants
//! - Each live key has exactly one entry; `insert` never creates a second
//!   one (`try_insert` reports the attempt).
//! - The bucket count is `original * factor^n`.
//! - `len()` equals the total length of all chains.
//! - After any insert, `len() / bucket_count() <= max_load_factor`.
//! - Relocation appends to the destination chain before unlinking from the
//!   source, so an interrupted move never loses the entry.
//!
//! Hasher
//! - Each entry stores the `u64` hash computed at insertion; `K: Hash` is
//!   never called again for a stored key. The default hasher is unseeded
//!   64-bit FNV-1a so placement is deterministic across runs.
//!
//! Notes and non-goals
//! - Single-threaded: relocating lookups take `&mut self`. Share a table
//!   across threads behind a lock.
//! - No shrinking; the bucket array only grows.
//! - Growth is logged at `debug` and relocation at `trace` through the `log`
//!   facade; the crate installs no logger.

mod bucket_array;
mod chain;
pub mod config;
pub mod error;
pub mod fnv;
pub mod lazy_hash_table;
mod lazy_hash_table_proptest;

// Public surface
pub use config::TableConfig;
pub use error::{ConfigError, InsertError};
pub use fnv::{FnvBuildHasher, FnvHasher};
pub use lazy_hash_table::{LazyHashTable, Location};
