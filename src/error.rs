//! Error types surfaced by `LazyHashTable`.

use thiserror::Error;

/// Returned by `LazyHashTable::try_insert` when the key is already present.
///
/// The plain `insert` treats a duplicate as a no-op instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    #[error("key is already present in the table")]
    DuplicateKey,
}

/// Invalid construction constants passed through `TableConfig`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("original bucket count must be at least 1, got {0}")]
    ZeroBuckets(usize),
    #[error("resize factor must be at least 2, got {0}")]
    ResizeFactorTooSmall(usize),
    #[error("max load factor must be finite and positive, got {0}")]
    InvalidMaxLoadFactor(f64),
    #[error("max load factor {max} is below 1 / resize factor ({floor})")]
    MaxLoadFactorTooSmall { max: f64, floor: f64 },
    #[error("original bucket count {buckets} overflows after one growth by factor {factor}")]
    Overflow { buckets: usize, factor: usize },
}
