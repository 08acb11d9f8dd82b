//! Construction constants for `LazyHashTable`.

use crate::error::ConfigError;

pub const DEFAULT_ORIGINAL_BUCKET_COUNT: usize = 4;
pub const DEFAULT_RESIZE_FACTOR: usize = 2;
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 2.0;

/// The three constants fixed for the lifetime of a table.
///
/// - `original_bucket_count`: size of the bucket array at construction; the
///   floor generation every lookup probes last.
/// - `resize_factor`: each growth multiplies the bucket count by this.
/// - `max_load_factor`: entries-per-bucket threshold that triggers growth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub original_bucket_count: usize,
    pub resize_factor: usize,
    pub max_load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            original_bucket_count: DEFAULT_ORIGINAL_BUCKET_COUNT,
            resize_factor: DEFAULT_RESIZE_FACTOR,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original_bucket_count(mut self, n: usize) -> Self {
        self.original_bucket_count = n;
        self
    }

    pub fn resize_factor(mut self, factor: usize) -> Self {
        self.resize_factor = factor;
        self
    }

    pub fn max_load_factor(mut self, max: f64) -> Self {
        self.max_load_factor = max;
        self
    }

    /// Reject constants under which generation arithmetic breaks down.
    ///
    /// A factor of 1 would never grow and a zero bucket count has no valid
    /// `hash mod size`. The max load factor must be at least
    /// `1 / resize_factor`; at or above that floor one insert needs at most
    /// two growths, below it the number of growths is unbounded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.original_bucket_count == 0 {
            return Err(ConfigError::ZeroBuckets(self.original_bucket_count));
        }
        if self.resize_factor < 2 {
            return Err(ConfigError::ResizeFactorTooSmall(self.resize_factor));
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(ConfigError::InvalidMaxLoadFactor(self.max_load_factor));
        }
        let floor = 1.0 / self.resize_factor as f64;
        if self.max_load_factor < floor {
            return Err(ConfigError::MaxLoadFactorTooSmall {
                max: self.max_load_factor,
                floor,
            });
        }
        if self
            .original_bucket_count
            .checked_mul(self.resize_factor)
            .is_none()
        {
            return Err(ConfigError::Overflow {
                buckets: self.original_bucket_count,
                factor: self.resize_factor,
            });
        }
        Ok(())
    }
}
