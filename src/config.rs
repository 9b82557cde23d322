//! Configuration types.

/// Sync engine configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Lower bound (inclusive) of the placeholder delivery forecast, in days
    /// after the message date.
    pub min_offset_days: i64,
    /// Upper bound (inclusive) of the placeholder delivery forecast.
    pub max_offset_days: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            min_offset_days: 3,
            max_offset_days: 5,
        }
    }
}
