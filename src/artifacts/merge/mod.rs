//! Three-way merge
//!
//! - `classifier`: per-path outcome from the (split, current, given) blob IDs
//! - `conflict`: conflict-marker file contents
//! - `three_way`: reconciles whole snapshots into the merged snapshot

/// Debug logging for merge internals, enabled with the `debug_merge` feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

pub mod classifier;
pub mod conflict;
pub mod three_way;
