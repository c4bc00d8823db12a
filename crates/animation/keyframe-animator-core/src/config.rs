//! Animator configuration.

use serde::{Deserialize, Serialize};

use crate::AnimatorError;

/// How keyframe times written out of order are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeOrder {
    /// A keyframe earlier than its predecessor fails the load.
    #[default]
    Strict,
    /// Keyframes are kept as written and bracketed by a linear scan.
    AsWritten,
}

/// Configuration for keyframe loading and snapshot caching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Number of recent `(time, snapshot)` pairs kept for on-demand lookups.
    pub snapshot_cache_size: usize,

    /// Ordering policy for keyframe times.
    pub keyframe_order: KeyframeOrder,

    /// Reject array values whose length differs from the parameter's first value.
    pub strict_array_lengths: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        // One slot per worker that may query a distinct time concurrently.
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            snapshot_cache_size: workers,
            keyframe_order: KeyframeOrder::Strict,
            strict_array_lengths: true,
        }
    }
}

impl AnimatorConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, AnimatorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_snapshot_cache_size(mut self, size: usize) -> Self {
        self.snapshot_cache_size = size;
        self
    }

    pub fn with_keyframe_order(mut self, order: KeyframeOrder) -> Self {
        self.keyframe_order = order;
        self
    }

    pub fn with_strict_array_lengths(mut self, strict: bool) -> Self {
        self.strict_array_lengths = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let cfg = AnimatorConfig::default();
        assert!(cfg.snapshot_cache_size >= 1);
        assert_eq!(cfg.keyframe_order, KeyframeOrder::Strict);
        assert!(cfg.strict_array_lengths);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = AnimatorConfig::from_json_str(r#"{ "keyframe_order": "as_written" }"#).unwrap();
        assert_eq!(cfg.keyframe_order, KeyframeOrder::AsWritten);
        assert!(cfg.strict_array_lengths);
    }

    #[test]
    fn bad_json_is_a_serialization_error() {
        let err = AnimatorConfig::from_json_str("{ nope").unwrap_err();
        assert_eq!(err.category(), "serialization");
    }
}
