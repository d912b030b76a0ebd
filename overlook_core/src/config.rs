// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inspector configuration.
//!
//! Every value here is supplied by the embedding application; the core only
//! reads it.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::time::{Duration, Timebase};

/// Configuration consumed by capture, search, and the overlay manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectorConfig {
    /// Age after which a snapshot should be recaptured before overlays are
    /// mutated against it.
    pub snapshot_expiration: Duration,
    /// Maximum number of snapshots kept by a
    /// [`SnapshotHistory`](crate::snapshot::SnapshotHistory).
    pub max_snapshots: usize,
    /// Search query that matches every inspectable element.
    pub show_all_query: Cow<'static, str>,
    /// Host class names whose nodes never receive overlays.
    pub non_inspectable_class_names: Vec<String>,
    /// Emit per-overlay log records.
    pub verbose: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectorConfig {
    /// Default configuration for hosts whose ticks are nanoseconds.
    ///
    /// Snapshots expire after five seconds and four are kept.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_timebase(Timebase::NANOS)
    }

    /// Default configuration expressed in the given host timebase.
    #[must_use]
    pub const fn with_timebase(timebase: Timebase) -> Self {
        Self {
            snapshot_expiration: Duration::from_millis(5_000, timebase),
            max_snapshots: 4,
            show_all_query: Cow::Borrowed("*"),
            non_inspectable_class_names: Vec::new(),
            verbose: false,
        }
    }

    /// Returns whether nodes of `class_name` are excluded from overlays.
    #[must_use]
    pub fn is_non_inspectable(&self, class_name: &str) -> bool {
        self.non_inspectable_class_names
            .iter()
            .any(|name| name == class_name)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn defaults() {
        let config = InspectorConfig::new();
        assert_eq!(config.snapshot_expiration, Duration(5_000_000_000));
        assert_eq!(config.max_snapshots, 4);
        assert_eq!(config.show_all_query, "*");
        assert!(!config.verbose);
    }

    #[test]
    fn non_inspectable_lookup_is_exact() {
        let config = InspectorConfig {
            non_inspectable_class_names: vec!["_KeyboardHost".into()],
            ..InspectorConfig::new()
        };
        assert!(config.is_non_inspectable("_KeyboardHost"));
        assert!(!config.is_non_inspectable("_Keyboard"));
    }
}
