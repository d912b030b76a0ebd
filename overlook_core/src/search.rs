// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text search over a snapshot.

use alloc::vec::Vec;

use crate::config::InspectorConfig;
use crate::element::ElementReference;
use crate::snapshot::Snapshot;

/// Finds the descendants of the snapshot root matching `query`, in pre-order.
///
/// The configured show-all query returns every inspectable element and a
/// blank query returns nothing. Anything else matches, ignoring case, as a
/// substring of the display name, class name, or accessibility identifier.
#[must_use]
pub fn search<'s>(
    snapshot: &'s Snapshot,
    query: &str,
    config: &InspectorConfig,
) -> Vec<&'s ElementReference> {
    let query = query.trim();
    if query == config.show_all_query {
        return snapshot.inspectable_subset().collect();
    }
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    snapshot
        .flattened_descendants()
        .iter()
        .filter(|element| matches(element, &needle))
        .collect()
}

fn matches(element: &ElementReference, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    element.display_name().is_some_and(contains)
        || contains(element.class_name())
        || element.accessibility_identifier().is_some_and(contains)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::host::NodeId;
    use crate::snapshot::tests::fixture;
    use crate::time::HostTime;

    fn run(query: &str, config: &InspectorConfig) -> Vec<NodeId> {
        let mut f = fixture();
        f.store.description_mut(f.d).accessibility_identifier = Some("hero.image".into());
        let snapshot = Snapshot::capture(&f.store, f.root, config, HostTime(0));
        search(&snapshot, query, config)
            .into_iter()
            .map(ElementReference::node)
            .collect()
    }

    #[test]
    fn show_all_returns_inspectable_elements() {
        let f = fixture();
        let found = run("*", &InspectorConfig::new());
        assert_eq!(found, vec![f.a, f.b, f.c, f.d]);
    }

    #[test]
    fn blank_query_returns_nothing() {
        assert!(run("", &InspectorConfig::new()).is_empty());
        assert!(run("   ", &InspectorConfig::new()).is_empty());
    }

    #[test]
    fn matches_names_classes_and_identifiers_ignoring_case() {
        let f = fixture();
        let config = InspectorConfig::new();
        assert_eq!(run("title", &config), vec![f.c]);
        assert_eq!(run("BUTTON", &config), vec![f.b]);
        assert_eq!(run("HERO", &config), vec![f.d]);
        assert_eq!(run("view", &config), vec![f.a, f.d]);
    }

    #[test]
    fn custom_show_all_query() {
        let config = InspectorConfig {
            show_all_query: "all".into(),
            ..InspectorConfig::new()
        };
        assert_eq!(run(" all ", &config).len(), 4);
        assert!(run("*", &config).is_empty());
    }
}
