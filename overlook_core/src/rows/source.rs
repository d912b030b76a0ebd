// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row sources.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::config::InspectorConfig;
use crate::element::{ElementIndex, ElementReference};
use crate::search;
use crate::snapshot::Snapshot;

/// One row before parents are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSeed<Id> {
    /// Identity of the row's node.
    pub id: Id,
    /// Identity of the parent node, if it has one among the seeds.
    pub parent: Option<Id>,
    /// Absolute depth of the node.
    pub depth: usize,
    /// Whether the row can be collapsed.
    pub is_container: bool,
    /// Initial collapse state.
    pub is_collapsed: bool,
}

/// Anything that can be presented as a collapsible tree of rows.
///
/// Seeds come in presentation order. A parent that is not itself among the
/// seeds makes its child a top-level row.
pub trait TreeSource {
    /// Node identity.
    type Id: Copy + Ord;

    /// Rows in presentation order.
    fn seeds(&self) -> Vec<RowSeed<Self::Id>>;
}

/// Hidden children count here, unlike [`ElementReference::is_container`],
/// so every captured row can be reached by expanding its parent.
fn seed(
    element: &ElementReference,
    parent: Option<ElementIndex>,
    collapsed: bool,
) -> RowSeed<ElementIndex> {
    let is_container = !element.children().is_empty();
    RowSeed {
        id: element.index(),
        parent,
        depth: element.depth(),
        is_container,
        is_collapsed: is_container && collapsed,
    }
}

/// Every element of a snapshot, root included.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotHierarchy<'s> {
    snapshot: &'s Snapshot,
    collapse_from: Option<usize>,
}

impl<'s> SnapshotHierarchy<'s> {
    /// Source with everything expanded.
    #[must_use]
    pub fn new(snapshot: &'s Snapshot) -> Self {
        Self {
            snapshot,
            collapse_from: None,
        }
    }

    /// Starts containers at absolute depth `depth` and deeper collapsed.
    #[must_use]
    pub fn collapsed_from(mut self, depth: usize) -> Self {
        self.collapse_from = Some(depth);
        self
    }
}

impl TreeSource for SnapshotHierarchy<'_> {
    type Id = ElementIndex;

    fn seeds(&self) -> Vec<RowSeed<ElementIndex>> {
        self.snapshot
            .elements()
            .iter()
            .map(|element| {
                let collapsed = self.collapse_from.is_some_and(|d| element.depth() >= d);
                seed(element, element.parent(), collapsed)
            })
            .collect()
    }
}

/// The subtree below one element, the element itself excluded.
#[derive(Clone, Copy, Debug)]
pub struct ElementChildren<'s> {
    snapshot: &'s Snapshot,
    element: ElementIndex,
}

impl<'s> ElementChildren<'s> {
    /// Source for the descendants of `element`.
    #[must_use]
    pub fn new(snapshot: &'s Snapshot, element: ElementIndex) -> Self {
        Self { snapshot, element }
    }
}

impl TreeSource for ElementChildren<'_> {
    type Id = ElementIndex;

    fn seeds(&self) -> Vec<RowSeed<ElementIndex>> {
        let Some(top) = self.snapshot.get(self.element) else {
            return Vec::new();
        };
        // Pre-order puts a subtree right after its root and ends it at the
        // first element no deeper than the root.
        self.snapshot.elements()[top.index().get() + 1..]
            .iter()
            .take_while(|element| element.depth() > top.depth())
            .map(|element| seed(element, element.parent(), false))
            .collect()
    }
}

/// Elements matching a search query.
///
/// A match keeps its parent link only if the parent matched too, so matches
/// nest where the tree allows and are top-level otherwise.
#[derive(Clone, Debug)]
pub struct SearchResults<'s> {
    snapshot: &'s Snapshot,
    matches: Vec<ElementIndex>,
}

impl<'s> SearchResults<'s> {
    /// Source over the given matches, which must be in pre-order.
    #[must_use]
    pub fn new(snapshot: &'s Snapshot, matches: Vec<ElementIndex>) -> Self {
        Self { snapshot, matches }
    }

    /// Source over the results of [`search::search`].
    #[must_use]
    pub fn from_query(snapshot: &'s Snapshot, query: &str, config: &InspectorConfig) -> Self {
        let matches = search::search(snapshot, query, config)
            .into_iter()
            .map(ElementReference::index)
            .collect();
        Self::new(snapshot, matches)
    }

    /// Matched elements in pre-order.
    #[must_use]
    pub fn matches(&self) -> &[ElementIndex] {
        &self.matches
    }
}

impl TreeSource for SearchResults<'_> {
    type Id = ElementIndex;

    fn seeds(&self) -> Vec<RowSeed<ElementIndex>> {
        let matched: BTreeSet<ElementIndex> = self.matches.iter().copied().collect();
        let parents: BTreeSet<ElementIndex> = self
            .matches
            .iter()
            .filter_map(|index| self.snapshot.get(*index)?.parent())
            .filter(|parent| matched.contains(parent))
            .collect();
        self.matches
            .iter()
            .filter_map(|index| self.snapshot.get(*index))
            .map(|element| {
                let parent = element.parent().filter(|p| matched.contains(p));
                RowSeed {
                    is_container: parents.contains(&element.index()),
                    ..seed(element, parent, false)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::host::{ElementKind, NodeFlags, NodeSpec, NodeStore};
    use crate::rows::CollapsibleTree;
    use crate::snapshot::tests::fixture;
    use crate::time::HostTime;

    fn ids(seeds: &[RowSeed<ElementIndex>]) -> Vec<usize> {
        seeds.iter().map(|s| s.id.get()).collect()
    }

    #[test]
    fn hierarchy_seeds_every_element() {
        let f = fixture();
        let snapshot = Snapshot::capture(&f.store, f.root, &InspectorConfig::new(), HostTime(0));
        let seeds = SnapshotHierarchy::new(&snapshot).seeds();
        assert_eq!(ids(&seeds), vec![0, 1, 2, 3, 4]);
        assert_eq!(seeds[0].parent, None);
        assert_eq!(seeds[2].parent, Some(ElementIndex(1)));
        assert!(seeds[1].is_container);
        assert!(!seeds[4].is_container);
    }

    #[test]
    fn hidden_children_still_make_a_row_container() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeSpec::new("Window").kind(ElementKind::Window));
        let hidden = store.create_node(NodeSpec::new("Label").kind(ElementKind::Label).flags(
            NodeFlags {
                hidden: true,
                ..NodeFlags::default()
            },
        ));
        store.add_child(root, hidden);
        let snapshot = Snapshot::capture(&store, root, &InspectorConfig::new(), HostTime(0));
        assert!(!snapshot.root().is_container());

        let seeds = SnapshotHierarchy::new(&snapshot).seeds();
        assert!(seeds[0].is_container);
        let mut tree = CollapsibleTree::from_seeds(seeds);
        assert_eq!(tree.visible_len(), 2);
        assert_eq!(tree.toggle(0).deleted, vec![1]);
    }

    #[test]
    fn hierarchy_initial_collapse_only_touches_containers() {
        let f = fixture();
        let snapshot = Snapshot::capture(&f.store, f.root, &InspectorConfig::new(), HostTime(0));
        let seeds = SnapshotHierarchy::new(&snapshot).collapsed_from(1).seeds();
        assert!(!seeds[0].is_collapsed);
        assert!(seeds[1].is_collapsed);
        assert!(!seeds[4].is_collapsed);
    }

    #[test]
    fn element_children_stop_at_subtree_end() {
        let f = fixture();
        let snapshot = Snapshot::capture(&f.store, f.root, &InspectorConfig::new(), HostTime(0));
        let seeds = ElementChildren::new(&snapshot, ElementIndex(1)).seeds();
        assert_eq!(ids(&seeds), vec![2, 3]);
        assert!(ElementChildren::new(&snapshot, ElementIndex(4)).seeds().is_empty());
    }

    #[test]
    fn search_results_keep_matched_parents_only() {
        let f = fixture();
        let snapshot = Snapshot::capture(&f.store, f.root, &InspectorConfig::new(), HostTime(0));
        let results = SearchResults::new(
            &snapshot,
            vec![ElementIndex(1), ElementIndex(3), ElementIndex(4)],
        );
        let seeds = results.seeds();
        assert_eq!(seeds[0].parent, None);
        assert_eq!(seeds[1].parent, Some(ElementIndex(1)));
        assert_eq!(seeds[2].parent, None);
        assert!(seeds[0].is_container);
        assert!(!seeds[2].is_container);
    }
}
