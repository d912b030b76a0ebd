// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattened, collapse-aware rows and their toggle diffs.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::mem;

use super::source::{RowSeed, TreeSource};

/// One node of a [`CollapsibleTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeRow<Id> {
    id: Id,
    parent: Option<usize>,
    depth: usize,
    relative_depth: usize,
    is_container: bool,
    collapsed: bool,
}

impl<Id: Copy> TreeRow<Id> {
    /// Identity of the row's node.
    #[must_use]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Row position of the parent, resolved by identity.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Absolute depth of the node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Depth below the shallowest row of the tree.
    #[must_use]
    pub fn relative_depth(&self) -> usize {
        self.relative_depth
    }

    /// Whether the row can be toggled.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.is_container
    }

    /// Whether the row's children are hidden. Leaves always report `true`.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed || !self.is_container
    }
}

/// Positions to change after a toggle.
///
/// `deleted` indexes the visible rows before the toggle and `inserted` the
/// visible rows after it, both ascending. Apply them together: deletions
/// first, from the back, then insertions from the front. [`apply`](Self::apply)
/// does exactly that.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowDiff {
    /// Positions in the new visible list that appeared.
    pub inserted: Vec<usize>,
    /// Positions in the old visible list that disappeared.
    pub deleted: Vec<usize>,
}

impl RowDiff {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.deleted.is_empty()
    }

    /// Brings a mirror of the old visible list up to date, taking inserted
    /// items from `new_visible`.
    ///
    /// # Panics
    ///
    /// Panics if `list` or `new_visible` is not the list this diff was
    /// computed against.
    pub fn apply<T: Clone>(&self, list: &mut Vec<T>, new_visible: &[T]) {
        for &pos in self.deleted.iter().rev() {
            list.remove(pos);
        }
        for &pos in &self.inserted {
            list.insert(pos, new_visible[pos].clone());
        }
    }
}

/// Collapse-aware flattening of a [`TreeSource`].
///
/// The visible list is recomputed in full after every change and diffed
/// against the previous one by row membership, so each toggle costs O(n).
#[derive(Clone, Debug)]
pub struct CollapsibleTree<Id> {
    rows: Vec<TreeRow<Id>>,
    positions: BTreeMap<Id, usize>,
    visible: Vec<usize>,
}

impl<Id: Copy + Ord> CollapsibleTree<Id> {
    /// Flattens `source`.
    #[must_use]
    pub fn new<S: TreeSource<Id = Id> + ?Sized>(source: &S) -> Self {
        Self::from_seeds(source.seeds())
    }

    /// Flattens seeds given in presentation order.
    ///
    /// Seeds repeating an earlier id are ignored. A parent link only resolves
    /// to a row that comes earlier, so a seed whose parent is itself or
    /// appears later becomes a top-level row. A row with child rows is a
    /// container even if its seed says otherwise.
    #[must_use]
    pub fn from_seeds(seeds: Vec<RowSeed<Id>>) -> Self {
        let mut positions = BTreeMap::new();
        let seeds: Vec<_> = seeds
            .into_iter()
            .filter(|seed| {
                if positions.contains_key(&seed.id) {
                    return false;
                }
                let pos = positions.len();
                positions.insert(seed.id, pos);
                true
            })
            .collect();

        let base_depth = seeds.iter().map(|seed| seed.depth).min().unwrap_or(0);
        let mut rows: Vec<TreeRow<Id>> = seeds
            .iter()
            .enumerate()
            .map(|(pos, seed)| TreeRow {
                id: seed.id,
                parent: seed
                    .parent
                    .and_then(|parent| positions.get(&parent).copied())
                    .filter(|&parent| parent < pos),
                depth: seed.depth,
                relative_depth: seed.depth.saturating_sub(base_depth),
                is_container: seed.is_container,
                collapsed: seed.is_collapsed,
            })
            .collect();
        let parents: Vec<usize> = rows.iter().filter_map(|row| row.parent).collect();
        for parent in parents {
            rows[parent].is_container = true;
        }
        for row in &mut rows {
            row.collapsed &= row.is_container;
        }

        let visible = visible_positions(&rows);
        Self {
            rows,
            positions,
            visible,
        }
    }

    /// Every row, visible or not, in presentation order.
    #[must_use]
    pub fn rows(&self) -> &[TreeRow<Id>] {
        &self.rows
    }

    /// Row at `pos`.
    #[must_use]
    pub fn row(&self, pos: usize) -> Option<&TreeRow<Id>> {
        self.rows.get(pos)
    }

    /// Row position of `id`.
    #[must_use]
    pub fn position_of(&self, id: Id) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Total number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows no collapsed ancestor hides, in presentation order.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&TreeRow<Id>> {
        self.visible.iter().map(|&pos| &self.rows[pos]).collect()
    }

    /// Ids of the visible rows.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<Id> {
        self.visible.iter().map(|&pos| self.rows[pos].id).collect()
    }

    /// Number of visible rows.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Whether some ancestor of the row at `pos` is collapsed.
    ///
    /// Walks the ancestor chain every time; nothing is cached.
    #[must_use]
    pub fn is_hidden(&self, pos: usize) -> bool {
        let mut parent = self.rows[pos].parent;
        while let Some(p) = parent {
            if self.rows[p].collapsed {
                return true;
            }
            parent = self.rows[p].parent;
        }
        false
    }

    /// Flips the collapse state of the row at `pos`.
    ///
    /// Leaves are rejected with an empty diff. Toggling a row that a
    /// collapsed ancestor already hides flips its state but also returns an
    /// empty diff, since no visible row changes.
    pub fn toggle(&mut self, pos: usize) -> RowDiff {
        let Some(row) = self.rows.get_mut(pos) else {
            return RowDiff::default();
        };
        if !row.is_container {
            return RowDiff::default();
        }
        row.collapsed = !row.collapsed;
        self.refresh()
    }

    /// [`toggle`](Self::toggle) by node identity.
    pub fn toggle_id(&mut self, id: Id) -> RowDiff {
        match self.position_of(id) {
            Some(pos) => self.toggle(pos),
            None => RowDiff::default(),
        }
    }

    /// [`toggle`](Self::toggle) by position in the visible list.
    pub fn toggle_visible(&mut self, visible_pos: usize) -> RowDiff {
        match self.visible.get(visible_pos) {
            Some(&pos) => self.toggle(pos),
            None => RowDiff::default(),
        }
    }

    /// Collapses every container at relative depth `depth` or deeper and
    /// expands the shallower ones.
    pub fn collapse_below(&mut self, depth: usize) -> RowDiff {
        for row in &mut self.rows {
            row.collapsed = row.is_container && row.relative_depth >= depth;
        }
        self.refresh()
    }

    /// Expands every container.
    pub fn expand_all(&mut self) -> RowDiff {
        for row in &mut self.rows {
            row.collapsed = false;
        }
        self.refresh()
    }

    /// Collapses every container.
    pub fn collapse_all(&mut self) -> RowDiff {
        self.collapse_below(0)
    }

    /// Recomputes the visible list and diffs it against the previous one.
    fn refresh(&mut self) -> RowDiff {
        let old = mem::replace(&mut self.visible, visible_positions(&self.rows));
        diff(self.rows.len(), &old, &self.visible)
    }
}

/// Hides a row iff its parent is collapsed or hidden.
///
/// Parents always come before their children, so one forward pass settles
/// every row.
fn visible_positions<Id>(rows: &[TreeRow<Id>]) -> Vec<usize> {
    let mut hidden = vec![false; rows.len()];
    for (pos, row) in rows.iter().enumerate() {
        if let Some(parent) = row.parent {
            hidden[pos] = rows[parent].collapsed || hidden[parent];
        }
    }
    (0..rows.len()).filter(|&pos| !hidden[pos]).collect()
}

fn diff(len: usize, old: &[usize], new: &[usize]) -> RowDiff {
    let mut in_old = vec![false; len];
    let mut in_new = vec![false; len];
    for &pos in old {
        in_old[pos] = true;
    }
    for &pos in new {
        in_new[pos] = true;
    }
    RowDiff {
        inserted: new
            .iter()
            .enumerate()
            .filter(|&(_, &pos)| !in_old[pos])
            .map(|(i, _)| i)
            .collect(),
        deleted: old
            .iter()
            .enumerate()
            .filter(|&(_, &pos)| !in_new[pos])
            .map(|(i, _)| i)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InspectorConfig;
    use crate::element::ElementIndex;
    use crate::rows::source::{ElementChildren, SnapshotHierarchy};
    use crate::snapshot::Snapshot;
    use crate::snapshot::tests::fixture;
    use crate::time::HostTime;

    /// `Root(A(B, C), D)` as rows 0..=4.
    fn scenario() -> CollapsibleTree<ElementIndex> {
        let f = fixture();
        let snapshot = Snapshot::capture(&f.store, f.root, &InspectorConfig::new(), HostTime(0));
        CollapsibleTree::new(&SnapshotHierarchy::new(&snapshot))
    }

    fn visible(tree: &CollapsibleTree<ElementIndex>) -> Vec<usize> {
        tree.visible_ids().iter().map(|id| id.get()).collect()
    }

    fn seed(id: u32, parent: Option<u32>, depth: usize) -> RowSeed<u32> {
        RowSeed {
            id,
            parent,
            depth,
            is_container: false,
            is_collapsed: false,
        }
    }

    /// ```text
    /// 0
    /// ├ 1
    /// │ ├ 2
    /// │ │ └ 3
    /// │ └ 4
    /// └ 5
    ///   ├ 6
    ///   └ 7
    ///     └ 8
    /// ```
    fn deep() -> CollapsibleTree<u32> {
        CollapsibleTree::from_seeds(vec![
            seed(0, None, 0),
            seed(1, Some(0), 1),
            seed(2, Some(1), 2),
            seed(3, Some(2), 3),
            seed(4, Some(1), 2),
            seed(5, Some(0), 1),
            seed(6, Some(5), 2),
            seed(7, Some(5), 2),
            seed(8, Some(7), 3),
        ])
    }

    /// Checks the hide invariant and that `diff` turns `mirror` into the
    /// current visible list.
    fn check(tree: &CollapsibleTree<u32>, mirror: &mut Vec<u32>, diff: &RowDiff) {
        let ids = tree.visible_ids();
        diff.apply(mirror, &ids);
        assert_eq!(*mirror, ids);

        for pos in 0..tree.len() {
            let mut collapsed_ancestor = false;
            let mut parent = tree.rows()[pos].parent();
            while let Some(p) = parent {
                collapsed_ancestor |= tree.rows()[p].is_collapsed();
                parent = tree.rows()[p].parent();
            }
            assert_eq!(tree.is_hidden(pos), collapsed_ancestor, "row {pos}");
        }
        let unhidden: Vec<u32> = (0..tree.len())
            .filter(|&pos| !tree.is_hidden(pos))
            .map(|pos| tree.rows()[pos].id())
            .collect();
        assert_eq!(unhidden, ids);
    }

    #[test]
    fn collapsing_removes_children_at_old_positions() {
        let mut tree = scenario();
        assert_eq!(visible(&tree), [0, 1, 2, 3, 4]);

        let diff = tree.toggle(1);
        assert_eq!(diff.deleted, [2, 3]);
        assert!(diff.inserted.is_empty());
        assert_eq!(visible(&tree), [0, 1, 4]);
    }

    #[test]
    fn expanding_inserts_children_at_new_positions() {
        let mut tree = scenario();
        tree.toggle(1);

        let diff = tree.toggle(1);
        assert_eq!(diff.inserted, [2, 3]);
        assert!(diff.deleted.is_empty());
        assert_eq!(visible(&tree), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn leaves_cannot_be_toggled() {
        let mut tree = scenario();
        assert!(tree.toggle(4).is_empty());
        assert!(!tree.rows()[4].is_container());
        assert!(tree.rows()[4].is_collapsed());
        assert_eq!(tree.visible_len(), 5);
    }

    #[test]
    fn toggling_under_collapsed_ancestor_changes_nothing_visible() {
        let mut tree = scenario();
        let diff = tree.toggle(0);
        assert_eq!(diff.deleted, [1, 2, 3, 4]);

        let diff = tree.toggle(1);
        assert!(diff.is_empty());
        assert!(tree.rows()[1].is_collapsed());

        let diff = tree.toggle(0);
        assert_eq!(diff.inserted, [1, 2]);
        assert_eq!(visible(&tree), [0, 1, 4]);
    }

    #[test]
    fn double_toggle_restores_state() {
        let mut tree = scenario();
        tree.toggle(1);
        tree.toggle(1);
        assert!(!tree.rows()[1].is_collapsed());
        assert_eq!(visible(&tree), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn diffs_replay_onto_a_mirror() {
        let mut tree = deep();
        let mut mirror = tree.visible_ids();
        assert_eq!(mirror.len(), 9);

        for pos in [1, 7, 0, 2, 0, 5, 1, 7, 2, 5, 3, 8, 0, 0] {
            let diff = tree.toggle(pos);
            check(&tree, &mut mirror, &diff);
        }
    }

    #[test]
    fn bulk_changes_replay_onto_a_mirror() {
        let mut tree = deep();
        let mut mirror = tree.visible_ids();

        let diff = tree.collapse_below(2);
        check(&tree, &mut mirror, &diff);
        assert_eq!(mirror, [0, 1, 2, 4, 5, 6, 7]);

        let diff = tree.collapse_all();
        check(&tree, &mut mirror, &diff);
        assert_eq!(mirror, [0]);

        let diff = tree.expand_all();
        check(&tree, &mut mirror, &diff);
        assert_eq!(mirror.len(), 9);
    }

    #[test]
    fn toggle_by_id_and_visible_position() {
        let mut tree = deep();
        tree.toggle_id(1);
        assert_eq!(tree.visible_ids(), [0, 1, 5, 6, 7, 8]);

        // Visible position 4 is row 7.
        let diff = tree.toggle_visible(4);
        assert_eq!(diff.deleted, [5]);
        assert!(tree.toggle_id(42).is_empty());
        assert!(tree.toggle_visible(42).is_empty());
    }

    #[test]
    fn parents_resolve_by_identity() {
        let mut tree = CollapsibleTree::from_seeds(vec![
            seed(11, None, 0),
            seed(10, Some(11), 1),
            seed(11, None, 5),
        ]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.rows()[1].parent(), Some(0));
        assert!(tree.rows()[0].is_container());

        let diff = tree.toggle_id(11);
        assert_eq!(diff.deleted, [1]);
        assert_eq!(tree.visible_ids(), [11]);
    }

    #[test]
    fn cyclic_and_later_parents_become_top_level() {
        let mut tree = CollapsibleTree::from_seeds(vec![
            seed(1, Some(2), 1),
            seed(2, Some(1), 1),
            seed(3, Some(3), 1),
        ]);
        assert_eq!(tree.rows()[0].parent(), None);
        assert_eq!(tree.rows()[1].parent(), Some(0));
        assert_eq!(tree.rows()[2].parent(), None);
        assert_eq!(tree.visible_len(), 3);
        assert!((0..tree.len()).all(|pos| !tree.is_hidden(pos)));

        let mut mirror = tree.visible_ids();
        let diff = tree.toggle_id(1);
        assert_eq!(diff.deleted, [1]);
        assert!(tree.is_hidden(1));
        assert!(tree.toggle_id(3).is_empty());
        check(&tree, &mut mirror, &diff);
    }

    #[test]
    fn subtree_rows_are_relative_to_their_top() {
        let f = fixture();
        let snapshot = Snapshot::capture(&f.store, f.root, &InspectorConfig::new(), HostTime(0));
        let tree = CollapsibleTree::new(&ElementChildren::new(&snapshot, ElementIndex(1)));
        assert_eq!(tree.len(), 2);
        assert!(tree.rows().iter().all(|row| row.relative_depth() == 0));
        assert!(tree.rows().iter().all(|row| row.parent().is_none()));
        assert_eq!(tree.rows()[0].depth(), 2);
    }
}
