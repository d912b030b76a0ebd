// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable captures of a live node tree.
//!
//! [`Snapshot::capture`] walks the host tree once, in pre-order, and copies
//! every node into an [`ElementReference`] arena. After that the snapshot
//! never touches the host again: every query here runs over the arena, so a
//! snapshot stays readable (and shareable across threads behind an `Arc`)
//! after the live nodes it describes have been destroyed.
//!
//! Nodes flagged as overlays are skipped during capture, so overlays installed
//! against an earlier snapshot never show up as elements of a later one.
//!
//! A snapshot does not invalidate itself. Callers check
//! [`is_stale`](Snapshot::is_stale) and recapture before mutating overlays
//! against an old one.

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::config::InspectorConfig;
use crate::element::{ElementIndex, ElementReference};
use crate::host::{HostTree, NodeId};
use crate::layer::Layer;
use crate::time::HostTime;
use crate::trace::{SnapshotEvent, Tracer};

static NEXT_SNAPSHOT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a captured snapshot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotId(pub u64);

impl fmt::Debug for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnapshotId({})", self.0)
    }
}

/// An immutable tree of [`ElementReference`]s captured at one instant.
#[derive(Clone, Debug)]
pub struct Snapshot {
    id: SnapshotId,
    elements: Vec<ElementReference>,
    inspectable: Vec<ElementIndex>,
    captured_at: HostTime,
    expires_at: HostTime,
}

impl Snapshot {
    /// Captures the tree rooted at `root`.
    ///
    /// If `root` is already gone the snapshot holds a single disconnected
    /// root with no children; this never fails.
    #[must_use]
    pub fn capture<H: HostTree + ?Sized>(
        host: &H,
        root: NodeId,
        config: &InspectorConfig,
        now: HostTime,
    ) -> Self {
        let elements = match host.describe(root) {
            Some(description) => capture_tree(host, root, description, config),
            None => alloc::vec![ElementReference::disconnected_root(root)],
        };
        let inspectable = elements[1..]
            .iter()
            .filter(|e| e.can_host_overlay())
            .map(ElementReference::index)
            .collect();
        let snapshot = Self {
            id: SnapshotId(NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::Relaxed)),
            elements,
            inspectable,
            captured_at: now,
            expires_at: now + config.snapshot_expiration,
        };
        log::debug!(
            "captured {:?}: {} elements from {root:?}",
            snapshot.id,
            snapshot.elements.len()
        );
        snapshot
    }

    /// Like [`capture`](Self::capture), then reports the snapshot to `tracer`.
    #[must_use]
    pub fn capture_traced<H: HostTree + ?Sized>(
        host: &H,
        root: NodeId,
        config: &InspectorConfig,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Self {
        let snapshot = Self::capture(host, root, config, now);
        tracer.snapshot(&SnapshotEvent::from(&snapshot));
        snapshot
    }

    /// Process-unique identifier.
    #[must_use]
    pub fn id(&self) -> SnapshotId {
        self.id
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> &ElementReference {
        &self.elements[0]
    }

    /// Number of captured elements, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false; a snapshot holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not belong to this snapshot.
    #[must_use]
    pub fn element(&self, index: ElementIndex) -> &ElementReference {
        &self.elements[index.get()]
    }

    /// Returns the element at `index`, if it belongs to this snapshot.
    #[must_use]
    pub fn get(&self, index: ElementIndex) -> Option<&ElementReference> {
        self.elements.get(index.get())
    }

    /// Every element in pre-order, root first.
    #[must_use]
    pub fn elements(&self) -> &[ElementReference] {
        &self.elements
    }

    /// Every element below the root, in pre-order.
    #[must_use]
    pub fn flattened_descendants(&self) -> &[ElementReference] {
        &self.elements[1..]
    }

    /// Descendants that may receive overlays, in pre-order.
    pub fn inspectable_subset(&self) -> impl Iterator<Item = &ElementReference> + '_ {
        self.inspectable.iter().map(|index| self.element(*index))
    }

    /// Descendants matched by `layer`, in pre-order.
    #[must_use]
    pub fn elements_matching(&self, layer: &Layer) -> Vec<&ElementReference> {
        layer.filter(self)
    }

    /// The layers from `layers` that match at least one element.
    #[must_use]
    pub fn populated_layers<'a>(&self, layers: &'a [Layer]) -> Vec<&'a Layer> {
        layers
            .iter()
            .filter(|layer| {
                self.flattened_descendants()
                    .iter()
                    .any(|element| layer.accepts(element))
            })
            .collect()
    }

    /// The parent of `element`, or `None` for the root.
    #[must_use]
    pub fn parent_of(&self, element: &ElementReference) -> Option<&ElementReference> {
        element.parent().map(|index| self.element(index))
    }

    /// The children of `element`, back to front.
    pub fn children_of<'a>(
        &'a self,
        element: &'a ElementReference,
    ) -> impl Iterator<Item = &'a ElementReference> + 'a {
        element.children().iter().map(|index| self.element(*index))
    }

    /// The ancestors of `element`, nearest first.
    pub fn ancestors_of<'a>(
        &'a self,
        element: &'a ElementReference,
    ) -> impl Iterator<Item = &'a ElementReference> + 'a {
        core::iter::successors(self.parent_of(element), |e| self.parent_of(e))
    }

    /// Finds the element capturing `node`.
    #[must_use]
    pub fn find(&self, node: NodeId) -> Option<&ElementReference> {
        self.elements.iter().find(|e| e.node() == node)
    }

    /// Host time of capture.
    #[must_use]
    pub fn captured_at(&self) -> HostTime {
        self.captured_at
    }

    /// Host time from which the snapshot counts as stale.
    #[must_use]
    pub fn expires_at(&self) -> HostTime {
        self.expires_at
    }

    /// Whether the snapshot should be recaptured before use at `now`.
    #[must_use]
    pub fn is_stale(&self, now: HostTime) -> bool {
        now >= self.expires_at
    }
}

/// Pre-order walk from a live root.
fn capture_tree<H: HostTree + ?Sized>(
    host: &H,
    root: NodeId,
    root_description: crate::host::NodeDescription,
    config: &InspectorConfig,
) -> Vec<ElementReference> {
    let mut elements = alloc::vec![ElementReference::captured(
        root,
        ElementIndex::ROOT,
        None,
        0,
        root_description,
        config,
    )];

    // (node, parent position, depth); children pushed in reverse so the
    // first child pops first.
    let mut stack: Vec<(NodeId, ElementIndex, usize)> = host
        .children(root)
        .into_iter()
        .rev()
        .map(|child| (child, ElementIndex::ROOT, 1))
        .collect();

    while let Some((node, parent, depth)) = stack.pop() {
        let Some(description) = host.describe(node) else {
            continue;
        };
        if description.flags.overlay {
            continue;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a UI tree never approaches u32::MAX nodes"
        )]
        let index = ElementIndex(elements.len() as u32);
        elements.push(ElementReference::captured(
            node,
            index,
            Some(parent),
            depth,
            description,
            config,
        ));
        elements[parent.get()].children.push(index);
        stack.extend(
            host.children(node)
                .into_iter()
                .rev()
                .map(|child| (child, index, depth + 1)),
        );
    }

    // Children always sit after their parent, so one reverse sweep settles
    // container-ness and depth extents bottom-up.
    for i in (0..elements.len()).rev() {
        let (head, tail) = elements.split_at_mut(i + 1);
        let element = &mut head[i];
        let base = element.index().get() + 1;
        for child in &element.children {
            let child = &tail[child.get() - base];
            element.is_container |= !child.is_hidden();
            element.deepest_relative_depth = element
                .deepest_relative_depth
                .max(child.deepest_relative_depth + 1);
        }
    }

    elements
}

/// A bounded history of captured snapshots, newest last.
#[derive(Debug)]
pub struct SnapshotHistory {
    capacity: usize,
    snapshots: VecDeque<Arc<Snapshot>>,
}

impl SnapshotHistory {
    /// Creates an empty history holding at most `config.max_snapshots`
    /// snapshots (at least one).
    #[must_use]
    pub fn new(config: &InspectorConfig) -> Self {
        Self {
            capacity: config.max_snapshots.max(1),
            snapshots: VecDeque::new(),
        }
    }

    /// Adds a snapshot and returns the oldest one if capacity was exceeded.
    pub fn push(&mut self, snapshot: Arc<Snapshot>) -> Option<Arc<Snapshot>> {
        self.snapshots.push_back(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front()
        } else {
            None
        }
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<&Arc<Snapshot>> {
        self.snapshots.back()
    }

    /// The most recent snapshot, if it is not stale at `now`.
    #[must_use]
    pub fn fresh(&self, now: HostTime) -> Option<&Arc<Snapshot>> {
        self.latest().filter(|snapshot| !snapshot.is_stale(now))
    }

    /// Looks up a snapshot by identifier.
    #[must_use]
    pub fn get(&self, id: SnapshotId) -> Option<&Arc<Snapshot>> {
        self.snapshots.iter().find(|snapshot| snapshot.id() == id)
    }

    /// Number of snapshots held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshot is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
