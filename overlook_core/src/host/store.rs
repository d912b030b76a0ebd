// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage implementing the host contract.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use super::description::{ElementKind, NodeDescription, NodeFlags};
use super::id::{INVALID, NodeId};
use super::request::{OverlayKind, OverlayRequest, Placement};
use super::traverse::Children;
use super::{HostTree, OverlayHost};

/// Class name given to overlay nodes created by [`NodeStore`].
const OVERLAY_CLASS_NAME: &str = "overlook.Overlay";

/// Attributes for a node about to be created in a [`NodeStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeSpec {
    description: NodeDescription,
}

impl NodeSpec {
    /// Starts a spec for a node of the given host class.
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            description: NodeDescription {
                class_name: class_name.into(),
                ..NodeDescription::default()
            },
        }
    }

    /// Sets the element kind.
    #[must_use]
    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.description.kind = kind;
        self
    }

    /// Sets the frame in root coordinates.
    #[must_use]
    pub fn frame(mut self, frame: Rect) -> Self {
        self.description.frame = frame;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.description.display_name = Some(name.into());
        self
    }

    /// Sets the accessibility identifier.
    #[must_use]
    pub fn accessibility_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.description.accessibility_identifier = Some(identifier.into());
        self
    }

    /// Sets the boolean attributes.
    #[must_use]
    pub fn flags(mut self, flags: NodeFlags) -> Self {
        self.description.flags = flags;
        self
    }
}

/// Struct-of-arrays storage for a live node tree.
///
/// Nodes are addressed by [`NodeId`] handles. Each node occupies a slot in
/// parallel arrays. Destroyed nodes are recycled via a free list, and
/// generation counters make stale handles report as not alive.
///
/// Topology mutations take handles that must be alive and panic otherwise;
/// the [`HostTree`] and [`OverlayHost`] implementations never panic on stale
/// handles.
#[derive(Debug, Default)]
pub struct NodeStore {
    // -- Topology --
    parent: Vec<u32>,
    first_child: Vec<u32>,
    pub(super) next_sibling: Vec<u32>,
    prev_sibling: Vec<u32>,

    // -- Attributes --
    description: Vec<NodeDescription>,
    overlay_kind: Vec<Option<OverlayKind>>,

    // -- Allocation --
    pub(super) generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
}

impl NodeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Allocation API --

    /// Creates a detached node and returns its handle.
    pub fn create_node(&mut self, spec: NodeSpec) -> NodeId {
        self.allocate(spec.description, None)
    }

    /// Destroys a childless node, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the node has children or if the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy node with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    /// Destroys a node together with all of its descendants.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_subtree(&mut self, id: NodeId) {
        self.validate(id);
        let mut post_order = Vec::new();
        let mut stack = alloc::vec![(id.idx, false)];
        while let Some((idx, expanded)) = stack.pop() {
            if expanded {
                post_order.push(idx);
                continue;
            }
            stack.push((idx, true));
            let mut child = self.first_child[idx as usize];
            while child != INVALID {
                stack.push((child, false));
                child = self.next_sibling[child as usize];
            }
        }
        for idx in post_order {
            self.destroy_node(self.handle(idx));
        }
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live nodes, overlays included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Adds `child` as the last (front-most) child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, or `sibling`
    /// has no parent.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;
    }

    /// Detaches `child` from its parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "node has no parent"
        );
        self.unlink_from_parent(child.idx);
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the live nodes that have no parent.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        (0..self.len)
            .filter(|idx| self.parent[*idx as usize] == INVALID && !self.free_list.contains(idx))
            .map(|idx| self.handle(idx))
            .collect()
    }

    // -- Attribute API --

    /// Returns the description of a node.
    #[must_use]
    pub fn description(&self, id: NodeId) -> &NodeDescription {
        self.validate(id);
        &self.description[id.idx as usize]
    }

    /// Returns the description of a node for modification.
    pub fn description_mut(&mut self, id: NodeId) -> &mut NodeDescription {
        self.validate(id);
        &mut self.description[id.idx as usize]
    }

    /// Returns what the overlay node `id` shows, or `None` for ordinary nodes.
    #[must_use]
    pub fn overlay_kind(&self, id: NodeId) -> Option<OverlayKind> {
        self.validate(id);
        self.overlay_kind[id.idx as usize]
    }

    // -- Internal helpers --

    fn allocate(&mut self, description: NodeDescription, overlay: Option<OverlayKind>) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.description[idx as usize] = description;
            self.overlay_kind[idx as usize] = overlay;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.description.push(description);
            self.overlay_kind.push(overlay);
            self.generation.push(0);
            idx
        };
        self.handle(idx)
    }

    fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: NodeId) {
        assert!(
            self.is_alive(id),
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

impl HostTree for NodeStore {
    fn is_alive(&self, node: NodeId) -> bool {
        Self::is_alive(self, node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        if !self.is_alive(node) {
            return Vec::new();
        }
        Children::new(self, self.first_child[node.idx as usize]).collect()
    }

    fn describe(&self, node: NodeId) -> Option<NodeDescription> {
        self.is_alive(node)
            .then(|| self.description[node.idx as usize].clone())
    }
}

impl OverlayHost for NodeStore {
    type Overlay = NodeId;

    fn insert_overlay(&mut self, request: &OverlayRequest) -> NodeId {
        let description = NodeDescription {
            class_name: OVERLAY_CLASS_NAME.into(),
            display_name: request.label.clone(),
            frame: request.frame,
            accessibility_identifier: None,
            kind: ElementKind::View,
            flags: NodeFlags {
                overlay: true,
                ..NodeFlags::default()
            },
        };
        let overlay = self.allocate(description, Some(request.kind));

        // Overlays whose target is gone stay parked at the top level.
        if self.is_alive(request.target) {
            let first = self.first_child[request.target.idx as usize];
            match request.placement {
                Placement::Behind if first != INVALID => {
                    self.insert_before(overlay, self.handle(first));
                }
                Placement::Above | Placement::Behind => self.add_child(request.target, overlay),
            }
        }
        overlay
    }

    fn remove_overlay(&mut self, overlay: NodeId) {
        if self.is_alive(overlay) {
            self.destroy_subtree(overlay);
        }
    }
}
