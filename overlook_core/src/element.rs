// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Captured descriptors of live nodes.
//!
//! An [`ElementReference`] copies everything the inspector needs from a live
//! node at capture time, so it stays descriptive after the node is gone.
//! Its only link back to the live graph is the generational [`NodeId`], which
//! the host reports as not alive once the node has been destroyed.
//!
//! References live in a [`Snapshot`](crate::snapshot::Snapshot) arena. The
//! parent link is a non-owning [`ElementIndex`] into that arena; the child
//! list is fixed when the snapshot is captured.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use kurbo::Rect;

use crate::config::InspectorConfig;
use crate::host::{ElementKind, HostTree, NodeDescription, NodeId};

/// Position of an element in its snapshot's pre-order arena.
///
/// The root is always index zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementIndex(pub(crate) u32);

impl ElementIndex {
    /// The snapshot root.
    pub const ROOT: Self = Self(0);

    /// Returns the arena position as a `usize`.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ElementIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementIndex({})", self.0)
    }
}

/// Descriptor of one live node, frozen at capture time.
///
/// Two references are equal iff they name the same live node, regardless of
/// the attributes captured for it.
#[derive(Clone, Debug)]
pub struct ElementReference {
    node: NodeId,
    index: ElementIndex,
    parent: Option<ElementIndex>,
    pub(crate) children: Vec<ElementIndex>,
    depth: usize,
    pub(crate) deepest_relative_depth: usize,

    class_name: String,
    display_name: Option<String>,
    frame: Rect,
    accessibility_identifier: Option<String>,
    kind: ElementKind,

    is_hidden: bool,
    is_interactive: bool,
    is_system_view: bool,
    pub(crate) is_container: bool,
    can_host_overlay: bool,
    connected_at_capture: bool,
}

impl ElementReference {
    pub(crate) fn captured(
        node: NodeId,
        index: ElementIndex,
        parent: Option<ElementIndex>,
        depth: usize,
        description: NodeDescription,
        config: &InspectorConfig,
    ) -> Self {
        let flags = description.flags;
        let is_system_view = flags.system || description.class_name.starts_with('_');
        let can_host_overlay = !flags.hidden
            && !flags.overlay
            && !config.is_non_inspectable(&description.class_name);
        Self {
            node,
            index,
            parent,
            children: Vec::new(),
            depth,
            deepest_relative_depth: 0,
            class_name: description.class_name,
            display_name: description.display_name,
            frame: description.frame,
            accessibility_identifier: description.accessibility_identifier,
            kind: description.kind,
            is_hidden: flags.hidden,
            is_interactive: flags.interactive,
            is_system_view,
            is_container: false,
            can_host_overlay,
            connected_at_capture: true,
        }
    }

    /// A root reference for a node that was already gone when capture began.
    pub(crate) fn disconnected_root(node: NodeId) -> Self {
        Self {
            node,
            index: ElementIndex::ROOT,
            parent: None,
            children: Vec::new(),
            depth: 0,
            deepest_relative_depth: 0,
            class_name: String::new(),
            display_name: None,
            frame: Rect::ZERO,
            accessibility_identifier: None,
            kind: ElementKind::View,
            is_hidden: false,
            is_interactive: false,
            is_system_view: false,
            is_container: false,
            can_host_overlay: false,
            connected_at_capture: false,
        }
    }

    /// The live node this reference describes.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Position in the owning snapshot.
    #[must_use]
    pub fn index(&self) -> ElementIndex {
        self.index
    }

    /// Parent position in the owning snapshot, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<ElementIndex> {
        self.parent
    }

    /// Child positions in the owning snapshot, back to front.
    #[must_use]
    pub fn children(&self) -> &[ElementIndex] {
        &self.children
    }

    /// Absolute depth; the snapshot root is depth zero.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Depth of the deepest descendant relative to this element.
    #[must_use]
    pub fn deepest_relative_depth(&self) -> usize {
        self.deepest_relative_depth
    }

    /// Absolute depth of the deepest descendant.
    #[must_use]
    pub fn deepest_absolute_depth(&self) -> usize {
        self.depth + self.deepest_relative_depth
    }

    /// Host class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Display name, if the host provided one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Display name, falling back to the class name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.class_name)
    }

    /// Bounds in root coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Accessibility identifier, if set.
    #[must_use]
    pub fn accessibility_identifier(&self) -> Option<&str> {
        self.accessibility_identifier.as_deref()
    }

    /// Broad classification.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Whether the node was hidden at capture.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Whether the node accepted user interaction at capture.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.is_interactive
    }

    /// Whether the node is provided by the toolkit rather than the app.
    ///
    /// True for nodes the host flags as system nodes and for class names with
    /// a leading underscore.
    #[must_use]
    pub fn is_system_view(&self) -> bool {
        self.is_system_view
    }

    /// Whether at least one captured child is visible.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.is_container
    }

    /// Whether the node may receive overlays.
    #[must_use]
    pub fn can_host_overlay(&self) -> bool {
        self.can_host_overlay
    }

    /// Whether the live node still exists.
    ///
    /// A root that was already gone at capture is never connected.
    #[must_use]
    pub fn is_connected<H: HostTree + ?Sized>(&self, host: &H) -> bool {
        self.connected_at_capture && host.is_alive(self.node)
    }

    /// Whether the live node existed when the snapshot was captured.
    #[must_use]
    pub fn was_connected_at_capture(&self) -> bool {
        self.connected_at_capture
    }
}

impl PartialEq for ElementReference {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for ElementReference {}

impl Hash for ElementReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}
