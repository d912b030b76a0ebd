// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for the live UI tree being inspected.
//!
//! The inspector never owns the UI it looks at. A *host* (the toolkit
//! integration) exposes its node graph through two traits:
//!
//! - [`HostTree`]: read access: liveness, current children in rendered
//!   order, and a [`NodeDescription`] per node. Snapshot capture only uses
//!   this trait.
//! - [`OverlayHost`]: insertion and removal of auxiliary overlay objects
//!   described by an [`OverlayRequest`]. The overlay manager only mutates the
//!   host through this trait.
//!
//! Nodes are named by [`NodeId`], a generational handle. A host reports a
//! handle as not alive once the node it named has been destroyed, which is
//! what lets captured element references degrade to a "disconnected" state
//! rather than dangling.
//!
//! [`NodeStore`] is an in-memory host tree with struct-of-arrays storage. It
//! backs the tests and the headless demo, and suits hosts that keep no node
//! graph of their own.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_inspect(host: &mut impl OverlayHost, now: HostTime) {
//!     let snapshot = Arc::new(Snapshot::capture(host, root, &config, now));
//!     manager.enqueue_install(catalog::buttons(), &snapshot);
//!     manager.run_pending(host, now, &mut Tracer::none());
//! }
//! ```

use alloc::vec::Vec;

mod description;
mod id;
mod request;
mod store;
mod traverse;

pub use description::{ElementKind, NodeDescription, NodeFlags};
pub use id::{INVALID, NodeId};
pub use request::{OverlayKind, OverlayRequest, Placement};
pub use store::{NodeSpec, NodeStore};
pub use traverse::Children;

/// Read access to a live node graph.
pub trait HostTree {
    /// Returns whether `node` still names a live node.
    fn is_alive(&self, node: NodeId) -> bool;

    /// Returns the current children of `node` in rendered (back-to-front)
    /// order, or an empty list if the node is gone.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Describes `node`, or returns `None` if the node is gone.
    fn describe(&self, node: NodeId) -> Option<NodeDescription>;
}

/// Insertion and removal of overlay objects in a live node graph.
pub trait OverlayHost: HostTree {
    /// Host handle for one inserted overlay.
    type Overlay;

    /// Inserts an overlay object as described by `request` and returns its
    /// handle.
    fn insert_overlay(&mut self, request: &OverlayRequest) -> Self::Overlay;

    /// Removes and releases an overlay previously returned by
    /// [`insert_overlay`](Self::insert_overlay).
    fn remove_overlay(&mut self, overlay: Self::Overlay);
}
