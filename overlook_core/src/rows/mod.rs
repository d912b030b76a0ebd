// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapsible row lists.
//!
//! Every list or outline the inspector shows (the full hierarchy, the
//! children of one element, search results) is a [`CollapsibleTree`] built
//! from a [`TreeSource`]. The tree keeps one [`TreeRow`] per node with its
//! parent resolved by identity, and answers two questions:
//!
//! - which rows are visible: those without a collapsed ancestor;
//! - what changed after a toggle: a [`RowDiff`] whose deletions index the old
//!   visible list and whose insertions index the new one.
//!
//! ```
//! use overlook_core::rows::{CollapsibleTree, RowSeed};
//!
//! let seed = |id, parent, depth| RowSeed {
//!     id,
//!     parent,
//!     depth,
//!     is_container: false,
//!     is_collapsed: false,
//! };
//! let mut tree = CollapsibleTree::from_seeds(vec![
//!     seed('r', None, 0),
//!     seed('a', Some('r'), 1),
//!     seed('b', Some('a'), 2),
//!     seed('c', Some('a'), 2),
//!     seed('d', Some('r'), 1),
//! ]);
//!
//! let diff = tree.toggle_id('a');
//! assert_eq!(diff.deleted, [2, 3]);
//! assert_eq!(tree.visible_ids(), ['r', 'a', 'd']);
//! ```

mod collapsible;
mod source;

pub use collapsible::{CollapsibleTree, RowDiff, TreeRow};
pub use source::{ElementChildren, RowSeed, SearchResults, SnapshotHierarchy, TreeSource};
