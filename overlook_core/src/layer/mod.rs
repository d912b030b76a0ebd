// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named element predicates and their algebra.
//!
//! A [`Layer`] selects a subset of a [`Snapshot`]. Layers compose with `+`
//! (union) and `-` (difference), and [`Layer::zero`] matches nothing:
//!
//! ```
//! use overlook_core::layer::catalog;
//!
//! let text = catalog::labels() + catalog::text_inputs();
//! assert_eq!(text.name(), "labels+text inputs");
//!
//! let plain = catalog::all_views() - catalog::containers();
//! assert_eq!(plain.name(), "all views-containers");
//! ```
//!
//! Equality and hashing look at the name only. Two layers with the same name
//! are the same layer to the overlay manager even if their predicates differ,
//! which is why composition always derives a fresh name. Composite operands
//! are parenthesized, so differently grouped expressions never share one:
//!
//! ```
//! use overlook_core::layer::catalog;
//!
//! let a = (catalog::all_views() + catalog::buttons()) - catalog::buttons();
//! let b = catalog::all_views() + (catalog::buttons() - catalog::buttons());
//! assert_eq!(a.name(), "(all views+buttons)-buttons");
//! assert_eq!(b.name(), "all views+(buttons-buttons)");
//! ```
//!
//! Unless a layer [allows system views](Layer::allows_system_views), elements
//! the host marks as toolkit-provided are never selected.

pub mod catalog;

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Sub};

use crate::element::ElementReference;
use crate::host::ElementKind;
use crate::snapshot::Snapshot;

/// Shared element predicate.
pub type Predicate = Arc<dyn Fn(&ElementReference) -> bool + Send + Sync>;

/// A named predicate over captured elements.
#[derive(Clone)]
pub struct Layer {
    name: String,
    predicate: Predicate,
    show_labels: bool,
    allows_system_views: bool,
    composite: bool,
}

impl Layer {
    /// Creates a layer from a name and a predicate.
    ///
    /// Labels are off and system views are excluded.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&ElementReference) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            show_labels: false,
            allows_system_views: false,
            composite: false,
        }
    }

    /// Layer matching every element of one kind.
    #[must_use]
    pub fn with_kind(name: impl Into<String>, kind: ElementKind) -> Self {
        Self::new(name, move |element| element.kind() == kind)
    }

    /// Layer matching one host class, named after it.
    #[must_use]
    pub fn with_class_name(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        let expected = class_name.clone();
        Self::new(class_name, move |element| element.class_name() == expected)
    }

    /// The layer that matches nothing; identity of `+`.
    #[must_use]
    pub fn zero() -> Self {
        Self::new("zero", |_| false)
    }

    /// Sets whether overlays of this layer carry labels.
    #[must_use]
    pub fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    /// Lets the layer select toolkit-provided elements.
    #[must_use]
    pub fn allowing_system_views(mut self) -> Self {
        self.allows_system_views = true;
        self
    }

    /// Identity of the layer.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether overlays of this layer carry labels.
    #[must_use]
    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    /// Whether toolkit-provided elements may be selected.
    #[must_use]
    pub fn allows_system_views(&self) -> bool {
        self.allows_system_views
    }

    /// Whether this is the wireframe substrate.
    #[must_use]
    pub fn is_substrate(&self) -> bool {
        self.name == catalog::WIREFRAMES
    }

    /// Whether the layer was built with `+` or `-`.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.composite
    }

    /// Name as an operand of `+` or `-`.
    fn operand_name(&self) -> Cow<'_, str> {
        if self.composite {
            Cow::Owned(format!("({})", self.name))
        } else {
            Cow::Borrowed(&self.name)
        }
    }

    /// Whether `element` is selected, system-view rule included.
    #[must_use]
    pub fn accepts(&self, element: &ElementReference) -> bool {
        (self.allows_system_views || !element.is_system_view()) && (self.predicate)(element)
    }

    /// Whether both layers share one predicate allocation.
    ///
    /// Equal names with different predicates are the ambiguous case the
    /// overlay manager warns about.
    #[must_use]
    pub fn shares_predicate(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }

    /// Selected descendants of the snapshot root, in pre-order.
    #[must_use]
    pub fn filter<'s>(&self, snapshot: &'s Snapshot) -> Vec<&'s ElementReference> {
        snapshot
            .flattened_descendants()
            .iter()
            .filter(|element| self.accepts(element))
            .collect()
    }

    /// Like [`filter`](Self::filter) but the root is a candidate too.
    #[must_use]
    pub fn filter_including_root<'s>(&self, snapshot: &'s Snapshot) -> Vec<&'s ElementReference> {
        snapshot
            .elements()
            .iter()
            .filter(|element| self.accepts(element))
            .collect()
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("show_labels", &self.show_labels)
            .field("allows_system_views", &self.allows_system_views)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Layer {}

impl Hash for Layer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// Operands are combined through `accepts`, so each side keeps its own
// system-view rule inside the composite.

impl Add for Layer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let name = format!("{}+{}", self.operand_name(), rhs.operand_name());
        let show_labels = self.show_labels || rhs.show_labels;
        let allows_system_views = self.allows_system_views || rhs.allows_system_views;
        Self {
            name,
            predicate: Arc::new(move |e: &ElementReference| self.accepts(e) || rhs.accepts(e)),
            show_labels,
            allows_system_views,
            composite: true,
        }
    }
}

impl Sub for Layer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let name = format!("{}-{}", self.operand_name(), rhs.operand_name());
        let show_labels = self.show_labels;
        let allows_system_views = self.allows_system_views;
        Self {
            name,
            predicate: Arc::new(move |e: &ElementReference| self.accepts(e) && !rhs.accepts(e)),
            show_labels,
            allows_system_views,
            composite: true,
        }
    }
}
