// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in layers.
//!
//! Layers hold a shared predicate, so the catalog hands out fresh values from
//! functions rather than statics. Calling a function twice yields two equal
//! layers.

use alloc::vec;
use alloc::vec::Vec;

use super::Layer;
use crate::host::ElementKind;

/// Name of the substrate layer.
pub const WIREFRAMES: &str = "wireframes";

/// Plain outline of every inspectable element; the substrate under every
/// other layer.
#[must_use]
pub fn wireframes() -> Layer {
    Layer::new(WIREFRAMES, |_| true)
}

/// Toolkit-provided elements.
#[must_use]
pub fn internal_views() -> Layer {
    Layer::new("internal views", |e| e.is_system_view())
        .with_labels(true)
        .allowing_system_views()
}

/// Toolkit-provided elements with visible children.
#[must_use]
pub fn system_containers() -> Layer {
    Layer::new("system containers", |e| e.is_system_view() && e.is_container())
        .with_labels(true)
        .allowing_system_views()
}

/// Every application element, labelled.
#[must_use]
pub fn all_views() -> Layer {
    Layer::new("all views", |_| true).with_labels(true)
}

/// Buttons.
#[must_use]
pub fn buttons() -> Layer {
    Layer::with_kind("buttons", ElementKind::Button).with_labels(true)
}

/// Static text.
#[must_use]
pub fn labels() -> Layer {
    Layer::with_kind("labels", ElementKind::Label).with_labels(true)
}

/// Images.
#[must_use]
pub fn images() -> Layer {
    Layer::with_kind("images", ElementKind::Image).with_labels(true)
}

/// Editable text.
#[must_use]
pub fn text_inputs() -> Layer {
    Layer::with_kind("text inputs", ElementKind::TextInput).with_labels(true)
}

/// Generic controls (switches, sliders, steppers).
#[must_use]
pub fn controls() -> Layer {
    Layer::with_kind("controls", ElementKind::Control).with_labels(true)
}

/// Every scrollable element, tables and collections included.
#[must_use]
pub fn scroll_views() -> Layer {
    Layer::new("scroll views", |e| e.kind().is_scrollable()).with_labels(true)
}

/// Stack layouts.
#[must_use]
pub fn stack_views() -> Layer {
    Layer::with_kind("stack views", ElementKind::StackView).with_labels(true)
}

/// Tables.
#[must_use]
pub fn tables() -> Layer {
    Layer::with_kind("tables", ElementKind::Table).with_labels(true)
}

/// Collections.
#[must_use]
pub fn collections() -> Layer {
    Layer::with_kind("collections", ElementKind::Collection).with_labels(true)
}

/// Embedded web content.
#[must_use]
pub fn web_views() -> Layer {
    Layer::with_kind("web views", ElementKind::WebView).with_labels(true)
}

/// Maps.
#[must_use]
pub fn maps() -> Layer {
    Layer::with_kind("maps", ElementKind::Map).with_labels(true)
}

/// Spinners.
#[must_use]
pub fn activity_indicators() -> Layer {
    Layer::with_kind("activity indicators", ElementKind::ActivityIndicator).with_labels(true)
}

/// Elements with at least one visible child.
#[must_use]
pub fn containers() -> Layer {
    Layer::new("containers", |e| e.is_container())
}

/// Elements carrying an accessibility identifier.
#[must_use]
pub fn with_identifier() -> Layer {
    Layer::new("with identifier", |e| e.accessibility_identifier().is_some()).with_labels(true)
}

/// Elements lacking an accessibility identifier.
#[must_use]
pub fn without_identifier() -> Layer {
    Layer::new("without identifier", |e| e.accessibility_identifier().is_none())
        .with_labels(true)
}

/// Elements accepting user interaction.
#[must_use]
pub fn interactive() -> Layer {
    Layer::new("interactive", |e| e.is_interactive() || e.kind().is_interactive())
        .with_labels(true)
}

/// The user-facing catalog, substrate excluded.
#[must_use]
pub fn standard() -> Vec<Layer> {
    vec![
        all_views(),
        buttons(),
        labels(),
        images(),
        text_inputs(),
        controls(),
        scroll_views(),
        stack_views(),
        tables(),
        collections(),
        web_views(),
        maps(),
        activity_indicators(),
        containers(),
        with_identifier(),
        without_identifier(),
        interactive(),
        internal_views(),
        system_containers(),
    ]
}

#[cfg(test)]
mod tests {
    use alloc::borrow::ToOwned;
    use alloc::collections::BTreeSet;

    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names = BTreeSet::new();
        for layer in standard() {
            assert!(names.insert(layer.name().to_owned()), "{}", layer.name());
        }
        assert!(!names.contains(WIREFRAMES));
    }

    #[test]
    fn substrate_flags() {
        let substrate = wireframes();
        assert!(substrate.is_substrate());
        assert!(!substrate.show_labels());
        assert!(!substrate.allows_system_views());
        assert!(!(substrate + buttons()).is_substrate());
    }

    #[test]
    fn system_layers_opt_in() {
        assert!(internal_views().allows_system_views());
        assert!(system_containers().allows_system_views());
        assert!(!all_views().allows_system_views());
    }
}
