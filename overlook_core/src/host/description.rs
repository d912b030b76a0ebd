// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributes a host reports for one live node.

use alloc::string::String;

use kurbo::Rect;

/// Broad classification of a live node, reported by the host.
///
/// Layers select on kinds rather than on host class names so that the same
/// catalog works against any toolkit. Hosts map their own classes onto the
/// closest kind and fall back to [`View`](Self::View).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    /// Plain view with no more specific role.
    #[default]
    View,
    /// Top-level window.
    Window,
    /// Push button.
    Button,
    /// Static text.
    Label,
    /// Editable text field or text view.
    TextInput,
    /// Image view.
    Image,
    /// Other interactive control (switch, slider, stepper, ...).
    Control,
    /// Scrollable container.
    ScrollView,
    /// Stack layout container.
    StackView,
    /// Table or list container.
    Table,
    /// Collection or grid container.
    Collection,
    /// Embedded web content.
    WebView,
    /// Map view.
    Map,
    /// Activity or progress spinner.
    ActivityIndicator,
}

impl ElementKind {
    /// Returns whether nodes of this kind scroll their content.
    ///
    /// Tables and collections scroll as well.
    #[must_use]
    pub const fn is_scrollable(self) -> bool {
        matches!(self, Self::ScrollView | Self::Table | Self::Collection)
    }

    /// Returns whether nodes of this kind primarily respond to input.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Button | Self::Control | Self::TextInput)
    }

    /// Returns whether nodes of this kind primarily render text.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Label | Self::TextInput)
    }

    /// Returns a short lowercase name, used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Window => "window",
            Self::Button => "button",
            Self::Label => "label",
            Self::TextInput => "text-input",
            Self::Image => "image",
            Self::Control => "control",
            Self::ScrollView => "scroll-view",
            Self::StackView => "stack-view",
            Self::Table => "table",
            Self::Collection => "collection",
            Self::WebView => "web-view",
            Self::Map => "map",
            Self::ActivityIndicator => "activity-indicator",
        }
    }
}

/// Per-node boolean attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeFlags {
    /// The node is not rendered.
    pub hidden: bool,
    /// The node accepts user interaction.
    pub interactive: bool,
    /// The node is provided by the toolkit rather than the application.
    pub system: bool,
    /// The node is an inspector overlay created by an earlier installation.
    pub overlay: bool,
}

/// A point-in-time description of one live node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeDescription {
    /// Host class name.
    pub class_name: String,
    /// Human-readable name, if the host has one.
    pub display_name: Option<String>,
    /// Bounds in root coordinates.
    pub frame: Rect,
    /// Accessibility identifier, if set.
    pub accessibility_identifier: Option<String>,
    /// Broad classification.
    pub kind: ElementKind,
    /// Boolean attributes.
    pub flags: NodeFlags,
}
