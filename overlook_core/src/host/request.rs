// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay insertion requests.

use alloc::string::String;

use kurbo::Rect;

use super::id::NodeId;
use crate::color::Color;

/// What an overlay object shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Plain outline around the target's bounds.
    Wireframe,
    /// Tinted box with an optional label.
    Highlight,
    /// Single status overlay saying a layer matched nothing.
    EmptyPlaceholder,
    /// Status overlay for an element whose live node no longer exists.
    LostConnection,
}

/// Where an overlay sits relative to its target's own content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// In front of the target's content.
    Above,
    /// Behind the target's content (scrolling containers).
    Behind,
}

/// Everything a host needs to create one overlay object.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayRequest {
    /// Node the overlay is attached to.
    ///
    /// May already be disconnected; hosts should then place the overlay at
    /// their top level.
    pub target: NodeId,
    /// Bounds to outline, in root coordinates.
    pub frame: Rect,
    /// What to draw.
    pub kind: OverlayKind,
    /// Ordering relative to the target's content.
    pub placement: Placement,
    /// Tint.
    pub color: Color,
    /// Label text, for labelled highlights and status overlays.
    pub label: Option<String>,
    /// Name of the layer that owns this overlay.
    pub layer: String,
}
