// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer toggles offered to command wiring.
//!
//! Shortcuts, titles, and icons belong to the embedding application; this
//! module only decides which toggles make sense for the current state.

use alloc::vec::Vec;

use crate::layer::Layer;
use crate::snapshot::Snapshot;

use super::OverlayManager;

/// A user-facing layer command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerAction {
    /// Install one layer.
    Show(Layer),
    /// Remove one layer.
    Hide(Layer),
    /// Install every listed layer that is not installed yet.
    ShowAll(Vec<Layer>),
    /// Remove every layer.
    HideAll,
}

impl LayerAction {
    /// Whether running the action would change nothing right now.
    #[must_use]
    pub fn is_redundant<O, C>(&self, manager: &OverlayManager<O, C>) -> bool {
        match self {
            Self::Show(layer) => manager.is_layer_installed(layer.name()),
            Self::Hide(layer) => !manager.is_layer_installed(layer.name()),
            Self::ShowAll(layers) => layers
                .iter()
                .all(|layer| manager.is_layer_installed(layer.name())),
            Self::HideAll => manager.active_layer_count() == 0,
        }
    }
}

/// Toggles available for `catalog` against `snapshot`.
///
/// Only layers that match something in the snapshot are offered. Each one
/// appears as `Hide` if installed and `Show` otherwise, followed by `ShowAll`
/// when something is left to show and `HideAll` when anything is installed.
#[must_use]
pub fn available_actions<O, C>(
    manager: &OverlayManager<O, C>,
    catalog: &[Layer],
    snapshot: &Snapshot,
) -> Vec<LayerAction> {
    let populated = snapshot.populated_layers(catalog);
    let mut actions: Vec<LayerAction> = populated
        .iter()
        .map(|layer| {
            if manager.is_layer_installed(layer.name()) {
                LayerAction::Hide((*layer).clone())
            } else {
                LayerAction::Show((*layer).clone())
            }
        })
        .collect();

    let hidden: Vec<Layer> = populated
        .into_iter()
        .filter(|layer| !manager.is_layer_installed(layer.name()))
        .cloned()
        .collect();
    if !hidden.is_empty() {
        actions.push(LayerAction::ShowAll(hidden));
    }
    if manager.active_layer_count() > 0 {
        actions.push(LayerAction::HideAll);
    }
    actions
}
