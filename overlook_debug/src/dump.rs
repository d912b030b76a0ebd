// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON outline of a captured snapshot.

use serde_json::{Value, json};

use overlook_core::element::ElementReference;
use overlook_core::snapshot::Snapshot;

/// Describes `snapshot` as a JSON object.
///
/// Elements are listed flat in pre-order. Each carries its own index and its
/// parent's, so the tree can be rebuilt without recursion.
#[must_use]
pub fn snapshot_json(snapshot: &Snapshot) -> Value {
    let elements: Vec<Value> = snapshot.elements().iter().map(element_json).collect();
    json!({
        "id": snapshot.id().0,
        "captured_at": snapshot.captured_at().ticks(),
        "expires_at": snapshot.expires_at().ticks(),
        "elements": elements,
    })
}

fn element_json(element: &ElementReference) -> Value {
    let frame = element.frame();
    json!({
        "index": element.index().get(),
        "parent": element.parent().map(|p| p.get()),
        "node": format!("{:?}", element.node()),
        "depth": element.depth(),
        "class": element.class_name(),
        "name": element.display_name(),
        "identifier": element.accessibility_identifier(),
        "kind": format!("{:?}", element.kind()),
        "frame": [frame.x0, frame.y0, frame.x1, frame.y1],
        "hidden": element.is_hidden(),
        "system": element.is_system_view(),
        "container": element.is_container(),
        "connected": element.was_connected_at_capture(),
    })
}
