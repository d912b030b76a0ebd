// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless inspection session against an in-memory node tree.
//!
//! Builds a small screen in a [`NodeStore`], captures it, queues a few layer
//! installs, prints the hierarchy rows, then tears everything down. Events go
//! to both a [`PrettyPrintSink`] on stdout and a [`RecorderSink`], and the
//! recording is exported as a Chrome trace. Set `RUST_LOG=debug` to see the
//! engine's own log lines.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use kurbo::Rect;
use overlook_core::config::InspectorConfig;
use overlook_core::element::ElementIndex;
use overlook_core::host::{ElementKind, NodeFlags, NodeId, NodeSpec, NodeStore};
use overlook_core::layer::catalog;
use overlook_core::overlay::{LayerAction, OverlayManager, available_actions};
use overlook_core::rows::{CollapsibleTree, SnapshotHierarchy};
use overlook_core::snapshot::{Snapshot, SnapshotHistory};
use overlook_core::time::{HostTime, Timebase};
use overlook_core::trace::{LayerEvent, OperationEvent, QueueEvent, SnapshotEvent, TraceSink, Tracer};

use overlook_debug::pretty::PrettyPrintSink;
use overlook_debug::recorder::RecorderSink;

/// One millisecond in nanosecond ticks.
const MS: u64 = 1_000_000;

/// Forwards every event to both sinks.
#[derive(Debug)]
struct Tee {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for Tee {
    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        self.pretty.on_snapshot(e);
        self.recorder.on_snapshot(e);
    }

    fn on_operation(&mut self, e: &OperationEvent<'_>) {
        self.pretty.on_operation(e);
        self.recorder.on_operation(e);
    }

    fn on_layer(&mut self, e: &LayerEvent<'_>) {
        self.pretty.on_layer(e);
        self.recorder.on_layer(e);
    }

    fn on_queue(&mut self, e: &QueueEvent) {
        self.pretty.on_queue(e);
        self.recorder.on_queue(e);
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let timebase = Timebase::NANOS;
    let config = InspectorConfig::new();
    let mut store = NodeStore::new();
    let window = build_screen(&mut store);

    let mut tee = Tee {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout()), timebase),
        recorder: RecorderSink::new(),
    };
    let mut history = SnapshotHistory::new(&config);
    let mut manager: OverlayManager<NodeId> = OverlayManager::new(&config);

    // -- capture -----------------------------------------------------------
    let snapshot = {
        let mut tracer = Tracer::new(&mut tee);
        Arc::new(Snapshot::capture_traced(
            &store,
            window,
            &config,
            HostTime(MS),
            &mut tracer,
        ))
    };
    history.push(Arc::clone(&snapshot));
    log::debug!("{} snapshot(s) in history", history.len());

    // -- rows --------------------------------------------------------------
    let mut tree = CollapsibleTree::new(&SnapshotHierarchy::new(&snapshot).collapsed_from(2));
    println!("hierarchy ({} of {} rows visible):", tree.visible_len(), tree.len());
    print_rows(&tree, &snapshot);
    let diff = tree.expand_all();
    println!(
        "expand all: +{} rows at {:?}",
        diff.inserted.len(),
        diff.inserted
    );

    // -- layers ------------------------------------------------------------
    let standard = catalog::standard();
    let offered = available_actions(&manager, &standard, &snapshot);
    println!("offered actions: {}", offered.len());
    for action in [
        LayerAction::Show(catalog::buttons()),
        LayerAction::Show(catalog::labels()),
        LayerAction::Show(catalog::maps()),
    ] {
        manager.enqueue_action(action, &snapshot);
    }
    {
        let mut tracer = Tracer::new(&mut tee);
        manager.run_pending(&mut store, HostTime(2 * MS), &mut tracer);
    }
    for name in manager.active_layer_names() {
        println!(
            "layer {name}: {} overlays",
            manager.handle_count(name).unwrap_or(0)
        );
    }
    log::info!(
        "{} overlays over {} live nodes",
        manager.total_handle_count(),
        store.node_count()
    );

    // A live change invalidates some captured elements; the overlays follow.
    if let Some(doomed) = snapshot.flattened_descendants().last() {
        store.destroy_subtree(doomed.node());
    }
    manager.enqueue_remove("labels");
    manager.enqueue_install(catalog::labels(), &snapshot);
    manager.enqueue_remove_all();
    {
        let mut tracer = Tracer::new(&mut tee);
        manager.run_pending(&mut store, HostTime(3 * MS), &mut tracer);
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "inspect_trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    overlook_debug::chrome::export(tee.recorder.as_bytes(), timebase, &mut writer)?;
    println!("Wrote {path}");
    Ok(())
}

/// Window with a header, a scrolling list of cells, and a toolkit-owned
/// status bar.
fn build_screen(store: &mut NodeStore) -> NodeId {
    let window = store.create_node(
        NodeSpec::new("Window")
            .kind(ElementKind::Window)
            .frame(Rect::new(0.0, 0.0, 390.0, 844.0)),
    );

    let status = store.create_node(
        NodeSpec::new("_StatusBar")
            .frame(Rect::new(0.0, 0.0, 390.0, 44.0))
            .flags(NodeFlags {
                system: true,
                ..NodeFlags::default()
            }),
    );
    store.add_child(window, status);

    let header = store.create_node(
        NodeSpec::new("HeaderView")
            .kind(ElementKind::StackView)
            .frame(Rect::new(0.0, 44.0, 390.0, 100.0)),
    );
    let title = store.create_node(
        NodeSpec::new("Label")
            .kind(ElementKind::Label)
            .display_name("Inbox")
            .frame(Rect::new(16.0, 56.0, 200.0, 88.0)),
    );
    let compose = store.create_node(
        NodeSpec::new("Button")
            .kind(ElementKind::Button)
            .display_name("Compose")
            .accessibility_identifier("inbox.compose")
            .frame(Rect::new(300.0, 56.0, 374.0, 88.0))
            .flags(NodeFlags {
                interactive: true,
                ..NodeFlags::default()
            }),
    );
    store.add_child(window, header);
    store.add_child(header, title);
    store.add_child(header, compose);

    let list = store.create_node(
        NodeSpec::new("TableView")
            .kind(ElementKind::Table)
            .frame(Rect::new(0.0, 100.0, 390.0, 844.0)),
    );
    store.add_child(window, list);
    for i in 0..4_u32 {
        let top = 100.0 + 72.0 * f64::from(i);
        let cell = store.create_node(
            NodeSpec::new("MessageCell").frame(Rect::new(0.0, top, 390.0, top + 72.0)),
        );
        let subject = store.create_node(
            NodeSpec::new("Label")
                .kind(ElementKind::Label)
                .display_name(format!("Message {i}"))
                .frame(Rect::new(16.0, top + 8.0, 374.0, top + 40.0)),
        );
        store.add_child(list, cell);
        store.add_child(cell, subject);
    }
    window
}

fn print_rows(tree: &CollapsibleTree<ElementIndex>, snapshot: &Snapshot) {
    for row in tree.visible_rows() {
        let element = snapshot.element(row.id());
        let marker = match (row.is_container(), row.is_collapsed()) {
            (false, _) => ' ',
            (true, true) => '+',
            (true, false) => '-',
        };
        println!(
            "{:indent$}{marker} {}",
            "",
            element.name(),
            indent = row.depth() * 2
        );
    }
}
