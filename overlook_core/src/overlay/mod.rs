// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay lifecycle per installed layer.
//!
//! [`OverlayManager`] owns the map from installed layer to the overlay
//! handles it created in the host. A layer name is a key of that map iff the
//! layer is installed, and the map is only ever changed by one operation at a
//! time:
//!
//! ```text
//!   enqueue_install / enqueue_remove / enqueue_action
//!       │
//!       ▼
//!   OperationQueue ──► run_pending() ──► install / destroy / destroy_all
//!                                                │
//!                                                ▼
//!                                 OverlayHost::insert_overlay / remove_overlay
//! ```
//!
//! The wireframe layer is the substrate: installing any other layer installs
//! it first, over every inspectable element, and removing the last other
//! layer removes it again. It is never left installed on its own unless it
//! was asked for on its own.
//!
//! Expected conditions are outcomes, not errors. Installing an installed
//! layer returns [`InstallOutcome::AlreadyInstalled`], removing an absent one
//! returns `false`, a layer that matches nothing gets a single
//! [`EmptyPlaceholder`](OverlayKind::EmptyPlaceholder) overlay over the
//! snapshot root, and an element whose live node is gone gets a
//! [`LostConnection`](OverlayKind::LostConnection) overlay on its nearest
//! live ancestor.

mod actions;
mod queue;

pub use actions::{LayerAction, available_actions};
pub use queue::{CancelToken, Operation, OperationQueue};

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use crate::color::{Color, ColorScheme, DepthPalette};
use crate::config::InspectorConfig;
use crate::element::ElementReference;
use crate::host::{ElementKind, HostTree, OverlayHost, OverlayKind, OverlayRequest, Placement};
use crate::layer::{Layer, catalog};
use crate::snapshot::Snapshot;
use crate::time::HostTime;
use crate::trace::{
    LayerChange, LayerEvent, OperationEvent, OperationPhase, QueueEvent, Tracer,
};

/// Result of installing a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstallOutcome {
    /// One overlay per matched element.
    Installed,
    /// Nothing matched; one placeholder overlay.
    Placeholder,
    /// A layer with this name was already installed; nothing changed.
    AlreadyInstalled,
    /// Cancelled before completion; nothing from this install remains.
    Cancelled,
}

#[derive(Debug)]
struct ActiveLayer<O> {
    layer: Layer,
    handles: Vec<O>,
    outcome: InstallOutcome,
}

#[derive(Debug)]
enum Work {
    Install {
        layer: Layer,
        snapshot: Arc<Snapshot>,
    },
    Remove(String),
    RemoveAll,
}

/// Creates, tracks, and releases overlays for installed layers.
///
/// `O` is the host's overlay handle type; `C` tints overlays.
#[derive(Debug)]
pub struct OverlayManager<O, C = DepthPalette> {
    /// Installed layers in install order; the substrate, when present, is
    /// always first.
    active: Vec<ActiveLayer<O>>,
    queue: OperationQueue<Work>,
    token: CancelToken,
    colors: C,
    verbose: bool,
}

impl<O> OverlayManager<O, DepthPalette> {
    /// Creates a manager tinting overlays by depth.
    #[must_use]
    pub fn new(config: &InspectorConfig) -> Self {
        Self::with_color_scheme(config, DepthPalette::default())
    }
}

impl<O, C> OverlayManager<O, C> {
    /// Creates a manager with an injected colour scheme.
    #[must_use]
    pub fn with_color_scheme(config: &InspectorConfig, colors: C) -> Self {
        let queue = OperationQueue::new();
        let token = queue.cancel_token();
        Self {
            active: Vec::new(),
            queue,
            token,
            colors,
            verbose: config.verbose,
        }
    }

    /// Whether a layer named `name` is installed.
    #[must_use]
    pub fn is_layer_installed(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Names of installed layers in install order.
    pub fn active_layer_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.active.iter().map(|active| active.layer.name())
    }

    /// Number of installed layers, substrate included.
    #[must_use]
    pub fn active_layer_count(&self) -> usize {
        self.active.len()
    }

    /// Overlay handles held for `name`, or `None` if it is not installed.
    #[must_use]
    pub fn handle_count(&self, name: &str) -> Option<usize> {
        self.position(name).map(|pos| self.active[pos].handles.len())
    }

    /// Overlay handles held across every installed layer.
    #[must_use]
    pub fn total_handle_count(&self) -> usize {
        self.active.iter().map(|active| active.handles.len()).sum()
    }

    /// How `name` was installed, or `None` if it is not installed.
    #[must_use]
    pub fn install_outcome(&self, name: &str) -> Option<InstallOutcome> {
        self.position(name).map(|pos| self.active[pos].outcome)
    }

    /// Queues installation of `layer` over `snapshot`.
    pub fn enqueue_install(&mut self, layer: Layer, snapshot: &Arc<Snapshot>) -> u64 {
        let name = format!("install {}", layer.name());
        self.queue.enqueue(
            name,
            Work::Install {
                layer,
                snapshot: Arc::clone(snapshot),
            },
        )
    }

    /// Queues removal of the layer named `name`.
    pub fn enqueue_remove(&mut self, name: impl Into<String>) -> u64 {
        let name = name.into();
        let label = format!("remove {name}");
        self.queue.enqueue(label, Work::Remove(name))
    }

    /// Queues removal of every layer.
    pub fn enqueue_remove_all(&mut self) -> u64 {
        self.queue.enqueue(Cow::Borrowed("remove all"), Work::RemoveAll)
    }

    /// Queues the operations `action` stands for and returns how many were
    /// queued.
    pub fn enqueue_action(&mut self, action: LayerAction, snapshot: &Arc<Snapshot>) -> usize {
        match action {
            LayerAction::Show(layer) => {
                self.enqueue_install(layer, snapshot);
                1
            }
            LayerAction::Hide(layer) => {
                self.enqueue_remove(layer.name());
                1
            }
            LayerAction::ShowAll(layers) => {
                let count = layers.len();
                for layer in layers {
                    self.enqueue_install(layer, snapshot);
                }
                count
            }
            LayerAction::HideAll => {
                self.enqueue_remove_all();
                1
            }
        }
    }

    /// Number of queued operations.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Names of queued operations, oldest first.
    pub fn pending_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.queue.names()
    }

    /// Holds queued work until [`resume`](Self::resume).
    pub fn suspend(&mut self) {
        log::debug!("overlay queue suspended with {} pending", self.queue.len());
        self.queue.suspend();
    }

    /// Lets queued work run again.
    pub fn resume(&mut self) {
        log::debug!("overlay queue resumed with {} pending", self.queue.len());
        self.queue.resume();
    }

    /// Whether queued work is held.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.queue.is_suspended()
    }

    /// Drops queued work and cancels whatever is running.
    ///
    /// Returns how many queued operations were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.cancel_all();
        log::info!("cancelled overlay work, {dropped} queued operations dropped");
        dropped
    }

    /// A handle that cancels this manager's work from any thread.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.active
            .iter()
            .position(|active| active.layer.name() == name)
    }
}

impl<O, C: ColorScheme> OverlayManager<O, C> {
    /// Installs `layer` over `snapshot` right away, bypassing the queue.
    pub fn install<H: OverlayHost<Overlay = O>>(
        &mut self,
        host: &mut H,
        layer: &Layer,
        snapshot: &Snapshot,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> InstallOutcome {
        let epoch = self.token.epoch();
        self.install_at_epoch(host, layer, snapshot, now, epoch, tracer)
    }

    /// Removes the layer named `name` and releases its overlays.
    ///
    /// Returns `false` without doing anything if the layer is not installed,
    /// or if it is the substrate and other layers still need it. Removing the
    /// last non-substrate layer also removes the substrate.
    pub fn destroy<H: OverlayHost<Overlay = O>>(
        &mut self,
        host: &mut H,
        name: &str,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let Some(pos) = self.position(name) else {
            log::debug!("remove {name}: not installed");
            return false;
        };
        if self.active[pos].layer.is_substrate() && self.active.len() > 1 {
            log::debug!(
                "remove {name}: kept as substrate for {} other layers",
                self.active.len() - 1
            );
            return false;
        }
        let removed = self.active.remove(pos);
        release(host, removed, LayerChange::Removed, now, tracer);

        let substrate_only = matches!(self.active.as_slice(), [only] if only.layer.is_substrate());
        if substrate_only && let Some(substrate) = self.active.pop() {
            release(host, substrate, LayerChange::Removed, now, tracer);
        }
        true
    }

    /// Removes every layer and returns how many were installed.
    ///
    /// Queued work is dropped first, so nothing enqueued before this call
    /// reinstalls a layer on the next [`run_pending`](Self::run_pending).
    pub fn destroy_all<H: OverlayHost<Overlay = O>>(
        &mut self,
        host: &mut H,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        let dropped = self.queue.cancel_all();
        if dropped > 0 {
            log::info!("remove all: {dropped} queued operations dropped");
        }
        self.release_all(host, now, tracer)
    }

    fn release_all<H: OverlayHost<Overlay = O>>(
        &mut self,
        host: &mut H,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        let count = self.active.len();
        // Newest first, so the substrate goes last.
        while let Some(active) = self.active.pop() {
            release(host, active, LayerChange::Removed, now, tracer);
        }
        count
    }

    /// Runs queued operations in order until the queue is empty or suspended.
    ///
    /// Returns how many operations were taken off the queue, cancelled ones
    /// included.
    pub fn run_pending<H: OverlayHost<Overlay = O>>(
        &mut self,
        host: &mut H,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        tracer.queue(&QueueEvent {
            pending: self.queue.len(),
            suspended: self.queue.is_suspended(),
            timestamp: now,
        });

        let mut ran = 0;
        while let Some(op) = self.queue.pop() {
            ran += 1;
            tracer.operation(&OperationEvent {
                sequence: op.sequence,
                name: &op.name,
                phase: OperationPhase::Begin,
                timestamp: now,
            });
            log::debug!("#{} {}: begin", op.sequence, op.name);

            let completed = !self.queue.is_cancelled(&op)
                && match &op.work {
                    Work::Install { layer, snapshot } => {
                        if snapshot.is_stale(now) {
                            log::warn!("{}: snapshot {:?} is stale", op.name, snapshot.id());
                        }
                        let outcome =
                            self.install_at_epoch(host, layer, snapshot, now, op.epoch, tracer);
                        outcome != InstallOutcome::Cancelled
                    }
                    Work::Remove(name) => {
                        self.destroy(host, name, now, tracer);
                        true
                    }
                    // Work queued behind a remove-all still runs.
                    Work::RemoveAll => {
                        self.release_all(host, now, tracer);
                        true
                    }
                };

            let phase = if completed {
                OperationPhase::End
            } else {
                OperationPhase::Cancelled
            };
            tracer.operation(&OperationEvent {
                sequence: op.sequence,
                name: &op.name,
                phase,
                timestamp: now,
            });
            log::debug!("#{} {}: {phase:?}", op.sequence, op.name);
        }
        ran
    }

    fn install_at_epoch<H: OverlayHost<Overlay = O>>(
        &mut self,
        host: &mut H,
        layer: &Layer,
        snapshot: &Snapshot,
        now: HostTime,
        epoch: u64,
        tracer: &mut Tracer<'_>,
    ) -> InstallOutcome {
        if let Some(pos) = self.position(layer.name()) {
            if !self.active[pos].layer.shares_predicate(layer) {
                log::warn!(
                    "install {}: a different layer with this name is installed; keeping it",
                    layer.name()
                );
            }
            return InstallOutcome::AlreadyInstalled;
        }

        let mut substrate_added = false;
        if !layer.is_substrate() && !self.is_layer_installed(catalog::WIREFRAMES) {
            let Some(substrate) =
                self.create(host, &catalog::wireframes(), snapshot, now, epoch, tracer)
            else {
                return InstallOutcome::Cancelled;
            };
            self.active.insert(0, substrate);
            substrate_added = true;
        }

        match self.create(host, layer, snapshot, now, epoch, tracer) {
            Some(active) => {
                let outcome = active.outcome;
                self.active.push(active);
                outcome
            }
            None => {
                if substrate_added {
                    let substrate = self.active.remove(0);
                    release(host, substrate, LayerChange::RolledBack, now, tracer);
                }
                InstallOutcome::Cancelled
            }
        }
    }

    /// Creates the overlays for one layer, or releases them and returns
    /// `None` if the work is cancelled part way.
    fn create<H: OverlayHost<Overlay = O>>(
        &self,
        host: &mut H,
        layer: &Layer,
        snapshot: &Snapshot,
        now: HostTime,
        epoch: u64,
        tracer: &mut Tracer<'_>,
    ) -> Option<ActiveLayer<O>> {
        let targets: Vec<&ElementReference> = if layer.is_substrate() {
            snapshot.inspectable_subset().collect()
        } else {
            layer
                .filter(snapshot)
                .into_iter()
                .filter(|element| element.can_host_overlay())
                .collect()
        };

        if targets.is_empty() && !layer.is_substrate() {
            if self.token.is_cancelled_since(epoch) {
                return None;
            }
            let handle = host.insert_overlay(&placeholder_request(layer, snapshot));
            log::debug!("install {}: nothing matched, placeholder over root", layer.name());
            tracer.layer(&LayerEvent {
                layer: layer.name(),
                change: LayerChange::Placeholder,
                handles: 1,
                timestamp: now,
            });
            return Some(ActiveLayer {
                layer: layer.clone(),
                handles: vec![handle],
                outcome: InstallOutcome::Placeholder,
            });
        }

        let mut handles = Vec::with_capacity(targets.len());
        for element in targets {
            if self.token.is_cancelled_since(epoch) {
                let count = handles.len();
                for handle in handles {
                    host.remove_overlay(handle);
                }
                log::info!("install {}: cancelled, released {count} overlays", layer.name());
                tracer.layer(&LayerEvent {
                    layer: layer.name(),
                    change: LayerChange::RolledBack,
                    handles: count,
                    timestamp: now,
                });
                return None;
            }
            let request = self.request_for(&*host, layer, snapshot, element);
            if self.verbose {
                log::trace!(
                    "install {}: {:?} on {:?} for {}",
                    layer.name(),
                    request.kind,
                    request.target,
                    element.name()
                );
            }
            handles.push(host.insert_overlay(&request));
        }

        log::debug!("install {}: {} overlays", layer.name(), handles.len());
        tracer.layer(&LayerEvent {
            layer: layer.name(),
            change: LayerChange::Installed,
            handles: handles.len(),
            timestamp: now,
        });
        Some(ActiveLayer {
            layer: layer.clone(),
            handles,
            outcome: InstallOutcome::Installed,
        })
    }

    fn request_for<H: HostTree + ?Sized>(
        &self,
        host: &H,
        layer: &Layer,
        snapshot: &Snapshot,
        element: &ElementReference,
    ) -> OverlayRequest {
        if element.is_connected(host) {
            let kind = if layer.show_labels() {
                OverlayKind::Highlight
            } else {
                OverlayKind::Wireframe
            };
            return OverlayRequest {
                target: element.node(),
                frame: element.frame(),
                kind,
                placement: placement_for(element.kind()),
                color: self.colors.color(element),
                label: layer.show_labels().then(|| element.name().into()),
                layer: layer.name().into(),
            };
        }

        let anchor = snapshot
            .ancestors_of(element)
            .find(|ancestor| ancestor.is_connected(host))
            .unwrap_or_else(|| snapshot.root());
        OverlayRequest {
            target: anchor.node(),
            frame: element.frame(),
            kind: OverlayKind::LostConnection,
            placement: Placement::Above,
            color: Color::STATUS_GREY,
            label: Some(element.name().into()),
            layer: layer.name().into(),
        }
    }
}

/// Scrolling containers and web views get overlays behind their content,
/// everything else in front.
fn placement_for(kind: ElementKind) -> Placement {
    if kind.is_scrollable() || matches!(kind, ElementKind::WebView) {
        Placement::Behind
    } else {
        Placement::Above
    }
}

fn placeholder_request(layer: &Layer, snapshot: &Snapshot) -> OverlayRequest {
    let root = snapshot.root();
    OverlayRequest {
        target: root.node(),
        frame: root.frame(),
        kind: OverlayKind::EmptyPlaceholder,
        placement: Placement::Above,
        color: Color::STATUS_GREY,
        label: Some(format!("{}: no matches", layer.name())),
        layer: layer.name().into(),
    }
}

fn release<H: OverlayHost>(
    host: &mut H,
    active: ActiveLayer<H::Overlay>,
    change: LayerChange,
    now: HostTime,
    tracer: &mut Tracer<'_>,
) {
    let count = active.handles.len();
    for handle in active.handles {
        host.remove_overlay(handle);
    }
    log::debug!("remove {}: released {count} overlays", active.layer.name());
    tracer.layer(&LayerEvent {
        layer: active.layer.name(),
        change,
        handles: count,
        timestamp: now,
    });
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::host::{NodeDescription, NodeId, NodeStore};
    use crate::snapshot::tests::{Fixture, fixture};

    fn capture(f: &Fixture) -> Arc<Snapshot> {
        Arc::new(Snapshot::capture(
            &f.store,
            f.root,
            &InspectorConfig::new(),
            HostTime(0),
        ))
    }

    fn manager() -> OverlayManager<NodeId> {
        OverlayManager::new(&InspectorConfig::new())
    }

    fn names<C>(manager: &OverlayManager<NodeId, C>) -> Vec<&str> {
        manager.active_layer_names().collect()
    }

    fn install(
        manager: &mut OverlayManager<NodeId>,
        store: &mut NodeStore,
        layer: &Layer,
        snapshot: &Snapshot,
    ) -> InstallOutcome {
        manager.install(store, layer, snapshot, HostTime(0), &mut Tracer::none())
    }

    fn overlay_children(store: &NodeStore, node: NodeId) -> Vec<OverlayKind> {
        store
            .children(node)
            .filter_map(|child| store.overlay_kind(child))
            .collect()
    }

    /// Delegates to a [`NodeStore`], records every request, and optionally
    /// cancels after a number of insertions.
    struct RecordingHost {
        store: NodeStore,
        requests: Vec<OverlayRequest>,
        cancel_after: Option<(usize, CancelToken)>,
    }

    impl HostTree for RecordingHost {
        fn is_alive(&self, node: NodeId) -> bool {
            self.store.is_alive(node)
        }

        fn children(&self, node: NodeId) -> Vec<NodeId> {
            HostTree::children(&self.store, node)
        }

        fn describe(&self, node: NodeId) -> Option<NodeDescription> {
            self.store.describe(node)
        }
    }

    impl OverlayHost for RecordingHost {
        type Overlay = NodeId;

        fn insert_overlay(&mut self, request: &OverlayRequest) -> NodeId {
            self.requests.push(request.clone());
            if let Some((after, token)) = &self.cancel_after
                && self.requests.len() == *after
            {
                token.cancel();
            }
            self.store.insert_overlay(request)
        }

        fn remove_overlay(&mut self, overlay: NodeId) {
            self.store.remove_overlay(overlay);
        }
    }

    #[test]
    fn install_adds_substrate_and_one_overlay_per_match() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();

        let outcome = install(&mut manager, &mut f.store, &catalog::buttons(), &snapshot);
        assert_eq!(outcome, InstallOutcome::Installed);
        assert_eq!(names(&manager), ["wireframes", "buttons"]);
        assert_eq!(manager.handle_count("wireframes"), Some(4));
        assert_eq!(manager.handle_count("buttons"), Some(1));
        assert_eq!(
            overlay_children(&f.store, f.b),
            [OverlayKind::Wireframe, OverlayKind::Highlight]
        );
        assert_eq!(f.store.node_count(), 10);
    }

    #[test]
    fn second_install_is_a_no_op() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        install(&mut manager, &mut f.store, &catalog::buttons(), &snapshot);
        let nodes = f.store.node_count();

        let again = install(&mut manager, &mut f.store, &catalog::buttons(), &snapshot);
        assert_eq!(again, InstallOutcome::AlreadyInstalled);
        assert_eq!(names(&manager), ["wireframes", "buttons"]);
        assert_eq!(manager.handle_count("buttons"), Some(1));
        assert_eq!(f.store.node_count(), nodes);
    }

    #[test]
    fn no_matches_installs_one_placeholder() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();

        let outcome = install(&mut manager, &mut f.store, &catalog::maps(), &snapshot);
        assert_eq!(outcome, InstallOutcome::Placeholder);
        assert_eq!(manager.handle_count("maps"), Some(1));
        assert_eq!(manager.install_outcome("maps"), Some(InstallOutcome::Placeholder));
        assert_eq!(
            overlay_children(&f.store, f.root),
            [OverlayKind::EmptyPlaceholder]
        );
    }

    #[test]
    fn substrate_stays_while_other_layers_need_it() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        install(&mut manager, &mut f.store, &catalog::buttons(), &snapshot);
        install(&mut manager, &mut f.store, &catalog::labels(), &snapshot);

        let mut tracer = Tracer::none();
        assert!(!manager.destroy(&mut f.store, "wireframes", HostTime(0), &mut tracer));
        assert!(manager.is_layer_installed("wireframes"));

        assert!(manager.destroy(&mut f.store, "buttons", HostTime(0), &mut tracer));
        assert_eq!(names(&manager), ["wireframes", "labels"]);

        assert!(manager.destroy(&mut f.store, "labels", HostTime(0), &mut tracer));
        assert_eq!(manager.active_layer_count(), 0);
        assert_eq!(f.store.node_count(), 5);
    }

    #[test]
    fn removing_absent_layer_is_a_no_op() {
        let mut f = fixture();
        let mut manager = manager();
        assert!(!manager.destroy(&mut f.store, "buttons", HostTime(0), &mut Tracer::none()));
    }

    #[test]
    fn substrate_can_be_installed_alone() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        let outcome = install(&mut manager, &mut f.store, &catalog::wireframes(), &snapshot);
        assert_eq!(outcome, InstallOutcome::Installed);
        assert_eq!(names(&manager), ["wireframes"]);
        assert!(manager.destroy(&mut f.store, "wireframes", HostTime(0), &mut Tracer::none()));
        assert_eq!(f.store.node_count(), 5);
    }

    #[test]
    fn scrollable_targets_get_overlays_behind_content() {
        let mut f = fixture();
        f.store.description_mut(f.a).kind = ElementKind::ScrollView;
        let snapshot = capture(&f);
        let mut manager = manager();
        install(&mut manager, &mut f.store, &catalog::scroll_views(), &snapshot);

        let children: Vec<_> = f.store.children(f.a).collect();
        assert_eq!(children.len(), 4);
        assert_eq!(f.store.overlay_kind(children[0]), Some(OverlayKind::Highlight));
        assert_eq!(f.store.overlay_kind(children[1]), Some(OverlayKind::Wireframe));
        assert_eq!(children[2], f.b);
    }

    #[test]
    fn lost_elements_get_status_overlay_on_live_ancestor() {
        let mut f = fixture();
        let snapshot = capture(&f);
        f.store.destroy_node(f.b);
        let mut manager = manager();

        let outcome = install(&mut manager, &mut f.store, &catalog::buttons(), &snapshot);
        assert_eq!(outcome, InstallOutcome::Installed);
        // A's own wireframe, then status overlays for B from the substrate
        // and from `buttons`.
        assert_eq!(
            overlay_children(&f.store, f.a),
            [
                OverlayKind::Wireframe,
                OverlayKind::LostConnection,
                OverlayKind::LostConnection
            ]
        );
    }

    #[test]
    fn disconnected_root_takes_placeholder_path() {
        let mut f = fixture();
        f.store.destroy_subtree(f.root);
        let snapshot = capture(&f);
        let mut manager = manager();

        let outcome = install(&mut manager, &mut f.store, &catalog::buttons(), &snapshot);
        assert_eq!(outcome, InstallOutcome::Placeholder);
        assert_eq!(manager.handle_count("wireframes"), Some(0));
        assert_eq!(manager.handle_count("buttons"), Some(1));
    }

    #[test]
    fn queued_operations_run_in_order() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        manager.enqueue_install(catalog::labels(), &snapshot);
        manager.enqueue_install(catalog::buttons(), &snapshot);
        manager.enqueue_remove("labels");
        assert_eq!(
            manager.pending_names().collect::<Vec<_>>(),
            ["install labels", "install buttons", "remove labels"]
        );

        let ran = manager.run_pending(&mut f.store, HostTime(0), &mut Tracer::none());
        assert_eq!(ran, 3);
        assert_eq!(names(&manager), ["wireframes", "buttons"]);
        assert_eq!(manager.pending_count(), 0);
    }

    #[test]
    fn suspension_holds_work() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        manager.suspend();
        manager.enqueue_install(catalog::buttons(), &snapshot);
        assert_eq!(manager.run_pending(&mut f.store, HostTime(0), &mut Tracer::none()), 0);
        assert!(!manager.is_layer_installed("buttons"));

        manager.resume();
        assert_eq!(manager.run_pending(&mut f.store, HostTime(0), &mut Tracer::none()), 1);
        assert!(manager.is_layer_installed("buttons"));
    }

    #[test]
    fn cancel_all_drops_queued_installs() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        manager.enqueue_install(catalog::buttons(), &snapshot);
        manager.enqueue_install(catalog::labels(), &snapshot);
        assert_eq!(manager.cancel_all(), 2);
        assert_eq!(manager.run_pending(&mut f.store, HostTime(0), &mut Tracer::none()), 0);
        assert_eq!(manager.active_layer_count(), 0);
    }

    #[test]
    fn foreign_cancel_skips_queued_work() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        manager.enqueue_install(catalog::buttons(), &snapshot);
        manager.cancel_token().cancel();
        assert_eq!(manager.run_pending(&mut f.store, HostTime(0), &mut Tracer::none()), 1);
        assert_eq!(manager.active_layer_count(), 0);
        assert_eq!(f.store.node_count(), 5);
    }

    #[test]
    fn cancelled_install_rolls_back_completely() {
        let f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        let mut host = RecordingHost {
            store: f.store,
            requests: Vec::new(),
            // Substrate takes four, so this fires inside `all views`.
            cancel_after: Some((6, manager.cancel_token())),
        };

        let outcome = manager.install(
            &mut host,
            &catalog::all_views(),
            &snapshot,
            HostTime(0),
            &mut Tracer::none(),
        );
        assert_eq!(outcome, InstallOutcome::Cancelled);
        assert_eq!(manager.active_layer_count(), 0);
        assert_eq!(host.store.node_count(), 5);

        host.cancel_after = None;
        let outcome = manager.install(
            &mut host,
            &catalog::all_views(),
            &snapshot,
            HostTime(0),
            &mut Tracer::none(),
        );
        assert_eq!(outcome, InstallOutcome::Installed);
        assert_eq!(manager.total_handle_count(), 8);
    }

    #[test]
    fn injected_colors_and_labels_reach_the_host() {
        let f = fixture();
        let snapshot = capture(&f);
        let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
        let mut manager = OverlayManager::with_color_scheme(
            &InspectorConfig::new(),
            move |_: &ElementReference| red,
        );
        let mut host = RecordingHost {
            store: f.store,
            requests: Vec::new(),
            cancel_after: None,
        };
        manager.install(
            &mut host,
            &catalog::labels(),
            &snapshot,
            HostTime(0),
            &mut Tracer::none(),
        );

        let highlight = host
            .requests
            .iter()
            .find(|request| request.layer == "labels")
            .unwrap();
        assert_eq!(highlight.target, f.c);
        assert_eq!(highlight.color, red);
        assert_eq!(highlight.kind, OverlayKind::Highlight);
        assert_eq!(highlight.label.as_deref(), Some("Title"));

        let wireframe = &host.requests[0];
        assert_eq!(wireframe.layer, "wireframes");
        assert_eq!(wireframe.label, None);
    }

    #[test]
    fn destroy_all_releases_everything() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        install(&mut manager, &mut f.store, &catalog::buttons(), &snapshot);
        install(&mut manager, &mut f.store, &catalog::maps(), &snapshot);
        let removed = manager.destroy_all(&mut f.store, HostTime(0), &mut Tracer::none());
        assert_eq!(removed, 3);
        assert_eq!(f.store.node_count(), 5);
    }

    #[test]
    fn differently_grouped_composites_both_install() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        let narrow = (catalog::all_views() + catalog::buttons()) - catalog::buttons();
        let wide = catalog::all_views() + (catalog::buttons() - catalog::buttons());
        assert_eq!(
            install(&mut manager, &mut f.store, &narrow, &snapshot),
            InstallOutcome::Installed
        );
        assert_eq!(
            install(&mut manager, &mut f.store, &wide, &snapshot),
            InstallOutcome::Installed
        );
        assert_eq!(manager.handle_count(narrow.name()), Some(3));
        assert_eq!(manager.handle_count(wide.name()), Some(4));
    }

    #[test]
    fn scrolling_kinds_place_overlays_behind() {
        for kind in [
            ElementKind::ScrollView,
            ElementKind::Table,
            ElementKind::Collection,
            ElementKind::WebView,
        ] {
            assert_eq!(placement_for(kind), Placement::Behind, "{kind:?}");
        }
        for kind in [ElementKind::Button, ElementKind::Label, ElementKind::StackView] {
            assert_eq!(placement_for(kind), Placement::Above, "{kind:?}");
        }
    }

    #[test]
    fn destroy_all_drops_queued_installs() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        manager.enqueue_install(catalog::buttons(), &snapshot);
        let removed = manager.destroy_all(&mut f.store, HostTime(0), &mut Tracer::none());
        assert_eq!(removed, 0);
        assert_eq!(manager.pending_count(), 0);
        assert_eq!(manager.run_pending(&mut f.store, HostTime(0), &mut Tracer::none()), 0);
        assert_eq!(manager.active_layer_count(), 0);
        assert_eq!(f.store.node_count(), 5);
    }

    #[test]
    fn queued_remove_all_keeps_later_work() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        manager.enqueue_install(catalog::buttons(), &snapshot);
        manager.enqueue_remove_all();
        manager.enqueue_install(catalog::labels(), &snapshot);
        assert_eq!(manager.run_pending(&mut f.store, HostTime(0), &mut Tracer::none()), 3);
        assert_eq!(names(&manager), ["wireframes", "labels"]);
    }

    #[test]
    fn available_actions_follow_install_state() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        let layers = vec![catalog::buttons(), catalog::labels(), catalog::maps()];

        let actions = available_actions(&manager, &layers, &snapshot);
        assert_eq!(
            actions,
            [
                LayerAction::Show(catalog::buttons()),
                LayerAction::Show(catalog::labels()),
                LayerAction::ShowAll(vec![catalog::buttons(), catalog::labels()]),
            ]
        );

        install(&mut manager, &mut f.store, &catalog::buttons(), &snapshot);
        let actions = available_actions(&manager, &layers, &snapshot);
        assert_eq!(
            actions,
            [
                LayerAction::Hide(catalog::buttons()),
                LayerAction::Show(catalog::labels()),
                LayerAction::ShowAll(vec![catalog::labels()]),
                LayerAction::HideAll,
            ]
        );
        assert!(!actions[0].is_redundant(&manager));
        assert!(LayerAction::Show(catalog::buttons()).is_redundant(&manager));
    }

    #[test]
    fn actions_run_through_the_queue() {
        let mut f = fixture();
        let snapshot = capture(&f);
        let mut manager = manager();
        let queued = manager.enqueue_action(
            LayerAction::ShowAll(vec![catalog::buttons(), catalog::labels()]),
            &snapshot,
        );
        assert_eq!(queued, 2);
        manager.run_pending(&mut f.store, HostTime(0), &mut Tracer::none());
        assert_eq!(names(&manager), ["wireframes", "buttons", "labels"]);

        manager.enqueue_action(LayerAction::HideAll, &snapshot);
        manager.run_pending(&mut f.store, HostTime(0), &mut Tracer::none());
        assert_eq!(manager.active_layer_count(), 0);
    }
}
