// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for capture and overlay work.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! snapshot and overlay code calls as it works. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Text logging goes through the `log` facade independently of this module;
//! trace events are the structured, machine-readable side.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::host::NodeId;
use crate::snapshot::{Snapshot, SnapshotId};
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Where a queued operation is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationPhase {
    /// The worker picked the operation up.
    Begin,
    /// The operation ran to completion.
    End,
    /// The operation observed a cancellation and stopped.
    Cancelled,
}

/// What happened to a layer's overlay set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerChange {
    /// One overlay per matched element was created.
    Installed,
    /// Nothing matched; a single placeholder was created.
    Placeholder,
    /// The overlay set was released.
    Removed,
    /// A cancelled install released what it had created.
    RolledBack,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a snapshot has been captured.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotEvent {
    /// The new snapshot.
    pub snapshot: SnapshotId,
    /// Live node the capture started from.
    pub root: NodeId,
    /// Captured elements, root included.
    pub element_count: usize,
    /// Elements that may receive overlays.
    pub inspectable_count: usize,
    /// Whether the root was alive at capture.
    pub connected: bool,
    /// Host time of capture.
    pub captured_at: HostTime,
}

impl From<&Snapshot> for SnapshotEvent {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            snapshot: snapshot.id(),
            root: snapshot.root().node(),
            element_count: snapshot.len(),
            inspectable_count: snapshot.inspectable_subset().count(),
            connected: snapshot.root().was_connected_at_capture(),
            captured_at: snapshot.captured_at(),
        }
    }
}

/// Marks a transition of one queued operation.
#[derive(Clone, Copy, Debug)]
pub struct OperationEvent<'a> {
    /// Queue sequence number.
    pub sequence: u64,
    /// Diagnostic name, such as `"install buttons"`.
    pub name: &'a str,
    /// Which transition.
    pub phase: OperationPhase,
    /// Host time of the transition.
    pub timestamp: HostTime,
}

/// Emitted when a layer's overlay set changes.
#[derive(Clone, Copy, Debug)]
pub struct LayerEvent<'a> {
    /// Layer name.
    pub layer: &'a str,
    /// What changed.
    pub change: LayerChange,
    /// Overlay handles created or released.
    pub handles: usize,
    /// Host time of the change.
    pub timestamp: HostTime,
}

/// Emitted when the worker starts draining the queue.
#[derive(Clone, Copy, Debug)]
pub struct QueueEvent {
    /// Operations waiting, including the ones about to run.
    pub pending: usize,
    /// Whether the queue is suspended (nothing will run).
    pub suspended: bool,
    /// Host time of the drain.
    pub timestamp: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from capture and overlay work.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a snapshot is captured.
    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        _ = e;
    }

    /// Called when a queued operation begins, ends, or is cancelled.
    fn on_operation(&mut self, e: &OperationEvent<'_>) {
        _ = e;
    }

    /// Called when a layer's overlay set changes.
    fn on_layer(&mut self, e: &LayerEvent<'_>) {
        _ = e;
    }

    /// Called when the queue starts draining.
    fn on_queue(&mut self, e: &QueueEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SnapshotEvent`].
    #[inline]
    pub fn snapshot(&mut self, e: &SnapshotEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_snapshot(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OperationEvent`].
    #[inline]
    pub fn operation(&mut self, e: &OperationEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_operation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayerEvent`].
    #[inline]
    pub fn layer(&mut self, e: &LayerEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layer(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`QueueEvent`].
    #[inline]
    pub fn queue(&mut self, e: &QueueEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_queue(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InspectorConfig;
    use crate::snapshot::tests::fixture;

    fn sample_operation() -> OperationEvent<'static> {
        OperationEvent {
            sequence: 3,
            name: "install buttons",
            phase: OperationPhase::Begin,
            timestamp: HostTime(1_000),
        }
    }

    #[test]
    fn snapshot_event_from_snapshot() {
        let f = fixture();
        let snapshot = Snapshot::capture(&f.store, f.root, &InspectorConfig::new(), HostTime(9));
        let evt = SnapshotEvent::from(&snapshot);
        assert_eq!(evt.snapshot, snapshot.id());
        assert_eq!(evt.root, f.root);
        assert_eq!(evt.element_count, 5);
        assert_eq!(evt.inspectable_count, 4);
        assert!(evt.connected);
        assert_eq!(evt.captured_at, HostTime(9));
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_operation(&sample_operation());
        sink.on_queue(&QueueEvent {
            pending: 0,
            suspended: false,
            timestamp: HostTime(0),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.operation(&sample_operation());
        tracer.layer(&LayerEvent {
            layer: "buttons",
            change: LayerChange::Installed,
            handles: 2,
            timestamp: HostTime(0),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            sequences: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_operation(&mut self, e: &OperationEvent<'_>) {
                self.sequences.push(e.sequence);
            }
        }

        let mut sink = RecordingSink {
            sequences: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.operation(&sample_operation());
        drop(tracer);
        assert_eq!(sink.sequences, &[3]);
    }
}
