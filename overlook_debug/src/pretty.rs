// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use overlook_core::time::{HostTime, Timebase};
use overlook_core::trace::{
    LayerChange, LayerEvent, OperationEvent, OperationPhase, QueueEvent, SnapshotEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

fn operation_phase_name(phase: OperationPhase) -> &'static str {
    match phase {
        OperationPhase::Begin => "begin",
        OperationPhase::End => "end",
        OperationPhase::Cancelled => "cancelled",
    }
}

fn layer_change_name(change: LayerChange) -> &'static str {
    match change {
        LayerChange::Installed => "installed",
        LayerChange::Placeholder => "placeholder",
        LayerChange::Removed => "removed",
        LayerChange::RolledBack => "rolled-back",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        let connected = if e.connected { "" } else { " DISCONNECTED" };
        let _ = writeln!(
            self.writer,
            "[snapshot] {:?} root={:?} elements={} inspectable={} at {:.1}µs{connected}",
            e.snapshot,
            e.root,
            e.element_count,
            e.inspectable_count,
            self.host_us(e.captured_at),
        );
    }

    fn on_operation(&mut self, e: &OperationEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[op:{}] #{} {} at {:.1}µs",
            operation_phase_name(e.phase),
            e.sequence,
            e.name,
            self.host_us(e.timestamp),
        );
    }

    fn on_layer(&mut self, e: &LayerEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[layer] {} {} handles={} at {:.1}µs",
            e.layer,
            layer_change_name(e.change),
            e.handles,
            self.host_us(e.timestamp),
        );
    }

    fn on_queue(&mut self, e: &QueueEvent) {
        let suspended = if e.suspended { " SUSPENDED" } else { "" };
        let _ = writeln!(
            self.writer,
            "[queue] pending={} at {:.1}µs{suspended}",
            e.pending,
            self.host_us(e.timestamp),
        );
    }
}
