// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records. Operation and layer names are stored
//! length-prefixed. [`decode`] reads them back as an iterator of
//! [`RecordedEvent`], with names owned.

use overlook_core::host::NodeId;
use overlook_core::snapshot::SnapshotId;
use overlook_core::time::HostTime;
use overlook_core::trace::{
    LayerChange, LayerEvent, OperationEvent, OperationPhase, QueueEvent, SnapshotEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SNAPSHOT: u8 = 1;
const TAG_OPERATION: u8 = 2;
const TAG_LAYER: u8 = 3;
const TAG_QUEUE: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_count(&mut self, v: usize) {
        self.write_u64(u64::try_from(v).unwrap_or(u64::MAX));
    }

    fn write_str(&mut self, s: &str) {
        // Names longer than u32::MAX bytes are cut at a char boundary.
        let mut end = s.len().min(u32::MAX as usize);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "length clamped to u32::MAX above"
        )]
        self.write_u32(end as u32);
        self.buf.extend_from_slice(&s.as_bytes()[..end]);
    }

    fn write_node(&mut self, node: NodeId) {
        self.write_u32(node.index());
        self.write_u32(node.generation());
    }

    fn write_operation_phase(&mut self, p: OperationPhase) {
        self.write_u8(match p {
            OperationPhase::Begin => 0,
            OperationPhase::End => 1,
            OperationPhase::Cancelled => 2,
        });
    }

    fn write_layer_change(&mut self, c: LayerChange) {
        self.write_u8(match c {
            LayerChange::Installed => 0,
            LayerChange::Placeholder => 1,
            LayerChange::Removed => 2,
            LayerChange::RolledBack => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        self.write_u8(TAG_SNAPSHOT);
        self.write_u64(e.snapshot.0);
        self.write_node(e.root);
        self.write_count(e.element_count);
        self.write_count(e.inspectable_count);
        self.write_u8(u8::from(e.connected));
        self.write_u64(e.captured_at.ticks());
    }

    fn on_operation(&mut self, e: &OperationEvent<'_>) {
        self.write_u8(TAG_OPERATION);
        self.write_u64(e.sequence);
        self.write_str(e.name);
        self.write_operation_phase(e.phase);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_layer(&mut self, e: &LayerEvent<'_>) {
        self.write_u8(TAG_LAYER);
        self.write_str(e.layer);
        self.write_layer_change(e.change);
        self.write_count(e.handles);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_queue(&mut self, e: &QueueEvent) {
        self.write_u8(TAG_QUEUE);
        self.write_count(e.pending);
        self.write_u8(u8::from(e.suspended));
        self.write_u64(e.timestamp.ticks());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`SnapshotEvent`].
    Snapshot(SnapshotEvent),
    /// An [`OperationEvent`] with its name owned.
    Operation {
        /// Queue sequence number.
        sequence: u64,
        /// Diagnostic name.
        name: String,
        /// Which transition.
        phase: OperationPhase,
        /// Host time of the transition.
        timestamp: HostTime,
    },
    /// A [`LayerEvent`] with its layer name owned.
    Layer {
        /// Layer name.
        layer: String,
        /// What changed.
        change: LayerChange,
        /// Overlay handles created or released.
        handles: usize,
        /// Host time of the change.
        timestamp: HostTime,
    },
    /// A [`QueueEvent`].
    Queue(QueueEvent),
}

impl RecordedEvent {
    /// Host time the event was recorded at.
    #[must_use]
    pub fn timestamp(&self) -> HostTime {
        match self {
            Self::Snapshot(e) => e.captured_at,
            Self::Operation { timestamp, .. } | Self::Layer { timestamp, .. } => *timestamp,
            Self::Queue(e) => e.timestamp,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(&mut self, n: usize) -> Option<&[u8]> {
        if self.remaining() < n {
            return None;
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.read_bytes(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.read_bytes(8)?.try_into().ok()?))
    }

    fn read_count(&mut self) -> Option<usize> {
        Some(usize::try_from(self.read_u64()?).unwrap_or(usize::MAX))
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_string(&mut self) -> Option<String> {
        let len = usize::try_from(self.read_u32()?).ok()?;
        let bytes = self.read_bytes(len)?;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    fn read_time(&mut self) -> Option<HostTime> {
        Some(HostTime(self.read_u64()?))
    }

    fn read_operation_phase(&mut self) -> Option<OperationPhase> {
        Some(match self.read_u8()? {
            0 => OperationPhase::Begin,
            1 => OperationPhase::End,
            _ => OperationPhase::Cancelled,
        })
    }

    fn read_layer_change(&mut self) -> Option<LayerChange> {
        Some(match self.read_u8()? {
            0 => LayerChange::Installed,
            1 => LayerChange::Placeholder,
            2 => LayerChange::Removed,
            _ => LayerChange::RolledBack,
        })
    }

    fn decode_snapshot(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Snapshot(SnapshotEvent {
            snapshot: SnapshotId(self.read_u64()?),
            root: NodeId::new(self.read_u32()?, self.read_u32()?),
            element_count: self.read_count()?,
            inspectable_count: self.read_count()?,
            connected: self.read_bool()?,
            captured_at: self.read_time()?,
        }))
    }

    fn decode_operation(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Operation {
            sequence: self.read_u64()?,
            name: self.read_string()?,
            phase: self.read_operation_phase()?,
            timestamp: self.read_time()?,
        })
    }

    fn decode_layer(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Layer {
            layer: self.read_string()?,
            change: self.read_layer_change()?,
            handles: self.read_count()?,
            timestamp: self.read_time()?,
        })
    }

    fn decode_queue(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Queue(QueueEvent {
            pending: self.read_count()?,
            suspended: self.read_bool()?,
            timestamp: self.read_time()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SNAPSHOT => self.decode_snapshot(),
            TAG_OPERATION => self.decode_operation(),
            TAG_LAYER => self.decode_layer(),
            TAG_QUEUE => self.decode_queue(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
