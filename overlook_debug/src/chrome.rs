// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//! Queue operations become duration spans; captures, layer changes, and
//! queue drains become instants.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use overlook_core::time::{HostTime, Timebase};
use overlook_core::trace::OperationPhase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
/// A cancelled operation closes its span like a finished one and carries
/// `"cancelled": true` in its arguments.
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Snapshot(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Snapshot",
                    "cat": "Capture",
                    "ts": to_us(e.captured_at, timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "snapshot": e.snapshot.0,
                        "root": format!("{:?}", e.root),
                        "elements": e.element_count,
                        "inspectable": e.inspectable_count,
                        "connected": e.connected,
                    }
                }));
            }
            RecordedEvent::Operation {
                sequence,
                name,
                phase,
                timestamp,
            } => {
                let ph = match phase {
                    OperationPhase::Begin => "B",
                    OperationPhase::End | OperationPhase::Cancelled => "E",
                };
                events.push(json!({
                    "ph": ph,
                    "name": name,
                    "cat": "Queue",
                    "ts": to_us(timestamp, timebase),
                    "pid": 0,
                    "tid": 1,
                    "args": {
                        "sequence": sequence,
                        "cancelled": phase == OperationPhase::Cancelled,
                    }
                }));
            }
            RecordedEvent::Layer {
                layer,
                change,
                handles,
                timestamp,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{change:?}"),
                    "cat": "Layer",
                    "ts": to_us(timestamp, timebase),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "layer": layer,
                        "handles": handles,
                    }
                }));
            }
            RecordedEvent::Queue(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Drain",
                    "cat": "Queue",
                    "ts": to_us(e.timestamp, timebase),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "pending": e.pending,
                        "suspended": e.suspended,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_us(t: HostTime, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
}
