// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, Chrome trace export, and snapshot dumps for
//! overlook diagnostics.
//!
//! This crate provides [`TraceSink`](overlook_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//! - [`dump::snapshot_json`]: a JSON outline of a captured snapshot.

pub mod chrome;
pub mod dump;
pub mod pretty;
pub mod recorder;
