// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot and layer overlay engine for live UI inspection.
//!
//! `overlook_core` captures point-in-time mirrors of a live UI node tree,
//! selects subsets of them with composable named predicates, and drives the
//! creation and removal of overlay objects in the live tree. It is `no_std`
//! compatible (with `alloc`) and never owns the UI it inspects: hosts expose
//! their node graph through the traits in [`host`].
//!
//! # Architecture
//!
//! ```text
//!   HostTree (live nodes)
//!       │
//!       ▼
//!   Snapshot::capture() ──► Snapshot ──► Layer::filter() ──► matched elements
//!                              │                                   │
//!                              │             ┌─────────────────────┘
//!                              │             ▼
//!                              │   OverlayManager::run_pending() ──► OverlayHost
//!                              ▼
//!                   TreeSource ──► CollapsibleTree ──► visible rows / RowDiff
//! ```
//!
//! **[`host`]**: The [`HostTree`](host::HostTree) and
//! [`OverlayHost`](host::OverlayHost) traits hosts implement, plus
//! [`NodeStore`](host::NodeStore), an in-memory host tree with generational
//! handles.
//!
//! **[`element`]** and **[`snapshot`]**: Immutable captures. Every query runs
//! over the captured arena, so a snapshot stays readable after the live nodes
//! are gone.
//!
//! **[`layer`]**: Named element predicates with union, difference, and zero,
//! and a built-in [`catalog`](layer::catalog).
//!
//! **[`overlay`]**: The overlay manager, its serialized cancelable work
//! queue, and the layer actions offered to command wiring.
//!
//! **[`rows`]**: Collapse-aware flattening and toggle diffs, shared by every
//! list presentation.
//!
//! **[`search`]**: Text search over a snapshot.
//!
//! **[`color`]**, **[`config`]**, **[`time`]**: Overlay tints, inspector
//! configuration, and host time.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! capture and overlay instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod color;
pub mod config;
pub mod element;
pub mod host;
pub mod layer;
pub mod overlay;
pub mod rows;
pub mod search;
pub mod snapshot;
pub mod time;
pub mod trace;
