// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and controller logic for a full-screen poster/video widget.
//!
//! `fsvideo_core` owns everything about the widget that does not touch a
//! real browser: which surface to build, how to size it, which listeners are
//! attached where, and how resize bursts are collapsed. It is `no_std`
//! compatible (with `alloc`). Platform work goes through the
//! [`Host`](backend::Host) trait, which backend crates implement.
//!
//! # Architecture
//!
//! ```text
//!   init(sources, options)
//!       │
//!       ▼
//!   DisplayMode::classify ──► Host::create_image / create_video
//!                                   │
//!                                   ▼
//!   MediaSurface::on ──► Host::listen ──► EventLedger::register
//!
//!   native event ──► MediaSurface::dispatch ──► fit_to_screen ──► Host::apply_fit
//!   resize       ──► Debouncer::trigger ──► Host::schedule ──► MediaSurface::on_timer
//!
//!   destroy ──► Host::clear_children + EventLedger::forget ──► Host::unlisten
//! ```
//!
//! **[`ledger`]**: Per-instance record of which listeners are attached to
//! which targets, with single and bulk removal.
//!
//! **[`surface`]**: The [`MediaSurface`](surface::MediaSurface) controller
//! and its lifecycle state machine.
//!
//! **[`fit`]**: Cover-fit geometry.
//!
//! **[`source`]**: File extension parsing and display mode selection.
//!
//! **[`debounce`]**: Trailing-edge debounce bookkeeping over host timers.
//!
//! **[`backend`]**: The [`Host`](backend::Host) contract.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod debounce;
mod error;
pub mod fit;
pub mod ledger;
pub mod source;
pub mod surface;
pub mod time;
pub mod trace;

#[cfg(test)]
mod mock;

pub use error::Error;
