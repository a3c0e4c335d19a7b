// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the widget.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! controller emits. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use kurbo::Size;

use crate::backend::Handler;
use crate::fit::CoverFit;
use crate::ledger::TargetId;
use crate::source::DisplayMode;
use crate::surface::Lifecycle;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a fit was computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FitCause {
    /// The poster's `load` event fired.
    PosterLoad,
    /// The poster was already complete when the surface was built.
    Cached,
    /// The video's metadata became available.
    Metadata,
    /// A debounced viewport resize settled.
    Resize,
}

/// Whether a listener was attached or detached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerChange {
    /// The host attached a native listener.
    Attached,
    /// The host detached a native listener.
    Detached,
}

/// Why playback was started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayCause {
    /// First start after metadata loaded.
    Metadata,
    /// Restart after `ended`.
    Loop,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when `init` builds a surface.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceEvent {
    /// Which kind of surface was built.
    pub mode: DisplayMode,
    /// Number of source paths given.
    pub sources: usize,
    /// Host time of construction.
    pub at: HostTime,
}

/// Emitted after a fit is written to the surface.
#[derive(Clone, Copy, Debug)]
pub struct FitEvent {
    /// What triggered the fit.
    pub cause: FitCause,
    /// Intrinsic surface size used.
    pub intrinsic: Size,
    /// Viewport size used.
    pub viewport: Size,
    /// The computed layout.
    pub fit: CoverFit,
    /// Host time of the fit.
    pub at: HostTime,
}

/// Emitted when a listener is attached or detached.
#[derive(Clone, Copy, Debug)]
pub struct ListenerEvent<'a> {
    /// Ledger id of the target.
    pub target: TargetId,
    /// Event name.
    pub event: &'a str,
    /// Routine the listener routes to.
    pub handler: Handler,
    /// Attach or detach.
    pub change: ListenerChange,
}

/// Emitted when a debounced resize burst settles.
#[derive(Clone, Copy, Debug)]
pub struct ResizeEvent {
    /// Number of `resize` events collapsed.
    pub triggers: u32,
    /// Host time of the first `resize` in the burst.
    pub first_trigger: HostTime,
    /// Host time the burst settled.
    pub at: HostTime,
}

/// Emitted when playback is (re)started.
#[derive(Clone, Copy, Debug)]
pub struct PlaybackEvent {
    /// Why playback started.
    pub cause: PlayCause,
    /// Host time of the call.
    pub at: HostTime,
}

/// Emitted on lifecycle transitions.
#[derive(Clone, Copy, Debug)]
pub struct LifecycleEvent {
    /// State entered.
    pub state: Lifecycle,
    /// Host time of the transition.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a surface is built.
    fn on_surface(&mut self, e: &SurfaceEvent) {
        _ = e;
    }

    /// Called after a fit is applied.
    fn on_fit(&mut self, e: &FitEvent) {
        _ = e;
    }

    /// Called when a listener is attached or detached.
    fn on_listener(&mut self, e: &ListenerEvent<'_>) {
        _ = e;
    }

    /// Called when a resize burst settles.
    fn on_resize(&mut self, e: &ResizeEvent) {
        _ = e;
    }

    /// Called when playback starts.
    fn on_playback(&mut self, e: &PlaybackEvent) {
        _ = e;
    }

    /// Called on lifecycle transitions.
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
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

    /// Emits a [`SurfaceEvent`].
    #[inline]
    pub fn surface(&mut self, e: &SurfaceEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_surface(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FitEvent`].
    #[inline]
    pub fn fit(&mut self, e: &FitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fit(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ListenerEvent`].
    #[inline]
    pub fn listener(&mut self, e: &ListenerEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_listener(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResizeEvent`].
    #[inline]
    pub fn resize(&mut self, e: &ResizeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resize(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PlaybackEvent`].
    #[inline]
    pub fn playback(&mut self, e: &PlaybackEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_playback(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LifecycleEvent`].
    #[inline]
    pub fn lifecycle(&mut self, e: &LifecycleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lifecycle(e);
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
