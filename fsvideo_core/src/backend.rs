// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The widget splits platform work into a *host*. A host provides:
//!
//! - **Elements**: Creates the poster or video surface and its `<source>`
//!   children, appends them to the container, and clears the container on
//!   teardown.
//!
//! - **Media state**: Reports whether an image has finished loading, the
//!   intrinsic size of a surface, and the viewport size; starts playback.
//!
//! - **Style**: Writes a [`CoverFit`] into the surface's inline style.
//!
//! - **Listeners**: Attaches a native listener that, when the event fires,
//!   calls [`MediaSurface::dispatch`] with the same target, event name and
//!   [`Binding`]. Detaches listeners it previously attached.
//!
//! - **Timers**: Schedules a one-off timer that calls
//!   [`MediaSurface::on_timer`], and cancels it.
//!
//! # Crate boundaries
//!
//! `fsvideo_core` owns the controller, the ledger and the geometry. Backend
//! crates depend on `fsvideo_core`, implement [`Host`], and own the shared
//! cell that lets native callbacks reach the controller.
//!
//! [`MediaSurface::dispatch`]: crate::surface::MediaSurface::dispatch
//! [`MediaSurface::on_timer`]: crate::surface::MediaSurface::on_timer

use core::time::Duration;

use kurbo::Size;

use crate::fit::CoverFit;
use crate::source::DisplayMode;
use crate::time::HostTime;

/// The controller routine a native listener routes to.
///
/// This is the handler identity recorded in the
/// [`EventLedger`](crate::ledger::EventLedger).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Poster `load`: fit if the image is complete.
    PosterLoad,
    /// Video `loadedmetadata`: fit and start playback.
    VideoMetadata,
    /// Video `ended`: restart playback.
    VideoEnded,
    /// Viewport `resize`: debounce, then refit.
    ViewportResize,
}

impl Handler {
    /// Returns a short name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PosterLoad => "poster-load",
            Self::VideoMetadata => "video-metadata",
            Self::VideoEnded => "video-ended",
            Self::ViewportResize => "viewport-resize",
        }
    }
}

/// What a native listener carries back to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Routine to invoke.
    pub handler: Handler,
    /// Remove the registration before its first invocation runs.
    pub once: bool,
}

impl Binding {
    /// A listener that stays attached until removed.
    #[must_use]
    pub const fn persistent(handler: Handler) -> Self {
        Self {
            handler,
            once: false,
        }
    }

    /// A listener that removes itself on first invocation.
    #[must_use]
    pub const fn once(handler: Handler) -> Self {
        Self {
            handler,
            once: true,
        }
    }
}

/// Platform operations needed by [`MediaSurface`](crate::surface::MediaSurface).
///
/// The DOM-backed host and the test double both implement this trait.
pub trait Host {
    /// Handle to an event target: the viewport, the container, or a surface.
    type Target: Clone + PartialEq;
    /// Native listener handle returned by [`listen`](Self::listen).
    type Listener;
    /// Native timer handle returned by [`schedule`](Self::schedule).
    type Timer;
    /// Error raised by failing platform calls.
    type Error: core::fmt::Debug;

    /// Returns the current host time.
    fn now(&self) -> HostTime;

    /// Returns the viewport event target (the window).
    fn viewport(&self) -> Self::Target;

    /// Returns the viewport's inner size in CSS pixels.
    fn viewport_size(&self) -> Size;

    /// Creates an image surface with the given class and source.
    fn create_image(&mut self, class: &str, src: &str) -> Result<Self::Target, Self::Error>;

    /// Creates an empty video surface with the given class.
    fn create_video(&mut self, class: &str) -> Result<Self::Target, Self::Error>;

    /// Appends a `<source>` child to a video surface.
    fn append_source(
        &mut self,
        video: &Self::Target,
        src: &str,
        media_type: &str,
    ) -> Result<(), Self::Error>;

    /// Appends `child` to `container`.
    fn append_child(
        &mut self,
        container: &Self::Target,
        child: &Self::Target,
    ) -> Result<(), Self::Error>;

    /// Removes every child of `container`.
    fn clear_children(&mut self, container: &Self::Target);

    /// Returns `true` if an image surface has finished loading.
    fn is_complete(&self, image: &Self::Target) -> bool;

    /// Returns the intrinsic size of a surface: the natural size for
    /// posters, the decoded video size for videos.
    fn intrinsic_size(&self, surface: &Self::Target, mode: DisplayMode) -> Size;

    /// Starts (or restarts) playback of a video surface.
    fn play(&mut self, video: &Self::Target);

    /// Writes `fit` into the surface's inline style.
    fn apply_fit(&mut self, surface: &Self::Target, fit: &CoverFit);

    /// Attaches a native listener for `event` on `target` that routes to
    /// [`MediaSurface::dispatch`](crate::surface::MediaSurface::dispatch)
    /// with `binding`.
    fn listen(
        &mut self,
        target: &Self::Target,
        event: &str,
        binding: Binding,
    ) -> Result<Self::Listener, Self::Error>;

    /// Detaches a listener previously returned by [`listen`](Self::listen).
    fn unlisten(&mut self, target: &Self::Target, event: &str, listener: Self::Listener);

    /// Schedules a one-off timer that calls
    /// [`MediaSurface::on_timer`](crate::surface::MediaSurface::on_timer)
    /// after `delay`.
    fn schedule(&mut self, delay: Duration) -> Result<Self::Timer, Self::Error>;

    /// Cancels a timer. Cancelling a timer that already fired is harmless.
    fn cancel(&mut self, timer: Self::Timer);
}
