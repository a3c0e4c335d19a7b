// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The media surface controller.
//!
//! [`MediaSurface`] builds a poster or video surface inside a container,
//! keeps it cover-fitted to the viewport and tears everything down again.
//! Every listener it attaches goes through [`on`](MediaSurface::on) and is
//! recorded in its [`EventLedger`], so [`destroy`](MediaSurface::destroy)
//! can detach them all.
//!
//! # Lifecycle
//!
//! ```text
//!   Uninitialized ──init──► Initialized ──destroy──► Destroyed
//! ```
//!
//! `init` on an initialized or destroyed widget and `destroy` on an
//! uninitialized or destroyed widget are no-ops.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use crate::Error;
use crate::backend::{Binding, Handler, Host};
use crate::debounce::{DEFAULT_QUIET, Debouncer};
use crate::fit::fit_to_screen;
use crate::ledger::{EventLedger, Registration, TargetId};
use crate::source::{DisplayMode, POSTER_CLASS, VIDEO_CLASS, video_media_type};
use crate::trace::{
    FitCause, FitEvent, LifecycleEvent, ListenerChange, ListenerEvent, PlayCause, PlaybackEvent,
    ResizeEvent, SurfaceEvent, TraceSink, Tracer,
};

/// Event fired by an image once it has loaded.
pub const LOAD: &str = "load";
/// Event fired by a video once its dimensions are known.
pub const LOADED_METADATA: &str = "loadedmetadata";
/// Event fired by a video when playback reaches the end.
pub const ENDED: &str = "ended";
/// Event fired by the window when the viewport changes size.
pub const RESIZE: &str = "resize";

/// Options accepted by [`MediaSurface::init`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Restart video playback when it ends. Ignored for posters.
    pub looping: bool,
    /// Quiet window for collapsing viewport resize bursts.
    pub resize_quiet: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            looping: true,
            resize_quiet: DEFAULT_QUIET,
        }
    }
}

impl Options {
    /// Sets whether video playback restarts when it ends.
    #[must_use]
    pub const fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Sets the resize quiet window.
    #[must_use]
    pub const fn with_resize_quiet(mut self, quiet: Duration) -> Self {
        self.resize_quiet = quiet;
        self
    }
}

/// Lifecycle state of a [`MediaSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Constructed; `init` has not run.
    Uninitialized,
    /// A surface is mounted in the container.
    Initialized,
    /// Torn down. Terminal.
    Destroyed,
}

/// Controller for one full-screen poster or video surface.
pub struct MediaSurface<H: Host> {
    container: Option<H::Target>,
    surface: Option<H::Target>,
    viewport: Option<H::Target>,
    mode: Option<DisplayMode>,
    lifecycle: Lifecycle,
    options: Options,
    ledger: EventLedger<H::Target, Handler, H::Listener>,
    resize: Debouncer<H::Timer>,
    sink: Option<Box<dyn TraceSink>>,
}

impl<H: Host> fmt::Debug for MediaSurface<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaSurface")
            .field("lifecycle", &self.lifecycle)
            .field("mode", &self.mode)
            .field("options", &self.options)
            .field("ledger", &self.ledger)
            .field("resize", &self.resize)
            .finish_non_exhaustive()
    }
}

impl<H: Host> MediaSurface<H> {
    /// Creates an uninitialized controller that will mount its surface in
    /// `container`.
    #[must_use]
    pub fn new(container: H::Target) -> Self {
        Self {
            container: Some(container),
            surface: None,
            viewport: None,
            mode: None,
            lifecycle: Lifecycle::Uninitialized,
            options: Options::default(),
            ledger: EventLedger::new(),
            resize: Debouncer::new(DEFAULT_QUIET),
            sink: None,
        }
    }

    /// Installs (or removes) the trace sink.
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.sink = sink;
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns `true` once `init` has mounted a surface and until `destroy`.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    /// Returns the display mode chosen by `init`.
    #[must_use]
    pub fn display_mode(&self) -> Option<DisplayMode> {
        self.mode
    }

    /// Returns the container, until `destroy` clears it.
    #[must_use]
    pub fn container(&self) -> Option<&H::Target> {
        self.container.as_ref()
    }

    /// Returns the mounted surface element.
    #[must_use]
    pub fn surface(&self) -> Option<&H::Target> {
        self.surface.as_ref()
    }

    /// Returns the options passed to `init`.
    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns the listener ledger.
    #[must_use]
    pub fn ledger(&self) -> &EventLedger<H::Target, Handler, H::Listener> {
        &self.ledger
    }

    fn tracer(&mut self) -> Tracer<'_> {
        match self.sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        }
    }

    /// Builds the surface for `sources` and mounts it in the container.
    ///
    /// The first source decides the display mode (see
    /// [`DisplayMode::classify`]). Posters that are already loaded are
    /// fitted immediately, since their `load` event may never fire. A
    /// debounced viewport `resize` listener is attached for the lifetime of
    /// the widget.
    ///
    /// Does nothing unless the widget is [`Lifecycle::Uninitialized`]. If a
    /// host call fails, every listener attached so far is detached and the
    /// widget stays uninitialized.
    pub fn init<S: AsRef<str>>(
        &mut self,
        host: &mut H,
        sources: &[S],
        options: Options,
    ) -> Result<(), Error<H::Error>> {
        if self.lifecycle != Lifecycle::Uninitialized {
            return Ok(());
        }
        let Some(first) = sources.first() else {
            return Err(Error::NoSources);
        };
        let Some(container) = self.container.clone() else {
            return Ok(());
        };

        let mode = DisplayMode::classify(first.as_ref());
        self.options = options;
        self.resize = Debouncer::new(options.resize_quiet);

        if let Err(err) = self.mount(host, &container, mode, sources) {
            self.unwind(host);
            return Err(Error::Host(err));
        }

        let at = host.now();
        self.tracer().surface(&SurfaceEvent {
            mode,
            sources: sources.len(),
            at,
        });

        if mode == DisplayMode::Poster {
            self.fit_if_complete(host, FitCause::Cached);
        }

        self.lifecycle = Lifecycle::Initialized;
        self.tracer().lifecycle(&LifecycleEvent {
            state: Lifecycle::Initialized,
            at,
        });
        Ok(())
    }

    fn mount<S: AsRef<str>>(
        &mut self,
        host: &mut H,
        container: &H::Target,
        mode: DisplayMode,
        sources: &[S],
    ) -> Result<(), H::Error> {
        let surface = match mode {
            DisplayMode::Poster => self.prepare_poster(host, sources[0].as_ref())?,
            DisplayMode::Video => self.prepare_video(host, sources)?,
        };
        self.mode = Some(mode);

        let viewport = host.viewport();
        self.viewport = Some(viewport.clone());
        self.on(host, &viewport, RESIZE, Binding::persistent(Handler::ViewportResize))?;

        host.append_child(container, &surface)
    }

    /// Detaches whatever a failed `mount` attached.
    fn unwind(&mut self, host: &mut H) {
        if let Some(viewport) = self.viewport.take() {
            self.release(host, &viewport);
        }
        if let Some(surface) = self.surface.take() {
            self.release(host, &surface);
        }
        self.mode = None;
    }

    fn prepare_poster(&mut self, host: &mut H, src: &str) -> Result<H::Target, H::Error> {
        let el = host.create_image(POSTER_CLASS, src)?;
        self.surface = Some(el.clone());
        self.on(host, &el, LOAD, Binding::once(Handler::PosterLoad))?;
        Ok(el)
    }

    fn prepare_video<S: AsRef<str>>(
        &mut self,
        host: &mut H,
        sources: &[S],
    ) -> Result<H::Target, H::Error> {
        let el = host.create_video(VIDEO_CLASS)?;
        self.surface = Some(el.clone());
        self.on(host, &el, LOADED_METADATA, Binding::once(Handler::VideoMetadata))?;

        // Each path is trusted to carry the right extension for its type.
        for src in sources {
            let src = src.as_ref();
            host.append_source(&el, src, &video_media_type(src))?;
        }

        if self.options.looping {
            self.on(host, &el, ENDED, Binding::persistent(Handler::VideoEnded))?;
        }
        Ok(el)
    }

    /// Attaches a listener for `event` on `target` and records it.
    ///
    /// Nothing is recorded if the host fails to attach the listener.
    pub fn on(
        &mut self,
        host: &mut H,
        target: &H::Target,
        event: &str,
        binding: Binding,
    ) -> Result<TargetId, H::Error> {
        let listener = host.listen(target, event, binding)?;
        let id = self.ledger.register(target, event, binding.handler, listener);
        self.tracer().listener(&ListenerEvent {
            target: id,
            event,
            handler: binding.handler,
            change: ListenerChange::Attached,
        });
        Ok(id)
    }

    /// Detaches and forgets listeners on `target`.
    ///
    /// With a `handler`, only the most recent matching registration goes;
    /// otherwise every registration for `event` (or for all events if `event`
    /// is `None`). Returns how many listeners were detached.
    pub fn off(
        &mut self,
        host: &mut H,
        target: &H::Target,
        event: Option<&str>,
        handler: Option<Handler>,
    ) -> usize {
        let Some(id) = self.ledger.target_id(target) else {
            return 0;
        };
        let removed = self.ledger.deregister(target, event, handler.as_ref());
        self.detach(host, target, id, removed)
    }

    /// Detaches every listener on `target` and drops it from the ledger.
    fn release(&mut self, host: &mut H, target: &H::Target) {
        let Some(id) = self.ledger.target_id(target) else {
            return;
        };
        let removed = self.ledger.forget(target);
        self.detach(host, target, id, removed);
    }

    fn detach(
        &mut self,
        host: &mut H,
        target: &H::Target,
        id: TargetId,
        removed: Vec<Registration<Handler, H::Listener>>,
    ) -> usize {
        let count = removed.len();
        for Registration {
            event,
            handler,
            listener,
        } in removed
        {
            self.tracer().listener(&ListenerEvent {
                target: id,
                event: &event,
                handler,
                change: ListenerChange::Detached,
            });
            host.unlisten(target, &event, listener);
        }
        count
    }

    /// Runs the routine a native listener is bound to.
    ///
    /// Hosts call this from their listener callbacks. One-shot bindings
    /// remove their registration before the routine runs, so a routine that
    /// raises the same event again does not re-enter itself.
    pub fn dispatch(
        &mut self,
        host: &mut H,
        target: &H::Target,
        event: &str,
        binding: Binding,
    ) -> Result<(), Error<H::Error>> {
        if self.lifecycle == Lifecycle::Destroyed {
            return Ok(());
        }
        if binding.once {
            self.off(host, target, Some(event), Some(binding.handler));
        }

        match binding.handler {
            Handler::PosterLoad => self.fit_if_complete(host, FitCause::PosterLoad),
            Handler::VideoMetadata => {
                self.refit(host, FitCause::Metadata);
                self.play(host, PlayCause::Metadata);
            }
            Handler::VideoEnded => self.play(host, PlayCause::Loop),
            Handler::ViewportResize => self.schedule_resize(host)?,
        }
        Ok(())
    }

    /// Runs the debounced resize once its quiet window has passed.
    ///
    /// Hosts call this from their timer callbacks. Stale or cancelled timers
    /// are ignored.
    pub fn on_timer(&mut self, host: &mut H) {
        let Some(settled) = self.resize.settle() else {
            return;
        };
        host.cancel(settled.timer);

        let at = host.now();
        self.tracer().resize(&ResizeEvent {
            triggers: settled.triggers,
            first_trigger: settled.first_trigger,
            at,
        });
        self.refit(host, FitCause::Resize);
    }

    fn schedule_resize(&mut self, host: &mut H) -> Result<(), H::Error> {
        let timer = host.schedule(self.resize.quiet())?;
        if let Some(previous) = self.resize.trigger(host.now(), timer) {
            host.cancel(previous);
        }
        Ok(())
    }

    fn fit_if_complete(&mut self, host: &mut H, cause: FitCause) {
        let Some(surface) = &self.surface else {
            return;
        };
        if host.is_complete(surface) {
            self.refit(host, cause);
        }
    }

    /// Recomputes the cover fit from the current intrinsic and viewport
    /// sizes. Skipped while the intrinsic size is unknown.
    fn refit(&mut self, host: &mut H, cause: FitCause) {
        let (Some(surface), Some(mode)) = (self.surface.clone(), self.mode) else {
            return;
        };
        let intrinsic = host.intrinsic_size(&surface, mode);
        let viewport = host.viewport_size();
        let Some(fit) = fit_to_screen(intrinsic, viewport) else {
            return;
        };
        host.apply_fit(&surface, &fit);

        let at = host.now();
        self.tracer().fit(&FitEvent {
            cause,
            intrinsic,
            viewport,
            fit,
            at,
        });
    }

    fn play(&mut self, host: &mut H, cause: PlayCause) {
        let Some(surface) = &self.surface else {
            return;
        };
        host.play(surface);
        let at = host.now();
        self.tracer().playback(&PlaybackEvent { cause, at });
    }

    /// Removes every child of the container, detaches every listener on the
    /// viewport and the surface, cancels a pending resize, and drops every
    /// reference to the container, the viewport and the surface (the ledger
    /// included).
    pub fn destroy(&mut self, host: &mut H) {
        if self.lifecycle != Lifecycle::Initialized {
            return;
        }

        if let Some(container) = self.container.take() {
            host.clear_children(&container);
        }
        if let Some(viewport) = self.viewport.take() {
            self.release(host, &viewport);
        }
        if let Some(surface) = self.surface.take() {
            self.release(host, &surface);
        }
        if let Some(timer) = self.resize.cancel() {
            host.cancel(timer);
        }

        self.lifecycle = Lifecycle::Destroyed;
        let at = host.now();
        self.tracer().lifecycle(&LifecycleEvent {
            state: Lifecycle::Destroyed,
            at,
        });
    }
}
