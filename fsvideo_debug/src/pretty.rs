// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use fsvideo_core::time::{HostTime, Timebase};
use fsvideo_core::trace::{
    FitEvent, LifecycleEvent, ListenerChange, ListenerEvent, PlaybackEvent, ResizeEvent,
    SurfaceEvent, TraceSink,
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

    /// Consumes the sink and returns the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ticks_to_ms(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1e6
    }

    fn host_ms(&self, t: HostTime) -> f64 {
        self.ticks_to_ms(t.ticks())
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_surface(&mut self, e: &SurfaceEvent) {
        let _ = writeln!(
            self.writer,
            "[surface] mode={} sources={} at {:.3}ms",
            e.mode,
            e.sources,
            self.host_ms(e.at),
        );
    }

    fn on_fit(&mut self, e: &FitEvent) {
        let _ = writeln!(
            self.writer,
            "[fit] cause={:?} intrinsic={}x{} viewport={}x{} scale={:.4} \
             size={}x{} margin={},{} at {:.3}ms",
            e.cause,
            e.intrinsic.width,
            e.intrinsic.height,
            e.viewport.width,
            e.viewport.height,
            e.fit.scale,
            e.fit.size.width,
            e.fit.size.height,
            e.fit.margin_top,
            e.fit.margin_left,
            self.host_ms(e.at),
        );
    }

    fn on_listener(&mut self, e: &ListenerEvent<'_>) {
        let change = match e.change {
            ListenerChange::Attached => "attach",
            ListenerChange::Detached => "detach",
        };
        let _ = writeln!(
            self.writer,
            "[listener:{change}] target={} event={} handler={}",
            e.target.get(),
            e.event,
            e.handler.name(),
        );
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        let _ = writeln!(
            self.writer,
            "[resize] triggers={} burst={:.3}ms at {:.3}ms",
            e.triggers,
            self.ticks_to_ms(e.at.saturating_ticks_since(e.first_trigger)),
            self.host_ms(e.at),
        );
    }

    fn on_playback(&mut self, e: &PlaybackEvent) {
        let _ = writeln!(
            self.writer,
            "[play] cause={:?} at {:.3}ms",
            e.cause,
            self.host_ms(e.at),
        );
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        let _ = writeln!(
            self.writer,
            "[lifecycle] {:?} at {:.3}ms",
            e.state,
            self.host_ms(e.at),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsvideo_core::backend::Handler;
    use fsvideo_core::fit::fit_to_screen;
    use fsvideo_core::ledger::EventLedger;
    use fsvideo_core::trace::FitCause;
    use kurbo::Size;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_fit() {
        let intrinsic = Size::new(16.0, 9.0);
        let viewport = Size::new(18.0, 36.0);
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS);
        sink.on_fit(&FitEvent {
            cause: FitCause::Metadata,
            intrinsic,
            viewport,
            fit: fit_to_screen(intrinsic, viewport).unwrap(),
            at: HostTime(2_500),
        });
        let output = output(sink);
        assert!(output.starts_with("[fit]"), "got: {output}");
        assert!(output.contains("cause=Metadata"), "got: {output}");
        assert!(output.contains("size=64x36"), "got: {output}");
        assert!(output.contains("margin=0,-23"), "got: {output}");
        assert!(output.contains("at 2.500ms"), "got: {output}");
    }

    #[test]
    fn pretty_print_listener() {
        let mut ledger = EventLedger::<u32, Handler, ()>::new();
        let target = ledger.register(&7, "ended", Handler::VideoEnded, ());
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_listener(&ListenerEvent {
            target,
            event: "ended",
            handler: Handler::VideoEnded,
            change: ListenerChange::Detached,
        });
        let output = output(sink);
        assert!(output.starts_with("[listener:detach]"), "got: {output}");
        assert!(output.contains("event=ended"), "got: {output}");
    }

    #[test]
    fn pretty_print_resize_burst() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS);
        sink.on_resize(&ResizeEvent {
            triggers: 4,
            first_trigger: HostTime(1_000),
            at: HostTime(151_000),
        });
        let output = output(sink);
        assert!(output.contains("triggers=4"), "got: {output}");
        assert!(output.contains("burst=150.000ms"), "got: {output}");
    }
}
