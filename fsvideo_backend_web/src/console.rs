// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace output.
//!
//! [`ConsoleSink`] writes one `console.debug` line per trace event.
//! Timestamps are host ticks (microseconds) printed as milliseconds.

use alloc::format;
use alloc::string::String;

use fsvideo_core::trace::{
    FitEvent, LifecycleEvent, ListenerChange, ListenerEvent, PlaybackEvent, ResizeEvent,
    SurfaceEvent, TraceSink,
};
use fsvideo_core::time::{HostTime, Timebase};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that logs to the browser console.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    /// Log listener attach/detach events too. Off by default; they are
    /// chatty.
    pub listeners: bool,
}

impl ConsoleSink {
    /// Creates a sink that skips listener events.
    #[must_use]
    pub const fn new() -> Self {
        Self { listeners: false }
    }

    /// Creates a sink that also logs listener events.
    #[must_use]
    pub const fn verbose() -> Self {
        Self { listeners: true }
    }
}

fn ms(t: HostTime) -> f64 {
    t.to_nanos(Timebase::MICROS) as f64 / 1e6
}

fn log(line: String) {
    web_sys::console::debug_1(&JsValue::from_str(&line));
}

impl TraceSink for ConsoleSink {
    fn on_surface(&mut self, e: &SurfaceEvent) {
        log(format!(
            "[fsvideo] {:.1}ms surface mode={} sources={}",
            ms(e.at),
            e.mode,
            e.sources
        ));
    }

    fn on_fit(&mut self, e: &FitEvent) {
        log(format!(
            "[fsvideo] {:.1}ms fit cause={:?} intrinsic={}x{} viewport={}x{} \
             scale={:.3} size={}x{} margin={},{}",
            ms(e.at),
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
        ));
    }

    fn on_listener(&mut self, e: &ListenerEvent<'_>) {
        if !self.listeners {
            return;
        }
        let verb = match e.change {
            ListenerChange::Attached => "attach",
            ListenerChange::Detached => "detach",
        };
        log(format!(
            "[fsvideo] {verb} target={} event={} handler={}",
            e.target.get(),
            e.event,
            e.handler.name()
        ));
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        log(format!(
            "[fsvideo] {:.1}ms resize settled triggers={} burst={:.1}ms",
            ms(e.at),
            e.triggers,
            ms(HostTime(e.at.saturating_ticks_since(e.first_trigger)))
        ));
    }

    fn on_playback(&mut self, e: &PlaybackEvent) {
        log(format!("[fsvideo] {:.1}ms play cause={:?}", ms(e.at), e.cause));
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        log(format!("[fsvideo] {:.1}ms {:?}", ms(e.at), e.state));
    }
}
