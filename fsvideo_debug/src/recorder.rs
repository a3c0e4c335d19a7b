// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records. [`decode`] reads them back as an
//! iterator of [`RecordedEvent`].
//!
//! Listener events carry a borrowed event name; the recording stores it
//! length-prefixed and [`RecordedEvent::Listener`] owns it.

use fsvideo_core::backend::Handler;
use fsvideo_core::fit::CoverFit;
use fsvideo_core::source::DisplayMode;
use fsvideo_core::surface::Lifecycle;
use fsvideo_core::time::HostTime;
use fsvideo_core::trace::{
    FitCause, FitEvent, LifecycleEvent, ListenerChange, ListenerEvent, PlayCause, PlaybackEvent,
    ResizeEvent, SurfaceEvent, TraceSink,
};
use kurbo::Size;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SURFACE: u8 = 1;
const TAG_FIT: u8 = 2;
const TAG_LISTENER: u8 = 3;
const TAG_RESIZE: u8 = 4;
const TAG_PLAYBACK: u8 = 5;
const TAG_LIFECYCLE: u8 = 6;

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

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_size(&mut self, s: Size) {
        self.write_f64(s.width);
        self.write_f64(s.height);
    }

    fn write_str(&mut self, s: &str) {
        let bytes = &s.as_bytes()[..s.len().min(usize::from(u8::MAX))];
        #[expect(
            clippy::cast_possible_truncation,
            reason = "length clamped to u8::MAX above"
        )]
        self.write_u8(bytes.len() as u8);
        self.buf.extend_from_slice(bytes);
    }

    fn write_mode(&mut self, mode: DisplayMode) {
        self.write_u8(match mode {
            DisplayMode::Poster => 0,
            DisplayMode::Video => 1,
        });
    }

    fn write_handler(&mut self, handler: Handler) {
        self.write_u8(match handler {
            Handler::PosterLoad => 0,
            Handler::VideoMetadata => 1,
            Handler::VideoEnded => 2,
            Handler::ViewportResize => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_surface(&mut self, e: &SurfaceEvent) {
        self.write_u8(TAG_SURFACE);
        self.write_mode(e.mode);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "source count capped at u32::MAX for recording"
        )]
        self.write_u32(e.sources.min(u32::MAX as usize) as u32);
        self.write_u64(e.at.ticks());
    }

    fn on_fit(&mut self, e: &FitEvent) {
        self.write_u8(TAG_FIT);
        self.write_u8(match e.cause {
            FitCause::PosterLoad => 0,
            FitCause::Cached => 1,
            FitCause::Metadata => 2,
            FitCause::Resize => 3,
        });
        self.write_size(e.intrinsic);
        self.write_size(e.viewport);
        self.write_f64(e.fit.scale);
        self.write_size(e.fit.size);
        self.write_f64(e.fit.margin_top);
        self.write_f64(e.fit.margin_left);
        self.write_u64(e.at.ticks());
    }

    fn on_listener(&mut self, e: &ListenerEvent<'_>) {
        self.write_u8(TAG_LISTENER);
        self.write_u32(e.target.get());
        self.write_handler(e.handler);
        self.write_u8(u8::from(e.change == ListenerChange::Attached));
        self.write_str(e.event);
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.write_u8(TAG_RESIZE);
        self.write_u32(e.triggers);
        self.write_u64(e.first_trigger.ticks());
        self.write_u64(e.at.ticks());
    }

    fn on_playback(&mut self, e: &PlaybackEvent) {
        self.write_u8(TAG_PLAYBACK);
        self.write_u8(match e.cause {
            PlayCause::Metadata => 0,
            PlayCause::Loop => 1,
        });
        self.write_u64(e.at.ticks());
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.write_u8(TAG_LIFECYCLE);
        self.write_u8(match e.state {
            Lifecycle::Uninitialized => 0,
            Lifecycle::Initialized => 1,
            Lifecycle::Destroyed => 2,
        });
        self.write_u64(e.at.ticks());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`SurfaceEvent`].
    Surface(SurfaceEvent),
    /// A [`FitEvent`].
    Fit(FitEvent),
    /// A [`ListenerEvent`] with an owned event name.
    Listener {
        /// Raw ledger id of the target.
        target: u32,
        /// Event name.
        event: String,
        /// Routine the listener routes to.
        handler: Handler,
        /// Attach or detach.
        change: ListenerChange,
    },
    /// A [`ResizeEvent`].
    Resize(ResizeEvent),
    /// A [`PlaybackEvent`].
    Playback(PlaybackEvent),
    /// A [`LifecycleEvent`].
    Lifecycle(LifecycleEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
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
    fn take(&mut self, n: usize) -> Option<&[u8]> {
        let bytes = self.data.get(self.pos..self.pos.checked_add(n)?)?;
        self.pos += n;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.take(8)?.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        Some(f64::from_le_bytes(self.take(8)?.try_into().ok()?))
    }

    fn read_size(&mut self) -> Option<Size> {
        Some(Size::new(self.read_f64()?, self.read_f64()?))
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_str(&mut self) -> Option<String> {
        let len = usize::from(self.read_u8()?);
        String::from_utf8(self.take(len)?.to_vec()).ok()
    }

    fn read_mode(&mut self) -> Option<DisplayMode> {
        Some(match self.read_u8()? {
            0 => DisplayMode::Poster,
            _ => DisplayMode::Video,
        })
    }

    fn read_handler(&mut self) -> Option<Handler> {
        Some(match self.read_u8()? {
            0 => Handler::PosterLoad,
            1 => Handler::VideoMetadata,
            2 => Handler::VideoEnded,
            _ => Handler::ViewportResize,
        })
    }

    fn decode_surface(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Surface(SurfaceEvent {
            mode: self.read_mode()?,
            sources: usize::try_from(self.read_u32()?).ok()?,
            at: self.read_time()?,
        }))
    }

    fn decode_fit(&mut self) -> Option<RecordedEvent> {
        let cause = match self.read_u8()? {
            0 => FitCause::PosterLoad,
            1 => FitCause::Cached,
            2 => FitCause::Metadata,
            _ => FitCause::Resize,
        };
        Some(RecordedEvent::Fit(FitEvent {
            cause,
            intrinsic: self.read_size()?,
            viewport: self.read_size()?,
            fit: CoverFit {
                scale: self.read_f64()?,
                size: self.read_size()?,
                margin_top: self.read_f64()?,
                margin_left: self.read_f64()?,
            },
            at: self.read_time()?,
        }))
    }

    fn decode_listener(&mut self) -> Option<RecordedEvent> {
        let target = self.read_u32()?;
        let handler = self.read_handler()?;
        let change = if self.read_u8()? != 0 {
            ListenerChange::Attached
        } else {
            ListenerChange::Detached
        };
        let event = self.read_str()?;
        Some(RecordedEvent::Listener {
            target,
            event,
            handler,
            change,
        })
    }

    fn decode_resize(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Resize(ResizeEvent {
            triggers: self.read_u32()?,
            first_trigger: self.read_time()?,
            at: self.read_time()?,
        }))
    }

    fn decode_playback(&mut self) -> Option<RecordedEvent> {
        let cause = match self.read_u8()? {
            0 => PlayCause::Metadata,
            _ => PlayCause::Loop,
        };
        Some(RecordedEvent::Playback(PlaybackEvent {
            cause,
            at: self.read_time()?,
        }))
    }

    fn decode_lifecycle(&mut self) -> Option<RecordedEvent> {
        let state = match self.read_u8()? {
            0 => Lifecycle::Uninitialized,
            1 => Lifecycle::Initialized,
            _ => Lifecycle::Destroyed,
        };
        Some(RecordedEvent::Lifecycle(LifecycleEvent {
            state,
            at: self.read_time()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SURFACE => self.decode_surface(),
            TAG_FIT => self.decode_fit(),
            TAG_LISTENER => self.decode_listener(),
            TAG_RESIZE => self.decode_resize(),
            TAG_PLAYBACK => self.decode_playback(),
            TAG_LIFECYCLE => self.decode_lifecycle(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
