// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each resize burst becomes a complete (`"X"`) slice spanning the first
//! trigger to the settle time. Everything else is an instant event.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use fsvideo_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
/// Listener events carry no timestamp and are placed at the time of the
/// preceding event.
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_ts = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Surface(e) => {
                last_ts = ticks_to_us(e.at.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": "Surface",
                    "cat": "Lifecycle",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "mode": e.mode.to_string(),
                        "sources": e.sources,
                    }
                }));
            }
            RecordedEvent::Fit(e) => {
                last_ts = ticks_to_us(e.at.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": "Fit",
                    "cat": "Layout",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "cause": format!("{:?}", e.cause),
                        "intrinsic": [e.intrinsic.width, e.intrinsic.height],
                        "viewport": [e.viewport.width, e.viewport.height],
                        "scale": e.fit.scale,
                        "size": [e.fit.size.width, e.fit.size.height],
                        "margin_top": e.fit.margin_top,
                        "margin_left": e.fit.margin_left,
                    }
                }));
            }
            RecordedEvent::Listener {
                target,
                event,
                handler,
                change,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{change:?}"),
                    "cat": "Listener",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": target,
                    "s": "t",
                    "args": {
                        "event": event,
                        "handler": handler.name(),
                    }
                }));
            }
            RecordedEvent::Resize(e) => {
                let start = ticks_to_us(e.first_trigger.ticks(), timebase);
                last_ts = ticks_to_us(e.at.ticks(), timebase);
                events.push(json!({
                    "ph": "X",
                    "name": "ResizeBurst",
                    "cat": "Layout",
                    "ts": start,
                    "dur": last_ts - start,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "triggers": e.triggers,
                    }
                }));
            }
            RecordedEvent::Playback(e) => {
                last_ts = ticks_to_us(e.at.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": "Play",
                    "cat": "Media",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "cause": format!("{:?}", e.cause),
                    }
                }));
            }
            RecordedEvent::Lifecycle(e) => {
                last_ts = ticks_to_us(e.at.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.state),
                    "cat": "Lifecycle",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use fsvideo_core::source::DisplayMode;
    use fsvideo_core::surface::Lifecycle;
    use fsvideo_core::time::HostTime;
    use fsvideo_core::trace::{
        LifecycleEvent, PlayCause, PlaybackEvent, ResizeEvent, SurfaceEvent, TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_surface(&SurfaceEvent {
            mode: DisplayMode::Poster,
            sources: 1,
            at: HostTime(1_000),
        });
        rec.on_resize(&ResizeEvent {
            triggers: 5,
            first_trigger: HostTime(10_000),
            at: HostTime(110_000),
        });
        rec.on_playback(&PlaybackEvent {
            cause: PlayCause::Loop,
            at: HostTime(120_000),
        });
        rec.on_lifecycle(&LifecycleEvent {
            state: Lifecycle::Destroyed,
            at: HostTime(130_000),
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), Timebase::MICROS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 4);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["args"]["mode"], "poster");

        // Resize burst is a complete slice from first trigger to settle.
        assert_eq!(parsed[1]["ph"], "X");
        assert_eq!(parsed[1]["ts"], 10_000.0);
        assert_eq!(parsed[1]["dur"], 100_000.0);
        assert_eq!(parsed[1]["args"]["triggers"], 5);

        assert_eq!(parsed[2]["name"], "Play");
        assert_eq!(parsed[3]["name"], "Destroyed");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
