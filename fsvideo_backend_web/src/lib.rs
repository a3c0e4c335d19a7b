// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for fsvideo.
//!
//! This crate mounts a full-screen poster or looping video in the browser:
//!
//! - [`FsVideo`]: the widget handle, for Rust callers
//! - `FSVideo`: the same widget exported to JavaScript
//! - [`DomHost`]: the [`Host`] implementation over `web-sys`
//! - [`ConsoleSink`]: trace output to the browser console

#![no_std]

extern crate alloc;

mod console;
mod dom;
mod js;
mod timer;
mod widget;

pub use console::ConsoleSink;
pub use dom::{DomHost, ListenerClosure};
pub use fsvideo_core::backend::Host;
pub use fsvideo_core::source::DisplayMode;
pub use fsvideo_core::surface::{Lifecycle, Options};
pub use js::JsFsVideo;
pub use timer::PendingTimer;
pub use widget::{Container, FsVideo};

use fsvideo_core::time::{HostTime, Timebase};

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    let ms = timer::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timebase_is_microsecond() {
        let tb = timebase();
        assert_eq!(tb.ticks_to_nanos(1), 1000, "1 tick is 1000 ns");
        assert_eq!(
            tb.ticks_to_nanos(1_000_000),
            1_000_000_000,
            "1e6 ticks is one second"
        );
    }

    #[test]
    fn host_time_converts_with_web_timebase() {
        assert_eq!(HostTime(16_000).to_nanos(timebase()), 16_000_000);
    }
}
