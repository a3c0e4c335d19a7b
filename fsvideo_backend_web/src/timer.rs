// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser clock and timer bindings.
//!
//! Debounced resizes are driven by `setTimeout`. Each scheduled callback is a
//! [`PendingTimer`] that owns its JS closure; cancelling it calls
//! `clearTimeout` and hands the closure back to the host for deferred
//! dropping, since the timer may be cancelled from inside its own callback.

use core::fmt;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods, so the
// timer path never has to fetch (and unwrap) the window.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

pub(crate) type TimerClosure = Closure<dyn FnMut()>;

/// A `setTimeout` callback that has not been cancelled yet.
pub struct PendingTimer {
    id: i32,
    closure: TimerClosure,
}

impl PendingTimer {
    /// Registers `closure` to run once after `ms` milliseconds.
    pub(crate) fn start(closure: TimerClosure, ms: i32) -> Self {
        let id = set_timeout(closure.as_ref(), ms);
        Self { id, closure }
    }

    /// Clears the timeout and returns the closure for deferred dropping.
    ///
    /// Clearing a timeout that already fired is a no-op in the browser.
    pub(crate) fn clear(self) -> TimerClosure {
        clear_timeout(self.id);
        self.closure
    }
}

impl fmt::Debug for PendingTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTimer")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
