// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JavaScript-facing `FSVideo` class.
//!
//! ```js
//! const video = new FSVideo('#hero');
//! video.init(['media/loop.webm', 'media/loop.mp4'], { loop: true });
//! // later
//! video.destroy();
//! ```

use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::time::Duration;

use fsvideo_core::surface::Options;
use js_sys::Reflect;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::widget::{Container, FsVideo};

/// `FSVideo` as seen from JavaScript.
#[wasm_bindgen(js_name = FSVideo)]
#[derive(Debug)]
pub struct JsFsVideo {
    inner: FsVideo,
}

#[wasm_bindgen(js_class = FSVideo)]
impl JsFsVideo {
    /// Accepts a CSS selector, an element, or nothing (`<body>`).
    #[wasm_bindgen(constructor)]
    pub fn new(target: JsValue) -> Result<Self, JsValue> {
        let container = if let Some(selector) = target.as_string() {
            Container::Selector(selector)
        } else if let Some(el) = target.dyn_ref::<Element>() {
            Container::Element(el.clone())
        } else {
            Container::Body
        };
        Ok(Self {
            inner: FsVideo::new(container)?,
        })
    }

    /// Builds and mounts the surface. `options.loop === false` disables
    /// looping; `options.resizeQuiet` overrides the resize quiet window in
    /// milliseconds.
    pub fn init(&self, sources: Vec<String>, options: JsValue) -> Result<(), JsValue> {
        self.inner.init(&sources, options_from_js(&options)?)
    }

    /// Tears the widget down.
    pub fn destroy(&self) {
        self.inner.destroy();
    }

    /// `"poster"`, `"video"`, or `undefined` before `init`.
    #[wasm_bindgen(getter, js_name = displayMode)]
    pub fn display_mode(&self) -> Result<Option<String>, JsValue> {
        Ok(self.inner.display_mode()?.map(|mode| mode.to_string()))
    }
}

fn options_from_js(value: &JsValue) -> Result<Options, JsValue> {
    if !value.is_object() {
        return Ok(Options::default());
    }
    let looping = Reflect::get(value, &JsValue::from_str("loop"))?.as_bool();
    let quiet = Reflect::get(value, &JsValue::from_str("resizeQuiet"))?.as_f64();
    Ok(resolve_options(looping, quiet))
}

/// Builds [`Options`] from the raw `loop` and `resizeQuiet` values.
///
/// Anything but an explicit `false` keeps looping on. A quiet window that
/// is negative, NaN or too large for a [`Duration`] keeps the default.
fn resolve_options(looping: Option<bool>, resize_quiet_ms: Option<f64>) -> Options {
    let mut options = Options::default();
    if looping == Some(false) {
        options.looping = false;
    }
    if let Some(quiet) = resize_quiet_ms
        .filter(|ms| *ms >= 0.0)
        .and_then(|ms| Duration::try_from_secs_f64(ms / 1000.0).ok())
    {
        options.resize_quiet = quiet;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsvideo_core::debounce::DEFAULT_QUIET;

    #[test]
    fn missing_options_use_defaults() {
        assert_eq!(resolve_options(None, None), Options::default());
    }

    #[test]
    fn only_explicit_false_disables_looping() {
        assert!(resolve_options(None, None).looping);
        assert!(resolve_options(Some(true), None).looping);
        assert!(!resolve_options(Some(false), None).looping);
    }

    #[test]
    fn resize_quiet_is_read_in_milliseconds() {
        let options = resolve_options(None, Some(250.0));
        assert_eq!(options.resize_quiet, Duration::from_millis(250));
        assert_eq!(resolve_options(None, Some(0.0)).resize_quiet, Duration::ZERO);
    }

    #[test]
    fn unusable_resize_quiet_keeps_default() {
        for ms in [1e300, f64::INFINITY, f64::NAN, -5.0, f64::NEG_INFINITY] {
            assert_eq!(
                resolve_options(None, Some(ms)).resize_quiet,
                DEFAULT_QUIET,
                "resizeQuiet = {ms}"
            );
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod web_tests {
    use super::*;
    use js_sys::Object;
    use wasm_bindgen_test::wasm_bindgen_test;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    fn options(entries: &[(&str, JsValue)]) -> JsValue {
        let obj = Object::new();
        for (key, value) in entries {
            Reflect::set(&obj, &JsValue::from_str(key), value).unwrap();
        }
        obj.into()
    }

    #[wasm_bindgen_test]
    fn loop_false_in_object_disables_looping() {
        let parsed = options_from_js(&options(&[("loop", JsValue::FALSE)])).unwrap();
        assert!(!parsed.looping);
    }

    #[wasm_bindgen_test]
    fn falsy_non_boolean_loop_keeps_looping() {
        for value in [JsValue::from_f64(0.0), JsValue::NULL, JsValue::from_str("")] {
            let parsed = options_from_js(&options(&[("loop", value)])).unwrap();
            assert!(parsed.looping);
        }
    }

    #[wasm_bindgen_test]
    fn undefined_options_use_defaults() {
        assert_eq!(
            options_from_js(&JsValue::UNDEFINED).unwrap(),
            Options::default()
        );
    }

    #[wasm_bindgen_test]
    fn huge_resize_quiet_does_not_abort() {
        let raw = options(&[("resizeQuiet", JsValue::from_f64(1e300))]);
        assert_eq!(options_from_js(&raw).unwrap(), Options::default());
    }
}
