// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public widget handle.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use fsvideo_core::Error;
use fsvideo_core::source::DisplayMode;
use fsvideo_core::surface::{Lifecycle, MediaSurface, Options};
use fsvideo_core::trace::TraceSink;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::dom::{DomHost, WidgetState};

/// Where the widget mounts its surface.
#[derive(Clone, Debug, Default)]
pub enum Container {
    /// The document's `<body>`.
    #[default]
    Body,
    /// The first element matching a CSS selector, or `<body>` if nothing
    /// matches.
    Selector(String),
    /// A specific element.
    Element(Element),
}

/// A full-screen poster or video mounted in a DOM container.
///
/// Cloning is not supported; the handle owns the widget. Dropping it tears
/// the widget down as if [`destroy`](Self::destroy) had been called.
///
/// # Example
///
/// ```ignore
/// let video = FsVideo::new(Container::Selector("#hero".into()))?;
/// video.init(&["media/loop.webm", "media/loop.mp4"], Options::default())?;
/// ```
pub struct FsVideo {
    state: Rc<RefCell<WidgetState>>,
}

impl fmt::Debug for FsVideo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FsVideo");
        match self.state.try_borrow() {
            Ok(state) => s.field("surface", &state.surface),
            Err(_) => s.field("surface", &"<borrowed>"),
        };
        s.finish()
    }
}

impl FsVideo {
    /// Resolves `container` and creates an uninitialized widget.
    ///
    /// A selector that matches nothing falls back to `<body>`. An invalid
    /// selector is an error.
    pub fn new(container: Container) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let element = resolve_container(&document, container)?;

        let state = Rc::new_cyclic(|weak| {
            RefCell::new(WidgetState {
                surface: MediaSurface::new(element.into()),
                host: DomHost::new(window, document, weak.clone()),
            })
        });
        Ok(Self { state })
    }

    fn borrow(&self) -> Result<Ref<'_, WidgetState>, JsValue> {
        self.state
            .try_borrow()
            .map_err(|_| JsValue::from_str("fsvideo widget is busy"))
    }

    fn borrow_mut(&self) -> Result<RefMut<'_, WidgetState>, JsValue> {
        self.state
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("fsvideo widget is busy"))
    }

    /// Builds the poster or video surface for `sources` and mounts it.
    ///
    /// Does nothing if the widget was already initialized or destroyed.
    pub fn init<S: AsRef<str>>(&self, sources: &[S], options: Options) -> Result<(), JsValue> {
        let mut guard = self.borrow_mut()?;
        let WidgetState { surface, host } = &mut *guard;
        host.reap();
        surface.init(host, sources, options).map_err(into_js)
    }

    /// Removes the container's children and every listener the widget
    /// attached.
    pub fn destroy(&self) {
        let Ok(mut guard) = self.state.try_borrow_mut() else {
            return;
        };
        let WidgetState { surface, host } = &mut *guard;
        surface.destroy(host);
        // Holding the borrow means no widget callback is running.
        host.reap();
    }

    /// Installs (or removes) a trace sink.
    ///
    /// Events are only delivered when the `trace` feature is enabled.
    pub fn set_trace_sink(&self, sink: Option<Box<dyn TraceSink>>) -> Result<(), JsValue> {
        self.borrow_mut()?.surface.set_trace_sink(sink);
        Ok(())
    }

    /// Returns the lifecycle state.
    ///
    /// Fails only while the widget is busy inside one of its own callbacks.
    pub fn lifecycle(&self) -> Result<Lifecycle, JsValue> {
        Ok(self.borrow()?.surface.lifecycle())
    }

    /// Returns `true` between a successful `init` and `destroy`.
    pub fn is_initialized(&self) -> Result<bool, JsValue> {
        Ok(self.borrow()?.surface.is_initialized())
    }

    /// Returns the display mode chosen by `init`.
    pub fn display_mode(&self) -> Result<Option<DisplayMode>, JsValue> {
        Ok(self.borrow()?.surface.display_mode())
    }

    /// Returns the mounted surface element.
    pub fn surface_element(&self) -> Result<Option<HtmlElement>, JsValue> {
        Ok(self
            .borrow()?
            .surface
            .surface()
            .and_then(|target| target.dyn_ref::<HtmlElement>().cloned()))
    }
}

impl Drop for FsVideo {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn resolve_container(document: &Document, container: Container) -> Result<Element, JsValue> {
    let found = match container {
        Container::Body => None,
        Container::Element(el) => Some(el),
        Container::Selector(selector) => document.query_selector(&selector)?,
    };
    match found {
        Some(el) => Ok(el),
        None => document
            .body()
            .map(Element::from)
            .ok_or_else(|| JsValue::from_str("document has no body")),
    }
}

pub(crate) fn into_js(err: Error<JsValue>) -> JsValue {
    match err {
        Error::Host(js) => js,
        other => JsValue::from_str(&other.to_string()),
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn stage(id: &str) -> Element {
        let doc = document();
        let el = doc.create_element("div").unwrap();
        el.set_id(id);
        doc.body().unwrap().append_child(&el).unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn selector_mounts_in_matching_element() {
        let el = stage("fsvideo-selector");
        let video = FsVideo::new(Container::Selector(String::from("#fsvideo-selector"))).unwrap();
        video.init(&["a.mp4"], Options::default()).unwrap();

        assert_eq!(el.child_element_count(), 1);
        assert_eq!(video.display_mode().unwrap(), Some(DisplayMode::Video));

        video.destroy();
        assert_eq!(el.child_element_count(), 0);
        assert_eq!(video.lifecycle().unwrap(), Lifecycle::Destroyed);
        el.remove();
    }

    #[wasm_bindgen_test]
    fn unmatched_selector_falls_back_to_body() {
        let video = FsVideo::new(Container::Selector(String::from("#fsvideo-missing"))).unwrap();
        video.init(&["a.jpg"], Options::default()).unwrap();

        let surface = video.surface_element().unwrap().unwrap();
        let body = document().body().unwrap();
        assert!(surface.parent_node().is_some_and(|p| p.is_same_node(Some(body.as_ref()))));

        // Destroying would clear the whole body, test harness included.
        surface.remove();
        core::mem::forget(video);
    }

    #[wasm_bindgen_test]
    fn invalid_selector_is_an_error() {
        assert!(FsVideo::new(Container::Selector(String::from("##"))).is_err());
    }

    #[wasm_bindgen_test]
    fn any_element_is_a_container() {
        let doc = document();
        let svg = doc
            .create_element_ns(Some("http://www.w3.org/2000/svg"), "svg")
            .unwrap();
        doc.body().unwrap().append_child(&svg).unwrap();

        let video = FsVideo::new(Container::Element(svg.clone())).unwrap();
        video.init(&["a.mp4"], Options::default()).unwrap();
        assert_eq!(svg.child_element_count(), 1);

        drop(video);
        assert_eq!(svg.child_element_count(), 0, "drop destroys the widget");
        svg.remove();
    }

    #[wasm_bindgen_test]
    fn accessors_work_after_destroy() {
        let el = stage("fsvideo-accessors");
        let video = FsVideo::new(Container::Element(el.clone())).unwrap();
        assert!(!video.is_initialized().unwrap());

        video.init(&["a.png"], Options::default()).unwrap();
        assert!(video.is_initialized().unwrap());

        video.destroy();
        video.destroy();
        assert!(!video.is_initialized().unwrap());
        assert!(video.surface_element().unwrap().is_none());
        el.remove();
    }
}
