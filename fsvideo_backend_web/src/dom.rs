// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM-backed [`Host`].
//!
//! [`DomHost`] creates surfaces with `document.createElement`, writes fits
//! into inline styles, and turns listener and timer requests into JS
//! closures. Each closure holds a [`Weak`] reference to the widget state and
//! re-enters the controller through it.
//!
//! Closures cannot be dropped while they run, and a one-shot listener
//! detaches itself from inside its own callback. Detached closures are
//! therefore parked in a retired list and dropped on the next callback entry.

use alloc::boxed::Box;
use alloc::rc::Weak;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use fsvideo_core::Error;
use fsvideo_core::backend::{Binding, Host};
use fsvideo_core::fit::CoverFit;
use fsvideo_core::source::DisplayMode;
use fsvideo_core::surface::MediaSurface;
use fsvideo_core::time::HostTime;
use kurbo::Size;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, HtmlMediaElement,
    HtmlSourceElement, HtmlVideoElement, Node, Window,
};

use crate::timer::{PendingTimer, TimerClosure};

/// Native listener handle produced by [`DomHost`].
pub type ListenerClosure = Closure<dyn FnMut(Event)>;

/// Controller and host, borrowed together by every callback.
pub(crate) struct WidgetState {
    pub(crate) surface: MediaSurface<DomHost>,
    pub(crate) host: DomHost,
}

/// Implements [`Host`] on top of `web-sys`.
pub struct DomHost {
    window: Window,
    document: Document,
    state: Weak<RefCell<WidgetState>>,
    retired_listeners: Vec<ListenerClosure>,
    retired_timers: Vec<TimerClosure>,
}

impl fmt::Debug for DomHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomHost")
            .field("window", &"Window")
            .field("retired_listeners", &self.retired_listeners.len())
            .field("retired_timers", &self.retired_timers.len())
            .finish_non_exhaustive()
    }
}

impl DomHost {
    pub(crate) fn new(
        window: Window,
        document: Document,
        state: Weak<RefCell<WidgetState>>,
    ) -> Self {
        Self {
            window,
            document,
            state,
            retired_listeners: Vec::new(),
            retired_timers: Vec::new(),
        }
    }

    /// Drops closures detached by earlier callbacks.
    pub(crate) fn reap(&mut self) {
        self.retired_listeners.clear();
        self.retired_timers.clear();
    }
}

/// Runs `f` with the widget state borrowed, if it is still alive.
///
/// Events raised synchronously from inside another callback find the state
/// already borrowed and are dropped.
fn enter(
    state: &Weak<RefCell<WidgetState>>,
    f: impl FnOnce(&mut MediaSurface<DomHost>, &mut DomHost),
) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let Ok(mut guard) = state.try_borrow_mut() else {
        return;
    };
    let WidgetState { surface, host } = &mut *guard;
    host.reap();
    f(surface, host);
}

fn as_node(target: &EventTarget) -> Result<&Node, JsValue> {
    target
        .dyn_ref::<Node>()
        .ok_or_else(|| JsValue::from_str("event target is not a DOM node"))
}

fn report(err: &Error<JsValue>) {
    let msg = match err {
        Error::Host(js) => js.clone(),
        other => JsValue::from_str(&other.to_string()),
    };
    web_sys::console::error_2(&JsValue::from_str("fsvideo:"), &msg);
}

impl Host for DomHost {
    type Target = EventTarget;
    type Listener = ListenerClosure;
    type Timer = PendingTimer;
    type Error = JsValue;

    fn now(&self) -> HostTime {
        crate::now()
    }

    fn viewport(&self) -> EventTarget {
        self.window.clone().into()
    }

    fn viewport_size(&self) -> Size {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64());
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64());
        Size::new(width.unwrap_or(0.0), height.unwrap_or(0.0))
    }

    fn create_image(&mut self, class: &str, src: &str) -> Result<EventTarget, JsValue> {
        let img: HtmlImageElement = self.document.create_element("img")?.unchecked_into();
        img.set_class_name(class);
        img.set_src(src);
        Ok(img.into())
    }

    fn create_video(&mut self, class: &str) -> Result<EventTarget, JsValue> {
        let video: HtmlVideoElement = self.document.create_element("video")?.unchecked_into();
        video.set_class_name(class);
        Ok(video.into())
    }

    fn append_source(
        &mut self,
        video: &EventTarget,
        src: &str,
        media_type: &str,
    ) -> Result<(), JsValue> {
        let source: HtmlSourceElement = self.document.create_element("source")?.unchecked_into();
        source.set_src(src);
        source.set_type(media_type);
        as_node(video)?.append_child(&source)?;
        Ok(())
    }

    fn append_child(
        &mut self,
        container: &EventTarget,
        child: &EventTarget,
    ) -> Result<(), JsValue> {
        as_node(container)?.append_child(as_node(child)?)?;
        Ok(())
    }

    fn clear_children(&mut self, container: &EventTarget) {
        let Some(el) = container.dyn_ref::<Element>() else {
            return;
        };
        while let Some(child) = el.last_element_child() {
            child.remove();
        }
    }

    fn is_complete(&self, image: &EventTarget) -> bool {
        image
            .dyn_ref::<HtmlImageElement>()
            .is_some_and(HtmlImageElement::complete)
    }

    fn intrinsic_size(&self, surface: &EventTarget, mode: DisplayMode) -> Size {
        let (w, h) = match mode {
            DisplayMode::Poster => surface
                .dyn_ref::<HtmlImageElement>()
                .map_or((0, 0), |img| (img.natural_width(), img.natural_height())),
            DisplayMode::Video => surface
                .dyn_ref::<HtmlVideoElement>()
                .map_or((0, 0), |video| (video.video_width(), video.video_height())),
        };
        Size::new(f64::from(w), f64::from(h))
    }

    fn play(&mut self, video: &EventTarget) {
        if let Some(media) = video.dyn_ref::<HtmlMediaElement>() {
            // Autoplay policies may reject the promise; the next `ended` or a
            // user gesture retries.
            let _ = media.play();
        }
    }

    fn apply_fit(&mut self, surface: &EventTarget, fit: &CoverFit) {
        let Some(el) = surface.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        for (property, value) in fit.style_properties() {
            let _ = style.set_property(property, &value);
        }
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        event: &str,
        binding: Binding,
    ) -> Result<ListenerClosure, JsValue> {
        let state = self.state.clone();
        let origin = target.clone();
        let name = String::from(event);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            enter(&state, |surface, host| {
                if let Err(err) = surface.dispatch(host, &origin, &name, binding) {
                    report(&err);
                }
            });
        }) as Box<dyn FnMut(Event)>);

        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(closure)
    }

    fn unlisten(&mut self, target: &EventTarget, event: &str, listener: ListenerClosure) {
        let _ =
            target.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        self.retired_listeners.push(listener);
    }

    fn schedule(&mut self, delay: Duration) -> Result<PendingTimer, JsValue> {
        let state = self.state.clone();
        let closure = Closure::wrap(Box::new(move || {
            enter(&state, |surface, host| surface.on_timer(host));
        }) as Box<dyn FnMut()>);

        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        Ok(PendingTimer::start(closure, ms))
    }

    fn cancel(&mut self, timer: PendingTimer) {
        self.retired_timers.push(timer.clear());
    }
}
