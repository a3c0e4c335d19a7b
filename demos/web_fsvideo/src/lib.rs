// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-screen background demo.
//!
//! Mounts a looping video behind a small control strip. The buttons swap
//! between a video and a poster image and tear the widget down, so the
//! cover fit and listener cleanup can be watched in the console (the widget
//! logs through [`ConsoleSink`]).
//!
//! Build with: `wasm-pack build --target web demos/web_fsvideo`
//! Then serve `demos/web_fsvideo/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::time::Duration;

use fsvideo_backend_web::{ConsoleSink, Container, FsVideo, Options};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlButtonElement, HtmlElement};

static VIDEO_SOURCES: [&str; 2] = ["media/loop.webm", "media/loop.mp4"];
static POSTER_SOURCES: [&str; 1] = ["media/poster.jpg"];

type Slot = Rc<RefCell<Option<FsVideo>>>;

/// Builds the page and mounts the initial video.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let stage = element(&document, "div")?;
    stage.set_id("stage");
    style(
        &stage,
        "position: fixed; inset: 0; overflow: hidden; z-index: -1; background: #10121f;",
    )?;
    body.append_child(&stage)?;

    let controls = element(&document, "div")?;
    style(
        &controls,
        "position: fixed; left: 16px; bottom: 16px; display: flex; gap: 8px;",
    )?;
    body.append_child(&controls)?;

    let slot: Slot = Rc::new(RefCell::new(None));
    mount(&slot, &stage, &VIDEO_SOURCES)?;

    for (label, sources) in [("Video", &VIDEO_SOURCES[..]), ("Poster", &POSTER_SOURCES[..])] {
        let slot = Rc::clone(&slot);
        let stage = stage.clone();
        add_button(&document, &controls, label, move || {
            if let Err(err) = mount(&slot, &stage, sources) {
                web_sys::console::error_1(&err);
            }
        })?;
    }

    let destroy_slot = Rc::clone(&slot);
    add_button(&document, &controls, "Destroy", move || {
        if let Some(video) = destroy_slot.borrow_mut().take() {
            video.destroy();
        }
    })?;

    Ok(())
}

/// Replaces whatever is mounted on `stage` with a fresh widget.
fn mount(slot: &Slot, stage: &HtmlElement, sources: &[&str]) -> Result<(), JsValue> {
    // Dropping the previous handle destroys it.
    drop(slot.borrow_mut().take());

    let video = FsVideo::new(Container::Element(stage.clone().into()))?;
    video.set_trace_sink(Some(Box::new(ConsoleSink::new())))?;
    video.init(
        sources,
        Options::default().with_resize_quiet(Duration::from_millis(150)),
    )?;
    *slot.borrow_mut() = Some(video);
    Ok(())
}

fn add_button(
    doc: &Document,
    host: &HtmlElement,
    label: &str,
    mut on_click: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let button: HtmlButtonElement = doc.create_element("button")?.unchecked_into();
    button.set_text_content(Some(label));
    host.append_child(&button)?;

    let cb = Closure::wrap(Box::new(move |_event: Event| on_click()) as Box<dyn FnMut(Event)>);
    button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn element(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.unchecked_into())
}

fn style(el: &web_sys::Element, css: &str) -> Result<(), JsValue> {
    el.set_attribute("style", css)
}
