// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`Host`] used by the controller tests.
//!
//! Nodes live in a flat table indexed by [`Node`]. Node 0 is the window and
//! node 1 the container. Native listeners and timers are kept in append-only
//! tables with an `attached`/`active` flag so tests can assert on detached
//! entries too.

use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Size;

use crate::backend::{Binding, Host};
use crate::fit::CoverFit;
use crate::source::DisplayMode;
use crate::surface::MediaSurface;
use crate::time::HostTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Node(pub(crate) u32);

pub(crate) const WINDOW: Node = Node(0);
pub(crate) const CONTAINER: Node = Node(1);

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) tag: &'static str,
    pub(crate) class: String,
    pub(crate) src: Option<String>,
    pub(crate) media_type: Option<String>,
    pub(crate) children: Vec<Node>,
    pub(crate) style: Option<CoverFit>,
}

impl NodeData {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            class: String::new(),
            src: None,
            media_type: None,
            children: Vec::new(),
            style: None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct NativeListener {
    pub(crate) target: Node,
    pub(crate) event: String,
    pub(crate) binding: Binding,
    pub(crate) attached: bool,
}

#[derive(Debug)]
pub(crate) struct MockHost {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) listeners: Vec<NativeListener>,
    pub(crate) timers: Vec<(Duration, bool)>,
    pub(crate) viewport: Size,
    pub(crate) natural_size: Size,
    pub(crate) video_size: Size,
    pub(crate) complete: bool,
    pub(crate) plays: u32,
    pub(crate) fits: Vec<CoverFit>,
    pub(crate) clock: u64,
    pub(crate) fail_listen_on: Option<&'static str>,
    pub(crate) fail_append: bool,
}

impl MockHost {
    pub(crate) fn new() -> Self {
        Self {
            nodes: alloc::vec![NodeData::new("window"), NodeData::new("div")],
            listeners: Vec::new(),
            timers: Vec::new(),
            viewport: Size::new(800.0, 600.0),
            natural_size: Size::ZERO,
            video_size: Size::ZERO,
            complete: false,
            plays: 0,
            fits: Vec::new(),
            clock: 0,
            fail_listen_on: None,
            fail_append: false,
        }
    }

    pub(crate) fn node(&self, node: Node) -> &NodeData {
        &self.nodes[node.0 as usize]
    }

    fn node_mut(&mut self, node: Node) -> &mut NodeData {
        &mut self.nodes[node.0 as usize]
    }

    fn create(&mut self, tag: &'static str) -> Node {
        let id = u32::try_from(self.nodes.len()).unwrap();
        self.nodes.push(NodeData::new(tag));
        Node(id)
    }

    pub(crate) fn children(&self, node: Node) -> &[Node] {
        &self.node(node).children
    }

    /// Number of attached native listeners for `event` on `target`.
    pub(crate) fn attached(&self, target: Node, event: &str) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.attached && l.target == target && l.event == event)
            .count()
    }

    pub(crate) fn attached_total(&self) -> usize {
        self.listeners.iter().filter(|l| l.attached).count()
    }

    pub(crate) fn active_timers(&self) -> usize {
        self.timers.iter().filter(|(_, active)| *active).count()
    }

    /// Dispatches `event` on `target` the way a DOM would: every listener
    /// attached when dispatch starts runs, unless an earlier one detached it.
    /// Returns how many listeners ran.
    pub(crate) fn fire(
        &mut self,
        surface: &mut MediaSurface<Self>,
        target: Node,
        event: &str,
    ) -> usize {
        let ids: Vec<usize> = self
            .listeners
            .iter()
            .enumerate()
            .filter(|(_, l)| l.attached && l.target == target && l.event == event)
            .map(|(i, _)| i)
            .collect();

        let mut ran = 0;
        for id in ids {
            if !self.listeners[id].attached {
                continue;
            }
            let binding = self.listeners[id].binding;
            surface.dispatch(self, &target, event, binding).unwrap();
            ran += 1;
        }
        ran
    }

    /// Advances the clock and fires every active timer.
    pub(crate) fn run_timers(&mut self, surface: &mut MediaSurface<Self>) -> usize {
        let due: Vec<usize> = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (_, active))| *active)
            .map(|(i, _)| i)
            .collect();

        let mut ran = 0;
        for id in due {
            if !self.timers[id].1 {
                continue;
            }
            let delay = self.timers[id].0;
            self.clock += u64::try_from(delay.as_micros()).unwrap();
            self.timers[id].1 = false;
            surface.on_timer(self);
            ran += 1;
        }
        ran
    }
}

impl Host for MockHost {
    type Target = Node;
    type Listener = usize;
    type Timer = usize;
    type Error = &'static str;

    fn now(&self) -> HostTime {
        HostTime(self.clock)
    }

    fn viewport(&self) -> Node {
        WINDOW
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn create_image(&mut self, class: &str, src: &str) -> Result<Node, Self::Error> {
        let node = self.create("img");
        let data = self.node_mut(node);
        data.class = class.to_string();
        data.src = Some(src.to_string());
        Ok(node)
    }

    fn create_video(&mut self, class: &str) -> Result<Node, Self::Error> {
        let node = self.create("video");
        self.node_mut(node).class = class.to_string();
        Ok(node)
    }

    fn append_source(
        &mut self,
        video: &Node,
        src: &str,
        media_type: &str,
    ) -> Result<(), Self::Error> {
        let source = self.create("source");
        let data = self.node_mut(source);
        data.src = Some(src.to_string());
        data.media_type = Some(media_type.to_string());
        self.node_mut(*video).children.push(source);
        Ok(())
    }

    fn append_child(&mut self, container: &Node, child: &Node) -> Result<(), Self::Error> {
        if self.fail_append {
            return Err("append failed");
        }
        self.node_mut(*container).children.push(*child);
        Ok(())
    }

    fn clear_children(&mut self, container: &Node) {
        self.node_mut(*container).children.clear();
    }

    fn is_complete(&self, _image: &Node) -> bool {
        self.complete
    }

    fn intrinsic_size(&self, _surface: &Node, mode: DisplayMode) -> Size {
        match mode {
            DisplayMode::Poster => self.natural_size,
            DisplayMode::Video => self.video_size,
        }
    }

    fn play(&mut self, _video: &Node) {
        self.plays += 1;
    }

    fn apply_fit(&mut self, surface: &Node, fit: &CoverFit) {
        self.node_mut(*surface).style = Some(*fit);
        self.fits.push(*fit);
    }

    fn listen(
        &mut self,
        target: &Node,
        event: &str,
        binding: Binding,
    ) -> Result<usize, Self::Error> {
        if self.fail_listen_on == Some(event) {
            return Err("listen failed");
        }
        self.listeners.push(NativeListener {
            target: *target,
            event: event.to_string(),
            binding,
            attached: true,
        });
        Ok(self.listeners.len() - 1)
    }

    fn unlisten(&mut self, target: &Node, event: &str, listener: usize) {
        let native = &mut self.listeners[listener];
        assert_eq!(native.target, *target, "listener detached from wrong target");
        assert_eq!(native.event, event, "listener detached for wrong event");
        native.attached = false;
    }

    fn schedule(&mut self, delay: Duration) -> Result<usize, Self::Error> {
        self.timers.push((delay, true));
        Ok(self.timers.len() - 1)
    }

    fn cancel(&mut self, timer: usize) {
        self.timers[timer].1 = false;
    }
}
