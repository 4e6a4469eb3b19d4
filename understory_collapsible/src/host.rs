// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Affine, Point};
use understory_tree_render::{RenderPass, Scene};

/// A tooltip the host should display next to a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Markup shown inside the tooltip.
    pub text: String,
    /// Canvas position of the hovered node.
    pub anchor: Point,
    /// Font size in pixels.
    pub font_size: f64,
}

/// Everything the widget asks of its embedding page.
///
/// Besides running render passes as a [`Scene`], the host animates the view transform, shows
/// tooltips, and forwards selection records to its input channels. None of these may block.
pub trait Host: Scene {
    /// Animate the canvas transform to `transform` over `duration`.
    fn transition_view(&mut self, transform: Affine, duration: Duration);

    /// Show `tooltip`.
    fn show_tooltip(&mut self, tooltip: &Tooltip);

    /// Fade out any visible tooltip over `fade`.
    fn hide_tooltip(&mut self, fade: Duration);

    /// Set the host input named `channel` to `value`.
    fn set_input_value(&mut self, channel: &str, value: &str);
}

/// What [`RecordingHost`] saw, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// A render pass was applied.
    Pass(RenderPass),
    /// The view transform was animated.
    View(Affine, Duration),
    /// A tooltip was shown.
    ShowTooltip(Tooltip),
    /// Tooltips were hidden.
    HideTooltip(Duration),
    /// An input channel received a value.
    Input {
        /// Channel name.
        channel: String,
        /// Delivered JSON.
        value: String,
    },
}

/// A host that records every call; useful for tests and headless embedding.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    /// Calls received so far.
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    /// Passes received so far, oldest first.
    pub fn passes(&self) -> impl Iterator<Item = &RenderPass> + '_ {
        self.events.iter().filter_map(|e| match e {
            HostEvent::Pass(pass) => Some(pass),
            _ => None,
        })
    }

    /// The most recent pass.
    pub fn last_pass(&self) -> Option<&RenderPass> {
        self.passes().last()
    }

    /// The most recent value delivered to `channel`.
    pub fn last_input(&self, channel: &str) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            HostEvent::Input { channel: c, value } if c == channel => Some(value.as_str()),
            _ => None,
        })
    }
}

impl Scene for RecordingHost {
    fn apply(&mut self, pass: &RenderPass) {
        self.events.push(HostEvent::Pass(pass.clone()));
    }
}

impl Host for RecordingHost {
    fn transition_view(&mut self, transform: Affine, duration: Duration) {
        self.events.push(HostEvent::View(transform, duration));
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        self.events.push(HostEvent::ShowTooltip(tooltip.clone()));
    }

    fn hide_tooltip(&mut self, fade: Duration) {
        self.events.push(HostEvent::HideTooltip(fade));
    }

    fn set_input_value(&mut self, channel: &str, value: &str) {
        self.events.push(HostEvent::Input {
            channel: channel.to_owned(),
            value: value.to_owned(),
        });
    }
}
