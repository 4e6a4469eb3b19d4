// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-time configuration supplied by the host.

use kurbo::Insets;
use serde::Deserialize;
use understory_hierarchy::CollapsePolicy;
use understory_tree_layout::LinkLength;

use crate::error::WidgetError;

/// Pixel insets around the drawing area.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Left inset.
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 20.0,
            left: 20.0,
        }
    }
}

impl From<Margin> for Insets {
    fn from(m: Margin) -> Self {
        Self::new(m.left, m.top, m.right, m.bottom)
    }
}

/// The `collapsed` option: a switch, or the name of a per-node boolean field.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Collapsed {
    /// `true` collapses everything below the first level, `false` nothing.
    Flag(bool),
    /// Collapse below the first level, except nodes whose field is `false`.
    Field(String),
}

impl Default for Collapsed {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl From<&Collapsed> for CollapsePolicy {
    fn from(c: &Collapsed) -> Self {
        match c {
            Collapsed::Flag(true) => Self::All,
            Collapsed::Flag(false) => Self::Never,
            Collapsed::Field(name) => Self::Field(name.clone()),
        }
    }
}

/// Widget options, deserialized from camelCase keys.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Insets applied to the canvas.
    pub margin: Margin,
    /// Fixed distance between levels; derived from the viewport when absent.
    pub link_length: Option<f64>,
    /// Label size in pixels.
    pub font_size: f64,
    /// Circle fill of selected nodes.
    pub fill: String,
    /// Show tooltips on hover.
    pub tooltip: bool,
    /// Accept zoom and pan transforms.
    pub zoomable: bool,
    /// Initial collapse policy, applied once per `render_value`. Nothing collapses when unset.
    pub collapsed: Collapsed,
    /// Level labels; `hierarchy[depth - 1]` names the level of a node at `depth`.
    pub hierarchy: Vec<String>,
    /// Name of the weight shown in composed tooltips.
    pub attribute: String,
    /// Host channel receiving the selection record on every click.
    pub input: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            link_length: None,
            font_size: 10.0,
            fill: String::from("lightsteelblue"),
            tooltip: false,
            zoomable: true,
            collapsed: Collapsed::default(),
            hierarchy: Vec::new(),
            attribute: String::from("leafCount"),
            input: None,
        }
    }
}

impl Options {
    /// Level-spacing policy implied by `link_length`.
    pub fn link_length_policy(&self) -> LinkLength {
        LinkLength::from_option(self.link_length)
    }

    /// Check values that do not depend on the data.
    pub fn validate(&self) -> Result<(), WidgetError> {
        if let Some(length) = self.link_length
            && !(length.is_finite() && length > 0.0)
        {
            return Err(WidgetError::InvalidConfiguration {
                reason: format!("linkLength must be positive, got {length}"),
            });
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(WidgetError::InvalidConfiguration {
                reason: format!("fontSize must be positive, got {}", self.font_size),
            });
        }
        Ok(())
    }

    /// Check that every level of a tree `max_depth` deep has a label.
    pub fn validate_depth(&self, max_depth: usize) -> Result<(), WidgetError> {
        if self.hierarchy.len() < max_depth {
            return Err(WidgetError::InvalidConfiguration {
                reason: format!(
                    "hierarchy names {} levels but the data is {max_depth} levels deep",
                    self.hierarchy.len()
                ),
            });
        }
        Ok(())
    }
}
