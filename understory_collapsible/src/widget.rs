// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget session: one hierarchy, its options, and the passes it drives.

use core::time::Duration;

use kurbo::{Affine, Point, Size, Vec2};
use understory_hierarchy::{CollapsePolicy, Hierarchy, HostNode, NodeId};
use understory_tree_layout::{ClusterLayout, Layout, LinkLength, inner_size};
use understory_tree_render::{Frame, RenderDriver, RenderStyle};

use crate::data::Payload;
use crate::error::WidgetError;
use crate::host::{Host, Tooltip};
use crate::options::Options;
use crate::selection::{self, SelectionRecord};
use crate::view::{ZoomState, recenter};

/// Fade applied to the tooltip when a node is clicked.
pub const CLICK_TOOLTIP_FADE: Duration = Duration::from_millis(100);
/// Fade applied to the tooltip when the pointer leaves a node.
pub const UNHOVER_TOOLTIP_FADE: Duration = Duration::from_millis(500);

/// State that exists once data has been rendered.
#[derive(Clone, Debug)]
struct Session {
    tree: Hierarchy,
    options: Options,
    link_policy: LinkLength,
    link_length: f64,
    zoom: ZoomState,
    style: RenderStyle,
    selection: Vec<SelectionRecord>,
}

/// A collapsible tree bound to a viewport.
///
/// The widget owns all mutable state explicitly; a host creates one per element, feeds it data
/// with [`Widget::render_value`], and forwards viewport and pointer events to it. Every state
/// change is pushed to the host as a render pass.
#[derive(Clone, Debug)]
pub struct Widget<L = ClusterLayout> {
    viewport: Size,
    layout: L,
    driver: RenderDriver,
    session: Option<Session>,
}

impl Widget {
    /// Create an empty widget for a `width` x `height` viewport, laid out with [`ClusterLayout`].
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_layout(width, height, ClusterLayout::new())
    }
}

impl<L: Layout> Widget<L> {
    /// Create an empty widget using a custom breadth layout.
    pub fn with_layout(width: f64, height: f64, layout: L) -> Self {
        Self {
            viewport: Size::new(width, height),
            layout,
            driver: RenderDriver::new(),
            session: None,
        }
    }

    /// Replace the render driver, e.g. to change the transition duration.
    pub fn with_driver(mut self, driver: RenderDriver) -> Self {
        self.driver = driver;
        self
    }

    /// Decode a JSON payload and render it. See [`Widget::render_value`].
    pub fn render_value_json(
        &mut self,
        json: &str,
        host: &mut impl Host,
    ) -> Result<(), WidgetError> {
        self.render_value(Payload::from_json(json)?, host)
    }

    /// Build a new hierarchy from `payload` and render it.
    ///
    /// The tree is first shown fully expanded so every node takes an identity, then the
    /// `collapsed` option is applied once and the tree is shown again. Later renders never
    /// re-apply it. On error the previous session, if any, is left untouched.
    pub fn render_value(
        &mut self,
        payload: Payload,
        host: &mut impl Host,
    ) -> Result<(), WidgetError> {
        let Payload { data, options } = payload;
        options.validate()?;
        let mut tree = Hierarchy::from_data(HostNode::from(data))?;
        options.validate_depth(tree.max_depth())?;

        tree.seed_identities(self.driver.highest_identity());
        let inner = inner_size(self.viewport, options.margin.into());
        let root = tree.root();
        tree.set_previous_position(root, Point::new(0.0, inner.height / 2.0))?;
        tree.set_selected(root, true)?;

        let link_policy = options.link_length_policy();
        let link_length = link_policy.resolve(inner.width, options.hierarchy.len());
        let style = RenderStyle {
            selected_fill: options.fill.clone(),
            font_size: options.font_size,
            ..RenderStyle::default()
        };
        let mut session = Session {
            tree,
            zoom: ZoomState::new(options.zoomable),
            link_policy,
            link_length,
            style,
            selection: Vec::new(),
            options,
        };

        let frame = Frame {
            extent: inner.height,
            link_length,
        };
        let pass = self
            .driver
            .render(&mut session.tree, &self.layout, frame, &session.style, root)?;
        host.apply(&pass);

        session
            .tree
            .apply_collapse(&CollapsePolicy::from(&session.options.collapsed));
        let pass = self
            .driver
            .render(&mut session.tree, &self.layout, frame, &session.style, root)?;
        host.apply(&pass);

        session.selection = selection::aggregate(&session.tree, &session.options.hierarchy)?;
        tracing::info!(
            nodes = session.tree.len(),
            depth = session.tree.max_depth(),
            link_length,
            responsive = link_policy.is_responsive(),
            "rendered new hierarchy"
        );
        self.session = Some(session);
        Ok(())
    }

    /// Adopt a new viewport size and re-render from the root.
    ///
    /// Responsive link lengths are recomputed; fixed ones are kept.
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        host: &mut impl Host,
    ) -> Result<(), WidgetError> {
        self.viewport = Size::new(width, height);
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let inner = inner_size(self.viewport, session.options.margin.into());
        session.link_length = session
            .link_policy
            .resolve(inner.width, session.options.hierarchy.len());
        let root = session.tree.root();
        let frame = Frame {
            extent: inner.height,
            link_length: session.link_length,
        };
        let pass = self
            .driver
            .render(&mut session.tree, &self.layout, frame, &session.style, root)?;
        host.apply(&pass);
        tracing::info!(width, height, link_length = session.link_length, "resized");
        Ok(())
    }

    /// Handle a click on `node`: toggle it open or closed and in or out of the selection.
    ///
    /// The view is recentered on the node, the tree re-rendered with the node as trigger, and the
    /// recomputed selection record is returned and, when `input` is configured, delivered to the
    /// host as JSON.
    pub fn click(
        &mut self,
        node: NodeId,
        host: &mut impl Host,
    ) -> Result<Vec<SelectionRecord>, WidgetError> {
        let viewport = self.viewport;
        let duration = self.driver.duration();
        let session = self
            .session
            .as_mut()
            .ok_or(WidgetError::StaleStateReference(node))?;
        let tree = &mut session.tree;
        let focus = tree
            .previous_position(node)
            .ok_or(WidgetError::StaleStateReference(node))?;
        let expanded = tree.toggle_expanded(node)?;
        let selected = tree.toggle_selected(node)?;
        let transform = recenter(focus, viewport, session.zoom.scale());
        session.zoom.set_transform(transform);
        host.transition_view(transform, duration);

        let inner = inner_size(viewport, session.options.margin.into());
        let frame = Frame {
            extent: inner.height,
            link_length: session.link_length,
        };
        let pass = self
            .driver
            .render(tree, &self.layout, frame, &session.style, node)?;
        host.apply(&pass);
        host.hide_tooltip(CLICK_TOOLTIP_FADE);

        session.selection = selection::aggregate(tree, &session.options.hierarchy)?;
        if let Some(channel) = &session.options.input {
            host.set_input_value(channel, &selection::to_json(&session.selection)?);
        }
        tracing::debug!(
            ?node,
            expanded,
            selected,
            generation = pass.generation,
            records = session.selection.len(),
            "click"
        );
        Ok(session.selection.clone())
    }

    /// Show the tooltip for `node`, if tooltips are enabled, and return it.
    pub fn hover(
        &self,
        node: NodeId,
        host: &mut impl Host,
    ) -> Result<Option<Tooltip>, WidgetError> {
        let session = self
            .session
            .as_ref()
            .ok_or(WidgetError::StaleStateReference(node))?;
        let tree = &session.tree;
        let name = tree.name(node).ok_or(WidgetError::StaleStateReference(node))?;
        if !session.options.tooltip {
            return Ok(None);
        }
        let text = match (tree.tooltip(node), tree.weight(node)) {
            (Some(text), _) => text.to_owned(),
            (None, Some(weight)) => {
                format!("{name}<br>{}: {weight}", session.options.attribute)
            }
            (None, None) => name.to_owned(),
        };
        let tooltip = Tooltip {
            text,
            anchor: tree.previous_position(node).unwrap_or_default(),
            font_size: session.options.font_size + 1.0,
        };
        host.show_tooltip(&tooltip);
        Ok(Some(tooltip))
    }

    /// Hide the tooltip when the pointer leaves a node.
    pub fn unhover(&self, host: &mut impl Host) {
        if self.session.as_ref().is_some_and(|s| s.options.tooltip) {
            host.hide_tooltip(UNHOVER_TOOLTIP_FADE);
        }
    }

    /// Accept a pan/zoom transform from the host's zoom handler.
    ///
    /// Returns the transform now in effect, or `None` if zooming is disabled or nothing is
    /// rendered.
    pub fn set_zoom(&mut self, translation: Vec2, scale: f64) -> Option<Affine> {
        let zoom = &mut self.session.as_mut()?.zoom;
        zoom.set(translation, scale).then(|| zoom.transform())
    }

    /// The selection record as of the last render or click.
    pub fn selection(&self) -> &[SelectionRecord] {
        self.session.as_ref().map_or(&[], |s| s.selection.as_slice())
    }

    /// The rendered hierarchy.
    pub fn hierarchy(&self) -> Option<&Hierarchy> {
        self.session.as_ref().map(|s| &s.tree)
    }

    /// Options of the current session.
    pub fn options(&self) -> Option<&Options> {
        self.session.as_ref().map(|s| &s.options)
    }

    /// Distance between levels in use.
    pub fn link_length(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.link_length)
    }

    /// Current view transform.
    pub fn view_transform(&self) -> Affine {
        self.session
            .as_ref()
            .map_or(Affine::IDENTITY, |s| s.zoom.transform())
    }

    /// Viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Find the node with the given name along a path of names from the root.
    pub fn find_path(&self, path: &[&str]) -> Option<NodeId> {
        let tree = self.hierarchy()?;
        let mut current = tree.root();
        for name in path {
            current = tree
                .children(current)
                .iter()
                .copied()
                .find(|&c| tree.name(c) == Some(*name))?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use understory_tree_render::Phase;

    use super::*;
    use crate::host::{HostEvent, RecordingHost};

    const DATA: &str = r#"{
        "data": {
            "name": "root",
            "children": [
                {"name": "A", "WeightOfNode": 4, "children": [{"name": "A1"}, {"name": "A2"}]},
                {"name": "B", "tooltip": "custom"}
            ]
        },
        "options": {
            "hierarchy": ["L1", "L2"],
            "collapsed": true,
            "tooltip": true,
            "input": "picked"
        }
    }"#;

    fn rendered() -> (Widget, RecordingHost) {
        let mut widget = Widget::new(640.0, 480.0);
        let mut host = RecordingHost::default();
        widget.render_value_json(DATA, &mut host).unwrap();
        (widget, host)
    }

    #[test]
    fn render_value_emits_expanded_then_collapsed_pass() {
        let (widget, host) = rendered();
        let passes: Vec<_> = host.passes().collect();
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].nodes_in(Phase::Enter).count(), 5);
        assert_eq!(passes[1].nodes_in(Phase::Exit).count(), 2);
        assert_eq!(passes[1].visible_identities().count(), 3);
        assert!(widget.selection().is_empty());
    }

    #[test]
    fn short_hierarchy_labels_are_rejected() {
        let mut widget = Widget::new(640.0, 480.0);
        let mut host = RecordingHost::default();
        let err = widget
            .render_value_json(
                r#"{"data": {"name": "r", "children": [{"name": "a", "children": [{"name": "b"}]}]},
                    "options": {"hierarchy": ["only"]}}"#,
                &mut host,
            )
            .unwrap_err();
        assert!(matches!(err, WidgetError::InvalidConfiguration { .. }));
        assert!(host.events.is_empty());
        assert!(widget.hierarchy().is_none());
    }

    #[test]
    fn click_delivers_selection_to_input_channel() {
        let (mut widget, mut host) = rendered();
        let a = widget.find_path(&["A"]).unwrap();
        let records = widget.click(a, &mut host).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "A");
        let json = host.last_input("picked").unwrap();
        assert_eq!(
            serde_json::from_str::<Vec<SelectionRecord>>(json).unwrap(),
            records
        );
        assert!(matches!(
            host.events.last(),
            Some(HostEvent::Input { .. })
        ));
        assert!(host
            .events
            .contains(&HostEvent::HideTooltip(CLICK_TOOLTIP_FADE)));
    }

    #[test]
    fn click_recenters_on_clicked_node() {
        let (mut widget, mut host) = rendered();
        let a = widget.find_path(&["A"]).unwrap();
        let before = widget.hierarchy().unwrap().previous_position(a).unwrap();
        widget.click(a, &mut host).unwrap();
        let view = host
            .events
            .iter()
            .find_map(|e| match e {
                HostEvent::View(t, d) => Some((*t, *d)),
                _ => None,
            })
            .unwrap();
        assert_eq!(view.1, widget.driver.duration());
        let p = view.0 * before;
        assert!((p.x - 640.0 / 6.0).abs() < 1e-9);
        assert!((p.y - 240.0).abs() < 1e-9);
        assert_eq!(widget.view_transform(), view.0);
    }

    #[test]
    fn click_on_stale_node_fails() {
        let (mut widget, mut host) = rendered();
        let other = Hierarchy::from_data(HostNode::new("x").with_children(
            (0..10).map(|i| HostNode::new(format!("n{i}"))),
        ))
        .unwrap();
        let far = other.children(other.root())[9];
        let err = widget.click(far, &mut host).unwrap_err();
        assert!(matches!(err, WidgetError::StaleStateReference(id) if id == far));

        let mut empty = Widget::new(100.0, 100.0);
        assert!(empty.click(far, &mut host).is_err());
    }

    #[test]
    fn handles_do_not_survive_new_data() {
        let (mut widget, mut host) = rendered();
        let a = widget.find_path(&["A"]).unwrap();
        widget.click(a, &mut host).unwrap();
        let old_a1 = widget.find_path(&["A", "A1"]).unwrap();

        widget
            .render_value_json(
                r#"{"data": {"name": "X", "children": [
                    {"name": "P"}, {"name": "Q"}, {"name": "R"}, {"name": "S"}
                ]}, "options": {"hierarchy": ["L1"]}}"#,
                &mut host,
            )
            .unwrap();
        let events = host.events.len();
        let err = widget.click(old_a1, &mut host).unwrap_err();
        assert!(matches!(err, WidgetError::StaleStateReference(id) if id == old_a1));
        assert!(widget.hover(old_a1, &mut host).is_err());
        assert_eq!(host.events.len(), events);

        let tree = widget.hierarchy().unwrap();
        assert!(
            tree.visible_nodes()
                .into_iter()
                .all(|id| tree.depth(id) == Some(0) || !tree.is_selected(id))
        );
        assert!(widget.selection().is_empty());
    }

    #[test]
    fn failed_click_leaves_state_alone() {
        let (mut widget, mut host) = rendered();
        let states = |widget: &Widget| {
            let tree = widget.hierarchy().unwrap();
            let mut all = vec![tree.root()];
            let mut i = 0;
            while i < all.len() {
                all.extend_from_slice(tree.children(all[i]));
                i += 1;
            }
            all.into_iter().map(|id| tree.state(id)).collect::<Vec<_>>()
        };
        let before = states(&widget);
        let events = host.events.len();
        let foreign = Hierarchy::from_data(HostNode::new("x")).unwrap().root();
        assert!(widget.click(foreign, &mut host).is_err());
        assert_eq!(states(&widget), before);
        assert_eq!(host.events.len(), events);
    }

    #[test]
    fn hover_composes_or_overrides_tooltip_text() {
        let (widget, mut host) = rendered();
        let a = widget.find_path(&["A"]).unwrap();
        let b = widget.find_path(&["B"]).unwrap();
        let tip = widget.hover(a, &mut host).unwrap().unwrap();
        assert_eq!(tip.text, "A<br>leafCount: 4");
        assert_eq!(tip.font_size, 11.0);
        assert_eq!(widget.hover(b, &mut host).unwrap().unwrap().text, "custom");
        widget.unhover(&mut host);
        assert_eq!(
            host.events.last(),
            Some(&HostEvent::HideTooltip(UNHOVER_TOOLTIP_FADE))
        );
    }

    #[test]
    fn hover_is_silent_without_tooltips() {
        let mut widget = Widget::new(400.0, 300.0);
        let mut host = RecordingHost::default();
        widget
            .render_value_json(r#"{"data": {"name": "r"}}"#, &mut host)
            .unwrap();
        let root = widget.find_path(&[]).unwrap();
        assert_eq!(widget.hover(root, &mut host).unwrap(), None);
        widget.unhover(&mut host);
        assert!(
            !host
                .events
                .iter()
                .any(|e| matches!(e, HostEvent::ShowTooltip(_) | HostEvent::HideTooltip(_)))
        );
    }

    #[test]
    fn zoom_respects_option() {
        let (mut widget, _) = rendered();
        let t = widget.set_zoom(Vec2::new(3.0, 4.0), 10.0).unwrap();
        assert_eq!(t.as_coeffs()[0], 5.0);

        let mut fixed = Widget::new(400.0, 300.0);
        let mut host = RecordingHost::default();
        fixed
            .render_value_json(
                r#"{"data": {"name": "r"}, "options": {"zoomable": false}}"#,
                &mut host,
            )
            .unwrap();
        assert_eq!(fixed.set_zoom(Vec2::ZERO, 2.0), None);
        assert_eq!(fixed.view_transform(), Affine::IDENTITY);
    }

    #[test]
    fn second_render_value_never_reuses_identities() {
        let (mut widget, mut host) = rendered();
        let old: Vec<u32> = host.last_pass().unwrap().visible_identities().collect();
        widget.render_value_json(DATA, &mut host).unwrap();
        let first_new = host.passes().nth(2).unwrap();
        for identity in first_new.nodes_in(Phase::Enter).map(|n| n.identity) {
            assert!(!old.contains(&identity));
        }
        assert_eq!(first_new.nodes_in(Phase::Exit).count(), old.len());
    }
}
