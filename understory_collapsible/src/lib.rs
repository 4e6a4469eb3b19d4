// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collapsible --heading-base-level=0

//! Understory Collapsible: an interactive, collapsible node-link tree for embedding in a host page.
//!
//! A [`Widget`] turns nested host data into a [`understory_hierarchy::Hierarchy`], lays it out,
//! and drives [`understory_tree_render`] passes into a [`Host`]. Clicking a node expands or
//! collapses it and toggles it in or out of the selection; after every click the widget reports
//! the selected paths as a list of [`SelectionRecord`]s.
//!
//! ## Lifecycle
//!
//! - [`Widget::render_value`] (or [`Widget::render_value_json`]) builds the hierarchy from a
//!   [`Payload`] of data and [`Options`], renders it fully expanded, applies the `collapsed`
//!   option once, and renders again.
//! - [`Widget::resize`] adopts a new viewport. A responsive link length follows it; one fixed by
//!   the `linkLength` option does not.
//! - [`Widget::click`], [`Widget::hover`], [`Widget::unhover`], and [`Widget::set_zoom`] forward
//!   pointer and zoom input.
//!
//! ```rust
//! use understory_collapsible::{RecordingHost, Widget};
//!
//! let mut widget = Widget::new(800.0, 400.0);
//! let mut host = RecordingHost::default();
//! widget
//!     .render_value_json(
//!         r#"{
//!             "data": {"name": "World", "children": [
//!                 {"name": "Europe", "children": [{"name": "France"}, {"name": "Spain"}]},
//!                 {"name": "Asia"}
//!             ]},
//!             "options": {"hierarchy": ["Continent", "Country"], "input": "picked"}
//!         }"#,
//!         &mut host,
//!     )
//!     .unwrap();
//!
//! let europe = widget.find_path(&["Europe"]).unwrap();
//! let records = widget.click(europe, &mut host).unwrap();
//! assert_eq!(records[0].level, "Continent");
//! assert_eq!(records[0].value, "Europe");
//! assert!(host.last_input("picked").unwrap().contains("\"parent\":\"World\""));
//! ```
//!
//! ## Logging
//!
//! The widget emits `tracing` events: `info` for new data and resizes, `debug` for clicks and
//! for each render pass. Install a subscriber in the host to see them.

mod data;
mod error;
mod host;
mod options;
mod selection;
mod view;
mod widget;

pub use data::{NodeData, Payload};
pub use error::WidgetError;
pub use host::{Host, HostEvent, RecordingHost, Tooltip};
pub use options::{Collapsed, Margin, Options};
pub use selection::{SelectionRecord, aggregate, to_json};
pub use view::{MAX_SCALE, MIN_SCALE, ZoomState, recenter};
pub use widget::{CLICK_TOOLTIP_FADE, UNHOVER_TOOLTIP_FADE, Widget};
