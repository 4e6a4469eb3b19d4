// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless collapsible tree: print every pass a host would animate.
//!
//! This example shows how to:
//! - feed a `{data, options}` payload to `understory_collapsible::Widget`,
//! - implement `Host` to receive render passes, view transitions, and selection records,
//! - drive clicks and resizes.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_collapsible_demos --example collapsible_tree`

use core::time::Duration;

use kurbo::Affine;
use tracing_subscriber::EnvFilter;
use understory_collapsible::{Host, Tooltip, Widget};
use understory_tree_render::{Phase, RenderPass, Scene};

const PAYLOAD: &str = r#"{
    "data": {
        "name": "Species",
        "children": [
            {"name": "Mammals", "WeightOfNode": 3, "children": [
                {"name": "Cats", "SizeOfNode": 36},
                {"name": "Dogs", "SizeOfNode": 49},
                {"name": "Whales", "SizeOfNode": 100}
            ]},
            {"name": "Birds", "WeightOfNode": 2, "children": [
                {"name": "Owls"},
                {"name": "Penguins", "tooltip": "Flightless"}
            ]}
        ]
    },
    "options": {
        "hierarchy": ["Class", "Family"],
        "collapsed": true,
        "tooltip": true,
        "attribute": "families",
        "input": "species_pick"
    }
}"#;

/// Prints what it is asked to do instead of drawing it.
struct PrintingHost;

impl Scene for PrintingHost {
    fn apply(&mut self, pass: &RenderPass) {
        println!(
            "pass #{} ({:?}): {} enter, {} update, {} exit",
            pass.generation,
            pass.duration,
            pass.nodes_in(Phase::Enter).count(),
            pass.nodes_in(Phase::Update).count(),
            pass.nodes_in(Phase::Exit).count(),
        );
        for node in &pass.nodes {
            println!(
                "  {:?} {:>10} #{:<2} ({:6.1}, {:6.1}) -> ({:6.1}, {:6.1}) fill {}",
                node.phase,
                node.label,
                node.identity,
                node.from.x,
                node.from.y,
                node.to.x,
                node.to.y,
                node.style.fill,
            );
        }
    }
}

impl Host for PrintingHost {
    fn transition_view(&mut self, transform: Affine, duration: Duration) {
        println!("view -> {:?} over {duration:?}", transform.as_coeffs());
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        println!("tooltip {:?} at {:?}", tooltip.text, tooltip.anchor);
    }

    fn hide_tooltip(&mut self, fade: Duration) {
        println!("tooltip hidden over {fade:?}");
    }

    fn set_input_value(&mut self, channel: &str, value: &str) {
        println!("input {channel} = {value}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut host = PrintingHost;
    let mut widget = Widget::new(960.0, 480.0);
    widget.render_value_json(PAYLOAD, &mut host)?;

    let mammals = widget.find_path(&["Mammals"]).ok_or("no Mammals node")?;
    widget.hover(mammals, &mut host)?;
    widget.unhover(&mut host);

    println!("\n-- expand Mammals");
    widget.click(mammals, &mut host)?;

    let whales = widget
        .find_path(&["Mammals", "Whales"])
        .ok_or("no Whales node")?;
    println!("\n-- select Whales");
    let records = widget.click(whales, &mut host)?;
    for record in &records {
        println!("  {} / {} = {}", record.parent, record.level, record.value);
    }

    println!("\n-- resize");
    widget.resize(1280.0, 720.0, &mut host)?;

    println!("\n-- collapse Mammals");
    widget.click(mammals, &mut host)?;
    Ok(())
}
