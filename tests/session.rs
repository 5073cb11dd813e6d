//! End-to-end sessions driven through the public engine API.

use std::sync::Once;

use protoboard::board::HoleRef;
use protoboard::component::{ComponentId, ComponentKind};
use protoboard::config::LayoutConfig;
use protoboard::engine::{Action, EngineCore};
use protoboard::geom::Point;
use protoboard::input::{Button, Key, Modifiers};
use protoboard::topology::{Node, Topology};
use protoboard::wire::PinRef;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::DEBUG).init();
    });
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn place(core: &mut EngineCore, kind: ComponentKind, x: f64, y: f64) -> ComponentId {
    match core.add_component_at(kind, pt(x, y)).first() {
        Some(Action::ComponentAdded { id, .. }) => *id,
        other => panic!("expected ComponentAdded, got {other:?}"),
    }
}

fn pin(c: ComponentId, i: usize) -> Node {
    Node::Pin(PinRef::new(c, i))
}

#[test]
fn breadboard_session() {
    init_tracing();
    let mut core = EngineCore::with_config(LayoutConfig::default());
    core.set_viewport(800.0, 600.0, 1.0);
    let no_mods = Modifiers::default();

    let board = place(&mut core, ComponentKind::Board, 0.0, 0.0);
    let r = place(&mut core, ComponentKind::Resistor, 90.0, 50.0);
    let led = place(&mut core, ComponentKind::Led, 300.0, 400.0);

    let holes = core.layout.insert_pins(r).unwrap();
    assert_eq!(holes, vec![HoleRef::new(2, 0), HoleRef::new(2, 5)]);

    // Wire resistor pin 1 to LED pin 0 with a drag.
    core.on_pointer_down(pt(130.0, 50.0), Button::Primary, no_mods);
    core.on_pointer_move(pt(200.0, 200.0), no_mods);
    let up = core.on_pointer_up(pt(289.0, 408.0), Button::Primary, no_mods);
    assert!(up.iter().any(|a| matches!(a, Action::WireCreated(_))));

    let topo = Topology::build(core.layout());
    assert!(topo.connected(pin(r, 0), Node::Hole(HoleRef::new(2, 0))));
    assert!(topo.connected(pin(r, 1), pin(led, 0)));
    assert!(topo.connected(pin(r, 0), pin(led, 0)));
    assert!(!topo.connected(pin(led, 0), pin(led, 1)));

    // Select the board by its body and delete it.
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_mods);
    core.on_pointer_up(pt(10.0, 10.0), Button::Primary, no_mods);
    assert_eq!(core.selection(), &[board]);
    let deleted = core.on_key_down(Key::new("Delete"), no_mods);
    assert!(deleted.iter().any(|a| matches!(a, Action::Deleted { components, wires }
        if components == &vec![board] && wires.is_empty())));

    assert!(core.layout().board().is_none());
    assert_eq!(core.layout().wires().len(), 1);

    let topo = Topology::build(core.layout());
    assert!(!topo.connected(pin(r, 0), pin(r, 1)));
    assert!(topo.connected(pin(r, 1), pin(led, 0)));
}

#[test]
fn deleting_a_wired_component_takes_its_wires() {
    init_tracing();
    let mut core = EngineCore::with_config(LayoutConfig::default());
    let no_mods = Modifiers::default();
    let a = place(&mut core, ComponentKind::Capacitor, 100.0, 100.0);
    let b = place(&mut core, ComponentKind::Inductor, 300.0, 100.0);
    core.layout.connect(PinRef::new(a, 1), PinRef::new(b, 0));
    core.layout.connect(PinRef::new(b, 1), PinRef::new(b, 0));

    core.on_pointer_down(pt(300.0, 100.0), Button::Primary, no_mods);
    core.on_pointer_up(pt(300.0, 100.0), Button::Primary, no_mods);
    core.on_key_down(Key::new("Backspace"), no_mods);

    assert!(core.layout().wires().is_empty());
    assert_eq!(core.layout().components().len(), 1);
    assert!(core.layout().component(a).is_some());
}

#[test]
fn summary_reports_layout_as_json() {
    init_tracing();
    let mut core = EngineCore::with_config(LayoutConfig::default());
    place(&mut core, ComponentKind::Board, 0.0, 0.0);
    let r = place(&mut core, ComponentKind::Resistor, 90.0, 50.0);
    core.layout.insert_pins(r).unwrap();

    let json = core.layout().summary().to_json();
    assert_eq!(json["has_board"], true);
    assert_eq!(json["occupied_holes"], 2);
    assert_eq!(json["wire_count"], 0);
    assert_eq!(json["components"][1]["kind"], "resistor");
}
