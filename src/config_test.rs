#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_constants() {
    let cfg = LayoutConfig::default();
    assert_eq!(cfg.pick_radius, 10.0);
    assert_eq!(cfg.hole_capture_radius, 15.0);
    assert_eq!(cfg.body_half_extent, 40.0);
    assert_eq!(cfg.component_width, 80.0);
    assert_eq!(cfg.component_height, 40.0);
    assert_eq!(cfg.fine_rotate_step, 15.0);
    assert_eq!(cfg.coarse_rotate_step, 45.0);
    assert_eq!(cfg.board.rows, 20);
    assert_eq!(cfg.board.cols, 30);
    assert_eq!(cfg.board.pitch, 15.0);
    assert_eq!(cfg.board.rail_offset, 30.0);
}

#[test]
fn empty_lookup_yields_defaults() {
    assert_eq!(LayoutConfig::from_lookup(|_| None), LayoutConfig::default());
}

#[test]
fn lookup_overrides_known_keys() {
    let cfg = LayoutConfig::from_lookup(lookup_from(&[
        ("PROTOBOARD_PICK_RADIUS", "12.5"),
        ("PROTOBOARD_HOLE_CAPTURE_RADIUS", "8"),
        ("PROTOBOARD_BOARD_ROWS", "5"),
        ("PROTOBOARD_BOARD_COLS", " 10 "),
        ("PROTOBOARD_BOARD_PITCH", "2.54"),
    ]));
    assert_eq!(cfg.pick_radius, 12.5);
    assert_eq!(cfg.hole_capture_radius, 8.0);
    assert_eq!(cfg.board.rows, 5);
    assert_eq!(cfg.board.cols, 10);
    assert_eq!(cfg.board.pitch, 2.54);
    assert_eq!(cfg.board.rail_offset, 30.0);
}

#[test]
fn unparsable_values_fall_back() {
    let cfg = LayoutConfig::from_lookup(lookup_from(&[
        ("PROTOBOARD_PICK_RADIUS", "wide"),
        ("PROTOBOARD_BOARD_ROWS", "-3"),
    ]));
    assert_eq!(cfg.pick_radius, 10.0);
    assert_eq!(cfg.board.rows, 20);
}
