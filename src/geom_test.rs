#![allow(clippy::float_cmp)]

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Point
// =============================================================

#[test]
fn distance_is_euclidean() {
    assert!(approx(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn sub_is_componentwise() {
    assert_eq!(Point::new(5.0, 7.0).sub(Point::new(2.0, 10.0)), Point::new(3.0, -3.0));
}

// =============================================================
// Rect
// =============================================================

#[test]
fn from_corners_normalizes_any_drag_direction() {
    let r = Rect::from_corners(Point::new(200.0, 10.0), Point::new(10.0, 200.0));
    assert_eq!(r.min, Point::new(10.0, 10.0));
    assert_eq!(r.max, Point::new(200.0, 200.0));
    assert_eq!(r.width(), 190.0);
    assert_eq!(r.height(), 190.0);
}

#[test]
fn centered_spans_half_extents() {
    let r = Rect::centered(Point::new(100.0, 50.0), 80.0, 40.0);
    assert_eq!(r.min, Point::new(60.0, 30.0));
    assert_eq!(r.max, Point::new(140.0, 70.0));
}

#[test]
fn strict_containment_rejects_shared_edge() {
    let outer = Rect::from_corners(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
    let inside = Rect::from_corners(Point::new(1.0, 1.0), Point::new(99.0, 99.0));
    let touching = Rect::from_corners(Point::new(0.0, 1.0), Point::new(99.0, 99.0));
    assert!(outer.strictly_contains_rect(&inside));
    assert!(!outer.strictly_contains_rect(&touching));
}

#[test]
fn strict_containment_rejects_overlap() {
    let outer = Rect::from_corners(Point::new(10.0, 10.0), Point::new(200.0, 200.0));
    let overlapping = Rect::from_corners(Point::new(195.0, 50.0), Point::new(275.0, 90.0));
    assert!(!outer.strictly_contains_rect(&overlapping));
}

// =============================================================
// Angles
// =============================================================

#[test]
fn normalize_wraps_positive_and_negative() {
    assert_eq!(normalize_degrees(370.0), 10.0);
    assert_eq!(normalize_degrees(-10.0), 350.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(-720.0), 0.0);
}

#[test]
fn normalize_never_returns_360() {
    let r = normalize_degrees(-1e-18);
    assert!((0.0..360.0).contains(&r));
}

// =============================================================
// rotate_offset
// =============================================================

#[test]
fn rotate_zero_is_translation() {
    let p = rotate_offset(Point::new(10.0, 20.0), (-40.0, 5.0), 0.0);
    assert!(approx(p.x, -30.0));
    assert!(approx(p.y, 25.0));
}

#[test]
fn rotate_quarter_turn_maps_x_to_y() {
    let p = rotate_offset(Point::new(0.0, 0.0), (40.0, 0.0), 90.0);
    assert!(approx(p.x, 0.0));
    assert!(approx(p.y, 40.0));
}

#[test]
fn rotate_half_turn_negates_offset() {
    let p = rotate_offset(Point::new(100.0, 100.0), (11.0, 8.0), 180.0);
    assert!(approx(p.x, 89.0));
    assert!(approx(p.y, 92.0));
}

#[test]
fn rotate_preserves_distance_from_origin() {
    let origin = Point::new(3.0, -7.0);
    for deg in [15.0, 45.0, 137.0, 301.0] {
        let p = rotate_offset(origin, (-28.0, -5.0), deg);
        assert!(approx(p.distance(origin), 28.0_f64.hypot(5.0)));
    }
}
