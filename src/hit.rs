//! Hit-testing against the layout: pins first, then component bodies.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::component::ComponentId;
use crate::geom::Point;
use crate::layout::Layout;
use crate::wire::PinRef;

/// Which part of the layout was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A connection point of a non-board component.
    Pin(PinRef),
    /// The body of a component (the board included).
    Body(ComponentId),
}

/// First pin within `radius` of `p`, scanning components then pins in order.
/// Board components are never hit.
#[must_use]
pub fn pin_at(layout: &Layout, p: Point, radius: f64) -> Option<PinRef> {
    layout
        .components()
        .iter()
        .filter(|c| !c.kind().is_board())
        .flat_map(|c| c.pins().iter())
        .find(|pin| pin.pos.distance(p) < radius)
        .map(|pin| PinRef::new(pin.owner, pin.index))
}

/// First component whose body square contains `p`.
#[must_use]
pub fn component_at(layout: &Layout, p: Point, half_extent: f64) -> Option<ComponentId> {
    layout.components().iter().find(|c| c.contains_point(p, half_extent)).map(crate::component::Component::id)
}

/// Test what is under `p` using the layout's configured radii. Pins win over bodies.
#[must_use]
pub fn hit_test(layout: &Layout, p: Point) -> Option<Hit> {
    let cfg = layout.config();
    if let Some(pin) = pin_at(layout, p, cfg.pick_radius) {
        return Some(Hit::Pin(pin));
    }
    component_at(layout, p, cfg.body_half_extent).map(Hit::Body)
}
