//! Point-to-point wires between component pins.
//!
//! A wire stores only `(component, pin)` references. Endpoint positions are
//! looked up from the owning components whenever they are needed, so a wire
//! always follows its components through moves and rotations.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::component::ComponentId;
use crate::consts::DEFAULT_WIRE_COLOR;
use crate::geom::Point;
use crate::layout::Layout;

/// Unique identifier for a wire.
pub type WireId = Uuid;

/// A `(component, pin index)` pair naming one connection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinRef {
    pub component: ComponentId,
    pub pin: usize,
}

impl PinRef {
    #[must_use]
    pub fn new(component: ComponentId, pin: usize) -> Self {
        Self { component, pin }
    }

    /// Current world position of this pin, if the component and pin exist.
    #[must_use]
    pub fn resolve(&self, layout: &Layout) -> Option<Point> {
        layout.component(self.component)?.pin(self.pin).map(|p| p.pos)
    }
}

/// An edge between two pins.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub id: WireId,
    pub start: PinRef,
    pub end: PinRef,
    /// Stroke color; irrelevant to topology.
    pub color: String,
}

impl Wire {
    /// Build a wire. Endpoints are not validated; see [`Wire::endpoints`].
    #[must_use]
    pub fn new(start: PinRef, end: PinRef) -> Self {
        Self { id: Uuid::new_v4(), start, end, color: DEFAULT_WIRE_COLOR.to_string() }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Whether either endpoint belongs to `component`.
    #[must_use]
    pub fn touches(&self, component: ComponentId) -> bool {
        self.start.component == component || self.end.component == component
    }

    /// Both endpoints start and end on the same pin.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }

    /// Fresh world positions of both endpoints, or `None` for a malformed wire
    /// (missing component or out-of-range pin).
    #[must_use]
    pub fn endpoints(&self, layout: &Layout) -> Option<(Point, Point)> {
        Some((self.start.resolve(layout)?, self.end.resolve(layout)?))
    }
}
