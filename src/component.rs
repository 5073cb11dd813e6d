//! Component model: kinds, pin geometry and per-component interaction state.
//!
//! Every component carries its connection points in world space. They are
//! derived from `(kind, position, rotation)` and rebuilt inside each mutator
//! that touches position or rotation, so reads never see stale geometry.

#[cfg(test)]
#[path = "component_test.rs"]
mod component_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LayoutError;
use crate::geom::{self, Point, Rect};

/// Unique identifier for a component on the canvas.
pub type ComponentId = Uuid;

/// The fixed set of placeable component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Resistor,
    Led,
    VoltageSource,
    Capacitor,
    Diode,
    Transistor,
    Inductor,
    CurrentSource,
    /// The perforated prototyping board. Never wireable.
    Board,
}

impl ComponentKind {
    /// Every kind, in palette order.
    pub const ALL: [ComponentKind; 9] = [
        Self::Resistor,
        Self::Led,
        Self::VoltageSource,
        Self::Capacitor,
        Self::Diode,
        Self::Transistor,
        Self::Inductor,
        Self::CurrentSource,
        Self::Board,
    ];

    /// Palette name, as used for asset lookup and creation requests.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resistor => "resistor",
            Self::Led => "led",
            Self::VoltageSource => "voltage source",
            Self::Capacitor => "capacitor",
            Self::Diode => "diode",
            Self::Transistor => "transistor",
            Self::Inductor => "inductor",
            Self::CurrentSource => "current source",
            Self::Board => "board",
        }
    }

    /// Pin offsets relative to the component origin at zero rotation.
    #[must_use]
    pub fn local_pins(self) -> &'static [(f64, f64)] {
        match self {
            Self::Resistor => &[(-40.0, 0.0), (40.0, 0.0)],
            Self::Led => &[(-11.0, 8.0), (11.0, 8.0)],
            Self::VoltageSource => &[(-28.0, -5.0), (28.0, -5.0)],
            Self::Capacitor => &[(-27.0, -4.0), (27.0, -4.0)],
            Self::Diode => &[(-40.0, -4.0), (40.0, -4.0)],
            Self::Transistor => &[(-20.0, 0.0), (20.0, 0.0)],
            Self::Inductor => &[(-36.0, 0.0), (36.0, 0.0)],
            Self::CurrentSource => &[(-30.0, -3.0), (30.0, -3.0)],
            Self::Board => &[],
        }
    }

    #[must_use]
    pub fn pin_count(self) -> usize {
        self.local_pins().len()
    }

    #[must_use]
    pub fn is_board(self) -> bool {
        self == Self::Board
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        if wanted == "breadboard" {
            return Ok(Self::Board);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| LayoutError::UnknownKind(s.to_string()))
    }
}

/// A component's attachment location in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectionPoint {
    pub pos: Point,
    /// The component this pin belongs to.
    pub owner: ComponentId,
    /// Stable per-kind pin index.
    pub index: usize,
}

/// A placed component.
#[derive(Debug, Clone)]
pub struct Component {
    id: ComponentId,
    kind: ComponentKind,
    pos: Point,
    rotation: f64,
    selected: bool,
    dragging: bool,
    pins: Vec<ConnectionPoint>,
}

impl Component {
    /// Create a component of `kind` centered at `(x, y)` with a fresh id.
    #[must_use]
    pub fn new(kind: ComponentKind, x: f64, y: f64) -> Self {
        Self::with_id(Uuid::new_v4(), kind, x, y)
    }

    /// Create a component with a caller-chosen id.
    #[must_use]
    pub fn with_id(id: ComponentId, kind: ComponentKind, x: f64, y: f64) -> Self {
        let mut c = Self {
            id,
            kind,
            pos: Point::new(x, y),
            rotation: 0.0,
            selected: false,
            dragging: false,
            pins: Vec::with_capacity(kind.pin_count()),
        };
        c.compute_pins();
        c
    }

    /// Re-derive world pin positions from kind, position and rotation.
    pub fn compute_pins(&mut self) {
        let (id, origin, rotation) = (self.id, self.pos, self.rotation);
        self.pins.clear();
        self.pins.extend(
            self.kind
                .local_pins()
                .iter()
                .enumerate()
                .map(|(index, &offset)| ConnectionPoint { pos: geom::rotate_offset(origin, offset, rotation), owner: id, index }),
        );
    }

    /// Set the origin and recompute pins.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pos = Point::new(x, y);
        self.compute_pins();
    }

    /// Add `delta` degrees, normalize into `[0, 360)` and recompute pins.
    pub fn rotate(&mut self, delta: f64) {
        self.rotation = geom::normalize_degrees(self.rotation + delta);
        self.compute_pins();
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    #[must_use]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Rotation in degrees, always in `[0, 360)`.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[must_use]
    pub fn pins(&self) -> &[ConnectionPoint] {
        &self.pins
    }

    #[must_use]
    pub fn pin(&self, index: usize) -> Option<&ConnectionPoint> {
        self.pins.get(index)
    }

    /// Body hit-test: `|dx| < half_extent && |dy| < half_extent` around the origin.
    #[must_use]
    pub fn contains_point(&self, p: Point, half_extent: f64) -> bool {
        (p.x - self.pos.x).abs() < half_extent && (p.y - self.pos.y).abs() < half_extent
    }

    /// Unrotated icon box of `width` × `height` centered on the origin.
    #[must_use]
    pub fn bounds(&self, width: f64, height: f64) -> Rect {
        Rect::centered(self.pos, width, height)
    }
}
