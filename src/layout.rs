//! Layout: the single owning context for components, wires, the board and the selection set.
//!
//! DESIGN
//! ======
//! Everything that can reference a component (wire endpoints, hole occupants,
//! the selection set) holds its [`ComponentId`], never the component itself.
//! `Layout` is the only place those relations are mutated, which is what keeps
//! them consistent:
//! - a component's `selected` flag flips only together with selection-set
//!   membership;
//! - moving the board component relocates the hole grid in the same call;
//! - hole entries recorded for individual pins follow the pins: every move or
//!   rotation re-seats them under the pins' new positions;
//! - removing components first releases their holes, then drops their wires,
//!   and only then drops the components.
//!
//! A board lives here twice: as a [`ComponentKind::Board`] component (so it
//! can be selected, dragged and deleted like anything else) and as the
//! [`Board`] grid whose origin follows that component.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::board::{Board, HoleRef, Occupant};
use crate::component::{Component, ComponentId, ComponentKind};
use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::geom::{Point, Rect};
use crate::wire::{PinRef, Wire, WireId};

/// What a cascade deletion removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Removed {
    pub components: Vec<ComponentId>,
    pub wires: Vec<WireId>,
    pub released_holes: usize,
}

impl Removed {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.wires.is_empty() && self.released_holes == 0
    }
}

/// Read-only snapshot for status readouts.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSummary {
    pub components: Vec<ComponentSummary>,
    pub wire_count: usize,
    pub selected: Vec<ComponentId>,
    pub has_board: bool,
    pub occupied_holes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentSummary {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub selected: bool,
}

impl LayoutSummary {
    /// JSON form of the summary.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// The component collection, wire collection, board and selection set.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    config: LayoutConfig,
    components: Vec<Component>,
    wires: Vec<Wire>,
    board: Option<Board>,
    board_component: Option<ComponentId>,
    selection: Vec<ComponentId>,
}

impl Layout {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Components in insertion order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id() == id)
    }

    #[must_use]
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    #[must_use]
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == id)
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Id of the board's component entry, if a board is present.
    #[must_use]
    pub fn board_component(&self) -> Option<ComponentId> {
        self.board_component
    }

    /// Selected component ids in selection order.
    #[must_use]
    pub fn selection(&self) -> &[ComponentId] {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, id: ComponentId) -> bool {
        self.selection.contains(&id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    // --- Creation ---

    /// Add a component of `kind` centered at `at`.
    ///
    /// # Errors
    ///
    /// `BoardAlreadyPresent` when adding a second board.
    pub fn add_component(&mut self, kind: ComponentKind, at: Point) -> Result<ComponentId, LayoutError> {
        if kind.is_board() && self.board.is_some() {
            warn!("rejected second board");
            return Err(LayoutError::BoardAlreadyPresent);
        }
        let component = Component::new(kind, at.x, at.y);
        let id = component.id();
        if kind.is_board() {
            self.board = Some(Board::new(at, &self.config.board));
            self.board_component = Some(id);
        }
        self.components.push(component);
        info!(%id, %kind, x = at.x, y = at.y, "component added");
        Ok(id)
    }

    /// Add a component by palette name.
    ///
    /// # Errors
    ///
    /// `UnknownKind` for names outside the palette; `BoardAlreadyPresent` as
    /// for [`Layout::add_component`].
    pub fn add_named(&mut self, name: &str, at: Point) -> Result<ComponentId, LayoutError> {
        let kind = name.parse::<ComponentKind>()?;
        self.add_component(kind, at)
    }

    // --- Geometry ---

    /// Move a component's origin. Pins, and the hole grid for a board, follow.
    /// Pins seated in board holes are re-seated at the new position.
    /// Returns false if the component does not exist.
    pub fn move_component(&mut self, id: ComponentId, to: Point) -> bool {
        let Some(c) = self.component_mut(id) else {
            return false;
        };
        c.move_to(to.x, to.y);
        if self.board_component == Some(id) {
            if let Some(board) = self.board.as_mut() {
                board.relocate(to);
            }
            let seated: Vec<ComponentId> = self
                .board
                .as_ref()
                .map(|b| self.components.iter().map(Component::id).filter(|&other| b.holds_pins_of(other)).collect())
                .unwrap_or_default();
            for other in seated {
                self.reseat_pins(other);
            }
        } else {
            self.reseat_pins(id);
        }
        true
    }

    /// Rotate a component by `delta` degrees. Returns the new rotation, or
    /// `None` if the component is missing or is the board.
    pub fn rotate_component(&mut self, id: ComponentId, delta: f64) -> Option<f64> {
        let c = self.component_mut(id)?;
        if c.kind().is_board() {
            return None;
        }
        c.rotate(delta);
        let rotation = c.rotation();
        self.reseat_pins(id);
        Some(rotation)
    }

    pub fn set_dragging(&mut self, id: ComponentId, dragging: bool) {
        if let Some(c) = self.component_mut(id) {
            c.set_dragging(dragging);
        }
    }

    // --- Selection ---

    /// Add `id` to the selection. Returns false if it is missing or already selected.
    pub fn select(&mut self, id: ComponentId) -> bool {
        if self.is_selected(id) {
            return false;
        }
        let Some(c) = self.component_mut(id) else {
            return false;
        };
        c.set_selected(true);
        self.selection.push(id);
        true
    }

    /// Remove `id` from the selection. Returns false if it was not selected.
    pub fn deselect(&mut self, id: ComponentId) -> bool {
        let Some(pos) = self.selection.iter().position(|&s| s == id) else {
            return false;
        };
        self.selection.remove(pos);
        if let Some(c) = self.component_mut(id) {
            c.set_selected(false);
        }
        true
    }

    /// Flip `id`'s membership. Returns whether it is selected afterwards.
    pub fn toggle_selection(&mut self, id: ComponentId) -> bool {
        if self.deselect(id) { false } else { self.select(id) }
    }

    /// Make `id` the only selected component.
    pub fn select_only(&mut self, id: ComponentId) {
        self.clear_selection();
        self.select(id);
    }

    /// Deselect everything. Returns whether anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        for id in std::mem::take(&mut self.selection) {
            if let Some(c) = self.component_mut(id) {
                c.set_selected(false);
            }
        }
        true
    }

    /// Rubber-band pass: every non-board component whose icon box lies strictly
    /// inside `rect` is selected, every other one is deselected.
    pub fn select_in_rect(&mut self, rect: &Rect) {
        let (w, h) = (self.config.component_width, self.config.component_height);
        let verdicts: Vec<(ComponentId, bool)> = self
            .components
            .iter()
            .filter(|c| !c.kind().is_board())
            .map(|c| (c.id(), rect.strictly_contains_rect(&c.bounds(w, h))))
            .collect();
        for (id, inside) in verdicts {
            if inside {
                self.select(id);
            } else {
                self.deselect(id);
            }
        }
        debug!(selected = self.selection.len(), "rubber-band selection applied");
    }

    // --- Wires ---

    /// Wire two pins together. No validation; malformed wires are skipped by
    /// consumers.
    pub fn connect(&mut self, start: PinRef, end: PinRef) -> WireId {
        self.add_wire(Wire::new(start, end))
    }

    /// Wire two pins together after checking both endpoints exist.
    ///
    /// # Errors
    ///
    /// `ComponentNotFound` or `PinOutOfRange` for a bad endpoint.
    pub fn try_connect(&mut self, start: PinRef, end: PinRef) -> Result<WireId, LayoutError> {
        self.check_pin(start)?;
        self.check_pin(end)?;
        Ok(self.connect(start, end))
    }

    fn check_pin(&self, pin: PinRef) -> Result<(), LayoutError> {
        let c = self.component(pin.component).ok_or(LayoutError::ComponentNotFound(pin.component))?;
        let count = c.kind().pin_count();
        if pin.pin >= count {
            return Err(LayoutError::PinOutOfRange { kind: c.kind().as_str(), pin: pin.pin, count });
        }
        Ok(())
    }

    /// Insert an externally built wire as-is.
    pub fn add_wire(&mut self, wire: Wire) -> WireId {
        let id = wire.id;
        info!(%id, start = %wire.start.component, end = %wire.end.component, "wire created");
        self.wires.push(wire);
        id
    }

    pub fn remove_wire(&mut self, id: WireId) -> bool {
        let before = self.wires.len();
        self.wires.retain(|w| w.id != id);
        self.wires.len() != before
    }

    // --- Board attachment ---

    /// Bind `id` to the board hole nearest `at`.
    ///
    /// # Errors
    ///
    /// `NoBoard`, `ComponentNotFound`, `NoHoleNearby`, or `HoleOccupied`.
    pub fn connect_to_board(&mut self, id: ComponentId, at: Point) -> Result<HoleRef, LayoutError> {
        if self.component(id).is_none() {
            return Err(LayoutError::ComponentNotFound(id));
        }
        let radius = self.config.hole_capture_radius;
        let board = self.board.as_mut().ok_or(LayoutError::NoBoard)?;
        let hole = board.nearest_hole(at, radius).ok_or(LayoutError::NoHoleNearby { x: at.x, y: at.y })?;
        board.try_occupy(hole, Occupant::component(id))?;
        info!(%id, row = hole.row, col = hole.col, "component connected to board");
        Ok(hole)
    }

    /// Push each pin of `id` into the hole nearest its current position.
    /// Pins with no free hole in range are left out. Returns the holes taken,
    /// in pin order.
    ///
    /// # Errors
    ///
    /// `NoBoard` or `ComponentNotFound`.
    pub fn insert_pins(&mut self, id: ComponentId) -> Result<Vec<HoleRef>, LayoutError> {
        let (taken, refused) = self.seat_pins(id)?;
        if refused > 0 {
            warn!(%id, refused, "some pins landed on occupied holes");
        }
        info!(%id, holes = taken.len(), "pins inserted into board");
        Ok(taken)
    }

    fn seat_pins(&mut self, id: ComponentId) -> Result<(Vec<HoleRef>, usize), LayoutError> {
        let pins: Vec<(usize, Point)> = self
            .component(id)
            .ok_or(LayoutError::ComponentNotFound(id))?
            .pins()
            .iter()
            .map(|p| (p.index, p.pos))
            .collect();
        let radius = self.config.hole_capture_radius;
        let board = self.board.as_mut().ok_or(LayoutError::NoBoard)?;

        let mut taken = Vec::with_capacity(pins.len());
        let mut refused = 0;
        for (index, pos) in pins {
            let Some(hole) = board.nearest_hole(pos, radius) else {
                debug!(%id, pin = index, "pin has no hole in range");
                continue;
            };
            match board.try_occupy(hole, Occupant::pin(id, index)) {
                Ok(()) => taken.push(hole),
                Err(e) => {
                    debug!(%id, pin = index, error = %e, "pin insertion refused");
                    refused += 1;
                }
            }
        }
        Ok((taken, refused))
    }

    /// Pull `id`'s seated pins out of their holes and push them into whatever
    /// holes lie under them now. A component with no seated pins is untouched.
    fn reseat_pins(&mut self, id: ComponentId) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        if !board.holds_pins_of(id) {
            return;
        }
        board.release_pins_of(id);
        match self.seat_pins(id) {
            Ok((taken, _)) if taken.is_empty() => debug!(%id, "pins left the board"),
            Ok((taken, _)) => debug!(%id, holes = taken.len(), "pins re-seated"),
            Err(e) => warn!(%id, error = %e, "pins not re-seated"),
        }
    }

    /// Release every hole held by `id`. Returns how many were released.
    pub fn detach_from_board(&mut self, id: ComponentId) -> usize {
        self.board.as_mut().map_or(0, |b| b.release_component(id))
    }

    // --- Deletion ---

    /// Cascade-delete the selected components and clear the selection.
    pub fn delete_selected(&mut self) -> Removed {
        let doomed = self.selection.clone();
        let removed = self.remove_components(&doomed);
        self.clear_selection();
        removed
    }

    /// Cascade-delete a single component.
    pub fn remove_component(&mut self, id: ComponentId) -> Removed {
        let removed = self.remove_components(&[id]);
        self.selection.retain(|&s| s != id);
        removed
    }

    fn remove_components(&mut self, doomed: &[ComponentId]) -> Removed {
        let mut removed = Removed::default();
        if doomed.is_empty() {
            return removed;
        }

        // Holes first, then wires, then the components themselves.
        if let Some(board) = self.board.as_mut() {
            removed.released_holes = board.release_where(|o| doomed.contains(&o.component));
        }

        self.wires.retain(|w| {
            let dead = doomed.contains(&w.start.component) || doomed.contains(&w.end.component);
            if dead {
                removed.wires.push(w.id);
            }
            !dead
        });

        self.components.retain(|c| {
            let dead = doomed.contains(&c.id());
            if dead {
                removed.components.push(c.id());
            }
            !dead
        });

        if self.board_component.is_some_and(|b| doomed.contains(&b)) {
            self.board = None;
            self.board_component = None;
        }

        info!(
            components = removed.components.len(),
            wires = removed.wires.len(),
            holes = removed.released_holes,
            "components deleted"
        );
        removed
    }

    // --- Readout ---

    #[must_use]
    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary {
            components: self
                .components
                .iter()
                .map(|c| ComponentSummary {
                    id: c.id(),
                    kind: c.kind(),
                    x: c.pos().x,
                    y: c.pos().y,
                    rotation: c.rotation(),
                    selected: c.is_selected(),
                })
                .collect(),
            wire_count: self.wires.len(),
            selected: self.selection.clone(),
            has_board: self.board.is_some(),
            occupied_holes: self
                .board
                .as_ref()
                .map_or(0, |b| b.holes().iter().filter(|h| h.occupant.is_some()).count()),
        }
    }
}
