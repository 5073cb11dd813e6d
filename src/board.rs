//! Board model: the hole grid, its logical adjacency, and hole occupancy.
//!
//! DESIGN
//! ======
//! Holes are stored row-major; a hole's index is `row * cols + col`. Adjacency
//! is positionless (indices only), built once by [`Board::build_adjacency`] and
//! left alone when the board moves. [`Board::relocate`] rewrites positions in
//! place so occupancy and adjacency survive a drag.
//!
//! Two rules produce adjacency, modelling a breadboard:
//! - contact strips: each hole joins up to the next [`STRIP_SPAN`] holes in
//!   its row;
//! - power rails: every hole in the first column joins every other hole in
//!   that column, and likewise for the last column.
//!
//! Occupancy is single-owner. A failed [`Board::occupy`] changes nothing.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::component::ComponentId;
use crate::config::BoardConfig;
use crate::consts::STRIP_SPAN;
use crate::error::LayoutError;
use crate::geom::Point;

/// Grid coordinates of a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HoleRef {
    pub row: usize,
    pub col: usize,
}

impl HoleRef {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// What sits in a hole: a component, and the pin that was pushed in when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub component: ComponentId,
    pub pin: Option<usize>,
}

impl Occupant {
    /// Occupancy by a component with no specific pin recorded.
    #[must_use]
    pub fn component(component: ComponentId) -> Self {
        Self { component, pin: None }
    }

    /// Occupancy by a specific pin of a component.
    #[must_use]
    pub fn pin(component: ComponentId, pin: usize) -> Self {
        Self { component, pin: Some(pin) }
    }
}

/// One slot in the board grid.
#[derive(Debug, Clone)]
pub struct Hole {
    pub row: usize,
    pub col: usize,
    pub pos: Point,
    /// Indices of logically adjacent holes.
    pub connected_to: BTreeSet<usize>,
    pub occupant: Option<Occupant>,
}

impl Hole {
    #[must_use]
    pub fn hole_ref(&self) -> HoleRef {
        HoleRef::new(self.row, self.col)
    }
}

/// A perforated prototyping board.
#[derive(Debug, Clone)]
pub struct Board {
    origin: Point,
    config: BoardConfig,
    holes: Vec<Hole>,
}

impl Board {
    /// Build a board at `origin` with holes and adjacency populated.
    #[must_use]
    pub fn new(origin: Point, config: &BoardConfig) -> Self {
        let mut board = Self { origin, config: *config, holes: Vec::new() };
        board.build_holes();
        board.build_adjacency();
        board
    }

    /// Replace the hole collection with a fresh, unoccupied, unconnected grid.
    pub fn build_holes(&mut self) {
        let (rows, cols) = (self.config.rows, self.config.cols);
        let holes = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| Hole {
                row,
                col,
                pos: self.hole_position(row, col),
                connected_to: BTreeSet::new(),
                occupant: None,
            })
            .collect();
        self.holes = holes;
    }

    /// Compute strip and rail adjacency over the current hole collection.
    pub fn build_adjacency(&mut self) {
        let (rows, cols) = (self.config.rows, self.config.cols);
        for hole in &mut self.holes {
            hole.connected_to.clear();
        }

        for row in 0..rows {
            for col in 0..cols {
                let a = row * cols + col;
                for next in (col + 1)..=(col + STRIP_SPAN).min(cols.saturating_sub(1)) {
                    self.link(a, row * cols + next);
                }
            }
        }

        for rail in self.rail_columns() {
            for r1 in 0..rows {
                for r2 in (r1 + 1)..rows {
                    self.link(r1 * cols + rail, r2 * cols + rail);
                }
            }
        }
    }

    fn link(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.holes[a].connected_to.insert(b);
        self.holes[b].connected_to.insert(a);
    }

    fn hole_position(&self, row: usize, col: usize) -> Point {
        #[allow(clippy::cast_precision_loss)]
        let (r, c) = (row as f64, col as f64);
        Point::new(
            self.origin.x + self.config.rail_offset + self.config.hole_inset + c * self.config.pitch,
            self.origin.y + self.config.hole_inset + r * self.config.pitch,
        )
    }

    /// Move the board, rewriting hole positions in place.
    pub fn relocate(&mut self, origin: Point) {
        self.origin = origin;
        for i in 0..self.holes.len() {
            let pos = self.hole_position(self.holes[i].row, self.holes[i].col);
            self.holes[i].pos = pos;
        }
    }

    /// Nearest hole strictly within `capture_radius` of `p`; first in row-major order wins ties.
    #[must_use]
    pub fn nearest_hole(&self, p: Point, capture_radius: f64) -> Option<HoleRef> {
        let mut best: Option<(f64, HoleRef)> = None;
        for hole in &self.holes {
            let d = hole.pos.distance(p);
            if d < capture_radius && best.is_none_or(|(min, _)| d < min) {
                best = Some((d, hole.hole_ref()));
            }
        }
        best.map(|(_, h)| h)
    }

    /// Row-major index for `h`, if it lies on the grid.
    #[must_use]
    pub fn index_of(&self, h: HoleRef) -> Option<usize> {
        (h.row < self.config.rows && h.col < self.config.cols).then_some(h.row * self.config.cols + h.col)
    }

    #[must_use]
    pub fn hole(&self, row: usize, col: usize) -> Option<&Hole> {
        self.hole_at(HoleRef::new(row, col))
    }

    #[must_use]
    pub fn hole_at(&self, h: HoleRef) -> Option<&Hole> {
        self.index_of(h).map(|i| &self.holes[i])
    }

    fn hole_at_mut(&mut self, h: HoleRef) -> Option<&mut Hole> {
        self.index_of(h).map(|i| &mut self.holes[i])
    }

    /// Bind `component` to `hole` with no pin recorded. Returns false if the
    /// hole is occupied or off the grid.
    pub fn occupy(&mut self, hole: HoleRef, component: ComponentId) -> bool {
        self.try_occupy(hole, Occupant::component(component)).is_ok()
    }

    /// Bind `occupant` to `hole`.
    ///
    /// # Errors
    ///
    /// `HoleOccupied` if the hole already has an occupant; `HoleOffGrid` if
    /// `hole` is outside the grid. Nothing is mutated on error.
    pub fn try_occupy(&mut self, hole: HoleRef, occupant: Occupant) -> Result<(), LayoutError> {
        let Some(slot) = self.hole_at_mut(hole) else {
            return Err(LayoutError::HoleOffGrid { row: hole.row, col: hole.col });
        };
        if let Some(existing) = slot.occupant {
            return Err(LayoutError::HoleOccupied { row: hole.row, col: hole.col, occupant: existing.component });
        }
        slot.occupant = Some(occupant);
        Ok(())
    }

    /// Clear `hole`. Returns whether there was anything to release.
    pub fn release(&mut self, hole: HoleRef) -> bool {
        self.hole_at_mut(hole).and_then(|h| h.occupant.take()).is_some()
    }

    /// Release every hole held by `component`. Returns how many were released.
    pub fn release_component(&mut self, component: ComponentId) -> usize {
        self.release_where(|o| o.component == component)
    }

    /// Release the holes `component` holds through individual pins, leaving a
    /// whole-component binding in place. Returns how many were released.
    pub fn release_pins_of(&mut self, component: ComponentId) -> usize {
        self.release_where(|o| o.component == component && o.pin.is_some())
    }

    /// Whether any hole records a pin of `component`.
    #[must_use]
    pub fn holds_pins_of(&self, component: ComponentId) -> bool {
        self.holes.iter().filter_map(|h| h.occupant).any(|o| o.component == component && o.pin.is_some())
    }

    /// Release every hole whose occupant matches `pred`. Returns how many were released.
    pub fn release_where<F>(&mut self, pred: F) -> usize
    where
        F: Fn(Occupant) -> bool,
    {
        let mut released = 0;
        for hole in &mut self.holes {
            if hole.occupant.is_some_and(&pred) {
                hole.occupant = None;
                released += 1;
            }
        }
        released
    }

    #[must_use]
    pub fn is_occupied(&self, hole: HoleRef) -> bool {
        self.occupant(hole).is_some()
    }

    #[must_use]
    pub fn occupant(&self, hole: HoleRef) -> Option<Occupant> {
        self.hole_at(hole).and_then(|h| h.occupant)
    }

    /// True if `hole` or any hole adjacent to it is occupied.
    #[must_use]
    pub fn is_topologically_live(&self, hole: HoleRef) -> bool {
        let Some(h) = self.hole_at(hole) else {
            return false;
        };
        h.occupant.is_some() || h.connected_to.iter().any(|&i| self.holes[i].occupant.is_some())
    }

    /// Holes logically adjacent to `hole`, in row-major order.
    #[must_use]
    pub fn adjacent_holes(&self, hole: HoleRef) -> Vec<HoleRef> {
        self.hole_at(hole)
            .map(|h| h.connected_to.iter().map(|&i| self.holes[i].hole_ref()).collect())
            .unwrap_or_default()
    }

    /// Distinct occupying components in row-major order of first appearance.
    #[must_use]
    pub fn occupied_components(&self) -> Vec<ComponentId> {
        let mut out: Vec<ComponentId> = Vec::new();
        for occ in self.holes.iter().filter_map(|h| h.occupant) {
            if !out.contains(&occ.component) {
                out.push(occ.component);
            }
        }
        out
    }

    /// Column indices of the left and right power rails.
    #[must_use]
    pub fn rail_columns(&self) -> Vec<usize> {
        match self.config.cols {
            0 => Vec::new(),
            1 => vec![0],
            n => vec![0, n - 1],
        }
    }

    /// Drawn extent of the board as `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        #[allow(clippy::cast_precision_loss)]
        let (rows, cols) = (self.config.rows as f64, self.config.cols as f64);
        (
            cols * self.config.pitch + self.config.rail_offset * 2.0 + self.config.hole_inset,
            rows * self.config.pitch + self.config.hole_inset * 2.0,
        )
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }
}
