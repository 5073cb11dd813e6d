//! Rendering: draws the full scene onto an abstract 2D surface.
//!
//! The core never owns pixels. It walks the layout and issues primitive draw
//! calls against a [`RenderSurface`]; the host supplies the implementation
//! (a browser canvas under the `web` feature, a recorder in tests). Nothing
//! here mutates application state.
//!
//! Draw order: board, then components, then wires, then gesture overlays.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use tracing::warn;

use crate::board::Board;
use crate::component::{Component, ComponentKind};
use crate::geom::{Point, Rect};
use crate::input::InputState;
use crate::layout::Layout;

const BOARD_FILL: &str = "#e1d5c9";
const RAIL_FILL: &str = "#ff9999";
const RAIL_WIDTH: f64 = 10.0;
const HOLE_RADIUS: f64 = 5.0;
const HOLE_OCCUPIED: &str = "red";
const HOLE_LIVE: &str = "orange";
const HOLE_IDLE: &str = "#ccc";
const PIN_RADIUS: f64 = 5.0;
const PIN_FILL: &str = "blue";
const SELECTION_STROKE: &str = "#ff0000";
const SELECTION_BOX: (f64, f64) = (50.0, 30.0);
const WIRE_WIDTH: f64 = 2.0;
const PENDING_WIRE_STROKE: &str = "#888";
const MARQUEE_FILL: &str = "rgba(0, 0, 255, 0.1)";
const MARQUEE_STROKE: &str = "rgba(0, 0, 255, 0.5)";

/// Primitive drawing operations the scene is built from.
pub trait RenderSurface {
    type Error;

    /// Wipe the whole viewport.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), Self::Error>;

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<(), Self::Error>;

    /// Stroke a `width` × `height` box centered on `center`, rotated by `rotation` degrees.
    fn stroke_rotated_rect(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        rotation: f64,
        color: &str,
        line_width: f64,
    ) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) -> Result<(), Self::Error>;

    fn line(&mut self, from: Point, to: Point, color: &str, line_width: f64) -> Result<(), Self::Error>;

    /// Draw the icon for `kind` centered on `center`, rotated by `rotation` degrees.
    fn blit(&mut self, kind: ComponentKind, center: Point, rotation: f64, width: f64, height: f64)
    -> Result<(), Self::Error>;
}

/// Draw the full scene.
///
/// # Errors
///
/// Returns the first error reported by `surface`.
pub fn draw<S: RenderSurface>(
    surface: &mut S,
    layout: &Layout,
    input: &InputState,
    viewport_w: f64,
    viewport_h: f64,
) -> Result<(), S::Error> {
    surface.clear(viewport_w, viewport_h)?;

    // Layer 1: board underneath everything.
    if let Some(board) = layout.board() {
        draw_board(surface, board)?;
    }

    // Layer 2: components.
    let cfg = layout.config();
    for c in layout.components().iter().filter(|c| !c.kind().is_board()) {
        draw_component(surface, c, cfg.component_width, cfg.component_height)?;
    }

    // Layer 3: wires.
    for w in layout.wires() {
        let Some((from, to)) = w.endpoints(layout) else {
            warn!(id = %w.id, "skipping malformed wire");
            continue;
        };
        surface.line(from, to, &w.color, WIRE_WIDTH)?;
    }

    // Layer 4: gesture overlays.
    match input {
        InputState::RubberBandSelecting { start, current } => {
            let rect = Rect::from_corners(*start, *current);
            surface.fill_rect(rect, MARQUEE_FILL)?;
            surface.stroke_rect(rect, MARQUEE_STROKE, 2.0)?;
        }
        InputState::PendingWireFromPoint { start, current } => {
            if let Some(from) = start.resolve(layout) {
                surface.line(from, *current, PENDING_WIRE_STROKE, WIRE_WIDTH)?;
            }
        }
        InputState::Idle | InputState::DraggingComponent { .. } => {}
    }

    Ok(())
}

fn draw_board<S: RenderSurface>(surface: &mut S, board: &Board) -> Result<(), S::Error> {
    let origin = board.origin();
    let (w, h) = board.size();
    let cfg = board.config();
    surface.fill_rect(Rect::from_corners(origin, Point::new(origin.x + w, origin.y + h)), BOARD_FILL)?;

    #[allow(clippy::cast_precision_loss)]
    let field_w = cfg.cols as f64 * cfg.pitch;
    for left in [origin.x + cfg.rail_offset, origin.x + cfg.rail_offset + field_w + RAIL_WIDTH] {
        let rail = Rect::from_corners(Point::new(left, origin.y), Point::new(left + RAIL_WIDTH, origin.y + h));
        surface.fill_rect(rail, RAIL_FILL)?;
    }

    for hole in board.holes() {
        let color = if hole.occupant.is_some() {
            HOLE_OCCUPIED
        } else if board.is_topologically_live(hole.hole_ref()) {
            HOLE_LIVE
        } else {
            HOLE_IDLE
        };
        surface.fill_circle(hole.pos, HOLE_RADIUS, color)?;
    }
    Ok(())
}

fn draw_component<S: RenderSurface>(surface: &mut S, c: &Component, width: f64, height: f64) -> Result<(), S::Error> {
    if c.is_selected() {
        let (sw, sh) = SELECTION_BOX;
        surface.stroke_rotated_rect(c.pos(), sw, sh, c.rotation(), SELECTION_STROKE, 2.0)?;
    }
    surface.blit(c.kind(), c.pos(), c.rotation(), width, height)?;
    for pin in c.pins() {
        surface.fill_circle(pin.pos, PIN_RADIUS, PIN_FILL)?;
    }
    Ok(())
}
