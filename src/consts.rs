//! Shared numeric constants for the protoboard crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Pointer distance (exclusive) within which a connection point is picked.
pub const PIN_PICK_RADIUS: f64 = 10.0;

/// Pointer distance (exclusive) within which a board hole captures a point.
pub const HOLE_CAPTURE_RADIUS: f64 = 15.0;

/// Half-width of the square used to hit-test a component body.
pub const BODY_HALF_EXTENT: f64 = 40.0;

// ── Component footprint ─────────────────────────────────────────

/// Width of a component icon, used by rubber-band containment.
pub const COMPONENT_WIDTH: f64 = 80.0;

/// Height of a component icon, used by rubber-band containment.
pub const COMPONENT_HEIGHT: f64 = 40.0;

// ── Rotation ────────────────────────────────────────────────────

/// Left/right arrow rotation step in degrees.
pub const FINE_ROTATE_STEP_DEG: f64 = 15.0;

/// Up/down arrow rotation step in degrees.
pub const COARSE_ROTATE_STEP_DEG: f64 = 45.0;

// ── Board ───────────────────────────────────────────────────────

/// Default number of hole rows.
pub const BOARD_ROWS: usize = 20;

/// Default number of hole columns.
pub const BOARD_COLS: usize = 30;

/// Default distance between neighbouring holes.
pub const BOARD_PITCH: f64 = 15.0;

/// Width of the power-rail margin on each side of the hole field.
pub const BOARD_RAIL_OFFSET: f64 = 30.0;

/// Inset from the board origin to the first hole, on both axes.
pub const BOARD_HOLE_INSET: f64 = 20.0;

/// Number of following holes in a row that share a contact strip with a hole.
pub const STRIP_SPAN: usize = 4;

// ── Wires ───────────────────────────────────────────────────────

/// Default wire stroke color.
pub const DEFAULT_WIRE_COLOR: &str = "#000";
