//! Error type for layout mutations that can be refused.
//!
//! Interaction handlers never surface these to the host; they log and carry on.
//! Direct callers of [`crate::layout::Layout`] get the reason instead of a bare
//! `false`.

use crate::component::ComponentId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("unknown component type: {0}")]
    UnknownKind(String),
    #[error("component not found: {0}")]
    ComponentNotFound(ComponentId),
    #[error("hole ({row}, {col}) already occupied by {occupant}")]
    HoleOccupied { row: usize, col: usize, occupant: ComponentId },
    #[error("hole ({row}, {col}) is outside the board")]
    HoleOffGrid { row: usize, col: usize },
    #[error("no hole within capture radius of ({x}, {y})")]
    NoHoleNearby { x: f64, y: f64 },
    #[error("pin {pin} out of range for {kind} ({count} pins)")]
    PinOutOfRange { kind: &'static str, pin: usize, count: usize },
    #[error("layout has no board")]
    NoBoard,
    #[error("layout already has a board")]
    BoardAlreadyPresent,
}
