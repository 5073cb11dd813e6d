//! Input model: modifier keys, mouse buttons, keys, and the gesture state machine.
//!
//! `Modifiers`, `Button` and `Key` describe a raw event as the host delivers
//! it. `InputState` is the gesture being tracked between pointer-down and
//! pointer-up; exactly one variant is active at a time, and entering a new one
//! abandons whatever was in progress.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::component::ComponentId;
use crate::geom::Point;
use crate::wire::PinRef;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held. Toggles selection membership on click.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the additive-selection modifier is held.
    #[must_use]
    pub fn additive(self) -> bool {
        self.shift
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"ArrowLeft"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }

    /// Rotation direction and step class for an arrow key.
    #[must_use]
    pub fn rotate_step(&self) -> Option<RotateStep> {
        match self.0.as_str() {
            "ArrowLeft" => Some(RotateStep::FineCcw),
            "ArrowRight" => Some(RotateStep::FineCw),
            "ArrowUp" => Some(RotateStep::CoarseCcw),
            "ArrowDown" => Some(RotateStep::CoarseCw),
            _ => None,
        }
    }
}

/// Arrow-key rotation classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateStep {
    FineCcw,
    FineCw,
    CoarseCcw,
    CoarseCw,
}

impl RotateStep {
    /// Signed rotation in degrees given the fine and coarse step sizes.
    #[must_use]
    pub fn degrees(self, fine: f64, coarse: f64) -> f64 {
        match self {
            Self::FineCcw => -fine,
            Self::FineCw => fine,
            Self::CoarseCcw => -coarse,
            Self::CoarseCw => coarse,
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The component last grabbed for dragging; the target of arrow-key rotation.
    pub primary: Option<ComponentId>,
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed to apply moves and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A component is following the pointer.
    DraggingComponent {
        /// Id of the component being dragged.
        id: ComponentId,
        /// Pointer position minus component origin at grab time.
        offset: Point,
        /// Component origin at grab time, restored if the drag is cancelled.
        origin: Point,
    },
    /// A selection rectangle is being drawn.
    RubberBandSelecting {
        /// Corner where the drag started.
        start: Point,
        /// Opposite corner, updated on every move.
        current: Point,
    },
    /// A wire has been started from a pin and awaits its other end.
    PendingWireFromPoint {
        /// The pin the wire starts at.
        start: PinRef,
        /// Latest pointer position, for drawing the provisional wire.
        current: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
