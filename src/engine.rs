use tracing::{debug, warn};

use crate::component::{ComponentId, ComponentKind};
use crate::config::LayoutConfig;
use crate::geom::{Point, Rect};
use crate::hit::{self, Hit};
use crate::input::{Button, InputState, Key, Modifiers, UiState};
use crate::layout::Layout;
use crate::render::{self, RenderSurface};
use crate::wire::WireId;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ComponentAdded { id: ComponentId, kind: ComponentKind },
    ComponentMoved { id: ComponentId, x: f64, y: f64 },
    ComponentRotated { id: ComponentId, rotation: f64 },
    SelectionChanged(Vec<ComponentId>),
    WireCreated(WireId),
    Deleted { components: Vec<ComponentId>, wires: Vec<WireId> },
    RenderNeeded,
}

/// Core engine state: the layout plus the gesture state machine driving it.
///
/// Holds no browser handles, so it runs the same under tests and in WASM.
pub struct EngineCore {
    pub layout: Layout,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(LayoutConfig::from_env())
    }
}

impl EngineCore {
    /// Engine configured from `PROTOBOARD_*` environment variables, falling
    /// back to defaults (always the case in the browser).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            layout: Layout::new(config),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    // --- Palette ---

    /// Drop a new component at the viewport center.
    pub fn add_component(&mut self, kind: ComponentKind) -> Vec<Action> {
        self.add_component_at(kind, self.viewport_center())
    }

    /// Drop a new component centered at `at`.
    pub fn add_component_at(&mut self, kind: ComponentKind, at: Point) -> Vec<Action> {
        match self.layout.add_component(kind, at) {
            Ok(id) => vec![Action::ComponentAdded { id, kind }, Action::RenderNeeded],
            Err(e) => {
                warn!(error = %e, %kind, "component not added");
                Vec::new()
            }
        }
    }

    /// Palette request by type name.
    pub fn add_component_named(&mut self, name: &str) -> Vec<Action> {
        match name.parse::<ComponentKind>() {
            Ok(kind) => self.add_component(kind),
            Err(e) => {
                warn!(error = %e, "palette request rejected");
                Vec::new()
            }
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.abandon_gesture(&mut actions);

        match hit::hit_test(&self.layout, pt) {
            Some(Hit::Pin(start)) => {
                self.clear_selection(&mut actions);
                debug!(component = %start.component, pin = start.pin, "wire started");
                self.input = InputState::PendingWireFromPoint { start, current: pt };
            }
            Some(Hit::Body(id)) if modifiers.additive() => {
                self.ui.primary = None;
                self.layout.toggle_selection(id);
                actions.push(Action::SelectionChanged(self.layout.selection().to_vec()));
            }
            Some(Hit::Body(id)) => {
                let origin = self.layout.component(id).map_or(pt, crate::component::Component::pos);
                if self.layout.selection() != [id] {
                    self.layout.select_only(id);
                    actions.push(Action::SelectionChanged(self.layout.selection().to_vec()));
                }
                self.layout.set_dragging(id, true);
                self.ui.primary = Some(id);
                self.input = InputState::DraggingComponent { id, offset: pt.sub(origin), origin };
            }
            None => {
                self.clear_selection(&mut actions);
                self.input = InputState::RubberBandSelecting { start: pt, current: pt };
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if let InputState::DraggingComponent { id, offset, .. } = self.input {
            let to = pt.sub(offset);
            if self.layout.move_component(id, to) {
                return vec![Action::ComponentMoved { id, x: to.x, y: to.y }, Action::RenderNeeded];
            }
            warn!(%id, "dragged component vanished; dropping gesture");
            self.input = InputState::Idle;
            return vec![Action::RenderNeeded];
        }
        match &mut self.input {
            InputState::RubberBandSelecting { current, .. } | InputState::PendingWireFromPoint { current, .. } => {
                *current = pt;
                vec![Action::RenderNeeded]
            }
            InputState::Idle | InputState::DraggingComponent { .. } => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::RubberBandSelecting { start, .. } => {
                self.layout.select_in_rect(&Rect::from_corners(start, pt));
                vec![Action::SelectionChanged(self.layout.selection().to_vec()), Action::RenderNeeded]
            }
            InputState::PendingWireFromPoint { start, .. } => {
                let radius = self.layout.config().pick_radius;
                match hit::pin_at(&self.layout, pt, radius) {
                    Some(end) => {
                        let id = self.layout.connect(start, end);
                        vec![Action::WireCreated(id), Action::RenderNeeded]
                    }
                    None => {
                        debug!("wire dropped on empty space");
                        vec![Action::RenderNeeded]
                    }
                }
            }
            InputState::DraggingComponent { id, .. } => {
                self.layout.set_dragging(id, false);
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_escape() {
            let was_busy = !self.input.is_idle();
            let mut actions = Vec::new();
            self.abandon_gesture(&mut actions);
            self.clear_selection(&mut actions);
            if was_busy || !actions.is_empty() {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        }
        if !self.input.is_idle() {
            return Vec::new();
        }

        if key.is_delete() {
            return self.delete_selected();
        }

        if let Some(step) = key.rotate_step() {
            let Some(id) = self.ui.primary else {
                return Vec::new();
            };
            let cfg = self.layout.config();
            let delta = step.degrees(cfg.fine_rotate_step, cfg.coarse_rotate_step);
            return match self.layout.rotate_component(id, delta) {
                Some(rotation) => vec![Action::ComponentRotated { id, rotation }, Action::RenderNeeded],
                None => Vec::new(),
            };
        }

        Vec::new()
    }

    /// Cascade-delete the current selection.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if self.layout.selection().is_empty() {
            return Vec::new();
        }
        let removed = self.layout.delete_selected();
        self.ui.primary = None;
        vec![
            Action::Deleted { components: removed.components, wires: removed.wires },
            Action::SelectionChanged(Vec::new()),
            Action::RenderNeeded,
        ]
    }

    fn clear_selection(&mut self, actions: &mut Vec<Action>) {
        self.ui.primary = None;
        if self.layout.clear_selection() {
            actions.push(Action::SelectionChanged(Vec::new()));
        }
    }

    /// Drop any in-progress gesture without applying it. A partial drag is
    /// undone by putting the component back where it was grabbed.
    fn abandon_gesture(&mut self, actions: &mut Vec<Action>) {
        if let InputState::DraggingComponent { id, origin, .. } = std::mem::take(&mut self.input) {
            self.layout.set_dragging(id, false);
            if self.layout.move_component(id, origin) {
                debug!(%id, "drag cancelled");
                actions.push(Action::ComponentMoved { id, x: origin.x, y: origin.y });
            }
        }
    }

    // --- Render ---

    /// Draw the current state onto `surface`.
    ///
    /// # Errors
    ///
    /// Propagates the first error reported by the surface.
    pub fn render<S: RenderSurface>(&self, surface: &mut S) -> Result<(), S::Error> {
        render::draw(surface, &self.layout, &self.input, self.viewport_width, self.viewport_height)
    }

    // --- Queries ---

    /// Currently selected components, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[ComponentId] {
        self.layout.selection()
    }

    /// The component arrow keys rotate, if any.
    #[must_use]
    pub fn primary(&self) -> Option<ComponentId> {
        self.ui.primary
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}
