//! Browser binding: a `Canvas2D` render surface and the DOM-facing engine.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::component::{ComponentId, ComponentKind};
use crate::engine::{Action, EngineCore};
use crate::geom::{Point, Rect};
use crate::input::{Button, Key, Modifiers};
use crate::layout::Layout;
use crate::render::RenderSurface;

const ICON_STROKE: &str = "#333";

impl RenderSurface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), JsValue> {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(self, rect.min.x, rect.min.y, rect.width(), rect.height());
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<(), JsValue> {
        self.set_stroke_style_str(color);
        self.set_line_width(line_width);
        CanvasRenderingContext2d::stroke_rect(self, rect.min.x, rect.min.y, rect.width(), rect.height());
        Ok(())
    }

    fn stroke_rotated_rect(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        rotation: f64,
        color: &str,
        line_width: f64,
    ) -> Result<(), JsValue> {
        self.save();
        translate_and_rotate(self, center, rotation)?;
        self.set_stroke_style_str(color);
        self.set_line_width(line_width);
        CanvasRenderingContext2d::stroke_rect(self, -width / 2.0, -height / 2.0, width, height);
        self.restore();
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
        self.set_fill_style_str(color);
        self.fill();
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, color: &str, line_width: f64) -> Result<(), JsValue> {
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.set_stroke_style_str(color);
        self.set_line_width(line_width);
        self.stroke();
        Ok(())
    }

    /// Icons are drawn as a labeled outline box at the icon's footprint.
    fn blit(&mut self, kind: ComponentKind, center: Point, rotation: f64, width: f64, height: f64)
    -> Result<(), JsValue> {
        self.save();
        translate_and_rotate(self, center, rotation)?;
        self.set_stroke_style_str(ICON_STROKE);
        self.set_line_width(1.0);
        CanvasRenderingContext2d::stroke_rect(self, -width / 2.0, -height / 2.0, width, height);
        self.set_fill_style_str(ICON_STROKE);
        self.set_text_align("center");
        self.set_text_baseline("middle");
        self.fill_text(kind.as_str(), 0.0, 0.0)?;
        self.restore();
        Ok(())
    }
}

fn translate_and_rotate(ctx: &CanvasRenderingContext2d, center: Point, rotation: f64) -> Result<(), JsValue> {
    ctx.translate(center.x, center.y)?;
    ctx.rotate(rotation.to_radians())?;
    Ok(())
}

/// The full engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Fails if the element has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx, core: EngineCore::new() })
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((width_css * dpr).round() as u32);
        self.canvas.set_height((height_css * dpr).round() as u32);
    }

    // --- Palette ---

    pub fn add_component(&mut self, name: &str) -> Vec<Action> {
        self.core.add_component_named(name)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(pt, button, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a `Canvas2D` call.
    pub fn render(&self) -> Result<(), JsValue> {
        let dpr = self.core.dpr;
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        let mut ctx = self.ctx.clone();
        self.core.render(&mut ctx)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> &[ComponentId] {
        self.core.selection()
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        self.core.layout()
    }
}
