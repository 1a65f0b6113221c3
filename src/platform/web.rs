//! Browser implementations using web-sys

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::render::{Color, RenderSurface};
use crate::sim::Rect;

/// Wall clock in milliseconds
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// A `<canvas>` with its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap `canvas`, sizing its backing store to the play field
    pub fn new(canvas: HtmlCanvasElement, width: f32, height: f32) -> Result<Self, JsValue> {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Convert a viewport point to canvas pixels
    pub fn to_canvas(&self, client_x: i32, client_y: i32) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }
}

impl RenderSurface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(color.as_css());
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color, font: &str) {
        self.ctx.set_fill_style_str(color.as_css());
        self.ctx.set_font(font);
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}

/// Show or hide an element by toggling its `hidden` class
pub fn set_hidden(document: &Document, id: &str, hidden: bool) {
    let Some(el) = document.get_element_by_id(id) else {
        log::warn!("Element #{} not found", id);
        return;
    };
    let classes = el.class_list();
    let result = if hidden {
        classes.add_1("hidden")
    } else {
        classes.remove_1("hidden")
    };
    if let Err(e) = result {
        log::warn!("Cannot toggle #{}: {:?}", id, e);
    }
}
