// canvas.rs - Canvas 2D surface and window viewport

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::error::{Error, Result};
use crate::render::Surface;
use crate::sim::Viewport;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up `#id` and grab its 2D context.
    pub fn find(document: &Document, id: &str) -> Result<Self> {
        let canvas = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| Error::MissingElement(id.to_string()))?;

        let ctx = canvas
            .get_context("2d")?
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| Error::NoContext(id.to_string()))?;

        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        // Only throws on a negative radius
        let _ = self.ctx.arc(x, y, radius, start, end);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}

/// `window.innerWidth` x `window.innerHeight`
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Viewport for WindowViewport {
    fn size(&self) -> (u32, u32) {
        (px(self.window.inner_width()), px(self.window.inner_height()))
    }
}

fn px(value: std::result::Result<JsValue, JsValue>) -> u32 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
}
