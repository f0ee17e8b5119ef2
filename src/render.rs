// render.rs - Drawing primitives for the network canvas
//
// The simulation only ever talks to a Surface. In the browser that is a
// CanvasRenderingContext2d (see web::canvas); in tests it is a recorder.

use std::f64::consts::TAU;

/// 2D immediate-mode drawing surface, shaped after the canvas 2D API.
pub trait Surface {
    /// Resize the backing store. Clears it as a side effect on real canvases.
    fn set_size(&mut self, width: u32, height: u32);

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn set_fill_color(&mut self, color: &str);
    fn fill(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn stroke(&mut self);
}

/// Opaque RGB triple, rendered as a CSS `rgba()` with a per-call alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn with_alpha(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

/// Link opacity for two points `distance` apart.
///
/// Linear fade from 1.0 at zero distance to nothing at `max`; `None` means
/// the pair is too far apart to be linked at all.
#[inline]
pub fn connection_opacity(distance: f64, max: f64) -> Option<f64> {
    if distance < max {
        Some(1.0 - distance / max)
    } else {
        None
    }
}

/// Filled circle
pub fn dot(surface: &mut impl Surface, x: f64, y: f64, radius: f64, color: &str) {
    surface.begin_path();
    surface.arc(x, y, radius, 0.0, TAU);
    surface.set_fill_color(color);
    surface.fill();
}

/// Straight stroked segment
pub fn segment(surface: &mut impl Surface, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
    surface.begin_path();
    surface.set_stroke_color(color);
    surface.set_line_width(width);
    surface.move_to(from.0, from.1);
    surface.line_to(to.0, to.1);
    surface.stroke();
}
