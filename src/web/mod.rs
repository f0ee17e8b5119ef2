// web/ - Browser implementations of the engine's host traits
//
// Nothing in here runs under `cargo test` on the host; the logic it drives
// is tested through crate::testing instead.

mod canvas;
mod dom;
mod events;
mod menu;
mod schedule;

pub use canvas::{CanvasSurface, WindowViewport};
pub use dom::{Lucide, WebDom};
pub use events::Listener;
pub use menu::MenuBinding;
pub use schedule::{AnimationFrames, WindowTimers};

use crate::error::{Error, Result};

/// The window and its document, or an error on non-document hosts (workers).
pub fn page() -> Result<WebDom> {
    let window = web_sys::window().ok_or_else(|| Error::Js("no window".into()))?;
    let document = window.document().ok_or_else(|| Error::Js("no document".into()))?;
    Ok(WebDom::new(window, document))
}

/// Seed for the particle RNG.
pub fn random_seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}
