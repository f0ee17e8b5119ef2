use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod sim;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod ui;
pub mod web;

use config::{CANVAS_ID, NetworkConfig};
use sim::{AnimationLoop, Network};
use web::{AnimationFrames, CanvasSurface, Listener, MenuBinding, WindowTimers, WindowViewport};

// ============================================================================
// NETWORK CANVAS - Particle network behind the hero section
// ============================================================================

type WebLoop = AnimationLoop<CanvasSurface, WindowViewport, AnimationFrames>;

#[wasm_bindgen]
pub struct NetworkCanvas {
    // None when there is no window to animate in
    anim: Option<Rc<RefCell<WebLoop>>>,
    _resize: Option<Listener>,
}

#[wasm_bindgen]
impl NetworkCanvas {
    /// Start animating `#canvas_id`. A missing canvas, or no window at all,
    /// gives an inert object rather than an exception.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> NetworkCanvas {
        Self::build(canvas_id).unwrap_or_else(|e| {
            warn!(error = %e, "network animation inert");
            Self { anim: None, _resize: None }
        })
    }

    /// Re-read the window size and regenerate the particles.
    pub fn resize(&self) {
        if let Some(anim) = &self.anim {
            anim.borrow_mut().resize();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn inert(&self) -> bool {
        self.anim.as_ref().is_none_or(|anim| anim.borrow().is_inert())
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.anim.as_ref().map_or(0, |anim| anim.borrow().network().particles().len())
    }
}

impl NetworkCanvas {
    fn build(canvas_id: &str) -> error::Result<Self> {
        let page = web::page()?;
        let window = page.window().clone();

        // AnimationLoop::new warns about the inert loop itself
        let surface = CanvasSurface::find(page.document(), canvas_id)
            .map_err(|e| debug!(error = %e, "canvas lookup"))
            .ok();

        let network = Network::new(NetworkConfig::default(), web::random_seed());
        let anim = AnimationLoop::new(
            network,
            surface,
            WindowViewport::new(window.clone()),
            AnimationFrames::new(window.clone()),
        );

        let resize = if anim.borrow().is_inert() {
            None
        } else {
            let weak = Rc::downgrade(&anim);
            let listener = Listener::new(&window, "resize", move |_| {
                if let Some(anim) = weak.upgrade() {
                    anim.borrow_mut().resize();
                }
            });
            listener.map_err(|e| warn!(error = %e, "resize listener")).ok()
        };

        WebLoop::start(&anim);
        Ok(Self { anim: Some(anim), _resize: resize })
    }
}

impl Drop for NetworkCanvas {
    fn drop(&mut self) {
        if let Some(Ok(mut anim)) = self.anim.as_ref().map(|a| a.try_borrow_mut()) {
            anim.stop();
        }
    }
}

// ============================================================================
// PAGE - Bootstrap and inline-handler entry points
// ============================================================================

/// Everything `boot` wired up. Dropping it detaches the listeners and stops
/// the animation, so the page keeps it for its whole lifetime.
#[wasm_bindgen]
pub struct App {
    canvas: NetworkCanvas,
    menu: Option<MenuBinding>,
}

#[wasm_bindgen]
impl App {
    #[wasm_bindgen(getter, js_name = menuOpen)]
    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(|m| m.state() == ui::MenuState::Open)
    }

    #[wasm_bindgen(getter, js_name = animating)]
    pub fn animating(&self) -> bool {
        !self.canvas.inert()
    }
}

#[wasm_bindgen]
pub fn boot() -> App {
    logging::install();

    if let Err(e) = ui::bootstrap_icons(web::Lucide::global().as_ref()) {
        warn!(error = %e, "icons left unstyled");
    }

    let canvas = NetworkCanvas::new(CANVAS_ID);

    let menu = web::page()
        .and_then(|page| {
            let window = page.window().clone();
            MenuBinding::bind(page, AnimationFrames::new(window.clone()), WindowTimers::new(window))
        })
        .map_err(|e| warn!(error = %e, "mobile menu disabled"))
        .ok();

    info!("site engine initialized");
    App { canvas, menu }
}

#[wasm_bindgen(js_name = switchView)]
pub fn switch_view(view_id: &str) {
    match web::page() {
        Ok(page) => ui::switch_view(&page, view_id),
        Err(e) => warn!(error = %e, "switchView"),
    }
}

#[wasm_bindgen(js_name = switchTab)]
pub fn switch_tab(tab_name: &str) {
    match web::page() {
        Ok(page) => ui::switch_tab(&page, tab_name),
        Err(e) => warn!(error = %e, "switchTab"),
    }
}
