// animation.rs - Self-rescheduling frame loop around a Network
//
// The loop lives behind Rc<RefCell<_>> because every frame callback has to
// get back to it. Callbacks hold a Weak, so dropping the last strong handle
// ends the loop at the next frame.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::warn;

use super::Network;
use crate::error::Result;
use crate::render::Surface;

pub type FrameCallback = Box<dyn FnOnce()>;

/// Opaque id of a scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host frame clock (`requestAnimationFrame` in the browser).
pub trait FrameScheduler {
    fn schedule_frame(&self, callback: FrameCallback) -> Result<FrameHandle>;
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Source of the dimensions the surface should mirror.
pub trait Viewport {
    fn size(&self) -> (u32, u32);
}

pub struct AnimationLoop<S, V, F> {
    network: Network,
    // None when the canvas was missing: everything below is a no-op
    surface: Option<S>,
    viewport: V,
    scheduler: F,
    pending: Option<FrameHandle>,
}

impl<S, V, F> AnimationLoop<S, V, F>
where
    S: Surface + 'static,
    V: Viewport + 'static,
    F: FrameScheduler + 'static,
{
    /// Builds the loop and performs the initial resize. Without a surface the
    /// loop is inert, which is logged once here.
    pub fn new(network: Network, surface: Option<S>, viewport: V, scheduler: F) -> Rc<RefCell<Self>> {
        if surface.is_none() {
            warn!("no drawing surface, network animation inert");
        }
        let mut this = Self { network, surface, viewport, scheduler, pending: None };
        this.resize();
        Rc::new(RefCell::new(this))
    }

    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    /// Re-read the viewport, resize the surface and regenerate the network.
    pub fn resize(&mut self) {
        let Some(surface) = self.surface.as_mut() else { return };
        let (w, h) = self.viewport.size();
        surface.set_size(w, h);
        self.network.resize(w, h);
    }

    pub fn tick(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.network.tick(surface);
        }
    }

    /// Schedule the first frame. Does nothing if already running or inert.
    pub fn start(this: &Rc<RefCell<Self>>) {
        if this.borrow().pending.is_some() { return; }
        Self::schedule_next(this);
    }

    /// Cancel the outstanding frame, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn network(&self) -> &Network { &self.network }
    pub fn surface(&self) -> Option<&S> { self.surface.as_ref() }

    fn schedule_next(this: &Rc<RefCell<Self>>) {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
        let mut inner = this.borrow_mut();
        if inner.is_inert() { return; }

        let callback: FrameCallback = Box::new(move || {
            if let Some(this) = weak.upgrade() {
                Self::frame(&this);
            }
        });

        let scheduled = inner.scheduler.schedule_frame(callback);
        match scheduled {
            Ok(handle) => inner.pending = Some(handle),
            Err(e) => {
                inner.pending = None;
                warn!(error = %e, "could not schedule animation frame");
            }
        }
    }

    fn frame(this: &Rc<RefCell<Self>>) {
        {
            let mut inner = this.borrow_mut();
            // Stopped between scheduling and firing
            if inner.pending.take().is_none() { return; }
            inner.tick();
        }
        Self::schedule_next(this);
    }
}
