// schedule.rs - requestAnimationFrame and setTimeout
//
// Callbacks are handed over with Closure::once_into_js: the JS side owns
// them and frees them after they run. A cancelled callback is never freed,
// which only matters for the menu timer and costs a few bytes per cancel.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::error::Result;
use crate::sim::{FrameCallback, FrameHandle, FrameScheduler};
use crate::ui::{TimerCallback, TimerHandle, Timers};

#[derive(Clone)]
pub struct AnimationFrames {
    window: Window,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrames {
    fn schedule_frame(&self, callback: FrameCallback) -> Result<FrameHandle> {
        let f = Closure::once_into_js(move || callback());
        let id = self.window.request_animation_frame(f.unchecked_ref())?;
        Ok(FrameHandle(id))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}

#[derive(Clone)]
pub struct WindowTimers {
    window: Window,
}

impl WindowTimers {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Timers for WindowTimers {
    fn set_timeout(&self, callback: TimerCallback, delay_ms: i32) -> Result<TimerHandle> {
        let f = Closure::once_into_js(move || callback());
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(f.unchecked_ref(), delay_ms)?;
        Ok(TimerHandle(id))
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.0);
    }
}
