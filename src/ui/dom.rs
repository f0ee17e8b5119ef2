// dom.rs - The slice of the document the controllers need
//
// Everything is addressed by element id. Lookups of ids the page does not
// have come back as Error::MissingElement.

use crate::error::Result;

/// Opaque id of a pending timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

pub type TimerCallback = Box<dyn FnOnce()>;

/// Host timeouts (`setTimeout` / `clearTimeout` in the browser).
pub trait Timers {
    fn set_timeout(&self, callback: TimerCallback, delay_ms: i32) -> Result<TimerHandle>;
    fn clear_timeout(&self, handle: TimerHandle);
}

pub trait Dom {
    fn has_element(&self, id: &str) -> bool;

    fn add_class(&self, id: &str, class: &str) -> Result<()>;
    fn remove_class(&self, id: &str, class: &str) -> Result<()>;
    /// Swap `from` for `to`; a no-op when `from` is not present.
    fn replace_class(&self, id: &str, from: &str, to: &str) -> Result<()>;

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> Result<()>;

    /// Read layout so a following class change starts a CSS transition.
    fn force_reflow(&self, id: &str) -> Result<()>;

    fn set_scroll_locked(&self, locked: bool) -> Result<()>;
    fn scroll_to_top(&self);
}
