// menu.rs - Mobile menu state machine
//
//   Closed --open--> Open        unhide, reflow, add `open` next frame,
//                                lock scroll, aria-expanded=true
//   Open --close/link/wide/Esc--> Closed
//                                drop `open` now, hide after the CSS
//                                transition, unlock scroll, aria-expanded=false
//
// The pending frame and the pending hide are owned here and cancelled on
// the opposite transition, so a quick close/open never hides an open menu.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use super::{Dom, TimerCallback, TimerHandle, Timers};
use crate::config::{
    HIDDEN, MENU_BREAKPOINT_PX, MENU_CLOSE_BUTTON_ID, MENU_CLOSE_DELAY_MS, MENU_ID,
    MENU_OPEN_BUTTON_ID, MENU_OPEN_CLASS,
};
use crate::error::{Error, Result};
use crate::sim::{FrameCallback, FrameHandle, FrameScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

/// Inputs the page feeds into the menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEvent {
    Open,
    Close,
    LinkClick,
    Resize { width: f64 },
    Key(String),
}

/// Which of the menu's buttons the page has.
///
/// Either may be missing: the menu still closes on links, Escape and the
/// breakpoint, it just loses that one trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuButtons {
    pub open: bool,
    pub close: bool,
}

impl MenuButtons {
    pub fn find(dom: &impl Dom) -> Self {
        Self {
            open: present(dom, MENU_OPEN_BUTTON_ID),
            close: present(dom, MENU_CLOSE_BUTTON_ID),
        }
    }
}

fn present(dom: &impl Dom, id: &str) -> bool {
    let found = dom.has_element(id);
    if !found {
        warn!(error = %Error::MissingElement(id.to_string()), "mobile menu trigger unavailable");
    }
    found
}

pub struct MobileMenu<D, F, T> {
    dom: D,
    frames: F,
    timers: T,
    state: MenuState,
    open_frame: Option<FrameHandle>,
    hide_timer: Option<TimerHandle>,
}

impl<D, F, T> MobileMenu<D, F, T>
where
    D: Dom + 'static,
    F: FrameScheduler + 'static,
    T: Timers + 'static,
{
    /// Fails with `MissingElement` if the page has no `#mobile-menu`.
    pub fn new(dom: D, frames: F, timers: T) -> Result<Rc<RefCell<Self>>> {
        if !dom.has_element(MENU_ID) {
            return Err(Error::MissingElement(MENU_ID.to_string()));
        }
        Ok(Rc::new(RefCell::new(Self {
            dom,
            frames,
            timers,
            state: MenuState::Closed,
            open_frame: None,
            hide_timer: None,
        })))
    }

    pub fn state(&self) -> MenuState { self.state }

    /// Closing is still animating.
    pub fn is_closing(&self) -> bool {
        self.hide_timer.is_some()
    }

    pub fn dispatch(this: &Rc<RefCell<Self>>, event: MenuEvent) {
        let state = this.borrow().state;
        match (state, event) {
            (MenuState::Closed, MenuEvent::Open) => Self::open(this),
            (MenuState::Open, MenuEvent::Close | MenuEvent::LinkClick) => Self::close(this),
            (MenuState::Open, MenuEvent::Resize { width }) if width >= MENU_BREAKPOINT_PX => {
                Self::close(this)
            }
            (MenuState::Open, MenuEvent::Key(key)) if key == "Escape" => Self::close(this),
            _ => {}
        }
    }

    fn open(this: &Rc<RefCell<Self>>) {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
        let mut m = this.borrow_mut();

        if let Some(handle) = m.hide_timer.take() {
            m.timers.clear_timeout(handle);
        }
        m.state = MenuState::Open;
        debug!("mobile menu opening");

        logged(m.dom.remove_class(MENU_ID, HIDDEN));
        logged(m.dom.force_reflow(MENU_ID));

        let callback: FrameCallback = Box::new(move || {
            if let Some(this) = weak.upgrade() {
                this.borrow_mut().on_open_frame();
            }
        });
        let scheduled = m.frames.schedule_frame(callback);
        match scheduled {
            Ok(handle) => m.open_frame = Some(handle),
            Err(e) => {
                // No frame clock: skip the transition
                warn!(error = %e, "menu open frame");
                logged(m.dom.add_class(MENU_ID, MENU_OPEN_CLASS));
            }
        }

        logged(m.dom.set_scroll_locked(true));
        logged(m.dom.set_attribute(MENU_OPEN_BUTTON_ID, "aria-expanded", "true"));
    }

    fn on_open_frame(&mut self) {
        if self.open_frame.take().is_none() || self.state != MenuState::Open {
            return;
        }
        logged(self.dom.add_class(MENU_ID, MENU_OPEN_CLASS));
    }

    fn close(this: &Rc<RefCell<Self>>) {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
        let mut m = this.borrow_mut();

        if let Some(handle) = m.open_frame.take() {
            m.frames.cancel_frame(handle);
        }
        if let Some(handle) = m.hide_timer.take() {
            m.timers.clear_timeout(handle);
        }
        m.state = MenuState::Closed;
        debug!("mobile menu closing");

        logged(m.dom.remove_class(MENU_ID, MENU_OPEN_CLASS));

        let callback: TimerCallback = Box::new(move || {
            if let Some(this) = weak.upgrade() {
                this.borrow_mut().on_hide_elapsed();
            }
        });
        let scheduled = m.timers.set_timeout(callback, MENU_CLOSE_DELAY_MS);
        match scheduled {
            Ok(handle) => m.hide_timer = Some(handle),
            Err(e) => {
                warn!(error = %e, "menu close timer");
                m.finish_close();
            }
        }
    }

    fn on_hide_elapsed(&mut self) {
        if self.hide_timer.take().is_none() || self.state != MenuState::Closed {
            return;
        }
        self.finish_close();
    }

    fn finish_close(&mut self) {
        logged(self.dom.add_class(MENU_ID, HIDDEN));
        logged(self.dom.set_scroll_locked(false));
        logged(self.dom.set_attribute(MENU_OPEN_BUTTON_ID, "aria-expanded", "false"));
    }
}

fn logged(result: Result<()>) {
    if let Err(e) = result {
        warn!(error = %e, "mobile menu");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDom, ManualFrames, ManualTimers, capture_logs};

    type Menu = MobileMenu<FakeDom, ManualFrames, ManualTimers>;

    struct Rig {
        menu: Rc<RefCell<Menu>>,
        dom: FakeDom,
        frames: ManualFrames,
        timers: ManualTimers,
    }

    fn rig() -> Rig {
        let dom = FakeDom::default();
        dom.insert(MENU_ID, &[HIDDEN]);
        dom.insert(MENU_OPEN_BUTTON_ID, &[]);
        let frames = ManualFrames::default();
        let timers = ManualTimers::default();
        let menu = Menu::new(dom.clone(), frames.clone(), timers.clone()).unwrap();
        Rig { menu, dom, frames, timers }
    }

    impl Rig {
        fn send(&self, event: MenuEvent) {
            Menu::dispatch(&self.menu, event);
        }

        fn state(&self) -> MenuState {
            self.menu.borrow().state()
        }

        fn menu_classes(&self) -> std::collections::BTreeSet<String> {
            self.dom.classes(MENU_ID)
        }

        fn open_fully(&self) {
            self.send(MenuEvent::Open);
            self.frames.run_all();
        }
    }

    #[test]
    fn missing_menu_element() {
        let err = Menu::new(FakeDom::default(), ManualFrames::default(), ManualTimers::default())
            .err()
            .unwrap();
        assert_eq!(err, Error::MissingElement("mobile-menu".into()));
    }

    #[test]
    fn buttons_found_independently() {
        let dom = FakeDom::default();
        dom.insert(MENU_ID, &[HIDDEN]);
        dom.insert(MENU_OPEN_BUTTON_ID, &[]);

        let logs = capture_logs(|| {
            assert_eq!(MenuButtons::find(&dom), MenuButtons { open: true, close: false });
        });
        assert!(logs.contains("mobile-menu-close"), "{logs}");

        dom.insert(MENU_CLOSE_BUTTON_ID, &[]);
        assert_eq!(MenuButtons::find(&dom), MenuButtons { open: true, close: true });
    }

    #[test]
    fn menu_works_without_its_buttons() {
        let dom = FakeDom::default();
        dom.insert(MENU_ID, &[HIDDEN]);
        assert_eq!(MenuButtons::find(&dom), MenuButtons { open: false, close: false });

        let frames = ManualFrames::default();
        let timers = ManualTimers::default();
        let menu = Menu::new(dom.clone(), frames.clone(), timers.clone()).unwrap();

        Menu::dispatch(&menu, MenuEvent::Open);
        frames.run_all();
        assert!(dom.classes(MENU_ID).contains(MENU_OPEN_CLASS));

        Menu::dispatch(&menu, MenuEvent::Key("Escape".into()));
        timers.run_all();
        assert_eq!(menu.borrow().state(), MenuState::Closed);
        assert!(dom.classes(MENU_ID).contains(HIDDEN));
        assert!(!dom.scroll_locked());
    }

    #[test]
    fn open_unhides_then_animates_next_frame() {
        let r = rig();
        r.send(MenuEvent::Open);

        assert_eq!(r.state(), MenuState::Open);
        assert!(!r.menu_classes().contains(HIDDEN));
        assert!(!r.menu_classes().contains(MENU_OPEN_CLASS));
        assert_eq!(r.dom.reflows(MENU_ID), 1);
        assert!(r.dom.scroll_locked());
        assert_eq!(r.dom.attribute(MENU_OPEN_BUTTON_ID, "aria-expanded").as_deref(), Some("true"));

        r.frames.run_all();
        assert!(r.menu_classes().contains(MENU_OPEN_CLASS));
    }

    #[test]
    fn close_defers_hide_until_transition_ends() {
        let r = rig();
        r.open_fully();
        r.send(MenuEvent::Close);

        assert_eq!(r.state(), MenuState::Closed);
        assert!(!r.menu_classes().contains(MENU_OPEN_CLASS));
        assert!(!r.menu_classes().contains(HIDDEN));
        assert!(r.dom.scroll_locked());
        assert_eq!(r.timers.pending_delays(), [MENU_CLOSE_DELAY_MS]);

        r.timers.run_all();
        assert!(r.menu_classes().contains(HIDDEN));
        assert!(!r.dom.scroll_locked());
        assert_eq!(r.dom.attribute(MENU_OPEN_BUTTON_ID, "aria-expanded").as_deref(), Some("false"));
        assert!(!r.menu.borrow().is_closing());
    }

    #[test]
    fn every_close_trigger_closes() {
        for event in [
            MenuEvent::Close,
            MenuEvent::LinkClick,
            MenuEvent::Key("Escape".into()),
            MenuEvent::Resize { width: 1024.0 },
        ] {
            let r = rig();
            r.open_fully();
            r.send(event.clone());
            assert_eq!(r.state(), MenuState::Closed, "{event:?}");
        }
    }

    #[test]
    fn irrelevant_events_are_ignored() {
        let r = rig();
        r.open_fully();
        r.send(MenuEvent::Key("Enter".into()));
        r.send(MenuEvent::Resize { width: 500.0 });
        r.send(MenuEvent::Open);
        assert_eq!(r.state(), MenuState::Open);
        assert_eq!(r.frames.pending(), 0);

        let r = rig();
        r.send(MenuEvent::Close);
        r.send(MenuEvent::Key("Escape".into()));
        assert_eq!(r.state(), MenuState::Closed);
        assert_eq!(r.timers.pending(), 0);
    }

    #[test]
    fn reopen_while_closing_cancels_hide() {
        let r = rig();
        r.open_fully();
        r.send(MenuEvent::Close);
        assert!(r.menu.borrow().is_closing());

        r.send(MenuEvent::Open);
        assert_eq!(r.timers.pending(), 0);
        r.frames.run_all();
        r.timers.run_all();

        assert_eq!(r.state(), MenuState::Open);
        assert!(!r.menu_classes().contains(HIDDEN));
        assert!(r.menu_classes().contains(MENU_OPEN_CLASS));
        assert!(r.dom.scroll_locked());
    }

    #[test]
    fn open_without_frame_clock_applies_class_at_once() {
        let r = rig();
        r.frames.fail_scheduling();
        r.send(MenuEvent::Open);
        assert_eq!(r.state(), MenuState::Open);
        assert!(r.menu_classes().contains(MENU_OPEN_CLASS));
    }

    #[test]
    fn close_before_first_frame_never_adds_open_class() {
        let r = rig();
        r.send(MenuEvent::Open);
        r.send(MenuEvent::Key("Escape".into()));
        assert_eq!(r.frames.pending(), 0);

        r.frames.run_all();
        r.timers.run_all();
        assert!(!r.menu_classes().contains(MENU_OPEN_CLASS));
        assert!(r.menu_classes().contains(HIDDEN));
    }
}
