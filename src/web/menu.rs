// menu.rs - Wire the mobile menu state machine to page events

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent};

use super::{AnimationFrames, Listener, WebDom, WindowTimers};
use crate::config::{MENU_CLOSE_BUTTON_ID, MENU_ID, MENU_OPEN_BUTTON_ID};
use crate::error::{Error, Result};
use crate::ui::{MenuButtons, MenuEvent, MenuState, MobileMenu};

type WebMenu = MobileMenu<WebDom, AnimationFrames, WindowTimers>;

pub struct MenuBinding {
    menu: Rc<RefCell<WebMenu>>,
    _listeners: Vec<Listener>,
}

impl MenuBinding {
    pub fn bind(dom: WebDom, frames: AnimationFrames, timers: WindowTimers) -> Result<Self> {
        let document = dom.document().clone();
        let window = dom.window().clone();
        let buttons = MenuButtons::find(&dom);

        let menu = WebMenu::new(dom, frames, timers)?;
        let mut listeners = Vec::new();

        if buttons.open {
            let button = target(&document, MENU_OPEN_BUTTON_ID)?;
            listeners.push(on(&button, "click", &menu, |_| Some(MenuEvent::Open))?);
        }
        if buttons.close {
            let button = target(&document, MENU_CLOSE_BUTTON_ID)?;
            listeners.push(on(&button, "click", &menu, |_| Some(MenuEvent::Close))?);
        }

        let links = document.query_selector_all(&format!("#{MENU_ID} a"))?;
        for i in 0..links.length() {
            if let Some(link) = links.get(i) {
                listeners.push(on(&link, "click", &menu, |_| Some(MenuEvent::LinkClick))?);
            }
        }

        let w = window.clone();
        listeners.push(on(&window, "resize", &menu, move |_| {
            let width = w.inner_width().ok()?.as_f64()?;
            Some(MenuEvent::Resize { width })
        })?);

        listeners.push(on(&document, "keydown", &menu, |e| {
            let key = e.dyn_ref::<KeyboardEvent>()?.key();
            Some(MenuEvent::Key(key))
        })?);

        Ok(Self { menu, _listeners: listeners })
    }

    pub fn state(&self) -> MenuState {
        self.menu.borrow().state()
    }
}

fn target(document: &web_sys::Document, id: &str) -> Result<EventTarget> {
    document
        .get_element_by_id(id)
        .map(EventTarget::from)
        .ok_or_else(|| Error::MissingElement(id.to_string()))
}

/// Listen for `kind` on `target`, translate it and feed the menu.
fn on(
    target: &EventTarget,
    kind: &'static str,
    menu: &Rc<RefCell<WebMenu>>,
    translate: impl Fn(&Event) -> Option<MenuEvent> + 'static,
) -> Result<Listener> {
    let menu = Rc::downgrade(menu);
    Listener::new(target, kind, move |event| {
        let (Some(menu), Some(ev)) = (menu.upgrade(), translate(&event)) else { return };
        WebMenu::dispatch(&menu, ev);
    })
}
