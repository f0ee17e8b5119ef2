// dom.rs - Document-backed Dom and the Lucide global

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::{Error, Result};
use crate::ui::{Dom, IconLibrary};
use crate::ui::icons::LUCIDE;

#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    pub fn window(&self) -> &Window { &self.window }
    pub fn document(&self) -> &Document { &self.document }

    fn element(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }
}

impl Dom for WebDom {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn add_class(&self, id: &str, class: &str) -> Result<()> {
        Ok(self.element(id)?.class_list().add_1(class)?)
    }

    fn remove_class(&self, id: &str, class: &str) -> Result<()> {
        Ok(self.element(id)?.class_list().remove_1(class)?)
    }

    fn replace_class(&self, id: &str, from: &str, to: &str) -> Result<()> {
        self.element(id)?.class_list().replace(from, to)?;
        Ok(())
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> Result<()> {
        Ok(self.element(id)?.set_attribute(name, value)?)
    }

    fn force_reflow(&self, id: &str) -> Result<()> {
        if let Some(el) = self.element(id)?.dyn_ref::<HtmlElement>() {
            let _ = el.offset_height();
        }
        Ok(())
    }

    fn set_scroll_locked(&self, locked: bool) -> Result<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| Error::MissingElement("body".to_string()))?;
        let style = body.style();
        if locked {
            style.set_property("overflow", "hidden")?;
        } else {
            style.remove_property("overflow")?;
        }
        Ok(())
    }

    fn scroll_to_top(&self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// `window.lucide`, if the script tag loaded.
pub struct Lucide(JsValue);

impl Lucide {
    pub fn global() -> Option<Self> {
        let lib = Reflect::get(&js_sys::global(), &JsValue::from_str(LUCIDE)).ok()?;
        if lib.is_undefined() || lib.is_null() {
            return None;
        }
        Some(Self(lib))
    }
}

impl IconLibrary for Lucide {
    fn create_icons(&self) -> Result<()> {
        let create = Reflect::get(&self.0, &JsValue::from_str("createIcons"))?
            .dyn_into::<Function>()
            .map_err(|_| Error::MissingLibrary(LUCIDE))?;
        create.call0(&self.0)?;
        Ok(())
    }
}
