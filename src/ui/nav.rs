// nav.rs - View and tab switching
//
// State lives entirely in the DOM classes, so both operations are
// idempotent. Missing elements are logged and skipped.

use tracing::warn;

use super::Dom;
use crate::config::{self, HIDDEN, TAB_ACTIVE, TAB_TEXT_ACTIVE, TAB_TEXT_IDLE, TABS, VIEWS};
use crate::error::Result;

/// Hide every known view, reveal `{view_id}-view` and scroll to the top.
///
/// An unknown id leaves every view hidden and does not scroll.
pub fn switch_view(dom: &impl Dom, view_id: &str) {
    for view in VIEWS {
        logged(dom.add_class(&config::view_container(view), HIDDEN));
    }

    let selected = config::view_container(view_id);
    if !dom.has_element(&selected) {
        warn!(view = view_id, "unknown view");
        return;
    }
    if logged(dom.remove_class(&selected, HIDDEN)).is_some() {
        dom.scroll_to_top();
    }
}

/// Activate `tab_name` among the team page tabs and show its content.
pub fn switch_tab(dom: &impl Dom, tab_name: &str) {
    for tab in TABS {
        deactivate(dom, tab);
    }

    let button = config::tab_button(tab_name);
    if logged(dom.add_class(&button, TAB_ACTIVE)).is_some() {
        logged(dom.replace_class(&button, TAB_TEXT_IDLE, TAB_TEXT_ACTIVE));
    }
    logged(dom.remove_class(&config::tab_content(tab_name), HIDDEN));
}

fn deactivate(dom: &impl Dom, tab: &str) {
    let button = config::tab_button(tab);
    if logged(dom.remove_class(&button, TAB_ACTIVE)).is_some() {
        logged(dom.replace_class(&button, TAB_TEXT_ACTIVE, TAB_TEXT_IDLE));
    }
    logged(dom.add_class(&config::tab_content(tab), HIDDEN));
}

fn logged<T>(result: Result<T>) -> Option<T> {
    result.map_err(|e| warn!(error = %e, "navigation")).ok()
}
