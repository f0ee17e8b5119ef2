// config.rs - Compile-time page configuration
//
// Nothing here is tunable at runtime. Tests build their own NetworkConfig
// when they want a smaller world.

use crate::render::Rgb;

// Network animation
pub const PARTICLE_COUNT: usize = 40;
pub const CONNECTION_DISTANCE: f64 = 250.0;
pub const SPEED_SCALE: f64 = 0.2;

pub const PARTICLE_COLOR: &str = "#3b82f6";
pub const LINK_COLOR: Rgb = Rgb(59, 130, 246);
pub const LINK_WIDTH: f64 = 0.5;

pub const CANVAS_ID: &str = "network-canvas";

// Navigation
pub const VIEWS: [&str; 3] = ["home", "team", "contact"];
pub const TABS: [&str; 3] = ["advisory", "team", "organising-committee"];

pub const HIDDEN: &str = "hidden";
pub const TAB_ACTIVE: &str = "tab-active";
pub const TAB_TEXT_ACTIVE: &str = "text-ieee-blue";
pub const TAB_TEXT_IDLE: &str = "text-slate-500";

// Mobile menu
pub const MENU_ID: &str = "mobile-menu";
pub const MENU_OPEN_BUTTON_ID: &str = "mobile-menu-button";
pub const MENU_CLOSE_BUTTON_ID: &str = "mobile-menu-close";
pub const MENU_OPEN_CLASS: &str = "open";
/// Matches the CSS transition on `#mobile-menu`.
pub const MENU_CLOSE_DELAY_MS: i32 = 300;
/// Tailwind `md`; above this the desktop nav takes over.
pub const MENU_BREAKPOINT_PX: f64 = 768.0;

/// Knobs of the particle network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub particle_count: usize,
    pub connection_distance: f64,
    pub speed_scale: f64,
    pub particle_color: &'static str,
    pub link_color: Rgb,
    pub link_width: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            connection_distance: CONNECTION_DISTANCE,
            speed_scale: SPEED_SCALE,
            particle_color: PARTICLE_COLOR,
            link_color: LINK_COLOR,
            link_width: LINK_WIDTH,
        }
    }
}

/// Id of the container for a view, e.g. `team` -> `team-view`.
pub fn view_container(view: &str) -> String {
    format!("{view}-view")
}

pub fn tab_button(tab: &str) -> String {
    format!("tab-{tab}")
}

pub fn tab_content(tab: &str) -> String {
    format!("content-{tab}")
}
