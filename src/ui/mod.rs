// ui/ - Page controllers
//
// Navigation, mobile menu and icon bootstrap. All of them talk to the page
// through the Dom / Timers traits so they run the same against web::WebDom
// and the in-memory fakes.

mod dom;
pub mod icons;
pub mod menu;
pub mod nav;

pub use dom::{Dom, TimerCallback, TimerHandle, Timers};
pub use icons::{IconLibrary, bootstrap_icons};
pub use menu::{MenuButtons, MenuEvent, MenuState, MobileMenu};
pub use nav::{switch_tab, switch_view};
