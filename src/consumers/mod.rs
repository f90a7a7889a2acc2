//! Interface elements that subscribe to, or drive, the layout manager.
//!
//! [`LayoutSession`] wires one of each together the way an interface would
//! at startup.

mod content;
mod element;
mod master;
mod offcanvas_button;
mod preference;
mod sidebar;

use std::rc::Rc;

use crate::config::LayoutConfig;
use crate::host::Viewport;
use crate::manager::{LayoutManager, SharedLayoutManager};

pub use content::LayoutContent;
pub use element::ElementState;
pub use master::{LayoutMaster, SidebarAction};
pub use offcanvas_button::OffCanvasButton;
pub use preference::LayoutPreference;
pub use sidebar::LayoutSidebar;

/// One manager plus every stock consumer, registered in interface order.
pub struct LayoutSession {
    pub manager: SharedLayoutManager,
    pub preference: LayoutPreference,
    pub button: Rc<OffCanvasButton>,
    pub master: Rc<LayoutMaster>,
    pub content: Rc<LayoutContent>,
    pub sidebar: Rc<LayoutSidebar>,
}

impl LayoutSession {
    pub fn new(viewport: Rc<dyn Viewport>, config: LayoutConfig) -> Self {
        let manager = LayoutManager::with_config(viewport.inner_width(), config).into_shared();
        let preference = LayoutPreference::new(manager.clone());
        let button = OffCanvasButton::new(manager.clone());
        let master = LayoutMaster::new(&manager, viewport);
        let content = LayoutContent::new(&manager);
        let sidebar = LayoutSidebar::new(manager.clone());
        Self {
            manager,
            preference,
            button,
            master,
            content,
            sidebar,
        }
    }
}
