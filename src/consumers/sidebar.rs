use std::cell::Cell;
use std::rc::Rc;

use crate::listener::{LayoutListener, LayoutMouseListener};
use crate::manager::SharedLayoutManager;
use crate::schema::LayoutSchema;

/// Hover-sensitive sidebar. Produces mouse signals only in auto-hide mode.
pub struct LayoutSidebar {
    manager: SharedLayoutManager,
    current_schema: Cell<Option<LayoutSchema>>,
}

impl LayoutSidebar {
    pub fn new(manager: SharedLayoutManager) -> Rc<Self> {
        let sidebar = Rc::new(Self {
            manager: manager.clone(),
            current_schema: Cell::new(None),
        });
        manager.borrow_mut().register(&sidebar);
        sidebar
    }

    pub fn schema(&self) -> Option<LayoutSchema> {
        self.current_schema.get()
    }

    /// Returns whether a signal was broadcast.
    pub fn on_mouse_enter(&self) -> bool {
        self.hover(true)
    }

    pub fn on_mouse_leave(&self) -> bool {
        self.hover(false)
    }

    fn hover(&self, inside: bool) -> bool {
        if self.current_schema.get() != Some(LayoutSchema::AutoHide) {
            return false;
        }
        self.manager.borrow_mut().notify_all_mouse(inside);
        true
    }
}

impl LayoutListener for LayoutSidebar {
    fn name(&self) -> &str {
        "layout_sidebar"
    }

    fn change_layout(&self, schema: LayoutSchema) {
        self.current_schema.set(Some(schema));
    }

    fn as_mouse_listener(&self) -> Option<&dyn LayoutMouseListener> {
        Some(self)
    }
}

impl LayoutMouseListener for LayoutSidebar {
    fn notify_mouse(&self, _in_or_out: bool) {}
}
