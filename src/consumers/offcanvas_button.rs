use std::cell::Cell;
use std::rc::Rc;

use crate::listener::LayoutListener;
use crate::manager::SharedLayoutManager;
use crate::schema::LayoutSchema;

/// Toggle control shown only while off canvas.
///
/// Each activation flips a local flag and broadcasts the new value as a
/// mouse signal, standing in for hover on devices that only click.
pub struct OffCanvasButton {
    manager: SharedLayoutManager,
    layout_schema: Cell<Option<LayoutSchema>>,
    visible: Cell<bool>,
    toggle_state: Cell<bool>,
}

impl OffCanvasButton {
    pub fn new(manager: SharedLayoutManager) -> Rc<Self> {
        let button = Rc::new(Self {
            manager: manager.clone(),
            layout_schema: Cell::new(None),
            visible: Cell::new(false),
            toggle_state: Cell::new(true),
        });
        manager.borrow_mut().register(&button);
        button
    }

    pub fn visible(&self) -> bool {
        self.visible.get()
    }

    pub fn toggle_state(&self) -> bool {
        self.toggle_state.get()
    }

    /// Returns the broadcast value, or `None` when not off canvas.
    pub fn toggle_sidebar(&self) -> Option<bool> {
        if self.layout_schema.get() != Some(LayoutSchema::OffCanvas) {
            return None;
        }
        let next = !self.toggle_state.get();
        self.manager.borrow_mut().notify_all_mouse(next);
        self.toggle_state.set(next);
        Some(next)
    }
}

impl LayoutListener for OffCanvasButton {
    fn name(&self) -> &str {
        "offcanvas_button"
    }

    fn change_layout(&self, schema: LayoutSchema) {
        self.layout_schema.set(Some(schema));
        self.visible.set(schema == LayoutSchema::OffCanvas);
    }
}
