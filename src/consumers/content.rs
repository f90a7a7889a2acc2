use std::cell::Cell;
use std::rc::Rc;

use crate::listener::{LayoutListener, LayoutMouseListener};
use crate::manager::SharedLayoutManager;
use crate::schema::LayoutSchema;

/// Content area responder. Subscribes to mode and mouse signals but only
/// records the last schema it saw.
#[derive(Default)]
pub struct LayoutContent {
    layout_schema: Cell<Option<LayoutSchema>>,
}

impl LayoutContent {
    pub fn new(manager: &SharedLayoutManager) -> Rc<Self> {
        let content = Rc::new(Self::default());
        manager.borrow_mut().register(&content);
        content
    }

    pub fn schema(&self) -> Option<LayoutSchema> {
        self.layout_schema.get()
    }
}

impl LayoutListener for LayoutContent {
    fn name(&self) -> &str {
        "layout_content"
    }

    fn change_layout(&self, schema: LayoutSchema) {
        self.layout_schema.set(Some(schema));
    }

    fn as_mouse_listener(&self) -> Option<&dyn LayoutMouseListener> {
        Some(self)
    }
}

impl LayoutMouseListener for LayoutContent {
    fn notify_mouse(&self, _in_or_out: bool) {}
}
