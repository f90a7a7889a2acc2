use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::host::Viewport;
use crate::listener::{LayoutListener, LayoutMouseListener, LayoutWindowListener};
use crate::manager::SharedLayoutManager;
use crate::schema::{LayoutSchema, OFF_CANVAS_CLASS, OPEN_BAR_CLASS, THIN_BAR_CLASS};

use super::element::ElementState;

/// What a mouse boolean means under the schema that is active when it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    /// Toggle-driven: `revealed` shows the sidebar over the off-canvas layout.
    OffCanvasPin { revealed: bool },
    /// Hover-driven: `expanded` widens the thin auto-hide bar.
    AutoHideHover { expanded: bool },
}

impl SidebarAction {
    /// `None` under [`LayoutSchema::AlwaysOpen`], where the sidebar never moves.
    pub fn interpret(schema: LayoutSchema, in_or_out: bool) -> Option<Self> {
        match schema {
            LayoutSchema::OffCanvas => Some(SidebarAction::OffCanvasPin {
                revealed: !in_or_out,
            }),
            LayoutSchema::AutoHide => Some(SidebarAction::AutoHideHover {
                expanded: in_or_out,
            }),
            LayoutSchema::AlwaysOpen => None,
        }
    }
}

/// Primary panel-and-content responder. Reacts to all three signal categories.
pub struct LayoutMaster {
    viewport: Rc<dyn Viewport>,
    sidebar_open_width: u32,
    layout_schema: Cell<Option<LayoutSchema>>,
    /// Last raw width broadcast by the manager.
    last_width: Cell<Option<u32>>,
    element: RefCell<ElementState>,
}

impl LayoutMaster {
    pub fn new(manager: &SharedLayoutManager, viewport: Rc<dyn Viewport>) -> Rc<Self> {
        let sidebar_open_width = manager.borrow().config().sidebar_open_width;
        let master = Rc::new(Self {
            viewport,
            sidebar_open_width,
            layout_schema: Cell::new(None),
            last_width: Cell::new(None),
            element: RefCell::new(ElementState::new()),
        });
        manager.borrow_mut().register(&master);
        master
    }

    pub fn schema(&self) -> Option<LayoutSchema> {
        self.layout_schema.get()
    }

    pub fn element(&self) -> Ref<'_, ElementState> {
        self.element.borrow()
    }

    fn apply(&self, action: SidebarAction) {
        let mut element = self.element.borrow_mut();
        match action {
            SidebarAction::OffCanvasPin { revealed } => {
                element.set_class(OPEN_BAR_CLASS, revealed);
                element.set_class(OFF_CANVAS_CLASS, !revealed);
            }
            SidebarAction::AutoHideHover { expanded } => {
                element.set_class(THIN_BAR_CLASS, !expanded);
            }
        }
    }
}

impl LayoutListener for LayoutMaster {
    fn name(&self) -> &str {
        "layout_master"
    }

    fn change_layout(&self, schema: LayoutSchema) {
        self.layout_schema.set(Some(schema));
        {
            let mut element = self.element.borrow_mut();
            element.set_class(OPEN_BAR_CLASS, schema == LayoutSchema::AlwaysOpen);
            element.set_class(THIN_BAR_CLASS, schema == LayoutSchema::AutoHide);
            element.set_class(OFF_CANVAS_CLASS, schema == LayoutSchema::OffCanvas);
        }
        if schema == LayoutSchema::OffCanvas {
            let width = self
                .last_width
                .get()
                .unwrap_or_else(|| self.viewport.inner_width());
            self.notify_resize(width);
        }
    }

    fn as_mouse_listener(&self) -> Option<&dyn LayoutMouseListener> {
        Some(self)
    }

    fn as_window_listener(&self) -> Option<&dyn LayoutWindowListener> {
        Some(self)
    }
}

impl LayoutWindowListener for LayoutMaster {
    fn notify_resize(&self, width: u32) {
        self.last_width.set(Some(width));
        let width = if self.layout_schema.get() == Some(LayoutSchema::OffCanvas) {
            width.saturating_add(self.sidebar_open_width)
        } else {
            width
        };
        self.element.borrow_mut().set_width_px(width);
    }
}

impl LayoutMouseListener for LayoutMaster {
    fn notify_mouse(&self, in_or_out: bool) {
        let Some(schema) = self.layout_schema.get() else {
            return;
        };
        if let Some(action) = SidebarAction::interpret(schema, in_or_out) {
            self.apply(action);
        }
    }
}
