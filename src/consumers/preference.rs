use crate::error::Result;
use crate::manager::SharedLayoutManager;
use crate::schema::LayoutSchema;

/// Mode selector control. Drives the manager but does not subscribe to it.
pub struct LayoutPreference {
    manager: SharedLayoutManager,
    layout_schema: LayoutSchema,
}

impl LayoutPreference {
    /// Reads the active schema once; later overrides are not reflected here.
    pub fn new(manager: SharedLayoutManager) -> Self {
        let layout_schema = manager.borrow().active_schema();
        Self {
            manager,
            layout_schema,
        }
    }

    pub fn selected(&self) -> LayoutSchema {
        self.layout_schema
    }

    pub fn change_layout(&mut self, schema: LayoutSchema) {
        self.layout_schema = schema;
        self.manager.borrow_mut().set_layout(schema);
    }

    /// Select a schema by name, e.g. from a form value.
    pub fn select(&mut self, name: &str) -> Result<()> {
        let schema = name.parse::<LayoutSchema>()?;
        self.change_layout(schema);
        Ok(())
    }

    pub fn window_resize(&self, width: u32) {
        self.manager.borrow_mut().notify_window_resize(width);
    }
}
