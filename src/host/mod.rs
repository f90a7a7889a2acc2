//! Bridge between a host environment and the layout engine.
//!
//! The engine does no I/O. Hosts read the viewport through [`Viewport`] and
//! translate their own events into [`HostEvent`]s, which [`EventBridge`]
//! routes to the manager or to the consumer that owns the interaction.

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::Event as CrosstermEvent;

use crate::consumers::{LayoutSession, LayoutSidebar, OffCanvasButton};
use crate::manager::SharedLayoutManager;
use crate::schema::LayoutSchema;

/// Source of the current viewport width in pixels.
pub trait Viewport {
    fn inner_width(&self) -> u32;
}

/// Viewport whose width is set by the host, or by tests.
#[derive(Debug, Default)]
pub struct FixedViewport {
    width: Cell<u32>,
}

impl FixedViewport {
    pub fn new(width: u32) -> Self {
        Self {
            width: Cell::new(width),
        }
    }

    pub fn set_width(&self, width: u32) {
        self.width.set(width);
    }
}

impl Viewport for FixedViewport {
    fn inner_width(&self) -> u32 {
        self.width.get()
    }
}

/// Terminal-backed viewport: column count scaled to pixels.
#[derive(Debug)]
pub struct TerminalViewport {
    cell_width_px: u32,
    fallback_columns: u16,
}

impl TerminalViewport {
    pub const DEFAULT_CELL_WIDTH_PX: u32 = 8;

    pub fn new(cell_width_px: u32) -> Self {
        Self {
            cell_width_px,
            fallback_columns: 80,
        }
    }

    /// Columns reported when the terminal size cannot be queried.
    pub fn with_fallback_columns(mut self, columns: u16) -> Self {
        self.fallback_columns = columns;
        self
    }

    pub fn columns_to_px(&self, columns: u16) -> u32 {
        u32::from(columns).saturating_mul(self.cell_width_px)
    }
}

impl Default for TerminalViewport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CELL_WIDTH_PX)
    }
}

impl Viewport for TerminalViewport {
    fn inner_width(&self) -> u32 {
        let columns = crossterm::terminal::size()
            .map(|(columns, _rows)| columns)
            .unwrap_or(self.fallback_columns);
        self.columns_to_px(columns)
    }
}

/// Interface occurrences a host reports to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Resize { width: u32 },
    PointerEnter,
    PointerLeave,
    ToggleClick,
    Select(LayoutSchema),
}

impl HostEvent {
    /// Map a terminal event, scaling columns by `cell_width_px`.
    pub fn from_crossterm(event: &CrosstermEvent, cell_width_px: u32) -> Option<Self> {
        match event {
            CrosstermEvent::Resize(columns, _rows) => Some(HostEvent::Resize {
                width: u32::from(*columns).saturating_mul(cell_width_px),
            }),
            _ => None,
        }
    }
}

/// Routes [`HostEvent`]s to the manager and the interactive consumers.
pub struct EventBridge {
    manager: SharedLayoutManager,
    sidebar: Option<Rc<LayoutSidebar>>,
    button: Option<Rc<OffCanvasButton>>,
}

impl EventBridge {
    pub fn new(manager: SharedLayoutManager) -> Self {
        Self {
            manager,
            sidebar: None,
            button: None,
        }
    }

    pub fn for_session(session: &LayoutSession) -> Self {
        Self::new(session.manager.clone())
            .with_sidebar(session.sidebar.clone())
            .with_button(session.button.clone())
    }

    pub fn with_sidebar(mut self, sidebar: Rc<LayoutSidebar>) -> Self {
        self.sidebar = Some(sidebar);
        self
    }

    pub fn with_button(mut self, button: Rc<OffCanvasButton>) -> Self {
        self.button = Some(button);
        self
    }

    /// Returns whether the event reached the engine.
    pub fn dispatch(&self, event: HostEvent) -> bool {
        match event {
            HostEvent::Resize { width } => {
                self.manager.borrow_mut().notify_window_resize(width);
                true
            }
            HostEvent::Select(schema) => {
                self.manager.borrow_mut().set_layout(schema);
                true
            }
            HostEvent::PointerEnter => self
                .sidebar
                .as_ref()
                .is_some_and(|sidebar| sidebar.on_mouse_enter()),
            HostEvent::PointerLeave => self
                .sidebar
                .as_ref()
                .is_some_and(|sidebar| sidebar.on_mouse_leave()),
            HostEvent::ToggleClick => self
                .button
                .as_ref()
                .is_some_and(|button| button.toggle_sidebar().is_some()),
        }
    }
}
