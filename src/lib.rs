//! Layout coordination engine for a collapsible-sidebar interface.
//!
//! A [`LayoutManager`] tracks the active [`LayoutSchema`], overrides it to
//! off-canvas below the width breakpoint, and fans mode, width and mouse
//! signals out to subscribers according to the capabilities they declare.
//! Everything runs synchronously on the caller's thread.

pub mod config;
pub mod consumers;
pub mod csrf;
pub mod error;
pub mod host;
pub mod listener;
pub mod logging;
pub mod manager;
pub mod metrics;
pub mod schema;

pub use config::LayoutConfig;
pub use consumers::{
    ElementState, LayoutContent, LayoutMaster, LayoutPreference, LayoutSession, LayoutSidebar,
    OffCanvasButton, SidebarAction,
};
pub use csrf::{CsrfHeaders, HeaderList, PreflightClient};
pub use error::{LayoutError, Result};
pub use host::{EventBridge, FixedViewport, HostEvent, TerminalViewport, Viewport};
pub use listener::{
    Capabilities, Capability, DeclaredCapabilities, LayoutListener, LayoutMouseListener,
    LayoutWindowListener,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, NullSink,
};
pub use manager::{LayoutManager, ListenerId, SharedLayoutManager};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use schema::{LayoutSchema, MIN_WIDTH, SIDEBAR_OPEN};
