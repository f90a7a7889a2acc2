//! Layout schema value type and the shared layout constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Viewport width (px) below which the engine forces [`LayoutSchema::OffCanvas`].
pub const MIN_WIDTH: u32 = 768;
/// Width (px) of a fully opened sidebar.
pub const SIDEBAR_OPEN: u32 = 250;

pub const OPEN_BAR_CLASS: &str = "is-open-bar";
pub const THIN_BAR_CLASS: &str = "is-thin-bar";
pub const OFF_CANVAS_CLASS: &str = "is-off-canvas";

/// How the sidebar and the content area are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutSchema {
    /// Thin bar that expands while hovered.
    AutoHide,
    /// Sidebar permanently open next to the content.
    #[default]
    AlwaysOpen,
    /// Sidebar pushed off screen, revealed through a toggle.
    OffCanvas,
}

impl LayoutSchema {
    pub const ALL: [LayoutSchema; 3] = [
        LayoutSchema::AutoHide,
        LayoutSchema::AlwaysOpen,
        LayoutSchema::OffCanvas,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutSchema::AutoHide => "auto-hide",
            LayoutSchema::AlwaysOpen => "always-open",
            LayoutSchema::OffCanvas => "off-canvas",
        }
    }
}

impl fmt::Display for LayoutSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutSchema {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto-hide" | "autohide" | "auto_hide" => Ok(LayoutSchema::AutoHide),
            "always-open" | "alwaysopen" | "always_open" => Ok(LayoutSchema::AlwaysOpen),
            "off-canvas" | "offcanvas" | "off_canvas" => Ok(LayoutSchema::OffCanvas),
            _ => Err(LayoutError::UnknownSchema(s.to_string())),
        }
    }
}
