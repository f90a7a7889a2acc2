//! Capability contracts for layout subscribers.
//!
//! Every subscriber implements [`LayoutListener`]. The signal categories it
//! receives are declared by the handles it exposes: `as_mouse_listener` and
//! `as_window_listener` returning `Some`, plus `receives_layout` for mode
//! changes. [`DeclaredCapabilities::capabilities`] folds those into a
//! [`Capabilities`] set, so a declared capability always has a callback
//! behind it.

use std::fmt;

use crate::schema::LayoutSchema;

/// Signal category a subscriber can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Layout mode changes.
    Base,
    /// Hover or toggle booleans.
    Mouse,
    /// Raw viewport widths.
    Window,
}

impl Capability {
    const fn bit(self) -> u8 {
        match self {
            Capability::Base => 0b001,
            Capability::Mouse => 0b010,
            Capability::Window => 0b100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Base => "base",
            Capability::Mouse => "mouse",
            Capability::Window => "window",
        }
    }
}

/// Small set of [`Capability`] tags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    pub const BASE: Capabilities = Capabilities(Capability::Base.bit());

    pub const fn empty() -> Self {
        Self::NONE
    }

    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    pub fn of(capabilities: &[Capability]) -> Self {
        capabilities
            .iter()
            .fold(Self::empty(), |set, cap| set.with(*cap))
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        [Capability::Base, Capability::Mouse, Capability::Window]
            .into_iter()
            .filter(move |cap| self.contains(*cap))
    }

    pub fn names(self) -> Vec<&'static str> {
        self.iter().map(Capability::as_str).collect()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Base contract: receives layout mode changes.
///
/// Callbacks take `&self` so a subscriber can call back into the manager's
/// mouse broadcast while it is itself registered; keep mutable state in
/// `Cell`/`RefCell` fields.
pub trait LayoutListener {
    fn name(&self) -> &str {
        "layout_listener"
    }

    /// `false` opts out of mode changes, including the sync on registration.
    fn receives_layout(&self) -> bool {
        true
    }

    fn change_layout(&self, schema: LayoutSchema);

    fn as_mouse_listener(&self) -> Option<&dyn LayoutMouseListener> {
        None
    }

    fn as_window_listener(&self) -> Option<&dyn LayoutWindowListener> {
        None
    }
}

/// Capability set derived from a listener's handles.
pub trait DeclaredCapabilities {
    fn capabilities(&self) -> Capabilities;
}

impl<T: LayoutListener + ?Sized> DeclaredCapabilities for T {
    fn capabilities(&self) -> Capabilities {
        let mut set = Capabilities::empty();
        if self.receives_layout() {
            set = set.with(Capability::Base);
        }
        if self.as_mouse_listener().is_some() {
            set = set.with(Capability::Mouse);
        }
        if self.as_window_listener().is_some() {
            set = set.with(Capability::Window);
        }
        set
    }
}

/// Receives hover and toggle booleans.
pub trait LayoutMouseListener: LayoutListener {
    fn notify_mouse(&self, in_or_out: bool);
}

/// Receives raw viewport widths in pixels.
pub trait LayoutWindowListener: LayoutListener {
    fn notify_resize(&self, width: u32);
}
