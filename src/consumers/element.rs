use std::collections::BTreeSet;

/// Visual state a responder writes into: CSS class toggles plus a width style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    classes: BTreeSet<&'static str>,
    width: Option<String>,
}

impl ElementState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_class(&mut self, class: &'static str, enabled: bool) {
        if enabled {
            self.classes.insert(class);
        } else {
            self.classes.remove(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> Vec<&'static str> {
        self.classes.iter().copied().collect()
    }

    pub fn set_width_px(&mut self, width: u32) {
        self.width = Some(format!("{width}px"));
    }

    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }
}
