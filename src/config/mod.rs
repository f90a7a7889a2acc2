//! Configuration knobs for the layout engine and its responders.

use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::error::{LayoutError, Result};
use crate::logging::Logger;
use crate::metrics::LayoutMetrics;
use crate::schema::{MIN_WIDTH, SIDEBAR_OPEN};

/// Settings shared by [`crate::LayoutManager`] and the consumers.
///
/// The numeric fields can be loaded from JSON; missing keys fall back to the
/// stock values. Logger and metrics handles are attached in code.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Widths strictly below this value force the off-canvas layout.
    pub breakpoint: u32,
    /// Extra width given to the primary panel while off canvas.
    pub sidebar_open_width: u32,
    /// Target field used on every log event the manager emits.
    pub log_target: String,
    #[serde(skip)]
    pub logger: Option<Logger>,
    #[serde(skip)]
    pub metrics: Option<Arc<Mutex<LayoutMetrics>>>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint: MIN_WIDTH,
            sidebar_open_width: SIDEBAR_OPEN,
            log_target: "layout_sync::manager".to_string(),
            logger: None,
            metrics: None,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.breakpoint == 0 {
            return Err(LayoutError::InvalidConfig(
                "breakpoint must be greater than zero".to_string(),
            ));
        }
        if self.log_target.trim().is_empty() {
            return Err(LayoutError::InvalidConfig(
                "log_target must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(LayoutMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<LayoutMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}
