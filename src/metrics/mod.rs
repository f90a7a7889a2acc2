use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Broadcast counters for a [`crate::LayoutManager`].
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    registrations: u64,
    mode_broadcasts: u64,
    width_broadcasts: u64,
    mouse_broadcasts: u64,
    deliveries: u64,
    overrides_entered: u64,
    overrides_cleared: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_registration(&mut self) {
        self.registrations = self.registrations.saturating_add(1);
    }

    pub fn record_mode_broadcast(&mut self, delivered: usize) {
        self.mode_broadcasts = self.mode_broadcasts.saturating_add(1);
        self.record_deliveries(delivered);
    }

    pub fn record_width_broadcast(&mut self, delivered: usize) {
        self.width_broadcasts = self.width_broadcasts.saturating_add(1);
        self.record_deliveries(delivered);
    }

    pub fn record_mouse_broadcast(&mut self, delivered: usize) {
        self.mouse_broadcasts = self.mouse_broadcasts.saturating_add(1);
        self.record_deliveries(delivered);
    }

    pub fn record_override_entered(&mut self) {
        self.overrides_entered = self.overrides_entered.saturating_add(1);
    }

    pub fn record_override_cleared(&mut self) {
        self.overrides_cleared = self.overrides_cleared.saturating_add(1);
    }

    fn record_deliveries(&mut self, count: usize) {
        self.deliveries = self.deliveries.saturating_add(count as u64);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            registrations: self.registrations,
            mode_broadcasts: self.mode_broadcasts,
            width_broadcasts: self.width_broadcasts,
            mouse_broadcasts: self.mouse_broadcasts,
            deliveries: self.deliveries,
            overrides_entered: self.overrides_entered,
            overrides_cleared: self.overrides_cleared,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub registrations: u64,
    pub mode_broadcasts: u64,
    pub width_broadcasts: u64,
    pub mouse_broadcasts: u64,
    pub deliveries: u64,
    pub overrides_entered: u64,
    pub overrides_cleared: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("registrations".to_string(), json!(self.registrations));
        map.insert("mode_broadcasts".to_string(), json!(self.mode_broadcasts));
        map.insert("width_broadcasts".to_string(), json!(self.width_broadcasts));
        map.insert("mouse_broadcasts".to_string(), json!(self.mouse_broadcasts));
        map.insert("deliveries".to_string(), json!(self.deliveries));
        map.insert("overrides_entered".to_string(), json!(self.overrides_entered));
        map.insert("overrides_cleared".to_string(), json!(self.overrides_cleared));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }
}
