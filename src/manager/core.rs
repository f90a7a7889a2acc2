use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;

use serde_json::json;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::listener::{Capabilities, Capability, DeclaredCapabilities, LayoutListener};
use crate::logging::{LogLevel, event_with_fields, json_kv};
use crate::metrics::{LayoutMetrics, MetricSnapshot};
use crate::schema::LayoutSchema;

/// Handle shared by the consumers that need to call back into the manager.
pub type SharedLayoutManager = Rc<RefCell<LayoutManager>>;

/// Identifier handed out by [`LayoutManager::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

struct ListenerEntry {
    id: ListenerId,
    name: String,
    capabilities: Capabilities,
    handle: Weak<dyn LayoutListener>,
}

/// Coordinates the layout mode across every registered subscriber.
///
/// Broadcasts are synchronous and follow registration order. The registry
/// keeps weak references: a subscriber that has been dropped is skipped and
/// pruned on the next broadcast.
pub struct LayoutManager {
    listeners: Vec<ListenerEntry>,
    next_id: u64,
    profile_schema: LayoutSchema,
    active_schema: LayoutSchema,
    window_width: u32,
    config: LayoutConfig,
    created_at: Instant,
}

impl LayoutManager {
    pub fn new(window_width: u32) -> Self {
        Self::with_config(window_width, LayoutConfig::default())
    }

    pub fn with_config(window_width: u32, config: LayoutConfig) -> Self {
        let manager = Self {
            listeners: Vec::new(),
            next_id: 0,
            profile_schema: LayoutSchema::AlwaysOpen,
            active_schema: LayoutSchema::AlwaysOpen,
            window_width,
            config,
            created_at: Instant::now(),
        };
        manager.log(
            LogLevel::Info,
            "manager_created",
            [
                json_kv("window_width", window_width),
                json_kv("breakpoint", manager.config.breakpoint),
            ],
        );
        manager
    }

    pub fn into_shared(self) -> SharedLayoutManager {
        Rc::new(RefCell::new(self))
    }

    pub fn active_schema(&self) -> LayoutSchema {
        self.active_schema
    }

    pub fn profile_schema(&self) -> LayoutSchema {
        self.profile_schema
    }

    /// Width seeded at construction, then the last width passed to
    /// [`notify_window_resize`](Self::notify_window_resize).
    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    pub fn is_overridden(&self) -> bool {
        self.active_schema != self.profile_schema
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of live subscribers.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .iter()
            .filter(|entry| entry.handle.strong_count() > 0)
            .count()
    }

    /// Append `listener` to the registry and sync it to the active schema.
    pub fn register<L>(&mut self, listener: &Rc<L>) -> ListenerId
    where
        L: LayoutListener + 'static,
    {
        let handle: Rc<dyn LayoutListener> = listener.clone();
        self.register_dyn(&handle)
    }

    pub fn register_dyn(&mut self, listener: &Rc<dyn LayoutListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        let capabilities = listener.capabilities();
        if capabilities.is_empty() {
            self.log(
                LogLevel::Warn,
                "listener_without_capabilities",
                [json_kv("listener", listener.name())],
            );
        }

        self.listeners.push(ListenerEntry {
            id,
            name: listener.name().to_string(),
            capabilities,
            handle: Rc::downgrade(listener),
        });
        self.with_metrics(LayoutMetrics::record_registration);
        self.log(
            LogLevel::Debug,
            "listener_registered",
            [
                json_kv("listener", listener.name()),
                json_kv("id", id.0),
                json_kv("capabilities", json!(capabilities.names())),
            ],
        );

        if capabilities.contains(Capability::Base) {
            listener.change_layout(self.active_schema);
        }
        id
    }

    /// Remove a subscriber. Returns `false` when the id is unknown.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|entry| entry.id != id);
        let removed = self.listeners.len() != before;
        if removed {
            self.log(
                LogLevel::Debug,
                "listener_unregistered",
                [json_kv("id", id.0)],
            );
        }
        removed
    }

    /// Explicit user selection. The only path that changes the profile schema.
    pub fn set_layout(&mut self, schema: LayoutSchema) {
        self.profile_schema = schema;
        self.log(
            LogLevel::Info,
            "layout_selected",
            [json_kv("schema", schema.as_str())],
        );
        self.apply_active(schema);
    }

    /// Apply the narrow-viewport override, then hand the raw width to every
    /// window-capable subscriber.
    pub fn notify_window_resize(&mut self, width: u32) {
        self.window_width = width;
        let breakpoint = self.config.breakpoint;

        if width < breakpoint && self.active_schema != LayoutSchema::OffCanvas {
            self.with_metrics(LayoutMetrics::record_override_entered);
            self.log(
                LogLevel::Info,
                "override_entered",
                [
                    json_kv("width", width),
                    json_kv("profile", self.profile_schema.as_str()),
                ],
            );
            self.apply_active(LayoutSchema::OffCanvas);
        } else if width >= breakpoint && self.active_schema != self.profile_schema {
            self.with_metrics(LayoutMetrics::record_override_cleared);
            self.log(
                LogLevel::Info,
                "override_cleared",
                [
                    json_kv("width", width),
                    json_kv("profile", self.profile_schema.as_str()),
                ],
            );
            self.apply_active(self.profile_schema);
        }

        let mut delivered = 0;
        let mut pruned = false;
        for entry in &self.listeners {
            if !entry.capabilities.contains(Capability::Window) {
                continue;
            }
            let Some(listener) = entry.handle.upgrade() else {
                pruned = true;
                continue;
            };
            if let Some(window) = listener.as_window_listener() {
                window.notify_resize(width);
                delivered += 1;
            }
        }
        if pruned {
            self.prune();
        }
        self.with_metrics(|metrics| metrics.record_width_broadcast(delivered));
        self.log(
            LogLevel::Debug,
            "width_broadcast",
            [json_kv("width", width), json_kv("delivered", delivered)],
        );
    }

    /// Fan a hover/toggle boolean out to every mouse-capable subscriber.
    pub fn notify_all_mouse(&mut self, in_or_out: bool) {
        let mut delivered = 0;
        let mut pruned = false;
        for entry in &self.listeners {
            if !entry.capabilities.contains(Capability::Mouse) {
                continue;
            }
            let Some(listener) = entry.handle.upgrade() else {
                pruned = true;
                continue;
            };
            if let Some(mouse) = listener.as_mouse_listener() {
                mouse.notify_mouse(in_or_out);
                delivered += 1;
            }
        }
        if pruned {
            self.prune();
        }
        self.with_metrics(|metrics| metrics.record_mouse_broadcast(delivered));
        self.log(
            LogLevel::Debug,
            "mouse_broadcast",
            [json_kv("in_or_out", in_or_out), json_kv("delivered", delivered)],
        );
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.created_at.elapsed()))
    }

    /// Log the current metrics snapshot, if both a logger and metrics are configured.
    pub fn emit_metrics(&self) -> Result<()> {
        let (Some(logger), Some(snapshot)) = (self.config.logger.as_ref(), self.metrics_snapshot())
        else {
            return Ok(());
        };
        let target = format!("{}.metrics", self.config.log_target);
        logger.log_event(snapshot.to_log_event(&target))?;
        Ok(())
    }

    fn apply_active(&mut self, schema: LayoutSchema) {
        self.active_schema = schema;

        let mut delivered = 0;
        let mut pruned = false;
        for entry in &self.listeners {
            if !entry.capabilities.contains(Capability::Base) {
                continue;
            }
            match entry.handle.upgrade() {
                Some(listener) => {
                    listener.change_layout(schema);
                    delivered += 1;
                }
                None => pruned = true,
            }
        }
        if pruned {
            self.prune();
        }
        self.with_metrics(|metrics| metrics.record_mode_broadcast(delivered));
        self.log(
            LogLevel::Debug,
            "mode_broadcast",
            [
                json_kv("schema", schema.as_str()),
                json_kv("delivered", delivered),
            ],
        );
    }

    fn prune(&mut self) {
        let before = self.listeners.len();
        self.listeners.retain(|entry| entry.handle.strong_count() > 0);
        let dropped = before - self.listeners.len();
        self.log(
            LogLevel::Debug,
            "listeners_pruned",
            [json_kv("dropped", dropped)],
        );
    }

    fn with_metrics(&self, record: impl FnOnce(&mut LayoutMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            if !logger.enabled(level) {
                return;
            }
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::error::LayoutError;
    use crate::listener::{LayoutMouseListener, LayoutWindowListener};
    use crate::logging::{LogEvent, LogSink, Logger, LoggingError, LoggingResult, MemorySink};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Seen {
        Mode(LayoutSchema),
        Width(u32),
        Mouse(bool),
    }

    struct Spy {
        capabilities: Capabilities,
        seen: RefCell<Vec<Seen>>,
    }

    impl Spy {
        fn new(caps: &[Capability]) -> Rc<Self> {
            Rc::new(Self {
                capabilities: Capabilities::of(caps),
                seen: RefCell::new(Vec::new()),
            })
        }

        fn take(&self) -> Vec<Seen> {
            self.seen.borrow_mut().drain(..).collect()
        }
    }

    impl LayoutListener for Spy {
        fn receives_layout(&self) -> bool {
            self.capabilities.contains(Capability::Base)
        }

        fn change_layout(&self, schema: LayoutSchema) {
            self.seen.borrow_mut().push(Seen::Mode(schema));
        }

        fn as_mouse_listener(&self) -> Option<&dyn LayoutMouseListener> {
            self.capabilities
                .contains(Capability::Mouse)
                .then_some(self as &dyn LayoutMouseListener)
        }

        fn as_window_listener(&self) -> Option<&dyn LayoutWindowListener> {
            self.capabilities
                .contains(Capability::Window)
                .then_some(self as &dyn LayoutWindowListener)
        }
    }

    impl LayoutMouseListener for Spy {
        fn notify_mouse(&self, in_or_out: bool) {
            self.seen.borrow_mut().push(Seen::Mouse(in_or_out));
        }
    }

    impl LayoutWindowListener for Spy {
        fn notify_resize(&self, width: u32) {
            self.seen.borrow_mut().push(Seen::Width(width));
        }
    }

    const ALL: [Capability; 3] = [Capability::Base, Capability::Window, Capability::Mouse];

    #[test]
    fn starts_always_open() {
        let manager = LayoutManager::new(1280);
        assert_eq!(manager.active_schema(), LayoutSchema::AlwaysOpen);
        assert_eq!(manager.profile_schema(), LayoutSchema::AlwaysOpen);
        assert_eq!(manager.window_width(), 1280);
        assert!(!manager.is_overridden());
    }

    #[test]
    fn register_syncs_to_active_schema() {
        let mut manager = LayoutManager::new(1280);
        manager.set_layout(LayoutSchema::AutoHide);
        let spy = Spy::new(&ALL);
        manager.register(&spy);
        assert_eq!(spy.take(), vec![Seen::Mode(LayoutSchema::AutoHide)]);
    }

    #[test]
    fn set_layout_updates_both_schemas_and_broadcasts_in_order() {
        let mut manager = LayoutManager::new(1280);
        let order = Rc::new(RefCell::new(Vec::new()));

        struct Tagged(&'static str, Rc<RefCell<Vec<&'static str>>>);
        impl LayoutListener for Tagged {
            fn change_layout(&self, _schema: LayoutSchema) {
                self.1.borrow_mut().push(self.0);
            }
        }

        let first = Rc::new(Tagged("first", order.clone()));
        let second = Rc::new(Tagged("second", order.clone()));
        manager.register(&first);
        manager.register(&second);
        order.borrow_mut().clear();

        manager.set_layout(LayoutSchema::OffCanvas);
        assert_eq!(manager.active_schema(), LayoutSchema::OffCanvas);
        assert_eq!(manager.profile_schema(), LayoutSchema::OffCanvas);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn narrow_width_overrides_without_touching_profile() {
        let mut manager = LayoutManager::new(1280);
        let spy = Spy::new(&ALL);
        manager.register(&spy);
        spy.take();

        manager.notify_window_resize(600);
        assert_eq!(
            spy.take(),
            vec![Seen::Mode(LayoutSchema::OffCanvas), Seen::Width(600)]
        );
        assert_eq!(manager.active_schema(), LayoutSchema::OffCanvas);
        assert_eq!(manager.profile_schema(), LayoutSchema::AlwaysOpen);
        assert!(manager.is_overridden());
    }

    #[test]
    fn wide_width_restores_profile() {
        let mut manager = LayoutManager::new(1280);
        manager.set_layout(LayoutSchema::AutoHide);
        let spy = Spy::new(&ALL);
        manager.register(&spy);
        manager.notify_window_resize(500);
        spy.take();

        manager.notify_window_resize(900);
        assert_eq!(
            spy.take(),
            vec![Seen::Mode(LayoutSchema::AutoHide), Seen::Width(900)]
        );
        assert_eq!(manager.active_schema(), LayoutSchema::AutoHide);
    }

    #[test]
    fn breakpoint_itself_counts_as_wide() {
        let mut manager = LayoutManager::new(1280);
        manager.notify_window_resize(767);
        assert_eq!(manager.active_schema(), LayoutSchema::OffCanvas);
        manager.notify_window_resize(768);
        assert_eq!(manager.active_schema(), LayoutSchema::AlwaysOpen);
    }

    #[test]
    fn width_broadcast_fires_without_mode_change() {
        let mut manager = LayoutManager::new(1280);
        let spy = Spy::new(&ALL);
        manager.register(&spy);
        spy.take();

        manager.notify_window_resize(1000);
        manager.notify_window_resize(1100);
        assert_eq!(spy.take(), vec![Seen::Width(1000), Seen::Width(1100)]);

        manager.notify_window_resize(400);
        manager.notify_window_resize(300);
        assert_eq!(
            spy.take(),
            vec![
                Seen::Mode(LayoutSchema::OffCanvas),
                Seen::Width(400),
                Seen::Width(300)
            ]
        );
    }

    #[test]
    fn explicit_selection_while_narrow_is_applied_then_overridden_again() {
        let mut manager = LayoutManager::new(1280);
        manager.notify_window_resize(500);
        manager.set_layout(LayoutSchema::AutoHide);
        assert_eq!(manager.active_schema(), LayoutSchema::AutoHide);

        manager.notify_window_resize(500);
        assert_eq!(manager.active_schema(), LayoutSchema::OffCanvas);
        assert_eq!(manager.profile_schema(), LayoutSchema::AutoHide);
    }

    #[test]
    fn mouse_reaches_only_mouse_capable_listeners() {
        let mut manager = LayoutManager::new(1280);
        let base_only = Spy::new(&[Capability::Base]);
        let mouse = Spy::new(&[Capability::Base, Capability::Mouse]);
        manager.register(&base_only);
        manager.register(&mouse);
        base_only.take();
        mouse.take();

        manager.notify_all_mouse(false);
        assert!(base_only.take().is_empty());
        assert_eq!(mouse.take(), vec![Seen::Mouse(false)]);
        assert_eq!(manager.active_schema(), LayoutSchema::AlwaysOpen);
    }

    #[test]
    fn window_signal_skips_listeners_without_window_capability() {
        let mut manager = LayoutManager::new(1280);
        let base_only = Spy::new(&[Capability::Base]);
        manager.register(&base_only);
        base_only.take();

        manager.notify_window_resize(1300);
        assert!(base_only.take().is_empty());
    }

    #[test]
    fn listener_without_base_capability_gets_no_mode_changes() {
        let mut manager = LayoutManager::new(1280);
        let window_only = Spy::new(&[Capability::Window]);
        manager.register(&window_only);
        manager.notify_window_resize(600);
        assert_eq!(window_only.take(), vec![Seen::Width(600)]);
    }

    #[test]
    fn dropped_listeners_are_pruned() {
        let mut manager = LayoutManager::new(1280);
        let keep = Spy::new(&ALL);
        let gone = Spy::new(&ALL);
        manager.register(&keep);
        manager.register(&gone);
        assert_eq!(manager.listener_count(), 2);

        drop(gone);
        assert_eq!(manager.listener_count(), 1);
        manager.set_layout(LayoutSchema::OffCanvas);
        assert_eq!(manager.listeners.len(), 1);
    }

    #[test]
    fn unregister_stops_delivery() {
        let mut manager = LayoutManager::new(1280);
        let spy = Spy::new(&ALL);
        let id = manager.register(&spy);
        spy.take();

        assert!(manager.unregister(id));
        assert!(!manager.unregister(id));
        manager.set_layout(LayoutSchema::AutoHide);
        assert!(spy.take().is_empty());
    }

    #[test]
    fn logs_override_transitions() {
        let sink = MemorySink::new();
        let config = LayoutConfig::default().with_logger(Logger::new(sink.clone()));
        let mut manager = LayoutManager::with_config(1280, config);
        manager.notify_window_resize(600);
        manager.notify_window_resize(800);

        let messages = sink.messages();
        assert!(messages.contains(&"override_entered".to_string()));
        assert!(messages.contains(&"override_cleared".to_string()));
        let entered = sink
            .events()
            .into_iter()
            .find(|event| event.message == "override_entered")
            .unwrap();
        assert_eq!(entered.target, "layout_sync::manager");
        assert_eq!(entered.field("width"), Some(&json!(600)));
    }

    struct HiddenMouse {
        mouse_hits: RefCell<u32>,
    }

    impl LayoutListener for HiddenMouse {
        fn change_layout(&self, _schema: LayoutSchema) {}
    }

    impl LayoutMouseListener for HiddenMouse {
        fn notify_mouse(&self, _in_or_out: bool) {
            *self.mouse_hits.borrow_mut() += 1;
        }
    }

    #[test]
    fn mouse_delivery_matches_derived_capabilities() {
        let sink = MemorySink::new();
        let mut config = LayoutConfig::default().with_logger(Logger::new(sink.clone()));
        config.enable_metrics();
        let mut manager = LayoutManager::with_config(1280, config);

        let hidden = Rc::new(HiddenMouse {
            mouse_hits: RefCell::new(0),
        });
        let exposed = Spy::new(&[Capability::Base, Capability::Mouse]);
        manager.register(&hidden);
        manager.register(&exposed);
        assert!(!hidden.capabilities().contains(Capability::Mouse));
        assert!(exposed.capabilities().contains(Capability::Mouse));

        manager.notify_all_mouse(true);
        assert_eq!(*hidden.mouse_hits.borrow(), 0);
        assert_eq!(exposed.take().last(), Some(&Seen::Mouse(true)));

        // Every listener whose set includes mouse was reached.
        let snap = manager.metrics_snapshot().unwrap();
        assert_eq!(snap.deliveries, 1);
        let registered = sink
            .events()
            .into_iter()
            .filter(|event| event.message == "listener_registered")
            .map(|event| event.field("capabilities").cloned())
            .collect::<Vec<_>>();
        assert_eq!(
            registered,
            vec![Some(json!(["base"])), Some(json!(["base", "mouse"]))]
        );
    }

    struct BrokenSink;

    impl LogSink for BrokenSink {
        fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
            Err(LoggingError::Poisoned)
        }
    }

    #[test]
    fn emit_metrics_surfaces_sink_failures() {
        let mut config = LayoutConfig::default().with_logger(Logger::new(BrokenSink));
        config.enable_metrics();
        let manager = LayoutManager::with_config(1280, config);
        let err = manager.emit_metrics().unwrap_err();
        assert!(matches!(err, LayoutError::Logging(LoggingError::Poisoned)));
    }

    #[test]
    fn emit_metrics_without_logger_is_a_no_op() {
        let mut config = LayoutConfig::default();
        config.enable_metrics();
        let manager = LayoutManager::with_config(1280, config);
        assert!(manager.emit_metrics().is_ok());
    }

    #[test]
    fn metrics_count_broadcasts() {
        let mut config = LayoutConfig::default();
        config.enable_metrics();
        let mut manager = LayoutManager::with_config(1280, config);
        let spy = Spy::new(&ALL);
        manager.register(&spy);
        manager.notify_window_resize(600);
        manager.notify_all_mouse(true);

        let snap = manager.metrics_snapshot().unwrap();
        assert_eq!(snap.registrations, 1);
        assert_eq!(snap.mode_broadcasts, 1);
        assert_eq!(snap.width_broadcasts, 1);
        assert_eq!(snap.mouse_broadcasts, 1);
        assert_eq!(snap.overrides_entered, 1);
        assert_eq!(snap.deliveries, 3);
    }

    #[test]
    fn custom_breakpoint_from_config() {
        let config = LayoutConfig {
            breakpoint: 1024,
            ..LayoutConfig::default()
        };
        let mut manager = LayoutManager::with_config(1280, config);
        manager.notify_window_resize(900);
        assert_eq!(manager.active_schema(), LayoutSchema::OffCanvas);
    }
}
