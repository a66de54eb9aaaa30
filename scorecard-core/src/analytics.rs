//! Analytics events and sinks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::request::ShareRequest;

/// Name of the event emitted for every share action.
pub const SHARE_EVENT: &str = "share";

/// A named analytics event with free-form attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event name.
    pub name: String,
    /// Event attributes.
    pub attributes: Map<String, Value>,
}

impl AnalyticsEvent {
    /// Create an event with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Map::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The `share` event: `{game, score}`.
    #[must_use]
    pub fn share(request: &ShareRequest) -> Self {
        Self::new(SHARE_EVENT)
            .with("game", request.game_name.as_str())
            .with("score", request.score)
    }
}

/// Fire-and-forget analytics sink.
///
/// Implementations must not panic and have no way to report failure.
pub trait Analytics {
    /// Record an event.
    fn track_event(&self, event: &AnalyticsEvent);
}

impl<T: Analytics + ?Sized> Analytics for &T {
    fn track_event(&self, event: &AnalyticsEvent) {
        (**self).track_event(event);
    }
}

impl<T: Analytics + ?Sized> Analytics for std::rc::Rc<T> {
    fn track_event(&self, event: &AnalyticsEvent) {
        (**self).track_event(event);
    }
}

/// Logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track_event(&self, event: &AnalyticsEvent) {
        let attributes = Value::Object(event.attributes.clone());
        tracing::info!(target: "analytics", "[analytics:{}] {}", event.name, attributes);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn track_event(&self, _event: &AnalyticsEvent) {}
}
