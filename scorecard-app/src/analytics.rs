//! Browser console analytics sink.

use scorecard_core::{Analytics, AnalyticsEvent};
use wasm_bindgen::JsValue;

use crate::js::set;

/// Logs events to the browser console with an ISO timestamp.
///
/// Stand-in for a real analytics provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAnalytics;

impl Analytics for ConsoleAnalytics {
    fn track_event(&self, event: &AnalyticsEvent) {
        let attributes = serde_json::to_string(&event.attributes)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
            .and_then(|value| js_sys::Object::try_from(&value).cloned())
            .unwrap_or_else(js_sys::Object::new);
        set(
            &attributes,
            "timestamp",
            &js_sys::Date::new_0().to_iso_string().into(),
        );

        web_sys::console::info_2(
            &JsValue::from_str(&format!("[analytics:{}]", event.name)),
            &attributes,
        );
    }
}
