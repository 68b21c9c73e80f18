use serde::Serialize;
use serde_json::Value;

pub const BADGE_UPDATED: &str = "badge://updated";
pub const FAVORITES_CHANGED: &str = "favorites://changed";
pub const THEME_CHANGED: &str = "theme://changed";

/// Outbound notifications to connected clients
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &str, payload: Value);
}

pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &str, _payload: Value) {}
}

pub fn emit_event<T: Serialize>(sink: &dyn EventSink, event: &str, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => sink.emit(event, value),
        Err(e) => log::warn!("Dropping {event} event: {e}"),
    }
}
