//! The event record decoded off the daemon stream, plus the built-in
//! classifiers used to route it.
//!
//! Only `type` and `action` participate in routing. Everything else the
//! daemon puts on the wire is retained opaquely in [`Event::attributes`]
//! and travels with the record untouched.

use serde::Deserialize;
use serde::Serialize;

/// One decoded occurrence notification from the daemon stream.
///
/// Immutable after decode; clone freely across tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Category of the affected resource, e.g. "container"
    #[serde(rename = "type", default)]
    pub resource_type: String,

    /// What happened to the resource, e.g. "create"
    #[serde(default)]
    pub action: String,

    /// Remaining wire fields, opaque to this subsystem
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Event {
    pub fn new(
        resource_type: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Event {
            resource_type: resource_type.into(),
            action: action.into(),
            attributes: serde_json::Map::new(),
        }
    }
}

/// Built-in classifier: route by the event's resource type.
pub fn by_type(e: &Event) -> String {
    e.resource_type.clone()
}

/// Built-in classifier: route by the event's action.
pub fn by_action(e: &Event) -> String {
    e.action.clone()
}

#[cfg(test)]
mod event_test;
