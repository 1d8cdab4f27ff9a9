//! Web domain event sink implementation.

use franchise_crm_core::events::{DomainEvent, DomainEventSink};
use serde_json::json;

use crate::events::{changed_event_name, EventBus, ServerEvent};

/// Forwards domain events to connected browsers as `crm:<entity>-changed`.
///
/// Publishing on a broadcast channel never blocks, so `emit` is safe to call
/// from inside a request handler.
pub struct WebDomainEventSink {
    event_bus: EventBus,
}

impl WebDomainEventSink {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        let name = changed_event_name(event.entity_type());
        tracing::debug!("Publishing {} for {:?}", name, event.ids());
        let payload = json!({
            "ids": event.ids(),
            "mutation": event.mutation(),
        });
        self.event_bus
            .publish(ServerEvent::with_payload(name, payload));
    }
}
