use franchise_crm_core::EntityType;
use serde_json::Value;
use tokio::sync::broadcast;

/// Canonical event names pushed to open views.
pub const CLIENTS_CHANGED: &str = "crm:clients-changed";
pub const MARKETS_CHANGED: &str = "crm:markets-changed";
pub const PROPERTIES_CHANGED: &str = "crm:properties-changed";
pub const USERS_CHANGED: &str = "crm:users-changed";

/// Event name announcing that a collection of the given type changed.
pub fn changed_event_name(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Client => CLIENTS_CHANGED,
        EntityType::Market => MARKETS_CHANGED,
        EntityType::Property => PROPERTIES_CHANGED,
        EntityType::User => USERS_CHANGED,
    }
}

/// Serializable envelope that carries event names and optional payloads.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    pub name: &'static str,
    pub payload: Option<Value>,
}

impl ServerEvent {
    pub fn with_payload(name: &'static str, payload: Value) -> Self {
        Self {
            name,
            payload: Some(payload),
        }
    }
}

/// Lightweight broadcast bus that fans out events to any connected clients.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ServerEvent) {
        // No subscribers is not an error.
        let _ = self.sender.send(event);
    }
}
