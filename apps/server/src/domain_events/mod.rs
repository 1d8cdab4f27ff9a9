//! Domain event handling for the web server.
//!
//! Core services emit a `DomainEvent` after each successful mutation. The
//! sink here republishes them on the `EventBus`, which feeds the SSE stream.

mod sink;

pub use sink::WebDomainEventSink;
