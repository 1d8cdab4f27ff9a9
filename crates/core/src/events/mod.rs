//! Domain events module.
//!
//! Every create/update/delete issued through a service is reported here, so
//! the server can tell open views that their derived counts are stale.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
