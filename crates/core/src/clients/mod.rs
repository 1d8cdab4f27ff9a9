//! Clients module - domain models, services, and traits.

mod clients_model;
mod clients_service;
mod clients_traits;


pub use clients_model::{Client, ClientStatus, ClientType, ClientUpdate, NewClient};
pub(crate) use clients_model::validate_email;
pub use clients_service::ClientService;
pub use clients_traits::{ClientRepositoryTrait, ClientServiceTrait};
