//! Franchise CRM Core - Domain entities, services, and reporting.
//!
//! This crate contains the business logic for the franchise real-estate CRM:
//! clients, their markets, the properties pursued in each market, and the
//! team's users, plus the derived views built from them. It is
//! store-agnostic and defines repository traits that are implemented by the
//! `storage-sqlite` and `supabase` crates.

pub mod clients;
pub mod constants;
pub mod entity;
pub mod errors;
pub mod events;
pub mod markets;
pub mod properties;
pub mod reporting;
pub mod users;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use entity::{EntityType, Timestamped};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
