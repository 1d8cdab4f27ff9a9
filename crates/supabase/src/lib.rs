//! Hosted store for the franchise CRM, backed by a Supabase PostgREST API.
//!
//! Each repository maps one collection (`clients`, `markets`, `properties`,
//! `users`) onto REST calls. Filtering and ordering are pushed down to the
//! server with PostgREST query parameters; the returned rows deserialize
//! directly into the core domain types.

pub mod client;
pub mod errors;
mod repositories;

pub use client::{Order, PostgrestClient, Query, DEFAULT_TIMEOUT_SECS};
pub use errors::SupabaseError;
pub use repositories::{
    SupabaseClientRepository, SupabaseMarketRepository, SupabasePropertyRepository,
    SupabaseUserRepository,
};
