//! SQLite storage implementation for the franchise CRM.
//!
//! This crate provides the local store using Diesel ORM with SQLite.
//! It implements the repository traits defined in `franchise-crm-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for clients, markets, properties and users
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is store-agnostic and works with traits; the hosted
//! PostgREST backend in `franchise-crm-supabase` implements the same traits.
//!
//! ```text
//!            core (domain)
//!                  │
//!        ┌─────────┴─────────┐
//!        ▼                   ▼
//! storage-sqlite        supabase
//!        │                   │
//!        ▼                   ▼
//!    SQLite DB        hosted PostgREST
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod clients;
pub mod markets;
pub mod properties;
pub mod users;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use clients::ClientRepository;
pub use markets::MarketRepository;
pub use properties::PropertyRepository;
pub use users::UserRepository;

// Re-export from franchise-crm-core for convenience
pub use franchise_crm_core::errors::{DatabaseError, Error, Result};
